//! Typed facade over the telematics actions
//!
//! One method per remote action. Each call builds the action's query
//! parameters, issues a single GET through the [`Transport`], and
//! normalizes the payload into the shape the action is known to produce.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::instrument;

use crate::action::{Action, Shape};
use crate::config::TelematicsConfig;
use crate::error::Error;
use crate::models::{DataTable, Normalized};
use crate::transport::Transport;

/// Trait for telematics clients
///
/// All methods are independent, stateless calls; no caching, retrying or
/// rate limiting happens on this side of the wire.
#[async_trait]
pub trait TelematicsClient: Send + Sync {
    /// All master lines of the network
    async fn master_lines(&self) -> Result<DataTable, Error>;

    /// Name of a master line
    async fn master_line_name(&self, ml_code: u32) -> Result<DataTable, Error>;

    /// All lines together with their master-line info
    async fn lines_with_master_line_info(&self) -> Result<DataTable, Error>;

    /// Lines and routes for a master line and line
    ///
    /// The remote service has never been observed to populate this action;
    /// it answers `null`, which surfaces here as an empty table.
    async fn lines_and_routes_for_master_line_and_line(
        &self,
        ml_code: u32,
        line_code: u32,
    ) -> Result<DataTable, Error>;

    /// All lines of the network
    async fn lines(&self) -> Result<DataTable, Error>;

    /// Name of a line
    async fn line_name(&self, line_code: u32) -> Result<DataTable, Error>;

    /// Schedule-day categories of a master line
    async fn schedule_days_master_line(&self, line_code: u32) -> Result<DataTable, Error>;

    /// Daily schedule of a line, split into `come` and `go` directions
    async fn daily_schedule(&self, line_code: u32) -> Result<BTreeMap<String, DataTable>, Error>;

    /// Scheduled departures for a master line, schedule-day and line,
    /// split into `come` and `go` directions
    async fn sched_lines(
        &self,
        ml_code: u32,
        sdc_code: u32,
        line_code: u32,
    ) -> Result<BTreeMap<String, DataTable>, Error>;

    /// Routes of a line
    async fn routes(&self, line_code: u32) -> Result<DataTable, Error>;

    /// Routes of a line (non-web variant)
    async fn routes_for_line(&self, line_code: u32) -> Result<DataTable, Error>;

    /// Name of a route
    async fn route_name(&self, route_code: u32) -> Result<DataTable, Error>;

    /// Route details and its stops, split into `details` and `stops`
    async fn route_details_and_stops(
        &self,
        route_code: u32,
    ) -> Result<BTreeMap<String, DataTable>, Error>;

    /// Details of a route
    async fn route_details(&self, route_code: u32) -> Result<DataTable, Error>;

    /// Stops of a route
    async fn stops(&self, route_code: u32) -> Result<DataTable, Error>;

    /// Routes serving a stop
    async fn routes_for_stop(&self, stop_code: u32) -> Result<DataTable, Error>;

    /// Name and coordinates of a stop
    async fn stop_name_and_xy(&self, stop_code: u32) -> Result<DataTable, Error>;

    /// Stops closest to a coordinate pair (longitude first, as the service
    /// expects)
    async fn closest_stops(&self, longitude: f64, latitude: f64) -> Result<DataTable, Error>;

    /// Live arrival estimates for a stop
    async fn stop_arrivals(&self, stop_code: u32) -> Result<DataTable, Error>;

    /// Live bus positions on a route
    async fn bus_location(&self, route_code: u32) -> Result<DataTable, Error>;
}

/// Client for the OASA telematics service
#[derive(Debug)]
pub struct OasaTelematicsClient {
    transport: Transport,
}

impl OasaTelematicsClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TelematicsConfig) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Issue one action and normalize its payload
    async fn call(&self, action: Action, values: &[String]) -> Result<Normalized, Error> {
        debug_assert_eq!(values.len(), action.param_names().len());

        let mut params: Vec<(&str, String)> = Vec::with_capacity(values.len() + 1);
        params.push(("act", action.act().to_string()));
        for (name, value) in action.param_names().iter().copied().zip(values) {
            params.push((name, value.clone()));
        }

        let outcome = self.transport.get(&params).await?;
        outcome.normalize()
    }

    async fn table(&self, action: Action, values: &[String]) -> Result<DataTable, Error> {
        debug_assert_eq!(action.shape(), Shape::Flat);
        self.call(action, values).await?.into_table()
    }

    async fn grouped(
        &self,
        action: Action,
        values: &[String],
    ) -> Result<BTreeMap<String, DataTable>, Error> {
        debug_assert_eq!(action.shape(), Shape::Grouped);
        self.call(action, values).await?.into_grouped()
    }
}

#[async_trait]
impl TelematicsClient for OasaTelematicsClient {
    #[instrument(skip(self))]
    async fn master_lines(&self) -> Result<DataTable, Error> {
        self.table(Action::MasterLines, &[]).await
    }

    #[instrument(skip(self))]
    async fn master_line_name(&self, ml_code: u32) -> Result<DataTable, Error> {
        self.table(Action::MasterLineName, &[ml_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn lines_with_master_line_info(&self) -> Result<DataTable, Error> {
        self.table(Action::LinesWithMasterLineInfo, &[]).await
    }

    #[instrument(skip(self))]
    async fn lines_and_routes_for_master_line_and_line(
        &self,
        ml_code: u32,
        line_code: u32,
    ) -> Result<DataTable, Error> {
        self.table(
            Action::LinesAndRoutesForMasterLineAndLine,
            &[ml_code.to_string(), line_code.to_string()],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn lines(&self) -> Result<DataTable, Error> {
        self.table(Action::Lines, &[]).await
    }

    #[instrument(skip(self))]
    async fn line_name(&self, line_code: u32) -> Result<DataTable, Error> {
        self.table(Action::LineName, &[line_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn schedule_days_master_line(&self, line_code: u32) -> Result<DataTable, Error> {
        self.table(Action::ScheduleDaysMasterLine, &[line_code.to_string()])
            .await
    }

    #[instrument(skip(self))]
    async fn daily_schedule(&self, line_code: u32) -> Result<BTreeMap<String, DataTable>, Error> {
        self.grouped(Action::DailySchedule, &[line_code.to_string()])
            .await
    }

    #[instrument(skip(self))]
    async fn sched_lines(
        &self,
        ml_code: u32,
        sdc_code: u32,
        line_code: u32,
    ) -> Result<BTreeMap<String, DataTable>, Error> {
        self.grouped(
            Action::SchedLines,
            &[
                ml_code.to_string(),
                sdc_code.to_string(),
                line_code.to_string(),
            ],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn routes(&self, line_code: u32) -> Result<DataTable, Error> {
        self.table(Action::Routes, &[line_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn routes_for_line(&self, line_code: u32) -> Result<DataTable, Error> {
        self.table(Action::RoutesForLine, &[line_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn route_name(&self, route_code: u32) -> Result<DataTable, Error> {
        self.table(Action::RouteName, &[route_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn route_details_and_stops(
        &self,
        route_code: u32,
    ) -> Result<BTreeMap<String, DataTable>, Error> {
        self.grouped(Action::RouteDetailsAndStops, &[route_code.to_string()])
            .await
    }

    #[instrument(skip(self))]
    async fn route_details(&self, route_code: u32) -> Result<DataTable, Error> {
        self.table(Action::RouteDetails, &[route_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn stops(&self, route_code: u32) -> Result<DataTable, Error> {
        self.table(Action::Stops, &[route_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn routes_for_stop(&self, stop_code: u32) -> Result<DataTable, Error> {
        self.table(Action::RoutesForStop, &[stop_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn stop_name_and_xy(&self, stop_code: u32) -> Result<DataTable, Error> {
        self.table(Action::StopNameAndXy, &[stop_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn closest_stops(&self, longitude: f64, latitude: f64) -> Result<DataTable, Error> {
        self.table(
            Action::ClosestStops,
            &[longitude.to_string(), latitude.to_string()],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn stop_arrivals(&self, stop_code: u32) -> Result<DataTable, Error> {
        self.table(Action::StopArrivals, &[stop_code.to_string()]).await
    }

    #[instrument(skip(self))]
    async fn bus_location(&self, route_code: u32) -> Result<DataTable, Error> {
        self.table(Action::BusLocation, &[route_code.to_string()]).await
    }
}
