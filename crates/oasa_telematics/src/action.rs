//! The closed set of remote actions
//!
//! The service selects its operation from the `act` query parameter.
//! Modeling the action set as an enum keeps the `act` strings, parameter
//! names and result shapes in one table instead of scattered across the
//! facade methods.

/// Result shape an action is known to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// A flat record list
    Flat,
    /// A map of record lists (`{come, go}` or `{details, stops}`)
    Grouped,
}

/// One remote operation of the telematics endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Action {
    MasterLines,
    MasterLineName,
    LinesWithMasterLineInfo,
    LinesAndRoutesForMasterLineAndLine,
    Lines,
    LineName,
    ScheduleDaysMasterLine,
    DailySchedule,
    SchedLines,
    Routes,
    RoutesForLine,
    RouteName,
    RouteDetailsAndStops,
    RouteDetails,
    Stops,
    RoutesForStop,
    StopNameAndXy,
    ClosestStops,
    StopArrivals,
    BusLocation,
}

impl Action {
    pub(crate) const ALL: [Self; 20] = [
        Self::MasterLines,
        Self::MasterLineName,
        Self::LinesWithMasterLineInfo,
        Self::LinesAndRoutesForMasterLineAndLine,
        Self::Lines,
        Self::LineName,
        Self::ScheduleDaysMasterLine,
        Self::DailySchedule,
        Self::SchedLines,
        Self::Routes,
        Self::RoutesForLine,
        Self::RouteName,
        Self::RouteDetailsAndStops,
        Self::RouteDetails,
        Self::Stops,
        Self::RoutesForStop,
        Self::StopNameAndXy,
        Self::ClosestStops,
        Self::StopArrivals,
        Self::BusLocation,
    ];

    /// Value of the `act` query parameter
    pub(crate) const fn act(self) -> &'static str {
        match self {
            Self::MasterLines => "webGetMasterLines",
            Self::MasterLineName => "getMLName",
            Self::LinesWithMasterLineInfo => "webGetLinesWithMLInfo",
            Self::LinesAndRoutesForMasterLineAndLine => "getLinesAndRoutesForMlandLCode",
            Self::Lines => "webGetLines",
            Self::LineName => "getLineName",
            Self::ScheduleDaysMasterLine => "getScheduleDaysMasterline",
            Self::DailySchedule => "getDailySchedule",
            Self::SchedLines => "getSchedLines",
            Self::Routes => "webGetRoutes",
            Self::RoutesForLine => "getRoutesForLine",
            Self::RouteName => "getRouteName",
            Self::RouteDetailsAndStops => "webGetRoutesDetailsAndStops",
            Self::RouteDetails => "webRouteDetails",
            Self::Stops => "webGetStops",
            Self::RoutesForStop => "webRoutesForStop",
            Self::StopNameAndXy => "getStopNameAndXY",
            Self::ClosestStops => "getClosestStops",
            Self::StopArrivals => "getStopArrivals",
            Self::BusLocation => "getBusLocation",
        }
    }

    /// Names of the action's query parameters, in call order
    ///
    /// Most actions take positional `p1`..`p3` parameters; `getDailySchedule`
    /// takes a named `line_code` instead.
    pub(crate) const fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::MasterLines | Self::LinesWithMasterLineInfo | Self::Lines => &[],
            Self::MasterLineName
            | Self::LineName
            | Self::ScheduleDaysMasterLine
            | Self::Routes
            | Self::RoutesForLine
            | Self::RouteName
            | Self::RouteDetailsAndStops
            | Self::RouteDetails
            | Self::Stops
            | Self::RoutesForStop
            | Self::StopNameAndXy
            | Self::StopArrivals
            | Self::BusLocation => &["p1"],
            Self::LinesAndRoutesForMasterLineAndLine | Self::ClosestStops => &["p1", "p2"],
            Self::SchedLines => &["p1", "p2", "p3"],
            Self::DailySchedule => &["line_code"],
        }
    }

    /// Result shape the action is known to produce
    pub(crate) const fn shape(self) -> Shape {
        match self {
            Self::DailySchedule | Self::SchedLines | Self::RouteDetailsAndStops => Shape::Grouped,
            _ => Shape::Flat,
        }
    }
}
