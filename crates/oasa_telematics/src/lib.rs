//! Typed client for the OASA telematics API
//!
//! Exposes the [OASA](https://www.oasa.gr) public-transport telematics
//! service (`telematics.oasa.gr`) as one typed method per remote action.
//!
//! # Architecture
//!
//! Three layers, leaves first. [`Transport`] issues exactly one HTTP
//! request per call against the fixed endpoint and classifies failures
//! into [`Error`] variants. The resulting [`Outcome`] carries the status,
//! reason phrase and raw JSON payload, and offers one normalization
//! operation that reshapes the service's heterogeneous responses (flat
//! lists, `{come, go}`-style maps) into uniform [`DataTable`]s.
//! [`TelematicsClient`] is the facade on top: one method per action,
//! implemented by [`OasaTelematicsClient`].
//!
//! # Example
//!
//! ```rust,ignore
//! use oasa_telematics::{OasaTelematicsClient, TelematicsClient, TelematicsConfig};
//!
//! let config = TelematicsConfig::default();
//! let client = OasaTelematicsClient::new(&config)?;
//!
//! let arrivals = client.stop_arrivals(60991).await?;
//! for row in arrivals.rows() {
//!     println!("{row:?}");
//! }
//! ```

mod action;
mod client;
mod config;
mod error;
mod models;
mod transport;

pub use client::{OasaTelematicsClient, TelematicsClient};
pub use config::TelematicsConfig;
pub use error::Error;
pub use models::{DataTable, Normalized, Outcome};
pub use transport::{HttpMethod, Transport};
