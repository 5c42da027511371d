pub mod auth;
pub mod dataset;
pub mod db;
pub mod error;
pub mod logging;
pub mod muscle;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use tracker::Tracker;
