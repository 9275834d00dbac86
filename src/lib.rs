pub mod cli;
pub mod config;
pub mod geocode;
pub mod logger;
pub mod map;
pub mod number;
pub mod plan;
pub mod poller;
pub mod record;
pub mod sources;
pub mod tracker;

pub use number::{InvalidNumberError, PhoneIdentifier};
pub use record::{Coordinates, TrackedRecord};
pub use tracker::Tracker;
