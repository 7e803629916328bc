// tablewatch-api: Async client for the Resy-compatible reservation API

pub mod availability;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use availability::{
    AvailabilityChecker, AvailabilityQuery, AvailabilityReport, TimeSlot, TimeWindow, Venue,
    VenueAvailability, VenueWarning,
};
pub use client::{DEFAULT_BASE_URL, ResyClient};
pub use error::Error;
pub use transport::TransportConfig;
