pub mod client;
pub mod config;
pub mod model;
// Re-export commonly used types
pub use client::{LaunchpadClient, LaunchpadError};
pub use config::LaunchpadConfig;
pub use model::token::{ListResponse, RawTimestamp, RawToken};
