//! Utility modules for error handling, configuration and display formatting

pub mod cleanup;
pub mod config;
pub mod display;
pub mod error;

// Re-export for convenience
pub use config::ServerSettings;
pub use error::TubegrabError;
