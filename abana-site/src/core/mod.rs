//! Configuration and wiring
//!
//! - [`Config`] - environment configuration
//! - [`SiteState`] - shared handles every component is built from

pub mod config;
pub mod state;

pub use config::Config;
pub use state::SiteState;
