//! Infrastructure adapters and runtime bootstrap.

pub mod credentials;
pub mod error;
pub mod http;
pub(crate) mod lock;
pub mod telemetry;
pub mod uploads;
