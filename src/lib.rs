pub mod config;
pub mod logging;

// Core modules
pub mod backoff;
pub mod handle;
pub mod invoke;
pub mod metrics;
pub mod shutdown;
pub mod summary;
pub mod transport;
