//! Utility modules for the API layer

pub mod logging;
