//! Observability infrastructure
//!
//! The engine logs through `tracing`; this module installs the subscriber
//! that turns those events into output.

pub mod logging;

pub use logging::init_tracing;
