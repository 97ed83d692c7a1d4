//! DevOps lab demo web service.
//!
//! A small HTTP service used in DevOps teaching labs: a handful of JSON
//! endpoints instrumented with Prometheus counters and latency histograms.
//! Every request is additionally stretched by a uniformly random artificial
//! delay so that dashboards, alerts and profiling exercises built on top of
//! this service have something visible to work with.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types and the HTTP error boundary
//! - [`calc`]: Arithmetic behind the `/calculate` endpoint
//! - [`metrics`]: Prometheus metric names and recording helpers
//! - [`api`]: HTTP routes, handlers and request middleware
//! - [`utils`]: Utility functions

pub mod api;
pub mod calc;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
