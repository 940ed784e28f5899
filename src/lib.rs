//! # Clipcast Console Library
//!
//! This library provides the building blocks for the Clipcast console, a
//! terminal client for the content-repurposing API: typed models, the REST
//! client, the job poller, workflow-run projection, and per-view state.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod poller;
pub mod projection;
pub mod telemetry;
pub mod views;
