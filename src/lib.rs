//! Lightkeeper - website performance monitoring dashboard
//!
//! Client side of the Lightkeeper audit service: manage the pages it
//! monitors, trigger on-demand Lighthouse audits, and chart audit history
//! in the terminal.

pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod trends;
