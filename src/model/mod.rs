//! Wire types shared with the Lightkeeper service
//!
//! Pages are owned by the service; this crate only ever holds a cached copy.
//! Audit records are immutable and produced by the service's audit runner.

pub mod audit;
pub mod page;

pub use audit::{
    parse_timestamp, AuditRecord, MetricMap, MetricValue, RunFilter, RunResult, ServiceMessage,
};
pub use page::{DeviceType, NewPage, Page, PageUpdate};
