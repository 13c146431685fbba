//! Shared wire types for the scale dashboard.
//!
//! This crate provides the types exchanged between the load-cell device
//! and the web client. All types are WASM-compatible and carry the exact
//! field names the device uses on the wire (`lastUpdate`, `localTime`,
//! `isoString`).
//!
//! # Architecture
//!
//! - `readings` - sensor payloads (`Reading`, `StreamEvent`)
//! - `time_report` - the browser clock report posted back to the device
//!
//! The device firmware stringifies numeric JSON fields, so all numeric
//! wire fields accept either a JSON number or a numeric string.

mod readings;
mod time_report;

pub use readings::*;
pub use time_report::*;
