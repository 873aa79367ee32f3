//! Shared model of a netscan run.
//!
//! * [`config`]: the validated, immutable [`config::ScanConfig`].
//! * [`network`]: CIDR parsing and host enumeration.
//! * [`scanning`]: the probing seam implemented by `netscan-core`.
//! * [`report`]: findings handed to the presentation layer.

pub mod config;
pub mod error;
pub mod network;
pub mod report;
pub mod scanning;
