//! Library entrypoint for fwdoctor.
//!
//! The primary interface is the `fwdoctor` binary. This lib target exists
//! to expose internal modules to integration tests.

pub mod cmake;
pub mod config;
pub mod exec;
pub mod project;
pub mod report;
pub mod toolchain;
