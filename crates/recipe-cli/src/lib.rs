//! CLI library components for the grid recipe tooling.

pub mod logging;
