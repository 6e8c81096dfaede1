//! Command implementations for qrc-cli

pub mod scan;

pub use scan::run_scan;
