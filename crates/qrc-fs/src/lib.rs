//! Filesystem abstraction for the Qt resource checker
//!
//! Provides normalized path handling, text reads that carry the failing
//! path, and format-agnostic configuration loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
