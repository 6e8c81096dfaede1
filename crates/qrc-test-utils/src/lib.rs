//! Shared test utilities for the qrc-checker workspace.
//!
//! This crate provides standardised project fixtures to eliminate
//! duplication across crate test suites. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`](project::TestProject) builder for Qt-style project trees

pub mod project;

pub use project::{TestProject, qrc};
