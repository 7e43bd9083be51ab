//! Employee records served by the card service.
//!
//! The directory is built once at startup and is read-only afterwards.

pub mod directory;
pub mod employees;
pub mod language;

pub use directory::{Directory, DirectoryError};
pub use employees::{Employee, Localized};
pub use language::Language;
