//! Error handling for the league engine.

pub mod domain;

pub use domain::{DomainError, DomainResultExt};
