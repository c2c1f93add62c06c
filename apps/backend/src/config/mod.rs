//! Environment-driven configuration.

pub mod db;
pub mod league;

use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable '{name}' is not set")]
    Missing { name: &'static str },
    #[error("environment variable '{name}' has an invalid value: '{value}'")]
    Invalid { name: &'static str, value: String },
}

impl From<ConfigError> for DomainError {
    fn from(e: ConfigError) -> Self {
        DomainError::infra(InfraErrorKind::Other("Config".into()), e.to_string())
    }
}
