//! Infrastructure layer - database bootstrap and error translation.

pub mod db;
pub mod db_errors;
