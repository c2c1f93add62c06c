//! Test support shared by the league crate's unit and integration tests:
//! one-shot logging initialization and unique id generation.

pub mod logging;
pub mod unique_helpers;
