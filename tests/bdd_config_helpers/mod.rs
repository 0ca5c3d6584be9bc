//! Behavioural step helpers for configuration scenarios.

mod assertions;
mod steps;

pub use state::{ConfigState, config_state};
