//! Then step definitions for configuration BDD tests.

use axionbot::config::BotConfig;
use axionbot::error::ConfigError;
use rstest_bdd_macros::then;

use super::state::{ConfigState, StepResult, loaded_config};

#[then("the build step is enabled")]
fn build_step_enabled(config_state: &ConfigState) -> StepResult<()> {
    if loaded_config(config_state)?.run_build {
        Ok(())
    } else {
        Err(String::from("expected RUN_BUILD to be enabled"))
    }
}

#[then("the build step is disabled")]
fn build_step_disabled(config_state: &ConfigState) -> StepResult<()> {
    if loaded_config(config_state)?.run_build {
        Err(String::from("expected RUN_BUILD to be disabled"))
    } else {
        Ok(())
    }
}

#[then("the device is {expected}")]
fn device_is(config_state: &ConfigState, expected: String) -> StepResult<()> {
    let device = loaded_config(config_state)?.device;
    if device == expected {
        Ok(())
    } else {
        Err(format!("expected device '{expected}', got '{device}'"))
    }
}

#[then("the environment file is {expected}")]
fn env_file_is(config_state: &ConfigState, expected: String) -> StepResult<()> {
    let env_file = loaded_config(config_state)?.env_file;
    if env_file.file_name() == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(format!("expected environment file '{expected}', got '{env_file}'"))
    }
}

#[then("the thread count keeps its default")]
fn thread_count_is_default(config_state: &ConfigState) -> StepResult<()> {
    let threads = loaded_config(config_state)?.threads;
    let expected = BotConfig::default().threads;
    if threads == expected {
        Ok(())
    } else {
        Err(format!("expected default thread count {expected}, got {threads}"))
    }
}

#[then("the thread count is {expected}")]
fn thread_count_is(config_state: &ConfigState, expected: i64) -> StepResult<()> {
    let threads = loaded_config(config_state)?.threads;
    if threads == expected {
        Ok(())
    } else {
        Err(format!("expected thread count {expected}, got {threads}"))
    }
}

#[then("the script environment has {count} entries")]
fn script_env_has_entries(config_state: &ConfigState, count: usize) -> StepResult<()> {
    let env = loaded_config(config_state)?.script_env();
    if env.len() == count {
        Ok(())
    } else {
        Err(format!("expected {count} script variables, got {}", env.len()))
    }
}

#[then("the script environment maps {key} to {expected}")]
fn script_env_maps(config_state: &ConfigState, key: String, expected: String) -> StepResult<()> {
    let env = loaded_config(config_state)?.script_env();
    match env.get(&key) {
        Some(value) if *value == expected => Ok(()),
        Some(value) => Err(format!("expected {key}={expected}, got {key}={value}")),
        None => Err(format!("expected {key} in the script environment")),
    }
}

#[then("looking up {key} fails with an unknown field error")]
fn lookup_fails(config_state: &ConfigState, key: String) -> StepResult<()> {
    match loaded_config(config_state)?.get(&key) {
        Err(ConfigError::UnknownField { field }) if field == key => Ok(()),
        Err(other) => Err(format!("expected UnknownField for {key}, got: {other}")),
        Ok(value) => Err(format!("expected lookup of {key} to fail, got '{value}'")),
    }
}
