//! Given and When step definitions for configuration BDD tests.

use std::collections::HashMap;
use std::sync::Arc;

use axionbot::config::{ConfigLoader, DotenvParser};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mockable::MockEnv;
use rstest_bdd_macros::{given, when};

use super::state::{ConfigState, StepResult};

/// Creates a `MockEnv` serving `vars` and `None` for everything else.
fn mock_env(vars: Vec<(String, String)>) -> MockEnv {
    let lookup: HashMap<String, String> = vars.into_iter().collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .returning(move |key| lookup.get(key).cloned());
    env
}

fn dir_path(state: &ConfigState) -> StepResult<Utf8PathBuf> {
    state
        .dir_path
        .get()
        .ok_or_else(|| String::from("working directory should be set"))
}

fn write_file(state: &ConfigState, name: &str, content: &[u8]) -> StepResult<()> {
    let path = dir_path(state)?;
    let dir = Dir::open_ambient_dir(&path, ambient_authority())
        .map_err(|e| format!("should open temp dir: {e}"))?;
    dir.write(name, content)
        .map_err(|e| format!("should write {name}: {e}"))
}

#[given("an empty working directory")]
fn empty_working_directory(config_state: &ConfigState) -> StepResult<()> {
    let tmp = tempfile::tempdir().map_err(|e| format!("should create temp dir: {e}"))?;
    let path = Utf8Path::from_path(tmp.path())
        .ok_or_else(|| String::from("temp dir path should be UTF-8"))?
        .to_owned();
    config_state.temp_dir.set(Arc::new(tmp));
    config_state.dir_path.set(path);
    Ok(())
}

#[given("a {name} file containing {entry}")]
fn env_file_containing(config_state: &ConfigState, name: String, entry: String) -> StepResult<()> {
    write_file(config_state, &name, format!("{entry}\n").as_bytes())
}

#[given("a .env file with a malformed line after {entry}")]
fn env_file_with_malformed_line(config_state: &ConfigState, entry: String) -> StepResult<()> {
    let content = format!("{entry}\nthis line is not dotenv\n");
    write_file(config_state, ".env", content.as_bytes())
}

#[given("a .env file with invalid UTF-8 after {entry}")]
fn env_file_with_invalid_utf8(config_state: &ConfigState, entry: String) -> StepResult<()> {
    let mut content = format!("{entry}\n").into_bytes();
    content.extend_from_slice(b"DEVICE=\xff\n");
    write_file(config_state, ".env", &content)
}

#[given("the environment variable {key} is set to {value}")]
#[expect(
    clippy::unnecessary_wraps,
    reason = "rstest-bdd step functions must return StepResult"
)]
fn env_var_is_set(config_state: &ConfigState, key: String, value: String) -> StepResult<()> {
    let mut vars = config_state.env_vars.get().unwrap_or_default();
    vars.push((key, value));
    config_state.env_vars.set(vars);
    Ok(())
}

#[when("the configuration is loaded")]
fn configuration_is_loaded(config_state: &ConfigState) -> StepResult<()> {
    let dir = dir_path(config_state)?;
    let env = mock_env(config_state.env_vars.get().unwrap_or_default());
    let config = ConfigLoader::new(&env, DotenvParser)
        .with_search_dir(dir)
        .load(None);
    config_state.config.set(config);
    Ok(())
}
