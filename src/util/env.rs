use anyhow::{anyhow, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

static LOAD_ENV: OnceLock<()> = OnceLock::new();

/// Loads environment variables from `.env` files, once per process.
///
/// Files are read in this order, a variable keeps the first value it gets:
/// 1. `.env`
/// 2. `.env.dev` in debug builds, `.env.prod` in release builds
/// 3. `.env.local`
pub fn load_dotenv() {
    LOAD_ENV.get_or_init(|| {
        dotenv().ok();

        let env_file = if cfg!(debug_assertions) { ".env.dev" } else { ".env.prod" };

        if Path::new(env_file).exists() {
            dotenvy::from_filename(env_file).ok();
        }

        if Path::new(".env.local").exists() {
            dotenvy::from_filename(".env.local").ok();
        }
    });
}

/// Retrieves a value from an environment variable and parses it into type `T`.
/// If the variable is not set, returns `default`. If parsing fails, returns an error.
pub fn get_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Debug,
{
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|_| anyhow!("Failed to parse {} env var", key)),
        Err(_) => Ok(default),
    }
}

/// Retrieves a comma separated list from an environment variable.
/// If the variable is not set, returns `default`. If any item fails to parse, returns an error.
pub fn get_vec_from_env_or<T>(key: &str, default: Vec<T>) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .split(',')
            .map(|s| {
                s.trim()
                    .parse()
                    .with_context(|| format!("Failed to parse {} env var", key))
            })
            .collect(),
        Err(_) => Ok(default),
    }
}

/// Retrieves a `bool` from an environment variable.
/// Recognizes `"true"`, `"1"`, `"yes"`, `"on"` as `true`; `"false"`, `"0"`, `"no"`, `"off"` as `false`.
pub fn get_bool_from_env_or(key: &str, default: bool) -> Result<bool> {
    match env::var(key) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(anyhow!("Failed to parse {} env var as `bool`", key)),
        },
        Err(_) => Ok(default),
    }
}
