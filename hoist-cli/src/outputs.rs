//! Named outputs reported back to the CI runner.

use std::fs::OpenOptions;
use std::io::{self, Write};

/// Environment variable naming the runner's outputs file.
pub const OUTPUT_FILE_ENV: &str = "GITHUB_OUTPUT";

/// Record a named output for downstream workflow steps.
///
/// Appends `name=value` to the outputs file when `GITHUB_OUTPUT` is set;
/// repeated writes append, and the runner keeps the last occurrence. Without
/// an outputs file the value is only logged.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    match std::env::var(OUTPUT_FILE_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{name}={value}")
        }
        _ => {
            log::info!("output {name}={value}");
            Ok(())
        }
    }
}

#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock")
}

#[cfg(test)]
pub(crate) fn set_env(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) }
}

#[cfg(test)]
pub(crate) fn remove_env(key: &str) {
    unsafe { std::env::remove_var(key) }
}
