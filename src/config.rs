use std::env;
use std::ffi::{CStr, CString};
use std::os::unix::ffi::OsStringExt;

/// Library that holds the real `getpwnam` and `getpwuid`.
pub const LIBC_NAME: &CStr = c"libc.so.6";

/// Overrides [`LIBC_NAME`] outside of secure-execution mode.
pub const LIBRARY_ENV: &str = "GETPWHACK_LIBC";

/// `env_logger` filter for the shim's own output.
pub const LOG_ENV: &str = "GETPWHACK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    pub library : CString,
    pub debug   : bool,
}

impl Default for ShimConfig {
    fn default() -> Self {
        ShimConfig {
            library : LIBC_NAME.to_owned(),
            debug   : cfg!(feature = "debug"),
        }
    }
}

impl ShimConfig {
    /// Reads the configuration for a single call. Nothing is cached between calls.
    pub fn from_env() -> Self {
        let mut config = ShimConfig::default();
        if let Some(library) = library_override() {
            config.library = library;
        }
        config
    }
}

fn library_override() -> Option<CString> {
    if secure_execution() {
        return None;
    }

    let value = env::var_os(LIBRARY_ENV)?;
    if value.is_empty() {
        return None;
    }

    match CString::new(value.into_vec()) {
        Ok(library) => Some(library),
        Err(err) => {
            log::warn!("Ignoring {LIBRARY_ENV}: {err}");
            None
        }
    }
}

/// True for setuid/setgid and similar processes, where the environment is untrusted.
fn secure_execution() -> bool {
    unsafe { libc::getauxval(libc::AT_SECURE) != 0 }
}

/// Installs the stderr logger once per process; later calls are no-ops.
pub fn init_logging() {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "warn");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
