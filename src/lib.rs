//! `LD_PRELOAD` shim for the passwd lookups of a running process.
//!
//! ```text
//! LD_PRELOAD=/path/to/libgetpwhack.so sshd -D
//! ```
//!
//! `getpwnam` and `getpwuid` are forwarded unchanged to the real C library.
//! Build with `--features debug` to print one stderr line per intercepted call.

pub mod config;
pub mod error;
pub mod lookup;
pub mod real_libc;

use crate::config::ShimConfig;
use crate::error::or_exit;
use crate::lookup::{forward, Lookup};
use libc::{c_char, passwd, uid_t};

/// # Safety
///
/// `name` must be null or a valid NUL-terminated string, as for `getpwnam(3)`.
#[no_mangle]
pub unsafe extern "C" fn getpwnam(name: *const c_char) -> *mut passwd {
    config::init_logging();
    or_exit(forward(&ShimConfig::from_env(), Lookup::by_name(name)))
}

#[no_mangle]
pub extern "C" fn getpwuid(uid: uid_t) -> *mut passwd {
    config::init_logging();
    or_exit(forward(&ShimConfig::from_env(), Lookup::by_id(uid)))
}
