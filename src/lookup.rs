//! The open → resolve → invoke → close sequence behind both exported lookups.

use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::real_libc::RealLibc;
use libc::{c_char, passwd, uid_t};
use std::ffi::CStr;
use std::fmt;
use std::mem;

type GetpwnamFn = unsafe extern "C" fn(*const c_char) -> *mut passwd;
type GetpwuidFn = unsafe extern "C" fn(uid_t) -> *mut passwd;

#[derive(Debug, Clone, Copy)]
enum Kind {
    ByName(*const c_char),
    ById(uid_t),
}

/// One intercepted lookup. Only [`Lookup::by_name`] can carry a name pointer,
/// so every `Lookup` holds either a valid string or null.
#[derive(Debug, Clone, Copy)]
pub struct Lookup(Kind);

impl Lookup {
    /// # Safety
    ///
    /// `name` must be null or point to a NUL-terminated string that stays
    /// valid for as long as the returned value is used.
    pub unsafe fn by_name(name: *const c_char) -> Self {
        Lookup(Kind::ByName(name))
    }

    pub fn by_id(uid: uid_t) -> Self {
        Lookup(Kind::ById(uid))
    }

    pub fn symbol(&self) -> &'static CStr {
        match self.0 {
            Kind::ByName(_) => c"getpwnam",
            Kind::ById(_) => c"getpwuid",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Kind::ByName(name) if name.is_null() => write!(f, "getpwnam((null)) override"),
            Kind::ByName(name) => {
                let name = unsafe { CStr::from_ptr(name) };
                write!(f, "getpwnam({}) override", name.to_string_lossy())
            }
            Kind::ById(uid) => write!(f, "getpwuid({uid}) override"),
        }
    }
}

/// Runs `lookup` against the real implementation named by `config`.
///
/// The library is opened and the symbol resolved on every call. The record
/// pointer comes back exactly as the real function returned it, null included.
/// With `config.debug` set, one line naming the lookup is written to stderr first.
pub fn forward(config: &ShimConfig, lookup: Lookup) -> Result<*mut passwd, ShimError> {
    if config.debug {
        eprintln!("{lookup}");
    }

    let real_libc = RealLibc::open(&config.library)?;
    let real = real_libc.symbol(lookup.symbol())?;

    let record = match lookup.0 {
        Kind::ByName(name) => unsafe {
            let real: GetpwnamFn = mem::transmute(real.as_ptr());
            real(name)
        },
        Kind::ById(uid) => unsafe {
            let real: GetpwuidFn = mem::transmute(real.as_ptr());
            real(uid)
        },
    };

    drop(real_libc);
    Ok(record)
}
