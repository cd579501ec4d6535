use crate::error::ShimError;
use std::ffi::{c_void, CStr};
use std::ptr::NonNull;

/// An open `dlopen` handle on the library holding the real lookups.
///
/// The handle is closed when the value is dropped, so a resolved symbol must
/// not be called after its `RealLibc` goes out of scope.
pub struct RealLibc<'a> {
    handle  : NonNull<c_void>,
    library : &'a CStr,
}

fn last_dl_error() -> String {
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        return String::from("unknown error");
    }
    unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
}

impl<'a> RealLibc<'a> {
    pub fn open(library: &'a CStr) -> Result<Self, ShimError> {
        let handle = unsafe { libc::dlopen(library.as_ptr(), libc::RTLD_LAZY) };
        match NonNull::new(handle) {
            Some(handle) => Ok(RealLibc { handle, library }),
            None => Err(ShimError::LibraryNotFound {
                library : library.to_string_lossy().into_owned(),
                reason  : last_dl_error(),
            }),
        }
    }

    /// Address of `symbol` inside this library or its dependencies.
    pub fn symbol(&self, symbol: &CStr) -> Result<NonNull<c_void>, ShimError> {
        let address = unsafe { libc::dlsym(self.handle.as_ptr(), symbol.as_ptr()) };
        NonNull::new(address).ok_or_else(|| ShimError::SymbolNotFound {
            symbol  : symbol.to_string_lossy().into_owned(),
            library : self.library.to_string_lossy().into_owned(),
        })
    }
}

impl Drop for RealLibc<'_> {
    fn drop(&mut self) {
        if unsafe { libc::dlclose(self.handle.as_ptr()) } != 0 {
            log::warn!("dlclose({}) failed: {}", self.library.to_string_lossy(), last_dl_error());
        }
    }
}
