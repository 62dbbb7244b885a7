// src/error.rs

//! Structured errors for failing SDL calls.
//!
//! SDL reports failures out of band: a call returns a negative code or a
//! null pointer, and the message lives in a process-wide error slot read
//! with `SDL_GetError`. The helpers here turn that protocol into
//! `SdlResult` values that carry both the message and the name of the
//! failing call.

use std::ffi::CStr;
use std::sync::Mutex;

use libc::c_int;
use log::warn;
use once_cell::sync::Lazy;
use sdl2_sys as sys;
use thiserror::Error;

/// Result alias used by every fallible wrapper operation.
pub type SdlResult<T> = Result<T, SdlError>;

/// An error reported by SDL, with the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{context}: {message}")]
pub struct SdlError {
    message: String,
    context: &'static str,
}

impl SdlError {
    /// The human-readable message SDL reported.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The name of the SDL call that failed.
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Builds an error detected on our side of the FFI boundary, before
    /// the SDL call was made.
    pub(crate) fn invalid_input(context: &'static str, message: impl Into<String>) -> Self {
        SdlError {
            message: message.into(),
            context,
        }
    }
}

/// Serializes access to SDL's global error slot.
///
/// The slot is a single global, not thread-local in general, so the
/// read-then-clear sequence below must not interleave between threads.
static ERROR_SLOT: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Reads the current error message without clearing the slot.
///
/// Returns `None` when no error has been reported since the last clear.
pub fn last_message() -> Option<String> {
    let _guard = ERROR_SLOT.lock().unwrap();
    read_slot()
}

/// Takes the current error for `context`, clearing the slot.
///
/// Falls back to a generic message if the slot is empty, which would
/// mean SDL signalled a failure code without recording why.
pub(crate) fn take_last(context: &'static str) -> SdlError {
    let _guard = ERROR_SLOT.lock().unwrap();
    let message = read_slot().unwrap_or_else(|| {
        warn!("{} failed but SDL reported no error message", context);
        "unknown SDL error".to_owned()
    });
    // SAFETY: SDL_ClearError only resets the error slot; safe to call at
    // any time, including before SDL_Init.
    unsafe { sys::SDL_ClearError() };
    SdlError { message, context }
}

fn read_slot() -> Option<String> {
    // SAFETY: SDL_GetError is safe to call at any time and returns a
    // pointer to a static buffer, never null; it holds the empty string
    // when no error is pending. The buffer is only valid until the next
    // SDL call, so copy it out immediately.
    let c_str = unsafe {
        let ptr = sys::SDL_GetError();
        if ptr.is_null() {
            return None;
        }
        CStr::from_ptr(ptr)
    };
    let message = c_str.to_string_lossy();
    if message.is_empty() {
        None
    } else {
        Some(message.into_owned())
    }
}

/// Converts an SDL status code into a result.
///
/// SDL signals failure with a negative return; zero and positive values
/// are success.
#[inline]
pub(crate) fn check_code(code: c_int, context: &'static str) -> SdlResult<()> {
    if code >= 0 {
        Ok(())
    } else {
        Err(take_last(context))
    }
}

/// Converts a pointer-returning SDL call into a result.
#[inline]
pub(crate) fn check_ptr<T>(ptr: *mut T, context: &'static str) -> SdlResult<*mut T> {
    if ptr.is_null() {
        Err(take_last(context))
    } else {
        Ok(ptr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test; // For logging within tests

    // These exercise the error slot directly; SDL_GetError/SDL_ClearError
    // are documented safe before SDL_Init, so no subsystem setup needed.

    #[test]
    fn clear_slot_reads_as_no_error() {
        unsafe { sys::SDL_ClearError() };
        assert_eq!(last_message(), None);
    }

    #[test]
    fn take_last_falls_back_when_slot_is_empty() {
        unsafe { sys::SDL_ClearError() };
        let err = take_last("SDL_CreateWindow");
        assert_eq!(err.context(), "SDL_CreateWindow");
        assert_eq!(err.message(), "unknown SDL error");
        assert_eq!(err.to_string(), "SDL_CreateWindow: unknown SDL error");
    }

    #[test]
    fn check_code_accepts_non_negative() {
        assert!(check_code(0, "SDL_RenderClear").is_ok());
        assert!(check_code(1, "SDL_RenderClear").is_ok());
    }

    #[test]
    fn check_code_rejects_negative() {
        unsafe { sys::SDL_ClearError() };
        let err = check_code(-1, "SDL_RenderClear").unwrap_err();
        assert_eq!(err.context(), "SDL_RenderClear");
    }

    #[test]
    fn check_ptr_rejects_null() {
        unsafe { sys::SDL_ClearError() };
        let result = check_ptr(std::ptr::null_mut::<u8>(), "SDL_CreateRenderer");
        assert!(result.is_err());
    }
}
