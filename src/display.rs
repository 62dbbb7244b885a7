// src/display.rs

//! Video display and display mode enumeration.
//!
//! Displays and their modes are SDL "get count / get item" pairs; the
//! index newtypes below plug into [`CountableSet`] so enumeration stays
//! lazy and typed. Resolving an index queries SDL at that point.

use std::ffi::CStr;
use std::fmt;
use std::mem;

use sdl2_sys as sys;

use crate::countable::{CountableSet, IndexValue};
use crate::error::{check_code, check_ptr, SdlResult};
use crate::pixels::PixelFormatKind;

/// Index of a connected video display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoDisplay(i32);

impl IndexValue for VideoDisplay {
    fn from_raw(raw: i32) -> Self {
        VideoDisplay(raw)
    }

    fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VideoDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display {}", self.0)
    }
}

impl VideoDisplay {
    /// All connected displays. Requires the video subsystem.
    pub fn all() -> SdlResult<CountableSet<VideoDisplay>> {
        // SAFETY: returns a negative count when video is not initialized;
        // checked below before the set is built.
        let count = unsafe { sys::SDL_GetNumVideoDisplays() };
        check_code(count, "SDL_GetNumVideoDisplays")?;
        Ok(CountableSet::new(count))
    }

    /// The display's name, typically the monitor model.
    pub fn name(self) -> SdlResult<String> {
        // SAFETY: invalid indices produce a null return, checked below.
        let ptr = check_ptr(
            unsafe { sys::SDL_GetDisplayName(self.0) as *mut libc::c_char },
            "SDL_GetDisplayName",
        )?;
        // SAFETY: non-null, NUL-terminated per the SDL contract.
        Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    /// The fullscreen modes this display supports.
    pub fn modes(self) -> SdlResult<CountableSet<DisplayModeIndex>> {
        // SAFETY: negative count signals an error, checked below.
        let count = unsafe { sys::SDL_GetNumDisplayModes(self.0) };
        check_code(count, "SDL_GetNumDisplayModes")?;
        Ok(CountableSet::new(count))
    }

    /// Resolves one of this display's modes.
    pub fn mode(self, index: DisplayModeIndex) -> SdlResult<DisplayMode> {
        // SAFETY: out-pointer is a valid zeroed local; failure is
        // reported through the return code.
        let mut raw: sys::SDL_DisplayMode = unsafe { mem::zeroed() };
        check_code(
            unsafe { sys::SDL_GetDisplayMode(self.0, index.raw(), &mut raw) },
            "SDL_GetDisplayMode",
        )?;
        Ok(DisplayMode::from_ll(raw))
    }

    /// The desktop's mode, ignoring any fullscreen mode change.
    pub fn desktop_mode(self) -> SdlResult<DisplayMode> {
        // SAFETY: as in `mode`.
        let mut raw: sys::SDL_DisplayMode = unsafe { mem::zeroed() };
        check_code(
            unsafe { sys::SDL_GetDesktopDisplayMode(self.0, &mut raw) },
            "SDL_GetDesktopDisplayMode",
        )?;
        Ok(DisplayMode::from_ll(raw))
    }

    /// The mode currently in use on this display.
    pub fn current_mode(self) -> SdlResult<DisplayMode> {
        // SAFETY: as in `mode`.
        let mut raw: sys::SDL_DisplayMode = unsafe { mem::zeroed() };
        check_code(
            unsafe { sys::SDL_GetCurrentDisplayMode(self.0, &mut raw) },
            "SDL_GetCurrentDisplayMode",
        )?;
        Ok(DisplayMode::from_ll(raw))
    }
}

/// Index of one mode within a display's mode list, ordered by SDL from
/// largest to smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayModeIndex(i32);

impl IndexValue for DisplayModeIndex {
    fn from_raw(raw: i32) -> Self {
        DisplayModeIndex(raw)
    }

    fn raw(self) -> i32 {
        self.0
    }
}

/// A display mode: pixel format, size, and refresh rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub format: PixelFormatKind,
    /// Width in screen coordinates.
    pub width: i32,
    /// Height in screen coordinates.
    pub height: i32,
    /// Refresh rate in Hz, or 0 when unspecified.
    pub refresh_rate: i32,
}

impl DisplayMode {
    pub(crate) fn from_ll(raw: sys::SDL_DisplayMode) -> Self {
        Self {
            format: PixelFormatKind(raw.format),
            width: raw.w,
            height: raw.h,
            refresh_rate: raw.refresh_rate,
        }
    }

    pub(crate) fn to_ll(self) -> sys::SDL_DisplayMode {
        sys::SDL_DisplayMode {
            format: self.format.raw(),
            w: self.width,
            h: self.height,
            refresh_rate: self.refresh_rate,
            driverdata: std::ptr::null_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mode_round_trips_through_native_layout() {
        let mode = DisplayMode {
            format: PixelFormatKind::ARGB8888,
            width: 1920,
            height: 1080,
            refresh_rate: 60,
        };
        assert_eq!(DisplayMode::from_ll(mode.to_ll()), mode);
    }

    #[test]
    fn index_kinds_carry_their_raw_values() {
        assert_eq!(VideoDisplay::from_raw(2).raw(), 2);
        assert_eq!(DisplayModeIndex::from_raw(7).raw(), 7);
    }
}
