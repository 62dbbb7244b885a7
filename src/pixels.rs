// src/pixels.rs

//! Pixel formats, palettes, and raw-pixel colors.

use std::ffi::CStr;
use std::fmt;

use libc::c_int;
use log::debug;
use sdl2_sys as sys;

use crate::error::{check_code, check_ptr, SdlError, SdlResult};

/// Identifies one of SDL's packed pixel format encodings.
///
/// The value is SDL's `SDL_PIXELFORMAT_*` constant; only the formats the
/// crate has needed so far are named here, but any raw value can be
/// carried (driver info reports formats this list may not name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormatKind(pub u32);

impl PixelFormatKind {
    pub const UNKNOWN: PixelFormatKind = PixelFormatKind(0);
    /// 24-bit packed RGB, byte order.
    pub const RGB24: PixelFormatKind = PixelFormatKind(0x1710_1803);
    /// 32-bit XRGB, alpha byte unused.
    pub const RGB888: PixelFormatKind = PixelFormatKind(0x1616_1804);
    pub const ARGB8888: PixelFormatKind = PixelFormatKind(0x1636_2004);
    pub const RGBA8888: PixelFormatKind = PixelFormatKind(0x1646_2004);
    pub const ABGR8888: PixelFormatKind = PixelFormatKind(0x1676_2004);

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// SDL's human-readable name for the format,
    /// e.g. `"SDL_PIXELFORMAT_ARGB8888"`.
    pub fn name(self) -> String {
        // SAFETY: SDL_GetPixelFormatName is a static table lookup,
        // callable at any time; it returns a pointer to a static string
        // (`SDL_PIXELFORMAT_UNKNOWN` for unrecognized values).
        unsafe { CStr::from_ptr(sys::SDL_GetPixelFormatName(self.0)) }
            .to_string_lossy()
            .into_owned()
    }
}

impl fmt::Display for PixelFormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// An allocated `SDL_PixelFormat`, used to map colors to raw pixels.
///
/// SDL may hand back a shared, cached structure; treat it as read-only
/// apart from the palette setter below.
#[derive(Debug)]
pub struct PixelFormat {
    ptr: *mut sys::SDL_PixelFormat,
}

impl PixelFormat {
    /// Allocates a format structure for `kind`.
    pub fn new(kind: PixelFormatKind) -> SdlResult<Self> {
        debug!("Allocating pixel format {}", kind.name());
        // SAFETY: SDL_AllocFormat accepts any format value and reports
        // unknown ones through its null return.
        let ptr = check_ptr(unsafe { sys::SDL_AllocFormat(kind.raw()) }, "SDL_AllocFormat")?;
        Ok(Self { ptr })
    }

    /// The format this structure describes.
    pub fn kind(&self) -> PixelFormatKind {
        // SAFETY: self.ptr is non-null for the lifetime of self.
        PixelFormatKind(unsafe { (*self.ptr).format })
    }

    /// Sets the palette used by this format.
    pub fn set_palette(&mut self, palette: &Palette) -> SdlResult<()> {
        check_code(
            // SAFETY: both pointers are live; SDL copies the association
            // and refcounts the palette.
            unsafe { sys::SDL_SetPixelFormatPalette(self.ptr, palette.ptr) },
            "SDL_SetPixelFormatPalette",
        )
    }

    pub(crate) fn raw(&self) -> *mut sys::SDL_PixelFormat {
        self.ptr
    }
}

impl Drop for PixelFormat {
    fn drop(&mut self) {
        // SAFETY: self.ptr came from SDL_AllocFormat and is freed once.
        unsafe { sys::SDL_FreeFormat(self.ptr) };
    }
}

/// A color palette with a fixed number of entries.
#[derive(Debug)]
pub struct Palette {
    ptr: *mut sys::SDL_Palette,
}

impl Palette {
    /// Allocates a palette with `colors` entries, initialized to white.
    pub fn new(colors: usize) -> SdlResult<Self> {
        // The native count is a C int; anything wider must be rejected
        // here rather than silently wrapped.
        let count = c_int::try_from(colors).map_err(|_| {
            SdlError::invalid_input("SDL_AllocPalette", "palette size exceeds the native range")
        })?;
        // SAFETY: SDL_AllocPalette validates the count and reports
        // failure through its null return.
        let ptr = check_ptr(unsafe { sys::SDL_AllocPalette(count) }, "SDL_AllocPalette")?;
        Ok(Self { ptr })
    }

    /// Number of color entries in the palette.
    pub fn len(&self) -> usize {
        // SAFETY: self.ptr is non-null for the lifetime of self.
        unsafe { (*self.ptr).ncolors as usize }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for Palette {
    fn drop(&mut self) {
        // SAFETY: self.ptr came from SDL_AllocPalette and is freed once.
        unsafe { sys::SDL_FreePalette(self.ptr) };
    }
}

/// A raw pixel value in some pixel format.
///
/// The encoding depends on the format the color was mapped with, so a
/// `Color` is only meaningful alongside the `PixelFormat` it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Maps RGBA components into `format`'s encoding.
    pub fn from_rgba(format: &PixelFormat, red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        // SAFETY: the format pointer is live; SDL_MapRGBA has no failure
        // mode (components outside the format are best-fit mapped).
        Color(unsafe { sys::SDL_MapRGBA(format.raw(), red, green, blue, alpha) })
    }

    /// Recovers the RGBA components under `format`'s encoding.
    pub fn components(self, format: &PixelFormat) -> (u8, u8, u8, u8) {
        let (mut red, mut green, mut blue, mut alpha) = (0u8, 0u8, 0u8, 0u8);
        // SAFETY: the format pointer is live and the out-pointers are
        // valid locals.
        unsafe {
            sys::SDL_GetRGBA(
                self.0,
                format.raw(),
                &mut red,
                &mut green,
                &mut blue,
                &mut alpha,
            );
        }
        (red, green, blue, alpha)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_kind_names_are_stable() {
        // SDL_GetPixelFormatName is a pure table lookup, usable without init.
        assert_eq!(PixelFormatKind::ARGB8888.name(), "SDL_PIXELFORMAT_ARGB8888");
        assert_eq!(PixelFormatKind::UNKNOWN.name(), "SDL_PIXELFORMAT_UNKNOWN");
    }

    #[test]
    fn oversized_palette_is_rejected_before_the_native_call() {
        let err = Palette::new(usize::MAX).unwrap_err();
        assert_eq!(err.context(), "SDL_AllocPalette");
        assert_eq!(err.message(), "palette size exceeds the native range");
    }

    #[test]
    fn distinct_kinds_have_distinct_raw_values() {
        let kinds = [
            PixelFormatKind::RGB24,
            PixelFormatKind::RGB888,
            PixelFormatKind::ARGB8888,
            PixelFormatKind::RGBA8888,
            PixelFormatKind::ABGR8888,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.raw(), b.raw());
            }
        }
    }
}
