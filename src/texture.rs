// src/texture.rs

//! Textures, the renderer-side pixel stores.
//!
//! A [`Texture`] borrows the [`Renderer`](crate::render::Renderer) that
//! created it and is destroyed on drop, before the renderer goes away.

use std::marker::PhantomData;

use libc::{c_int, c_void};
use log::debug;
use sdl2_sys as sys;

use crate::blend::{self, BlendMode};
use crate::error::{check_code, check_ptr, SdlResult};
use crate::flags::FlagSet;
use crate::pixels::PixelFormatKind;
use crate::rect::{opt_rect_ptr, Rect};
use crate::render::Renderer;
use crate::surface::Surface;

/// How a texture's pixels may be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureAccess {
    /// Changes rarely, not lockable.
    Static = 0,
    /// Changes frequently, lockable.
    Streaming = 1,
    /// Can be used as a render target.
    Target = 2,
}

impl TextureAccess {
    fn from_ll(raw: c_int) -> Self {
        match raw {
            1 => TextureAccess::Streaming,
            2 => TextureAccess::Target,
            _ => TextureAccess::Static,
        }
    }
}

/// Format, access, and size of a texture, as reported by SDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureQuery {
    pub format: PixelFormatKind,
    pub access: TextureAccess,
    pub width: u32,
    pub height: u32,
}

/// A driver-specific pixel store owned by a renderer.
#[derive(Debug)]
pub struct Texture<'r> {
    ptr: *mut sys::SDL_Texture,
    _renderer: PhantomData<&'r ()>,
}

impl<'r> Texture<'r> {
    /// Creates an uninitialized texture of the given format and size.
    pub fn new(
        renderer: &'r Renderer<'_>,
        format: PixelFormatKind,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> SdlResult<Self> {
        debug!(
            "Creating {}x{} texture ({}, {:?})",
            width, height, format, access
        );
        let ptr = check_ptr(
            // SAFETY: renderer.raw() is live for 'r; the texture borrows
            // the renderer so drop order is enforced by the compiler.
            unsafe {
                sys::SDL_CreateTexture(
                    renderer.raw(),
                    format.raw(),
                    access as c_int,
                    width as c_int,
                    height as c_int,
                )
            },
            "SDL_CreateTexture",
        )?;
        Ok(Self {
            ptr,
            _renderer: PhantomData,
        })
    }

    /// Creates a static texture with the contents of `surface`.
    ///
    /// The surface is only read; it can be dropped afterwards.
    pub fn from_surface(renderer: &'r Renderer<'_>, surface: &Surface) -> SdlResult<Self> {
        let ptr = check_ptr(
            // SAFETY: both pointers are live; SDL copies the pixels out.
            unsafe { sys::SDL_CreateTextureFromSurface(renderer.raw(), surface.raw()) },
            "SDL_CreateTextureFromSurface",
        )?;
        Ok(Self {
            ptr,
            _renderer: PhantomData,
        })
    }

    /// The texture's format, access mode, and size.
    pub fn query(&self) -> SdlResult<TextureQuery> {
        let mut format: u32 = 0;
        let (mut access, mut width, mut height): (c_int, c_int, c_int) = (0, 0, 0);
        check_code(
            // SAFETY: out-pointers are valid locals.
            unsafe {
                sys::SDL_QueryTexture(self.ptr, &mut format, &mut access, &mut width, &mut height)
            },
            "SDL_QueryTexture",
        )?;
        Ok(TextureQuery {
            format: PixelFormatKind(format),
            access: TextureAccess::from_ll(access),
            width: width as u32,
            height: height as u32,
        })
    }

    /// The blend mode used when this texture is copied to the target.
    pub fn blend_mode(&self) -> SdlResult<FlagSet<BlendMode>> {
        let mut raw = sys::SDL_BlendMode::SDL_BLENDMODE_NONE;
        check_code(
            // SAFETY: out-pointer is a valid local.
            unsafe { sys::SDL_GetTextureBlendMode(self.ptr, &mut raw) },
            "SDL_GetTextureBlendMode",
        )?;
        Ok(blend::from_ll(raw))
    }

    pub fn set_blend_mode(&mut self, modes: FlagSet<BlendMode>) -> SdlResult<()> {
        check_code(
            // SAFETY: plain setter on a live texture.
            unsafe { sys::SDL_SetTextureBlendMode(self.ptr, blend::to_ll(modes)) },
            "SDL_SetTextureBlendMode",
        )
    }

    /// The extra alpha multiplied into copy operations.
    pub fn alpha_mod(&self) -> SdlResult<u8> {
        let mut alpha: u8 = 0;
        check_code(
            // SAFETY: out-pointer is a valid local.
            unsafe { sys::SDL_GetTextureAlphaMod(self.ptr, &mut alpha) },
            "SDL_GetTextureAlphaMod",
        )?;
        Ok(alpha)
    }

    pub fn set_alpha_mod(&mut self, alpha: u8) -> SdlResult<()> {
        check_code(
            // SAFETY: plain setter on a live texture.
            unsafe { sys::SDL_SetTextureAlphaMod(self.ptr, alpha) },
            "SDL_SetTextureAlphaMod",
        )
    }

    /// Uploads pixel data into `rect`, or the whole texture for `None`.
    ///
    /// `pitch` is the byte length of one row in `pixels`; the slice must
    /// cover `pitch * rows` bytes for the updated region. Slow for
    /// [`TextureAccess::Streaming`] textures, which should use
    /// [`with_lock`](Self::with_lock) instead.
    pub fn update(&mut self, rect: Option<Rect>, pixels: &[u8], pitch: usize) -> SdlResult<()> {
        let mut storage = unsafe { std::mem::zeroed() };
        let rect_ptr = opt_rect_ptr(rect, &mut storage);
        check_code(
            // SAFETY: pixels covers the region described by rect and
            // pitch; SDL copies the data during the call.
            unsafe {
                sys::SDL_UpdateTexture(
                    self.ptr,
                    rect_ptr,
                    pixels.as_ptr() as *const c_void,
                    pitch as c_int,
                )
            },
            "SDL_UpdateTexture",
        )
    }

    /// Locks `rect` (or the whole texture) for write-only access and runs
    /// `body` with the pixel buffer and its pitch in bytes.
    ///
    /// Only valid for [`TextureAccess::Streaming`] textures. The buffer
    /// contents are undefined on entry and must be fully written.
    pub fn with_lock<R>(
        &mut self,
        rect: Option<Rect>,
        body: impl FnOnce(&mut [u8], usize) -> R,
    ) -> SdlResult<R> {
        let rows = locked_rows(rect, self.query()?.height as i32);
        let mut storage = unsafe { std::mem::zeroed() };
        let rect_ptr = opt_rect_ptr(rect, &mut storage);
        let mut pixels: *mut c_void = std::ptr::null_mut();
        let mut pitch: c_int = 0;
        check_code(
            // SAFETY: out-pointers are valid locals; on success SDL hands
            // back a buffer of pitch * rows bytes.
            unsafe { sys::SDL_LockTexture(self.ptr, rect_ptr, &mut pixels, &mut pitch) },
            "SDL_LockTexture",
        )?;
        let len = pitch as usize * rows as usize;
        // SAFETY: the locked buffer is valid for len bytes until unlock,
        // and nothing else aliases it while body runs.
        let buffer = unsafe { std::slice::from_raw_parts_mut(pixels as *mut u8, len) };
        let result = body(buffer, pitch as usize);
        // SAFETY: matches the successful lock above.
        unsafe { sys::SDL_UnlockTexture(self.ptr) };
        Ok(result)
    }

    pub(crate) fn raw(&self) -> *mut sys::SDL_Texture {
        self.ptr
    }
}

/// Rows covered by a lock of `rect` on a texture `height` rows tall.
///
/// The locked buffer is only `pitch` bytes per row inside the texture,
/// so the row count is clamped to the part of `rect` that lies within
/// `[0, height)` rather than taken from the rect as given.
fn locked_rows(rect: Option<Rect>, height: i32) -> i32 {
    match rect {
        Some(rect) => rect.h.min(height - rect.y).max(0),
        None => height.max(0),
    }
}

impl Drop for Texture<'_> {
    fn drop(&mut self) {
        // SAFETY: self.ptr came from a texture constructor and is
        // destroyed exactly once, before its renderer.
        unsafe { sys::SDL_DestroyTexture(self.ptr) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_maps_from_raw_values() {
        assert_eq!(TextureAccess::from_ll(0), TextureAccess::Static);
        assert_eq!(TextureAccess::from_ll(1), TextureAccess::Streaming);
        assert_eq!(TextureAccess::from_ll(2), TextureAccess::Target);
        // Unknown values fall back to the most conservative mode.
        assert_eq!(TextureAccess::from_ll(99), TextureAccess::Static);
    }

    #[test]
    fn locked_rows_stay_inside_the_texture() {
        // Whole-texture lock covers every row.
        assert_eq!(locked_rows(None, 64), 64);
        // A rect within bounds is taken as given.
        assert_eq!(locked_rows(Some(Rect::new(0, 16, 8, 32)), 64), 32);
        // An oversized rect must not widen the buffer past the texture.
        assert_eq!(locked_rows(Some(Rect::new(0, 0, 8, 1000)), 64), 64);
        assert_eq!(locked_rows(Some(Rect::new(0, 48, 8, 32)), 64), 16);
        // Degenerate rects yield an empty buffer, not a negative length.
        assert_eq!(locked_rows(Some(Rect::new(0, 128, 8, 32)), 64), 0);
        assert_eq!(locked_rows(Some(Rect::new(0, 0, 8, -4)), 64), 0);
    }
}
