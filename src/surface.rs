// src/surface.rs

//! CPU-side pixel buffers.

use libc::c_int;
use log::debug;
use sdl2_sys as sys;

use crate::error::{check_code, check_ptr, SdlResult};
use crate::pixels::{Color, PixelFormatKind};
use crate::rect::{opt_rect_ptr, Rect};

// SDL_surface.h: surface is RLE encoded and must be locked before its
// pixels can be addressed directly.
const RLEACCEL: u32 = 0x0000_0002;

/// Red, green, blue, and alpha bit masks for an RGB surface.
///
/// All-zero masks ask SDL to derive a layout from the depth alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

/// An in-memory pixel buffer, freed when dropped.
#[derive(Debug)]
pub struct Surface {
    ptr: *mut sys::SDL_Surface,
}

impl Surface {
    /// Allocates a `width` by `height` surface with `depth` bits per
    /// pixel and the given channel masks.
    pub fn new_rgb(width: u32, height: u32, depth: u32, masks: ChannelMasks) -> SdlResult<Self> {
        debug!("Allocating {}x{} surface ({}bpp)", width, height, depth);
        let ptr = check_ptr(
            // SAFETY: the flags argument is unused by SDL and passed as 0;
            // invalid sizes or masks are reported through the null return.
            unsafe {
                sys::SDL_CreateRGBSurface(
                    0,
                    width as c_int,
                    height as c_int,
                    depth as c_int,
                    masks.red,
                    masks.green,
                    masks.blue,
                    masks.alpha,
                )
            },
            "SDL_CreateRGBSurface",
        )?;
        Ok(Self { ptr })
    }

    fn raw_ref(&self) -> &sys::SDL_Surface {
        // SAFETY: self.ptr is live and uniquely owned for the lifetime of
        // self; SDL does not move the struct.
        unsafe { &*self.ptr }
    }

    pub fn width(&self) -> u32 {
        self.raw_ref().w as u32
    }

    pub fn height(&self) -> u32 {
        self.raw_ref().h as u32
    }

    /// Byte length of one row, including padding.
    pub fn pitch(&self) -> usize {
        self.raw_ref().pitch as usize
    }

    /// The surface's pixel format.
    pub fn format_kind(&self) -> PixelFormatKind {
        // SAFETY: format is always a valid pointer on a live surface.
        PixelFormatKind(unsafe { (*self.raw_ref().format).format })
    }

    /// Whether the pixels must be locked before direct access.
    ///
    /// True only for RLE-encoded surfaces; [`with_lock`](Self::with_lock)
    /// handles the distinction itself.
    pub fn must_lock(&self) -> bool {
        self.raw_ref().flags & RLEACCEL != 0
    }

    /// Runs `body` with the raw pixel buffer, locking around the access
    /// when the surface requires it.
    ///
    /// The buffer is `pitch * height` bytes; rows may carry padding past
    /// `width * bytes_per_pixel`.
    pub fn with_lock<R>(&mut self, body: impl FnOnce(&mut [u8]) -> R) -> SdlResult<R> {
        let locked = self.must_lock();
        if locked {
            // SAFETY: plain request on a live surface.
            check_code(unsafe { sys::SDL_LockSurface(self.ptr) }, "SDL_LockSurface")?;
        }
        let len = self.pitch() * self.height() as usize;
        // SAFETY: pixels is valid for len bytes while the surface is
        // locked (or whenever it needs no locking), and &mut self keeps
        // anything else from aliasing it.
        let buffer =
            unsafe { std::slice::from_raw_parts_mut(self.raw_ref().pixels as *mut u8, len) };
        let result = body(buffer);
        if locked {
            // SAFETY: matches the successful lock above.
            unsafe { sys::SDL_UnlockSurface(self.ptr) };
        }
        Ok(result)
    }

    /// Fills `rect` (or the whole surface) with `color`, which must be
    /// mapped through this surface's format.
    pub fn fill(&mut self, rect: Option<Rect>, color: Color) -> SdlResult<()> {
        let mut storage = unsafe { std::mem::zeroed() };
        let rect_ptr = opt_rect_ptr(rect, &mut storage);
        check_code(
            // SAFETY: rect_ptr is null or points at a live local.
            unsafe { sys::SDL_FillRect(self.ptr, rect_ptr, color.raw()) },
            "SDL_FillRect",
        )
    }

    /// Blits the `source` portion of this surface (or all of it) onto
    /// `destination` at `destination_rect`'s position, converting formats
    /// as needed. Returns the clipped rectangle actually written.
    pub fn blit(
        &self,
        source: Option<Rect>,
        destination: &mut Surface,
        destination_rect: Option<Rect>,
    ) -> SdlResult<Option<Rect>> {
        let mut src_storage = unsafe { std::mem::zeroed() };
        let src = opt_rect_ptr(source, &mut src_storage);
        // The destination rect is in-out: SDL writes the clipped result
        // back into it.
        let mut dst_storage: sys::SDL_Rect = match destination_rect {
            Some(rect) => rect.to_ll(),
            None => unsafe { std::mem::zeroed() },
        };
        let dst = match destination_rect {
            Some(_) => &mut dst_storage as *mut sys::SDL_Rect,
            None => std::ptr::null_mut(),
        };
        check_code(
            // SAFETY: both surfaces are live and distinct (&self vs
            // &mut destination); rect pointers are null or live locals.
            unsafe { sys::SDL_UpperBlit(self.ptr, src, destination.ptr, dst) },
            "SDL_UpperBlit",
        )?;
        Ok(destination_rect.map(|_| Rect::new(
            dst_storage.x,
            dst_storage.y,
            dst_storage.w,
            dst_storage.h,
        )))
    }

    pub(crate) fn raw(&self) -> *mut sys::SDL_Surface {
        self.ptr
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        // SAFETY: self.ptr came from SDL_CreateRGBSurface and is freed
        // exactly once.
        unsafe { sys::SDL_FreeSurface(self.ptr) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_masks_are_all_zero() {
        let masks = ChannelMasks::default();
        assert_eq!((masks.red, masks.green, masks.blue, masks.alpha), (0, 0, 0, 0));
    }
}
