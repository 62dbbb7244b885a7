// src/render.rs

//! 2D accelerated rendering.
//!
//! A [`Renderer`] borrows the [`Window`] it draws into, so the window
//! cannot be destroyed while the renderer is alive. Render drivers are
//! enumerated lazily through [`Driver::all`].

use std::ffi::CStr;
use std::fmt;
use std::marker::PhantomData;

use libc::c_int;
use log::{debug, info};
use sdl2_sys as sys;

use crate::blend::{self, BlendMode};
use crate::countable::{CountableSet, IndexValue};
use crate::error::{check_code, check_ptr, SdlResult};
use crate::flags::{BitFlag, FlagSet};
use crate::pixels::PixelFormatKind;
use crate::rect::{opt_rect_ptr, Rect};
use crate::texture::Texture;
use crate::window::Window;

/// Capabilities requested from, or reported by, a render driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererFlag {
    /// A software fallback.
    Software = 0x0000_0001,
    /// Hardware acceleration.
    Accelerated = 0x0000_0002,
    /// Present is synchronized with the display refresh.
    PresentVsync = 0x0000_0004,
    /// Supports rendering to texture.
    TargetTexture = 0x0000_0008,
}

impl BitFlag for RendererFlag {
    const ALL: &'static [RendererFlag] = &[
        RendererFlag::Software,
        RendererFlag::Accelerated,
        RendererFlag::PresentVsync,
        RendererFlag::TargetTexture,
    ];

    fn raw(self) -> u32 {
        self as u32
    }
}

/// Index of a render driver, valid in `[0, Driver::all().len())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Driver(i32);

impl Driver {
    /// Lets SDL pick the first driver supporting the requested flags.
    pub const DEFAULT: Driver = Driver(-1);

    /// Enumerates the render drivers compiled into SDL.
    pub fn all() -> SdlResult<CountableSet<Driver>> {
        // SAFETY: pure query, callable before SDL_Init.
        let count = unsafe { sys::SDL_GetNumRenderDrivers() };
        check_code(count, "SDL_GetNumRenderDrivers")?;
        Ok(CountableSet::new(count))
    }

    /// Capabilities of this driver.
    pub fn info(self) -> SdlResult<DriverInfo> {
        // SAFETY: out-pointer is a valid zeroed local; an invalid index is
        // reported through the return code.
        let mut raw: sys::SDL_RendererInfo = unsafe { std::mem::zeroed() };
        check_code(
            unsafe { sys::SDL_GetRenderDriverInfo(self.0, &mut raw) },
            "SDL_GetRenderDriverInfo",
        )?;
        Ok(DriverInfo::from_ll(&raw))
    }
}

impl IndexValue for Driver {
    fn from_raw(raw: i32) -> Self {
        Driver(raw)
    }

    fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver {}", self.0)
    }
}

/// Description of a render driver or a live renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    /// Driver name, e.g. `opengl` or `software`.
    pub name: String,
    /// Capabilities the driver supports.
    pub options: FlagSet<RendererFlag>,
    /// Texture formats the driver accepts.
    pub formats: Vec<PixelFormatKind>,
    /// Maximum texture width, 0 if unreported.
    pub max_texture_width: i32,
    /// Maximum texture height, 0 if unreported.
    pub max_texture_height: i32,
}

impl DriverInfo {
    fn from_ll(raw: &sys::SDL_RendererInfo) -> Self {
        // SAFETY: name points at a static string owned by the driver.
        let name = unsafe { CStr::from_ptr(raw.name) }
            .to_string_lossy()
            .into_owned();
        // texture_formats is a fixed 16-slot array; only the first
        // num_texture_formats entries are meaningful.
        let filled = (raw.num_texture_formats as usize).min(raw.texture_formats.len());
        let formats = raw.texture_formats[..filled]
            .iter()
            .map(|&format| PixelFormatKind(format))
            .collect();
        DriverInfo {
            name,
            options: FlagSet::from_raw(raw.flags),
            formats,
            max_texture_width: raw.max_texture_width,
            max_texture_height: raw.max_texture_height,
        }
    }
}

/// A 2D rendering context tied to a window.
///
/// Drawing methods take `&self` so they remain callable while textures
/// borrow the renderer; the raw pointer keeps the type `!Send` and
/// `!Sync`, so all access stays on one thread.
#[derive(Debug)]
pub struct Renderer<'w> {
    ptr: *mut sys::SDL_Renderer,
    _window: PhantomData<&'w Window>,
}

impl<'w> Renderer<'w> {
    /// Creates a renderer for `window` using `driver`, which may be
    /// [`Driver::DEFAULT`] to let SDL choose.
    pub fn new(
        window: &'w Window,
        driver: Driver,
        options: FlagSet<RendererFlag>,
    ) -> SdlResult<Self> {
        info!("Creating renderer ({}, options {:?})", driver, options);
        let ptr = check_ptr(
            // SAFETY: window.raw() is live for 'w; the renderer borrows
            // the window so it cannot outlive it.
            unsafe { sys::SDL_CreateRenderer(window.raw(), driver.raw() as c_int, options.raw()) },
            "SDL_CreateRenderer",
        )?;
        Ok(Self {
            ptr,
            _window: PhantomData,
        })
    }

    /// The color used by [`clear`](Self::clear) and draw operations.
    pub fn draw_color(&self) -> SdlResult<(u8, u8, u8, u8)> {
        let (mut r, mut g, mut b, mut a) = (0u8, 0u8, 0u8, 0u8);
        check_code(
            // SAFETY: out-pointers are valid locals.
            unsafe { sys::SDL_GetRenderDrawColor(self.ptr, &mut r, &mut g, &mut b, &mut a) },
            "SDL_GetRenderDrawColor",
        )?;
        Ok((r, g, b, a))
    }

    pub fn set_draw_color(&self, r: u8, g: u8, b: u8, a: u8) -> SdlResult<()> {
        check_code(
            // SAFETY: plain setter on a live renderer.
            unsafe { sys::SDL_SetRenderDrawColor(self.ptr, r, g, b, a) },
            "SDL_SetRenderDrawColor",
        )
    }

    /// The blend mode applied to draw operations.
    pub fn blend_mode(&self) -> SdlResult<FlagSet<BlendMode>> {
        let mut raw = sys::SDL_BlendMode::SDL_BLENDMODE_NONE;
        check_code(
            // SAFETY: out-pointer is a valid local.
            unsafe { sys::SDL_GetRenderDrawBlendMode(self.ptr, &mut raw) },
            "SDL_GetRenderDrawBlendMode",
        )?;
        Ok(blend::from_ll(raw))
    }

    pub fn set_blend_mode(&self, modes: FlagSet<BlendMode>) -> SdlResult<()> {
        check_code(
            // SAFETY: plain setter on a live renderer.
            unsafe { sys::SDL_SetRenderDrawBlendMode(self.ptr, blend::to_ll(modes)) },
            "SDL_SetRenderDrawBlendMode",
        )
    }

    /// Output size in pixels, which tracks the drawable rather than the
    /// window on high-DPI displays.
    pub fn output_size(&self) -> SdlResult<(u32, u32)> {
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        check_code(
            // SAFETY: out-pointers are valid locals.
            unsafe { sys::SDL_GetRendererOutputSize(self.ptr, &mut width, &mut height) },
            "SDL_GetRendererOutputSize",
        )?;
        Ok((width as u32, height as u32))
    }

    /// Clears the whole target with the current draw color.
    pub fn clear(&self) -> SdlResult<()> {
        // SAFETY: plain request on a live renderer.
        check_code(unsafe { sys::SDL_RenderClear(self.ptr) }, "SDL_RenderClear")
    }

    /// Copies `texture` (or the `source` portion of it) to the target,
    /// stretching into `destination` or the whole target when `None`.
    pub fn copy(
        &self,
        texture: &Texture<'_>,
        source: Option<Rect>,
        destination: Option<Rect>,
    ) -> SdlResult<()> {
        let mut src_storage = unsafe { std::mem::zeroed() };
        let mut dst_storage = unsafe { std::mem::zeroed() };
        let src = opt_rect_ptr(source, &mut src_storage);
        let dst = opt_rect_ptr(destination, &mut dst_storage);
        check_code(
            // SAFETY: rect pointers are null or point at live locals;
            // texture.raw() is live for the duration of the call.
            unsafe { sys::SDL_RenderCopy(self.ptr, texture.raw(), src, dst) },
            "SDL_RenderCopy",
        )
    }

    /// Redirects rendering to `target`, or back to the window for `None`.
    ///
    /// The texture must have been created with
    /// [`TextureAccess::Target`](crate::TextureAccess::Target).
    pub fn set_target(&self, target: Option<&Texture<'_>>) -> SdlResult<()> {
        let raw = target.map_or(std::ptr::null_mut(), |texture| texture.raw());
        check_code(
            // SAFETY: raw is null or a live texture owned by this renderer.
            unsafe { sys::SDL_SetRenderTarget(self.ptr, raw) },
            "SDL_SetRenderTarget",
        )
    }

    /// Presents everything drawn since the last present.
    pub fn present(&self) {
        // SAFETY: plain request on a live renderer.
        unsafe { sys::SDL_RenderPresent(self.ptr) };
    }

    pub(crate) fn raw(&self) -> *mut sys::SDL_Renderer {
        self.ptr
    }
}

impl Drop for Renderer<'_> {
    fn drop(&mut self) {
        debug!("Destroying renderer");
        // SAFETY: self.ptr came from SDL_CreateRenderer and is destroyed
        // exactly once, before the window it borrows.
        unsafe { sys::SDL_DestroyRenderer(self.ptr) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_driver_is_sdl_sentinel() {
        assert_eq!(Driver::DEFAULT.raw(), -1);
    }

    #[test]
    fn renderer_flags_round_trip() {
        let set: FlagSet<RendererFlag> =
            [RendererFlag::Accelerated, RendererFlag::PresentVsync]
                .into_iter()
                .collect();
        assert_eq!(set.raw(), 0x0000_0006);
        assert_eq!(FlagSet::from_raw(0x0000_0006), set);
    }

    #[test]
    fn driver_info_reads_only_filled_format_slots() {
        let name = b"software\0";
        let mut raw: sys::SDL_RendererInfo = unsafe { std::mem::zeroed() };
        raw.name = name.as_ptr() as *const _;
        raw.flags = RendererFlag::Software.raw();
        raw.num_texture_formats = 2;
        raw.texture_formats[0] = PixelFormatKind::ARGB8888.raw();
        raw.texture_formats[1] = PixelFormatKind::RGB888.raw();
        raw.texture_formats[2] = 0xDEAD_BEEF;
        raw.max_texture_width = 4096;
        raw.max_texture_height = 4096;

        let info = DriverInfo::from_ll(&raw);
        assert_eq!(info.name, "software");
        assert!(info.options.contains(RendererFlag::Software));
        assert_eq!(
            info.formats,
            vec![PixelFormatKind::ARGB8888, PixelFormatKind::RGB888]
        );
        assert_eq!(info.max_texture_width, 4096);
    }
}
