// src/window.rs

//! Window creation and management.

use std::ffi::{CStr, CString};

use libc::c_int;
use log::{debug, info};
use sdl2_sys as sys;

use crate::display::DisplayMode;
use crate::error::{check_code, check_ptr, SdlError, SdlResult};
use crate::flags::{BitFlag, FlagSet};

// SDL_WINDOWPOS_* sentinels from SDL_video.h; the low bits of the
// centered/undefined masks select a target display (0 here).
const WINDOWPOS_UNDEFINED: c_int = 0x1FFF_0000;
const WINDOWPOS_CENTERED: c_int = 0x2FFF_0000;

/// The flags on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFlag {
    /// Fullscreen window.
    Fullscreen = 0x0000_0001,
    /// Fullscreen at the current desktop resolution.
    /// Includes the `Fullscreen` bit by SDL's definition.
    FullscreenDesktop = 0x0000_1001,
    /// Usable with an OpenGL context.
    OpenGl = 0x0000_0002,
    /// Window is visible.
    Shown = 0x0000_0004,
    /// Window is not visible.
    Hidden = 0x0000_0008,
    /// No window decoration.
    Borderless = 0x0000_0010,
    /// Window can be resized.
    Resizable = 0x0000_0020,
    Minimized = 0x0000_0040,
    Maximized = 0x0000_0080,
    /// Window has grabbed input focus.
    InputGrabbed = 0x0000_0100,
    InputFocus = 0x0000_0200,
    MouseFocus = 0x0000_0400,
    /// Window not created by SDL.
    Foreign = 0x0000_0800,
    /// Created in high-DPI mode if supported.
    AllowHighDpi = 0x0000_2000,
    /// Window has mouse captured (unrelated to `InputGrabbed`).
    MouseCapture = 0x0000_4000,
    /// Always on top (X11 only).
    AlwaysOnTop = 0x0000_8000,
    /// Not added to the taskbar (X11 only).
    SkipTaskbar = 0x0001_0000,
    /// Treated as a utility window (X11 only).
    Utility = 0x0002_0000,
    /// Treated as a tooltip (X11 only).
    Tooltip = 0x0004_0000,
    /// Treated as a popup menu (X11 only).
    PopupMenu = 0x0008_0000,
}

impl BitFlag for WindowFlag {
    const ALL: &'static [WindowFlag] = &[
        WindowFlag::Fullscreen,
        WindowFlag::FullscreenDesktop,
        WindowFlag::OpenGl,
        WindowFlag::Shown,
        WindowFlag::Hidden,
        WindowFlag::Borderless,
        WindowFlag::Resizable,
        WindowFlag::Minimized,
        WindowFlag::Maximized,
        WindowFlag::InputGrabbed,
        WindowFlag::InputFocus,
        WindowFlag::MouseFocus,
        WindowFlag::Foreign,
        WindowFlag::AllowHighDpi,
        WindowFlag::MouseCapture,
        WindowFlag::AlwaysOnTop,
        WindowFlag::SkipTaskbar,
        WindowFlag::Utility,
        WindowFlag::Tooltip,
        WindowFlag::PopupMenu,
    ];

    fn raw(self) -> u32 {
        self as u32
    }
}

/// Placement of one window coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Let the window manager place the window.
    Undefined,
    /// Center on the default display.
    Centered,
    /// An absolute coordinate in screen space.
    At(i32),
}

impl WindowPosition {
    pub(crate) fn to_ll(self) -> c_int {
        match self {
            WindowPosition::Undefined => WINDOWPOS_UNDEFINED,
            WindowPosition::Centered => WINDOWPOS_CENTERED,
            WindowPosition::At(point) => point as c_int,
        }
    }
}

/// An SDL window, destroyed when dropped.
#[derive(Debug)]
pub struct Window {
    ptr: *mut sys::SDL_Window,
}

impl Window {
    /// Creates a window with the given title, position, size, and flags.
    ///
    /// Requires the video subsystem to be initialized.
    pub fn new(
        title: &str,
        x: WindowPosition,
        y: WindowPosition,
        width: u32,
        height: u32,
        flags: FlagSet<WindowFlag>,
    ) -> SdlResult<Self> {
        info!(
            "Creating window '{}' ({}x{}), flags {:?}",
            title, width, height, flags
        );
        let title = CString::new(title).map_err(|_| {
            SdlError::invalid_input(
                "SDL_CreateWindow",
                "window title contains an interior NUL byte",
            )
        })?;
        // SAFETY: title is a valid C string for the duration of the call;
        // failures are reported through the null return.
        let ptr = check_ptr(
            unsafe {
                sys::SDL_CreateWindow(
                    title.as_ptr(),
                    x.to_ll(),
                    y.to_ll(),
                    width as c_int,
                    height as c_int,
                    flags.raw(),
                )
            },
            "SDL_CreateWindow",
        )?;
        debug!("Window created (id {})", unsafe {
            sys::SDL_GetWindowID(ptr)
        });
        Ok(Self { ptr })
    }

    /// The window's numeric ID, as carried by window events.
    pub fn id(&self) -> u32 {
        // SAFETY: self.ptr is live for the lifetime of self.
        unsafe { sys::SDL_GetWindowID(self.ptr) }
    }

    /// The window's current flags, decoded through the catalog.
    pub fn flags(&self) -> FlagSet<WindowFlag> {
        // SAFETY: pure query on a live window.
        FlagSet::from_raw(unsafe { sys::SDL_GetWindowFlags(self.ptr) })
    }

    /// Size of the client area in screen coordinates.
    pub fn size(&self) -> (u32, u32) {
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        // SAFETY: out-pointers are valid locals.
        unsafe { sys::SDL_GetWindowSize(self.ptr, &mut width, &mut height) };
        (width as u32, height as u32)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        // SAFETY: plain setter on a live window.
        unsafe { sys::SDL_SetWindowSize(self.ptr, width as c_int, height as c_int) };
    }

    /// Size of the underlying drawable in pixels.
    ///
    /// Differs from [`size`](Self::size) on high-DPI drawables, i.e. when
    /// the window was created with [`WindowFlag::AllowHighDpi`] on a
    /// platform that supports it.
    pub fn drawable_size(&self) -> (u32, u32) {
        let (mut width, mut height): (c_int, c_int) = (0, 0);
        // SAFETY: out-pointers are valid locals; works for any window,
        // GL-backed or not.
        unsafe { sys::SDL_GL_GetDrawableSize(self.ptr, &mut width, &mut height) };
        (width as u32, height as u32)
    }

    pub fn title(&self) -> String {
        // SAFETY: SDL_GetWindowTitle never returns null (empty string for
        // untitled windows); the pointer is valid until the title changes.
        unsafe { CStr::from_ptr(sys::SDL_GetWindowTitle(self.ptr)) }
            .to_string_lossy()
            .into_owned()
    }

    pub fn set_title(&mut self, title: &str) -> SdlResult<()> {
        let title = CString::new(title).map_err(|_| {
            SdlError::invalid_input(
                "SDL_SetWindowTitle",
                "window title contains an interior NUL byte",
            )
        })?;
        // SAFETY: title is a valid C string; SDL copies it.
        unsafe { sys::SDL_SetWindowTitle(self.ptr, title.as_ptr()) };
        Ok(())
    }

    /// Raises the window above other windows and grabs input focus.
    pub fn raise(&mut self) {
        // SAFETY: plain request on a live window.
        unsafe { sys::SDL_RaiseWindow(self.ptr) };
    }

    /// The display mode used when this window is fullscreen and visible.
    pub fn display_mode(&self) -> SdlResult<DisplayMode> {
        // SAFETY: out-pointer is a valid zeroed local.
        let mut raw: sys::SDL_DisplayMode = unsafe { std::mem::zeroed() };
        check_code(
            unsafe { sys::SDL_GetWindowDisplayMode(self.ptr, &mut raw) },
            "SDL_GetWindowDisplayMode",
        )?;
        Ok(DisplayMode::from_ll(raw))
    }

    /// Sets the mode used when this window is fullscreen; `None` selects
    /// the window's dimensions and the desktop's format and refresh rate.
    pub fn set_display_mode(&mut self, mode: Option<DisplayMode>) -> SdlResult<()> {
        let code = match mode {
            Some(mode) => {
                let raw = mode.to_ll();
                // SAFETY: raw outlives the call; SDL copies it.
                unsafe { sys::SDL_SetWindowDisplayMode(self.ptr, &raw) }
            }
            // SAFETY: null is the documented "pick defaults" argument.
            None => unsafe { sys::SDL_SetWindowDisplayMode(self.ptr, std::ptr::null()) },
        };
        check_code(code, "SDL_SetWindowDisplayMode")
    }

    /// Copies the window's surface to the screen.
    pub fn update_surface(&mut self) -> SdlResult<()> {
        check_code(
            // SAFETY: plain request on a live window; fails if the window
            // has no surface (e.g. a renderer is attached).
            unsafe { sys::SDL_UpdateWindowSurface(self.ptr) },
            "SDL_UpdateWindowSurface",
        )
    }

    pub(crate) fn raw(&self) -> *mut sys::SDL_Window {
        self.ptr
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        debug!("Destroying window (id {})", self.id());
        // SAFETY: self.ptr came from SDL_CreateWindow and is destroyed
        // exactly once.
        unsafe { sys::SDL_DestroyWindow(self.ptr) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_map_to_sdl_sentinels() {
        assert_eq!(WindowPosition::Undefined.to_ll(), 0x1FFF_0000);
        assert_eq!(WindowPosition::Centered.to_ll(), 0x2FFF_0000);
        assert_eq!(WindowPosition::At(-32).to_ll(), -32);
    }

    #[test]
    fn window_flag_catalog_round_trips() {
        let set: FlagSet<WindowFlag> = [WindowFlag::Resizable, WindowFlag::Shown]
            .into_iter()
            .collect();
        assert_eq!(set.raw(), 0x0000_0024);
        assert_eq!(FlagSet::from_raw(set.raw()), set);
    }

    #[test]
    fn fullscreen_desktop_implies_fullscreen_bit() {
        // SDL defines the desktop variant as FULLSCREEN | 0x1000, so
        // decoding it reports both flags.
        let set = FlagSet::<WindowFlag>::from_raw(WindowFlag::FullscreenDesktop.raw());
        assert!(set.contains(WindowFlag::Fullscreen));
        assert!(set.contains(WindowFlag::FullscreenDesktop));
        assert_eq!(set.raw(), 0x0000_1001);
    }
}
