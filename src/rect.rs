// src/rect.rs

//! A plain rectangle value, converted to `SDL_Rect` at the FFI boundary.

use sdl2_sys as sys;

/// A rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub(crate) fn to_ll(self) -> sys::SDL_Rect {
        sys::SDL_Rect {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// Converts an optional rect into the nullable pointer SDL expects.
///
/// The returned pointer borrows `storage`; callers keep `storage` alive
/// for the duration of the native call.
pub(crate) fn opt_rect_ptr(
    rect: Option<Rect>,
    storage: &mut sys::SDL_Rect,
) -> *const sys::SDL_Rect {
    match rect {
        Some(rect) => {
            *storage = rect.to_ll();
            storage as *const sys::SDL_Rect
        }
        None => std::ptr::null(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_native_layout() {
        let ll = Rect::new(10, -5, 200, 100).to_ll();
        assert_eq!((ll.x, ll.y, ll.w, ll.h), (10, -5, 200, 100));
    }

    #[test]
    fn none_maps_to_null() {
        let mut storage = Rect::default().to_ll();
        assert!(opt_rect_ptr(None, &mut storage).is_null());
        assert!(!opt_rect_ptr(Some(Rect::new(0, 0, 1, 1)), &mut storage).is_null());
    }
}
