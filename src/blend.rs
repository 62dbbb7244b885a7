// src/blend.rs

//! Blend modes for renderer draw operations and texture copies.

use sdl2_sys as sys;

use crate::flags::{BitFlag, FlagSet};

/// A blend mode, as used by `Renderer` draw operations and
/// `Texture::set_blend_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Alpha blending: `dst = src * srcA + dst * (1 - srcA)`.
    Alpha = 0x0000_0001,
    /// Additive blending: `dst = src * srcA + dst`.
    Additive = 0x0000_0002,
    /// Color modulate: `dst = src * dst`.
    Modulate = 0x0000_0004,
}

impl BitFlag for BlendMode {
    const ALL: &'static [BlendMode] =
        &[BlendMode::Alpha, BlendMode::Additive, BlendMode::Modulate];

    fn raw(self) -> u32 {
        self as u32
    }
}

/// Converts a decoded blend set into the native enum for an SDL call.
///
/// `SDL_BlendMode` is a fieldless enum on the Rust side, so only its
/// declared variants may be materialized. SDL's built-in blenders are
/// mutually exclusive; a set with more than one member maps to
/// `SDL_BLENDMODE_INVALID`, which SDL rejects with its own error at the
/// call site.
pub(crate) fn to_ll(modes: FlagSet<BlendMode>) -> sys::SDL_BlendMode {
    match modes.raw() {
        0 => sys::SDL_BlendMode::SDL_BLENDMODE_NONE,
        0x1 => sys::SDL_BlendMode::SDL_BLENDMODE_BLEND,
        0x2 => sys::SDL_BlendMode::SDL_BLENDMODE_ADD,
        0x4 => sys::SDL_BlendMode::SDL_BLENDMODE_MOD,
        _ => sys::SDL_BlendMode::SDL_BLENDMODE_INVALID,
    }
}

/// Decodes a native blend value returned by an SDL query.
pub(crate) fn from_ll(mode: sys::SDL_BlendMode) -> FlagSet<BlendMode> {
    FlagSet::from_raw(mode as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_values_round_trip() {
        let set = FlagSet::from(BlendMode::Alpha);
        assert_eq!(to_ll(set) as u32, 0x1);
        assert_eq!(from_ll(to_ll(set)), set);
        // `sys::SDL_BlendMode` has no `Debug` impl, so plain `assert!`
        // comparisons stand in for `assert_eq!`.
        assert!(
            to_ll(FlagSet::from(BlendMode::Additive))
                == sys::SDL_BlendMode::SDL_BLENDMODE_ADD
        );
        assert!(
            to_ll(FlagSet::from(BlendMode::Modulate))
                == sys::SDL_BlendMode::SDL_BLENDMODE_MOD
        );
    }

    #[test]
    fn combined_sets_map_to_invalid() {
        // SDL's built-in blenders cannot be combined; the conversion must
        // still produce a declared variant so SDL gets to reject it.
        let combined: FlagSet<BlendMode> =
            [BlendMode::Alpha, BlendMode::Additive].into_iter().collect();
        assert_eq!(combined.raw(), 0x3);
        assert!(to_ll(combined) == sys::SDL_BlendMode::SDL_BLENDMODE_INVALID);

        let all: FlagSet<BlendMode> = BlendMode::ALL.iter().copied().collect();
        assert!(to_ll(all) == sys::SDL_BlendMode::SDL_BLENDMODE_INVALID);
    }

    #[test]
    fn none_is_the_empty_set() {
        assert!(from_ll(sys::SDL_BlendMode::SDL_BLENDMODE_NONE).is_empty());
    }
}
