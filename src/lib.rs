// src/lib.rs

//! Safe, minimal bindings over SDL2's video, rendering, and event APIs.
//!
//! Raw SDL resources are wrapped in owning types that release themselves
//! on drop, with borrow relationships (a [`Renderer`] borrows its
//! [`Window`], a [`Texture`] its [`Renderer`]) enforcing destruction
//! order at compile time. Fallible SDL calls surface as [`SdlResult`]
//! carrying the message from SDL's error slot.
//!
//! Two small generic layers underpin the rest:
//! - [`FlagSet`] encodes and decodes bit-mask option sets against an
//!   exhaustive per-type catalog ([`BitFlag::ALL`]), dropping unknown
//!   bits on decode.
//! - [`CountableSet`] exposes the index ranges SDL reports as counts
//!   (video displays, display modes, render drivers) as lazy typed
//!   collections.

pub mod blend;
pub mod countable;
pub mod display;
pub mod error;
pub mod event;
pub mod flags;
pub mod init;
pub mod pixels;
pub mod rect;
pub mod render;
pub mod surface;
pub mod texture;
pub mod window;

pub use blend::BlendMode;
pub use countable::{CountableSet, IndexValue};
pub use display::{DisplayMode, DisplayModeIndex, VideoDisplay};
pub use error::{SdlError, SdlResult};
pub use event::{Event, WindowEventKind};
pub use flags::{BitFlag, FlagSet};
pub use init::Subsystem;
pub use pixels::{Color, Palette, PixelFormat, PixelFormatKind};
pub use rect::Rect;
pub use render::{Driver, DriverInfo, Renderer, RendererFlag};
pub use surface::{ChannelMasks, Surface};
pub use texture::{Texture, TextureAccess, TextureQuery};
pub use window::{Window, WindowFlag, WindowPosition};
