// src/event.rs

//! Polling and decoding of the SDL event queue.

use log::trace;
use sdl2_sys as sys;

// SDL_events.h type values for the events this layer decodes.
const EVENT_QUIT: u32 = sys::SDL_EventType::SDL_QUIT as u32;
const EVENT_APP_TERMINATING: u32 = sys::SDL_EventType::SDL_APP_TERMINATING as u32;
const EVENT_WINDOW: u32 = sys::SDL_EventType::SDL_WINDOWEVENT as u32;

/// What happened to a window, from `SDL_WindowEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEventKind {
    Shown,
    Hidden,
    Exposed,
    /// Moved to (`data1`, `data2`).
    Moved,
    /// Resized to `data1` x `data2`; follows `SizeChanged` when the
    /// resize came from the user or window manager.
    Resized,
    /// Size changed for any reason, including API calls.
    SizeChanged,
    Minimized,
    Maximized,
    Restored,
    /// Gained mouse focus.
    Enter,
    /// Lost mouse focus.
    Leave,
    FocusGained,
    FocusLost,
    /// The window manager asked for the window to close.
    Close,
    TakeFocus,
    HitTest,
    /// An event id this layer does not decode.
    Other(u8),
}

impl WindowEventKind {
    fn from_ll(raw: u8) -> Self {
        use sys::SDL_WindowEventID::*;
        match raw {
            x if x == SDL_WINDOWEVENT_SHOWN as u8 => WindowEventKind::Shown,
            x if x == SDL_WINDOWEVENT_HIDDEN as u8 => WindowEventKind::Hidden,
            x if x == SDL_WINDOWEVENT_EXPOSED as u8 => WindowEventKind::Exposed,
            x if x == SDL_WINDOWEVENT_MOVED as u8 => WindowEventKind::Moved,
            x if x == SDL_WINDOWEVENT_RESIZED as u8 => WindowEventKind::Resized,
            x if x == SDL_WINDOWEVENT_SIZE_CHANGED as u8 => WindowEventKind::SizeChanged,
            x if x == SDL_WINDOWEVENT_MINIMIZED as u8 => WindowEventKind::Minimized,
            x if x == SDL_WINDOWEVENT_MAXIMIZED as u8 => WindowEventKind::Maximized,
            x if x == SDL_WINDOWEVENT_RESTORED as u8 => WindowEventKind::Restored,
            x if x == SDL_WINDOWEVENT_ENTER as u8 => WindowEventKind::Enter,
            x if x == SDL_WINDOWEVENT_LEAVE as u8 => WindowEventKind::Leave,
            x if x == SDL_WINDOWEVENT_FOCUS_GAINED as u8 => WindowEventKind::FocusGained,
            x if x == SDL_WINDOWEVENT_FOCUS_LOST as u8 => WindowEventKind::FocusLost,
            x if x == SDL_WINDOWEVENT_CLOSE as u8 => WindowEventKind::Close,
            x if x == SDL_WINDOWEVENT_TAKE_FOCUS as u8 => WindowEventKind::TakeFocus,
            x if x == SDL_WINDOWEVENT_HIT_TEST as u8 => WindowEventKind::HitTest,
            other => WindowEventKind::Other(other),
        }
    }
}

/// A decoded event from the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user requested the application quit.
    Quit,
    /// The OS is terminating the application.
    AppTerminating,
    /// Something happened to a window.
    Window {
        /// Which window, matching [`Window::id`](crate::window::Window::id).
        window_id: u32,
        kind: WindowEventKind,
        /// Event-dependent payload, e.g. the new width for a resize.
        data1: i32,
        data2: i32,
    },
    /// An event type this layer does not decode.
    Unknown(u32),
}

impl Event {
    fn from_ll(raw: &sys::SDL_Event) -> Self {
        // SAFETY: type_ is the union's discriminant and is valid for any
        // event SDL hands out; the window field is only read when the
        // discriminant says so.
        let kind = unsafe { raw.type_ };
        match kind {
            EVENT_QUIT => Event::Quit,
            EVENT_APP_TERMINATING => Event::AppTerminating,
            EVENT_WINDOW => {
                let window = unsafe { raw.window };
                Event::Window {
                    window_id: window.windowID,
                    kind: WindowEventKind::from_ll(window.event),
                    data1: window.data1,
                    data2: window.data2,
                }
            }
            other => Event::Unknown(other),
        }
    }
}

/// Pumps the event loop and takes the next pending event, if any.
///
/// Requires an initialized video subsystem and must be called from the
/// thread that set it up.
pub fn poll() -> Option<Event> {
    // SAFETY: the out-event is a valid zeroed local and is only read
    // after SDL reports it filled.
    let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
    if unsafe { sys::SDL_PollEvent(&mut raw) } == 0 {
        return None;
    }
    let event = Event::from_ll(&raw);
    trace!("Polled event: {:?}", event);
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_event(event: u8, data1: i32, data2: i32) -> sys::SDL_Event {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        raw.window = sys::SDL_WindowEvent {
            type_: EVENT_WINDOW,
            timestamp: 0,
            windowID: 7,
            event,
            padding1: 0,
            padding2: 0,
            padding3: 0,
            data1,
            data2,
        };
        raw
    }

    #[test]
    fn decodes_quit() {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        raw.type_ = EVENT_QUIT;
        assert_eq!(Event::from_ll(&raw), Event::Quit);
    }

    #[test]
    fn decodes_size_changed_with_payload() {
        let raw = window_event(
            sys::SDL_WindowEventID::SDL_WINDOWEVENT_SIZE_CHANGED as u8,
            800,
            600,
        );
        assert_eq!(
            Event::from_ll(&raw),
            Event::Window {
                window_id: 7,
                kind: WindowEventKind::SizeChanged,
                data1: 800,
                data2: 600,
            }
        );
    }

    #[test]
    fn unknown_types_are_preserved() {
        let mut raw: sys::SDL_Event = unsafe { std::mem::zeroed() };
        raw.type_ = 0x9999;
        assert_eq!(Event::from_ll(&raw), Event::Unknown(0x9999));
    }

    #[test]
    fn unknown_window_event_ids_are_preserved() {
        let raw = window_event(0xEE, 0, 0);
        match Event::from_ll(&raw) {
            Event::Window { kind, .. } => assert_eq!(kind, WindowEventKind::Other(0xEE)),
            other => panic!("expected a window event, got {:?}", other),
        }
    }
}
