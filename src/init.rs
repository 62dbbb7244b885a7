// src/init.rs

//! SDL library lifecycle: subsystem init, shutdown, and timing.

use log::{debug, info};
use sdl2_sys as sys;

use crate::error::{check_code, SdlResult};
use crate::flags::{BitFlag, FlagSet};

/// An SDL subsystem, as passed to `SDL_Init` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Timer = 0x0000_0001,
    Audio = 0x0000_0010,
    Video = 0x0000_0020,
    Joystick = 0x0000_0200,
    Haptic = 0x0000_1000,
    GameController = 0x0000_2000,
    Events = 0x0000_4000,
}

impl BitFlag for Subsystem {
    const ALL: &'static [Subsystem] = &[
        Subsystem::Timer,
        Subsystem::Audio,
        Subsystem::Video,
        Subsystem::Joystick,
        Subsystem::Haptic,
        Subsystem::GameController,
        Subsystem::Events,
    ];

    fn raw(self) -> u32 {
        self as u32
    }
}

/// Initializes the given SDL subsystems.
///
/// Must be called before most other SDL functions. Subsystems already
/// initialized are reference-counted by SDL, so repeated calls are fine.
pub fn init(subsystems: FlagSet<Subsystem>) -> SdlResult<()> {
    info!("Initializing SDL subsystems: {:?}", subsystems);
    // SAFETY: SDL_Init is the library entry point; any flag combination
    // is accepted and failures are reported through the return code.
    check_code(unsafe { sys::SDL_Init(subsystems.raw()) }, "SDL_Init")
}

/// Shuts down specific subsystems.
pub fn quit_subsystems(subsystems: FlagSet<Subsystem>) {
    debug!("Shutting down SDL subsystems: {:?}", subsystems);
    // SAFETY: SDL_QuitSubSystem tolerates flags that were never initialized.
    unsafe { sys::SDL_QuitSubSystem(subsystems.raw()) };
}

/// Cleans up all initialized subsystems.
///
/// Call on every exit path; SDL tolerates a quit with nothing
/// initialized.
pub fn quit() {
    info!("Shutting down SDL");
    // SAFETY: always safe; SDL_Quit is idempotent.
    unsafe { sys::SDL_Quit() };
}

/// Which of the given subsystems are currently initialized.
///
/// Pass the full catalog to query all of them.
pub fn was_init(subsystems: FlagSet<Subsystem>) -> FlagSet<Subsystem> {
    // SAFETY: pure query, safe before and after SDL_Init.
    let mask = unsafe { sys::SDL_WasInit(subsystems.raw()) };
    FlagSet::from_raw(mask)
}

/// Milliseconds since SDL initialization.
pub fn ticks() -> u32 {
    // SAFETY: pure query.
    unsafe { sys::SDL_GetTicks() }
}

/// Blocks the calling thread for at least `ms` milliseconds.
pub fn delay(ms: u32) {
    // SAFETY: plain sleep, no preconditions.
    unsafe { sys::SDL_Delay(ms) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn subsystem_catalog_round_trips() {
        let set: FlagSet<Subsystem> = [Subsystem::Video, Subsystem::Events].into_iter().collect();
        assert_eq!(set.raw(), 0x0000_4020);
        assert_eq!(FlagSet::from_raw(set.raw()), set);
    }

    #[test]
    fn unknown_subsystem_bits_are_dropped() {
        // 0x8000_0000 is not a subsystem flag.
        let set = FlagSet::<Subsystem>::from_raw(0x8000_0020);
        assert_eq!(set.raw(), Subsystem::Video.raw());
    }
}
