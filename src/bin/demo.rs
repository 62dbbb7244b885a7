// src/bin/demo.rs

//! Renders two alpha-blended squares in a resizable window.
//!
//! Exercises the whole stack: subsystem init, driver enumeration, window
//! and renderer creation, surface-to-texture upload, blend modes, and the
//! event loop. Quits on window close.

use anyhow::{Context, Result};
use log::{debug, info};

use sdl2kit::{
    event, init, BlendMode, Color, Driver, Event, FlagSet, PixelFormat, PixelFormatKind, Rect,
    Renderer, RendererFlag, Subsystem, Surface, Texture, VideoDisplay, Window, WindowEventKind,
    WindowFlag, WindowPosition,
};

const WINDOW_WIDTH: u32 = 600;
const WINDOW_HEIGHT: u32 = 480;
const FALLBACK_FPS: i32 = 60;

fn main() -> Result<()> {
    env_logger::init();

    for driver in Driver::all().context("enumerating render drivers")? {
        let info = driver.info().context("querying render driver")?;
        info!(
            "Render {}: {} (options {:?}, {} texture formats)",
            driver,
            info.name,
            info.options,
            info.formats.len()
        );
    }

    init::init(FlagSet::from(Subsystem::Video)).context("initializing SDL video")?;
    let result = run();
    init::quit();
    result
}

fn run() -> Result<()> {
    for display in VideoDisplay::all().context("enumerating displays")? {
        info!(
            "Display {}: {} modes",
            display.name().context("querying display name")?,
            display.modes().context("querying display modes")?.len()
        );
    }

    let window = Window::new(
        "SDL demo",
        WindowPosition::Centered,
        WindowPosition::Centered,
        WINDOW_WIDTH,
        WINDOW_HEIGHT,
        [WindowFlag::Shown, WindowFlag::Resizable].into_iter().collect(),
    )
    .context("creating window")?;

    let frames_per_second = window
        .display_mode()
        .map(|mode| mode.refresh_rate)
        .unwrap_or(FALLBACK_FPS)
        .max(1);
    info!("Pacing at {} frames per second", frames_per_second);

    let renderer = create_renderer(&window).context("creating renderer")?;
    let format = PixelFormat::new(PixelFormatKind::ARGB8888).context("allocating pixel format")?;

    let mut needs_display = true;
    let frame_budget = 1000 / frames_per_second as u32;
    loop {
        let frame_start = init::ticks();
        while let Some(event) = event::poll() {
            match event {
                Event::Quit | Event::AppTerminating => {
                    info!("Quit requested");
                    return Ok(());
                }
                Event::Window {
                    kind: WindowEventKind::SizeChanged,
                    data1,
                    data2,
                    ..
                } => {
                    debug!("Window resized to {}x{}", data1, data2);
                    needs_display = true;
                }
                _ => {}
            }
        }
        if needs_display {
            draw(&renderer, &format).context("drawing frame")?;
            needs_display = false;
        }
        let elapsed = init::ticks().wrapping_sub(frame_start);
        if elapsed < frame_budget {
            init::delay(frame_budget - elapsed);
        }
    }
}

/// Prefers vsynced hardware acceleration, falling back to whatever the
/// default driver offers.
fn create_renderer(window: &Window) -> Result<Renderer<'_>> {
    let preferred: FlagSet<RendererFlag> =
        [RendererFlag::Accelerated, RendererFlag::PresentVsync]
            .into_iter()
            .collect();
    match Renderer::new(window, Driver::DEFAULT, preferred) {
        Ok(renderer) => Ok(renderer),
        Err(err) => {
            info!("Accelerated renderer unavailable ({}), falling back", err);
            Ok(Renderer::new(window, Driver::DEFAULT, FlagSet::new())?)
        }
    }
}

fn draw(renderer: &Renderer<'_>, format: &PixelFormat) -> Result<()> {
    renderer.set_draw_color(0xFF, 0xFF, 0xFF, 0xFF)?;
    renderer.clear()?;

    let mut red_square = square_texture(renderer, format, (0xFF, 0x00, 0x00, 0x7F))?;
    red_square.set_blend_mode(FlagSet::from(BlendMode::Alpha))?;
    renderer.copy(&red_square, None, Some(Rect::new(100, 100, 200, 200)))?;

    let mut green_square = square_texture(renderer, format, (0x00, 0xFF, 0x00, 0xB2))?;
    green_square.set_blend_mode(FlagSet::from(BlendMode::Alpha))?;
    renderer.copy(&green_square, None, Some(Rect::new(50, 50, 100, 100)))?;

    renderer.present();
    Ok(())
}

/// Builds a 1x1 texture of a solid color; the renderer stretches it to
/// whatever rectangle it is copied into.
fn square_texture<'r>(
    renderer: &'r Renderer<'_>,
    format: &PixelFormat,
    (r, g, b, a): (u8, u8, u8, u8),
) -> Result<Texture<'r>> {
    let mut surface = Surface::new_rgb(1, 1, 32, Default::default())?;
    let color = Color::from_rgba(format, r, g, b, a);
    surface.fill(None, color)?;
    Ok(Texture::from_surface(renderer, &surface)?)
}
