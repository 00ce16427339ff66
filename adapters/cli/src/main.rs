#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Farm Dash experience.

mod config;

use std::{cell::RefCell, path::PathBuf, rc::Rc, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use farm_dash_core::{GameState, GAME_TITLE};
use farm_dash_rendering::{
    Color, FrameInput, HeadlessBackend, Presentation, RenderingBackend, Scene,
};
use farm_dash_rendering_macroquad::MacroquadBackend;
use farm_dash_session::GameSession;
use farm_dash_system_layout::ViewportClass;

use self::config::GameSettings;

/// Plant, water and harvest crops against the clock.
#[derive(Debug, Parser)]
#[command(name = "farm-dash", version, about)]
struct CliArgs {
    /// Forces the portrait layout regardless of the window width.
    #[arg(long)]
    narrow: bool,
    /// Window width in pixels; also decides between the wide and narrow layout.
    #[arg(long, default_value_t = 1000, value_name = "PIXELS")]
    window_width: u32,
    /// TOML file overriding session, layout and crop settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for particle effects; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Synchronises presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    vsync: bool,
    /// Prints the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
    /// Runs this many frames without a window, starting the round immediately.
    #[arg(long, value_name = "N")]
    headless_frames: Option<u32>,
    /// Synthetic frame length used by the headless run.
    #[arg(long, default_value_t = 16, value_name = "MS")]
    headless_dt_ms: u64,
}

/// Entry point for the Farm Dash command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let settings = match &args.config {
        Some(path) => GameSettings::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GameSettings::default(),
    };
    let viewport = if args.narrow {
        ViewportClass::Narrow
    } else {
        settings.layout.classify(args.window_width as f32)
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting with {viewport:?} layout and particle seed {seed}");

    let session = GameSession::with_layout_constants(
        Arc::new(settings.session),
        Arc::new(settings.crops),
        settings.layout,
        viewport,
        seed,
    )
    .context("failed to create game session")?;
    let presentation = Presentation::new(GAME_TITLE, Color::from_rgb_u8(0, 0, 0), session.render());
    let session = Rc::new(RefCell::new(session));

    match args.headless_frames {
        Some(frames) => {
            let backend = HeadlessBackend::new(frames, Duration::from_millis(args.headless_dt_ms))
                .with_input(
                    0,
                    FrameInput {
                        primary_action: true,
                        ..FrameInput::default()
                    },
                );
            backend
                .run(presentation, frame_driver(Rc::clone(&session)))
                .context("headless run failed")?;

            let session = session.borrow();
            if session.game_state() != GameState::GameOver {
                println!(
                    "Stopped after {frames} frames with score {} and {} coins",
                    session.player().score(),
                    session.player().coins()
                );
            }
        }
        None => {
            let window_height = args.window_width.saturating_mul(3) / 4;
            MacroquadBackend::default()
                .with_vsync(args.vsync)
                .with_show_fps(args.show_fps)
                .with_window_size(args.window_width, window_height)
                .run(presentation, frame_driver(session))
                .context("rendering backend failed")?;
        }
    }
    Ok(())
}

/// Builds the per-frame closure: apply input, advance, describe the frame.
///
/// Prints the final score once whenever a round ends.
fn frame_driver(
    session: Rc<RefCell<GameSession>>,
) -> impl FnMut(Duration, FrameInput, &mut Scene) + 'static {
    let mut previous_state = GameState::Title;
    move |dt, input, scene| {
        let mut session = session.borrow_mut();
        session.handle_input(input);
        session.update(dt);

        let state = session.game_state();
        if state == GameState::GameOver && previous_state != GameState::GameOver {
            println!("Final score: {}", session.player().score());
        }
        previous_state = state;

        *scene = session.render();
    }
}
