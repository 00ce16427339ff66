#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session that wires the world to its feedback systems.
//!
//! The session is the single writer of all game state. A frame driver calls
//! [`GameSession::update`] followed by [`GameSession::render`]; input arrives
//! between frames through [`GameSession::handle_input`] or the individual
//! action methods. Every mutation goes through the world as a command and the
//! resulting events are fanned out to the particle and log systems.

use std::{sync::Arc, time::Duration};

use farm_dash_core::{
    palette, CanvasPoint, Command, CropKind, CropTable, CropTableError, GameState,
    PlotSnapshot, PlotState, SessionConfig, GAME_TITLE,
};
use farm_dash_rendering::{
    Color, CropButtonPresentation, FrameInput, HudPresentation, InterfaceLayout,
    LogLinePresentation, OverlayPresentation, ParticlePresentation, PlotPresentation, PlotVisual,
    Scene,
};
use farm_dash_system_layout::{compute_layout, LayoutConstants, LayoutError, ViewportClass};
use farm_dash_system_particles::Particles;
use farm_dash_system_transient_log::TransientLog;
use farm_dash_world::{self as world, query, Player, World};
use thiserror::Error;

/// How-to-play text shown on the title overlay.
pub const INSTRUCTIONS: &str = "Goal: grow your farm for one minute and reach the best score.\n\
Click or tap to play:\n\
- Seed panel: choose the seed to plant\n\
- Empty plot: sow a seed (costs coins)\n\
- Growing crop: water it (speeds up growth)\n\
- Ripe crop: harvest it (earns score and coins)";

/// Call to action on the title overlay.
pub const START_PROMPT: &str = "Click to start!";

/// Heading of the game over overlay.
pub const GAME_OVER_TITLE: &str = "Game over!";

/// Call to action on the game over overlay.
pub const RESTART_PROMPT: &str = "Play again";

/// Formats the remaining time as zero-padded `mm:ss`, flooring partial seconds.
#[must_use]
pub fn format_countdown(time_left: Duration) -> String {
    let seconds = time_left.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Reasons a session cannot be created.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SessionError {
    /// The crop table is unusable.
    #[error("invalid crop table: {0}")]
    Crops(#[from] CropTableError),
    /// The layout constants cannot host a grid.
    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
    /// The round would never be playable.
    #[error("time limit must be a positive number of seconds (received {seconds})")]
    InvalidTimeLimit {
        /// Configured time limit.
        seconds: f32,
    },
}

/// Orchestrates one player's rounds from the title screen onwards.
#[derive(Debug)]
pub struct GameSession {
    crops: Arc<CropTable>,
    layout_constants: LayoutConstants,
    viewport: ViewportClass,
    world: World,
    particles: Particles,
    log: TransientLog,
    hud: HudPresentation,
}

impl GameSession {
    /// Creates a session on the title screen using the default layout constants.
    pub fn new(
        config: Arc<SessionConfig>,
        crops: Arc<CropTable>,
        viewport: ViewportClass,
        rng_seed: u64,
    ) -> Result<Self, SessionError> {
        Self::with_layout_constants(
            config,
            crops,
            LayoutConstants::default(),
            viewport,
            rng_seed,
        )
    }

    /// Creates a session on the title screen with custom layout constants.
    ///
    /// The viewport class is fixed for the lifetime of the session; the grid is
    /// laid out now and again on every restart.
    pub fn with_layout_constants(
        config: Arc<SessionConfig>,
        crops: Arc<CropTable>,
        layout_constants: LayoutConstants,
        viewport: ViewportClass,
        rng_seed: u64,
    ) -> Result<Self, SessionError> {
        crops.validate()?;
        layout_constants.validate()?;
        if config.try_time_limit().is_none() {
            return Err(SessionError::InvalidTimeLimit {
                seconds: config.time_limit_secs,
            });
        }

        let layout = compute_layout(viewport, &layout_constants);
        log::info!(
            "new session: {viewport:?} viewport, {}px plots at {:?}",
            layout.plot_size(),
            layout.origin()
        );

        let mut session = Self {
            world: World::new(config, Arc::clone(&crops), layout),
            particles: Particles::new(rng_seed),
            log: TransientLog::new(Arc::clone(&crops)),
            crops,
            layout_constants,
            viewport,
            hud: HudPresentation::default(),
        };
        session.execute(Command::SelectCrop {
            crop: CropKind::first(),
        });
        session.refresh_hud();
        Ok(session)
    }

    /// Advances the session by one frame of `dt`.
    ///
    /// Particles and log messages age in every state. The countdown, the plots
    /// and the status texts only move while a round is being played.
    pub fn update(&mut self, dt: Duration) {
        let playing = self.game_state() == GameState::Playing;
        self.execute(Command::Tick { dt });
        if playing {
            self.refresh_hud();
        }
    }

    /// Clicks the canvas at `position`, planting, watering or harvesting.
    pub fn pointer_click(&mut self, position: CanvasPoint) {
        self.execute(Command::ClickCanvas { position });
        self.refresh_hud();
    }

    /// Arms `crop` for the next planting action.
    pub fn select_crop(&mut self, crop: CropKind) {
        self.execute(Command::SelectCrop { crop });
    }

    /// Leaves the title screen and starts the countdown.
    pub fn start(&mut self) {
        self.execute(Command::StartGame);
        self.refresh_hud();
    }

    /// Starts a new round after a game over on a freshly laid out grid.
    pub fn restart(&mut self) {
        let layout = compute_layout(self.viewport, &self.layout_constants);
        self.execute(Command::RestartGame { layout });
        self.refresh_hud();
    }

    /// Triggers the overlay action: start on the title screen, restart after a game over.
    pub fn primary_action(&mut self) {
        match self.game_state() {
            GameState::Title => self.start(),
            GameState::GameOver => self.restart(),
            GameState::Playing => log::debug!("primary action ignored while playing"),
        }
    }

    /// Applies the input gathered by a backend for the current frame.
    pub fn handle_input(&mut self, input: FrameInput) {
        if input.primary_action {
            self.primary_action();
        }
        if let Some(crop) = input.select_crop {
            self.select_crop(crop);
        }
        if let Some(position) = input.pointer_click {
            self.pointer_click(position);
        }
    }

    /// Current top-level state.
    #[must_use]
    pub fn game_state(&self) -> GameState {
        query::game_state(&self.world)
    }

    /// Time left in the current round.
    #[must_use]
    pub fn time_left(&self) -> Duration {
        query::time_left(&self.world)
    }

    /// Crop used by the next planting action.
    #[must_use]
    pub fn selected_crop(&self) -> CropKind {
        query::selected_crop(&self.world)
    }

    /// Score and coin balance.
    #[must_use]
    pub fn player(&self) -> &Player {
        query::player(&self.world)
    }

    /// Viewport class the grid is laid out for.
    #[must_use]
    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    /// Plots in row-major order.
    pub fn plots(&self) -> impl Iterator<Item = PlotSnapshot> + '_ {
        query::plots(&self.world)
    }

    /// Live particle effects.
    #[must_use]
    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    /// Visible log messages.
    #[must_use]
    pub fn log(&self) -> &TransientLog {
        &self.log
    }

    /// Describes the current frame without mutating any state.
    #[must_use]
    pub fn render(&self) -> Scene {
        let game_state = self.game_state();
        Scene {
            canvas_width: self.layout_constants.canvas_width,
            canvas_height: self.layout_constants.canvas_height,
            background: Color::from(palette::BLUE_LIGHT),
            interface: self.interface_layout(),
            game_state,
            hud: self.hud.clone(),
            crop_buttons: self.crop_buttons(),
            plots: self.plots().map(|plot| self.plot_presentation(&plot)).collect(),
            particles: self
                .particles
                .iter()
                .map(|particle| ParticlePresentation {
                    position: particle.position(),
                    radius: particle.rendered_radius(),
                    color: Color::from(particle.color()),
                })
                .collect(),
            log: self
                .log
                .iter()
                .map(|entry| LogLinePresentation {
                    id: entry.id().get(),
                    text: entry.text().to_owned(),
                    color: Color::from(entry.color()),
                    opacity: entry.opacity(),
                })
                .collect(),
            overlay: self.overlay(game_state),
        }
    }

    fn execute(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.particles.handle(&events);
        self.log.handle(&events);
    }

    fn refresh_hud(&mut self) {
        let player = query::player(&self.world);
        self.hud = HudPresentation {
            score: format!("Score: {}", player.score()),
            coins: format!("Coins: {}", player.coins()),
            timer: format!("Time: {}", format_countdown(self.time_left())),
        };
    }

    fn interface_layout(&self) -> InterfaceLayout {
        match self.viewport {
            ViewportClass::Wide => InterfaceLayout::SidePanel {
                width: self.layout_constants.panel_width,
            },
            ViewportClass::Narrow => InterfaceLayout::Stacked {
                top_height: self.layout_constants.top_ui_height,
                bottom_height: self.layout_constants.bottom_log_height,
            },
        }
    }

    fn crop_buttons(&self) -> Vec<CropButtonPresentation> {
        let selected = self.selected_crop();
        self.crops
            .iter()
            .map(|(crop, definition)| CropButtonPresentation {
                crop,
                label: definition.name.clone(),
                detail: format!("Cost: {}C / Score: {}P", definition.cost, definition.score),
                selected: crop == selected,
            })
            .collect()
    }

    fn plot_presentation(&self, plot: &PlotSnapshot) -> PlotPresentation {
        let visual = match plot.state {
            PlotState::Empty => PlotVisual::Empty,
            PlotState::Growing { crop, watered, .. } => PlotVisual::Growing {
                progress: plot.state.growth_progress(),
                color: Color::from(self.crops.get(crop).color),
                needs_water: !watered,
            },
            PlotState::Ready { crop } => PlotVisual::Ready {
                color: Color::from(self.crops.get(crop).color),
            },
        };
        PlotPresentation {
            rect: plot.rect,
            visual,
        }
    }

    fn overlay(&self, game_state: GameState) -> Option<OverlayPresentation> {
        match game_state {
            GameState::Title => Some(OverlayPresentation {
                title: GAME_TITLE.to_owned(),
                message: INSTRUCTIONS.to_owned(),
                prompt: START_PROMPT.to_owned(),
                backdrop: Color::from(palette::GREEN_DARK).with_alpha(0.9),
            }),
            GameState::Playing => None,
            GameState::GameOver => Some(OverlayPresentation {
                title: GAME_OVER_TITLE.to_owned(),
                message: format!("Final score: {}", self.player().score()),
                prompt: RESTART_PROMPT.to_owned(),
                backdrop: Color::new(0.0, 0.0, 0.0, 0.75),
            }),
        }
    }
}
