#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Farm Dash.

mod player;
mod plots;

use std::{sync::Arc, time::Duration};

use farm_dash_core::{
    Command, CropKind, CropTable, Event, GameState, GridLayout, PlotState, RejectionReason,
    SessionConfig,
};

pub use player::Player;

use self::plots::Plot;

/// Represents the authoritative Farm Dash world state.
#[derive(Debug)]
pub struct World {
    config: Arc<SessionConfig>,
    crops: Arc<CropTable>,
    layout: GridLayout,
    plots: Vec<Plot>,
    player: Player,
    game_state: GameState,
    time_left: Duration,
    selected_crop: CropKind,
}

impl World {
    /// Creates a world on the title screen with plots laid out by `layout`.
    #[must_use]
    pub fn new(config: Arc<SessionConfig>, crops: Arc<CropTable>, layout: GridLayout) -> Self {
        let time_left = config.time_limit();
        let player = Player::new(config.starting_coins);
        Self {
            plots: plots_from_layout(&layout),
            config,
            crops,
            layout,
            player,
            game_state: GameState::Title,
            time_left,
            selected_crop: CropKind::first(),
        }
    }

    fn reset(&mut self, layout: GridLayout) {
        self.layout = layout;
        self.plots = plots_from_layout(&layout);
        self.player = Player::new(self.config.starting_coins);
        self.time_left = self.config.time_limit();
        self.selected_crop = CropKind::first();
    }

    fn enter_state(&mut self, state: GameState, out_events: &mut Vec<Event>) {
        self.game_state = state;
        out_events.push(Event::GameStateChanged { state });
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.time_left = self.time_left.saturating_sub(dt);
        if self.time_left.is_zero() {
            log::info!("time is up, final score {}", self.player.score());
            self.enter_state(GameState::GameOver, out_events);
        }

        let seconds = dt.as_secs_f32();
        for plot in &mut self.plots {
            if let Some(crop) = plot.advance(seconds) {
                log::debug!("{crop:?} ripened on {:?}", plot.coord());
                out_events.push(Event::CropRipened {
                    plot: plot.coord(),
                    crop,
                });
            }
        }
    }

    fn interact(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let Some(plot) = self.plots.get_mut(index) else {
            return;
        };
        let coord = plot.coord();
        let center = plot.rect().center();

        let outcome = match plot.state() {
            PlotState::Empty => {
                let crop = self.selected_crop;
                let definition = self.crops.get(crop);
                self.player.try_spend(definition.cost).map(|()| {
                    plot.plant(crop, definition);
                    log::debug!("planted {crop:?} on {coord:?}");
                    Event::CropPlanted {
                        plot: coord,
                        crop,
                        center,
                        cost: definition.cost,
                    }
                })
            }
            PlotState::Growing { crop, .. } => {
                plot.water(self.crops.get(crop))
                    .ok_or(RejectionReason::AlreadyWatered)
                    .map(|crop| {
                        log::debug!("watered {crop:?} on {coord:?}");
                        Event::PlotWatered {
                            plot: coord,
                            crop,
                            center,
                        }
                    })
            }
            PlotState::Ready { .. } => match plot.harvest() {
                Some(crop) => {
                    let definition = self.crops.get(crop);
                    self.player.reward(definition.score, definition.coin_yield);
                    log::debug!("harvested {crop:?} on {coord:?}");
                    Ok(Event::CropHarvested {
                        plot: coord,
                        crop,
                        center,
                        score: definition.score,
                        coins: definition.coin_yield,
                    })
                }
                None => return,
            },
        };

        match outcome {
            Ok(event) => out_events.push(event),
            Err(reason) => reject(reason, out_events),
        }
    }
}

/// Applies the provided command to the world, mutating state synchronously.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            match world.game_state {
                GameState::Playing => world.advance_clock(dt, out_events),
                GameState::Title | GameState::GameOver => {}
            }
        }
        Command::StartGame => match world.game_state {
            GameState::Title => {
                log::info!("round started");
                world.enter_state(GameState::Playing, out_events);
            }
            GameState::Playing | GameState::GameOver => {
                log::debug!("ignoring start while {:?}", world.game_state);
            }
        },
        Command::RestartGame { layout } => match world.game_state {
            GameState::GameOver => {
                log::info!("restarting round");
                world.reset(layout);
                out_events.push(Event::SessionReset);
                world.enter_state(GameState::Playing, out_events);
                out_events.push(Event::CropSelected {
                    crop: world.selected_crop,
                });
            }
            GameState::Title | GameState::Playing => {
                log::debug!("ignoring restart while {:?}", world.game_state);
            }
        },
        Command::SelectCrop { crop } => {
            world.selected_crop = crop;
            out_events.push(Event::CropSelected { crop });
        }
        Command::ClickCanvas { position } => {
            if world.game_state != GameState::Playing {
                reject(RejectionReason::NotPlaying, out_events);
                return;
            }

            match world
                .plots
                .iter()
                .position(|plot| plot.rect().contains(position))
            {
                Some(index) => world.interact(index, out_events),
                None => reject(RejectionReason::NoPlotAtPointer, out_events),
            }
        }
    }
}

fn reject(reason: RejectionReason, out_events: &mut Vec<Event>) {
    log::debug!("action rejected: {reason:?}");
    out_events.push(Event::ActionRejected { reason });
}

fn plots_from_layout(layout: &GridLayout) -> Vec<Plot> {
    layout
        .plot_rects()
        .map(|(coord, rect)| Plot::new(coord, rect))
        .collect()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{Player, World};
    use farm_dash_core::{
        CanvasPoint, CropKind, CropTable, GameState, GridLayout, PlotCoord, PlotSnapshot,
    };

    /// Current top-level state of the session.
    #[must_use]
    pub fn game_state(world: &World) -> GameState {
        world.game_state
    }

    /// Time remaining in the round, never negative.
    #[must_use]
    pub fn time_left(world: &World) -> Duration {
        world.time_left
    }

    /// Crop used by the next planting action.
    #[must_use]
    pub fn selected_crop(world: &World) -> CropKind {
        world.selected_crop
    }

    /// Provides read-only access to the player's resources.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Provides read-only access to the crop catalogue the world plays with.
    #[must_use]
    pub fn crops(world: &World) -> &CropTable {
        &world.crops
    }

    /// Geometry the current plots were laid out with.
    #[must_use]
    pub fn layout(world: &World) -> &GridLayout {
        &world.layout
    }

    /// Captures every plot in row-major order.
    pub fn plots(world: &World) -> impl Iterator<Item = PlotSnapshot> + '_ {
        world.plots.iter().map(|plot| plot.snapshot())
    }

    /// Captures the plot at `coord`, if the grid contains it.
    #[must_use]
    pub fn plot(world: &World, coord: PlotCoord) -> Option<PlotSnapshot> {
        world
            .plots
            .iter()
            .find(|plot| plot.coord() == coord)
            .map(|plot| plot.snapshot())
    }

    /// First plot whose bounds contain `position`, edges included.
    #[must_use]
    pub fn plot_at(world: &World, position: CanvasPoint) -> Option<PlotCoord> {
        world
            .plots
            .iter()
            .find(|plot| plot.rect().contains(position))
            .map(|plot| plot.coord())
    }
}
