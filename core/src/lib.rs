#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Farm Dash engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams and never mutate the world
//! directly.

mod crops;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use crops::{CropDefinition, CropKind, CropTable, CropTableError};

/// Title shown on the start overlay and the window.
pub const GAME_TITLE: &str = "Mini Farm Dash!";

/// Top-level state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Entry state; the title overlay is shown and the countdown is frozen.
    Title,
    /// The countdown runs and plots accept actions.
    Playing,
    /// The countdown reached zero; only a restart leaves this state.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Wall-clock time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Leaves the title state and starts the countdown.
    StartGame,
    /// Re-creates the player and plot grid and resumes play after a game over.
    RestartGame {
        /// Freshly computed grid geometry for the new plots.
        layout: GridLayout,
    },
    /// Arms the crop used by subsequent planting actions.
    SelectCrop {
        /// Crop to plant on the next empty plot.
        crop: CropKind,
    },
    /// Delivers a pointer click expressed in canvas coordinates.
    ClickCanvas {
        /// Position of the click on the canvas.
        position: CanvasPoint,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of wall-clock time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the session entered a new top-level state.
    GameStateChanged {
        /// State that became active.
        state: GameState,
    },
    /// Announces that player, plots and feedback should start from scratch.
    SessionReset,
    /// Confirms that a crop was armed for planting.
    CropSelected {
        /// Crop that is now selected.
        crop: CropKind,
    },
    /// Confirms that a crop was planted on an empty plot.
    CropPlanted {
        /// Plot that received the seed.
        plot: PlotCoord,
        /// Crop that was planted.
        crop: CropKind,
        /// Center of the plot on the canvas.
        center: CanvasPoint,
        /// Coins deducted from the player.
        cost: u32,
    },
    /// Confirms that a growing plot was watered.
    PlotWatered {
        /// Plot that was watered.
        plot: PlotCoord,
        /// Crop growing on the plot.
        crop: CropKind,
        /// Center of the plot on the canvas.
        center: CanvasPoint,
    },
    /// Reports that a growing crop finished and can be harvested.
    CropRipened {
        /// Plot whose crop ripened.
        plot: PlotCoord,
        /// Crop that ripened.
        crop: CropKind,
    },
    /// Confirms that a ripe crop was harvested.
    CropHarvested {
        /// Plot that was emptied.
        plot: PlotCoord,
        /// Crop that was harvested.
        crop: CropKind,
        /// Center of the plot on the canvas.
        center: CanvasPoint,
        /// Score awarded to the player.
        score: u32,
        /// Coins awarded to the player.
        coins: u32,
    },
    /// Reports that a player action was ignored.
    ActionRejected {
        /// Specific reason the action had no effect.
        reason: RejectionReason,
    },
}

/// Reasons a player action may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The player cannot afford the selected crop.
    InsufficientFunds {
        /// Cost of the selected crop.
        required: u32,
        /// Coins the player holds.
        available: u32,
    },
    /// The plot was already watered during the current growth cycle.
    AlreadyWatered,
    /// The click did not land on any plot.
    NoPlotAtPointer,
    /// The session is not in the playing state.
    NotPlaying,
}

/// Opaque RGB color used by crops and feedback effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Named colors used across the game.
pub mod palette {
    use super::Rgb;

    /// Neutral message text.
    pub const WHITE: Rgb = Rgb::from_rgb(0xff, 0xff, 0xff);
    /// Plot outline and gauge track.
    pub const BLACK: Rgb = Rgb::from_rgb(0x00, 0x00, 0x00);
    /// Lettuce and planting bursts.
    pub const GREEN_DARK: Rgb = Rgb::from_rgb(0x22, 0x8b, 0x22);
    /// Soil.
    pub const BROWN: Rgb = Rgb::from_rgb(0x8b, 0x45, 0x13);
    /// Water hints, watering bursts and the playfield background.
    pub const BLUE_LIGHT: Rgb = Rgb::from_rgb(0xad, 0xd8, 0xe6);
    /// Pumpkins, harvest bursts and the ready label.
    pub const YELLOW: Rgb = Rgb::from_rgb(0xff, 0xff, 0x00);
    /// Carrots.
    pub const ORANGE: Rgb = Rgb::from_rgb(0xff, 0xa5, 0x00);
    /// Spending and failures.
    pub const RED_COST: Rgb = Rgb::from_rgb(0xff, 0x64, 0x64);
    /// Gains.
    pub const GREEN_GAIN: Rgb = Rgb::from_rgb(0x64, 0xff, 0x64);
}

/// Tunables that describe a play session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of a round in seconds.
    pub time_limit_secs: f32,
    /// Coins granted to a fresh player.
    pub starting_coins: u32,
}

impl SessionConfig {
    /// Countdown length of a round, when the configured limit is a positive
    /// number of seconds that fits in a [`Duration`].
    #[must_use]
    pub fn try_time_limit(&self) -> Option<Duration> {
        if !(self.time_limit_secs > 0.0) {
            return None;
        }
        Duration::try_from_secs_f32(self.time_limit_secs).ok()
    }

    /// Countdown length of a round; unusable limits end the round at once.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.try_time_limit().unwrap_or_default()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: 60.0,
            starting_coins: 10,
        }
    }
}

/// Location of a single plot expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlotCoord {
    column: u32,
    row: u32,
}

impl PlotCoord {
    /// Creates a new plot coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the plot.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the plot.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Point on the drawing canvas measured in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    /// Horizontal offset from the left edge.
    pub x: f32,
    /// Vertical offset from the top edge.
    pub y: f32,
}

impl CanvasPoint {
    /// Creates a new canvas point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Square, axis-aligned area occupied by a plot on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    origin: CanvasPoint,
    size: f32,
}

impl PlotRect {
    /// Creates a rectangle from its top-left corner and edge length.
    #[must_use]
    pub const fn new(origin: CanvasPoint, size: f32) -> Self {
        Self { origin, size }
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CanvasPoint {
        self.origin
    }

    /// Edge length of the rectangle.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> CanvasPoint {
        let half = self.size / 2.0;
        CanvasPoint::new(self.origin.x + half, self.origin.y + half)
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: CanvasPoint) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.size
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.size
    }
}

/// Geometry of the square plot grid for one session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    dimension: u32,
    plot_size: f32,
    padding: f32,
    origin: CanvasPoint,
}

impl GridLayout {
    /// Creates a grid description with `dimension` plots per side.
    #[must_use]
    pub const fn new(dimension: u32, plot_size: f32, padding: f32, origin: CanvasPoint) -> Self {
        Self {
            dimension,
            plot_size,
            padding,
            origin,
        }
    }

    /// Number of plots along each side of the grid.
    #[must_use]
    pub const fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Edge length shared by every plot in the grid.
    #[must_use]
    pub const fn plot_size(&self) -> f32 {
        self.plot_size
    }

    /// Gap between neighbouring plots.
    #[must_use]
    pub const fn padding(&self) -> f32 {
        self.padding
    }

    /// Top-left corner of the first plot.
    #[must_use]
    pub const fn origin(&self) -> CanvasPoint {
        self.origin
    }

    /// Width and height of the whole grid including the gaps between plots.
    #[must_use]
    pub fn extent(&self) -> f32 {
        let gaps = self.dimension.saturating_sub(1) as f32;
        self.dimension as f32 * self.plot_size + gaps * self.padding
    }

    /// Rectangle covered by the plot at `coord`.
    #[must_use]
    pub fn plot_rect(&self, coord: PlotCoord) -> PlotRect {
        let stride = self.plot_size + self.padding;
        let origin = CanvasPoint::new(
            self.origin.x + coord.column() as f32 * stride,
            self.origin.y + coord.row() as f32 * stride,
        );
        PlotRect::new(origin, self.plot_size)
    }

    /// Enumerates every plot coordinate with its rectangle in row-major order.
    pub fn plot_rects(&self) -> impl Iterator<Item = (PlotCoord, PlotRect)> + '_ {
        (0..self.dimension).flat_map(move |row| {
            (0..self.dimension).map(move |column| {
                let coord = PlotCoord::new(column, row);
                (coord, self.plot_rect(coord))
            })
        })
    }
}

/// Crop lifecycle state of a single plot.
///
/// The crop only exists inside the `Growing` and `Ready` variants, so an empty
/// plot can never carry a crop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlotState {
    /// Bare soil waiting for a seed.
    Empty,
    /// A crop counts down towards harvest.
    Growing {
        /// Crop planted on the plot.
        crop: CropKind,
        /// Seconds left until the crop ripens, never negative.
        growth_timer: f32,
        /// Base duration captured at planting, used for progress display.
        max_growth_time: f32,
        /// Whether the plot was watered during this growth cycle.
        watered: bool,
    },
    /// The crop is ripe and waiting for harvest.
    Ready {
        /// Crop ready for harvest.
        crop: CropKind,
    },
}

impl PlotState {
    /// Crop occupying the plot, if any.
    #[must_use]
    pub const fn crop(&self) -> Option<CropKind> {
        match self {
            Self::Empty => None,
            Self::Growing { crop, .. } | Self::Ready { crop } => Some(*crop),
        }
    }

    /// Whether the plot was watered during the current growth cycle.
    #[must_use]
    pub const fn watered(&self) -> bool {
        matches!(self, Self::Growing { watered: true, .. })
    }

    /// Fraction of the growth cycle already completed, between 0 and 1.
    ///
    /// Empty plots report zero and ripe plots report one.
    #[must_use]
    pub fn growth_progress(&self) -> f32 {
        match self {
            Self::Empty => 0.0,
            Self::Growing {
                growth_timer,
                max_growth_time,
                ..
            } => {
                if *max_growth_time <= f32::EPSILON {
                    1.0
                } else {
                    (1.0 - growth_timer / max_growth_time).clamp(0.0, 1.0)
                }
            }
            Self::Ready { .. } => 1.0,
        }
    }
}

/// Immutable representation of a single plot used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotSnapshot {
    /// Grid coordinate identifying the plot.
    pub coord: PlotCoord,
    /// Area covered by the plot on the canvas.
    pub rect: PlotRect,
    /// Crop lifecycle state.
    pub state: PlotState,
}
