#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Farm Dash adapters.
//!
//! A [`Scene`] is a per-frame, read-only description of everything on the
//! canvas. The [`visuals`] module turns it into primitive draw calls and routes
//! pointer clicks back to the element under the pointer, so backends only need
//! to execute primitives and map window coordinates onto the canvas.

pub mod visuals;

use anyhow::Result as AnyResult;
use farm_dash_core::{CanvasPoint, CropKind, GameState, PlotRect, Rgb};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

pub use visuals::{ClickTarget, DrawCommand, Rect, TextAlign};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with its alpha replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

/// Input gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Click on the playfield, expressed in canvas coordinates.
    pub pointer_click: Option<CanvasPoint>,
    /// Crop chosen from the seed panel on this frame.
    pub select_crop: Option<CropKind>,
    /// Whether the overlay was clicked, meaning start or restart.
    pub primary_action: bool,
}

impl FrameInput {
    /// Translates a routed click into frame input.
    #[must_use]
    pub fn from_click(target: ClickTarget) -> Self {
        match target {
            ClickTarget::Overlay => Self {
                primary_action: true,
                ..Self::default()
            },
            ClickTarget::CropButton(crop) => Self {
                select_crop: Some(crop),
                ..Self::default()
            },
            ClickTarget::Playfield(position) => Self {
                pointer_click: Some(position),
                ..Self::default()
            },
            ClickTarget::Interface | ClickTarget::OutsideCanvas => Self::default(),
        }
    }
}

/// Where the non-canvas interface sits relative to the plot grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InterfaceLayout {
    /// Desktop arrangement: one panel along the left edge hosts everything.
    SidePanel {
        /// Width of the panel in canvas pixels.
        width: f32,
    },
    /// Portrait arrangement: status and seeds above the grid, the log below.
    Stacked {
        /// Height of the band above the grid.
        top_height: f32,
        /// Height of the band below the grid.
        bottom_height: f32,
    },
}

/// Status texts refreshed while the round is running.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HudPresentation {
    /// Formatted score line.
    pub score: String,
    /// Formatted coin line.
    pub coins: String,
    /// Formatted countdown line.
    pub timer: String,
}

/// Seed selection button.
#[derive(Clone, Debug, PartialEq)]
pub struct CropButtonPresentation {
    /// Crop planted after pressing the button.
    pub crop: CropKind,
    /// Crop name.
    pub label: String,
    /// Cost and reward summary.
    pub detail: String,
    /// Whether the crop is currently armed.
    pub selected: bool,
}

/// Appearance of a plot for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlotVisual {
    /// Bare soil.
    Empty,
    /// Crop still growing.
    Growing {
        /// Completed fraction of the growth cycle, between 0 and 1.
        progress: f32,
        /// Color of the crop.
        color: Color,
        /// Whether the plot can still be watered this cycle.
        needs_water: bool,
    },
    /// Crop waiting for harvest.
    Ready {
        /// Color of the crop.
        color: Color,
    },
}

/// Plot drawn on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotPresentation {
    /// Area covered by the plot.
    pub rect: PlotRect,
    /// Appearance of the plot.
    pub visual: PlotVisual,
}

/// Particle drawn as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePresentation {
    /// Center of the particle on the canvas.
    pub position: Vec2,
    /// Radius in canvas pixels, at least one.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

/// Message line of the fading log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogLinePresentation {
    /// Handle pairing the line with the log entry that produced it.
    pub id: u64,
    /// Message text.
    pub text: String,
    /// Message color, opaque.
    pub color: Color,
    /// Fade level between the configured floor and one.
    pub opacity: f32,
}

/// Full-canvas overlay shown outside of play.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPresentation {
    /// Large heading.
    pub title: String,
    /// Body text; line breaks are preserved.
    pub message: String,
    /// Text of the call to action.
    pub prompt: String,
    /// Backdrop color, usually translucent.
    pub backdrop: Color,
}

/// Scene description of a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Internal canvas width.
    pub canvas_width: f32,
    /// Internal canvas height.
    pub canvas_height: f32,
    /// Color filling the playfield behind the plots.
    pub background: Color,
    /// Arrangement of the interface around the grid.
    pub interface: InterfaceLayout,
    /// Top-level state of the session.
    pub game_state: GameState,
    /// Score, coin and countdown texts.
    pub hud: HudPresentation,
    /// Seed selection buttons in selection order.
    pub crop_buttons: Vec<CropButtonPresentation>,
    /// Plots in row-major order.
    pub plots: Vec<PlotPresentation>,
    /// Live particles.
    pub particles: Vec<ParticlePresentation>,
    /// Visible log lines from oldest to newest.
    pub log: Vec<LogLinePresentation>,
    /// Overlay covering the canvas, when one is shown.
    pub overlay: Option<OverlayPresentation>,
}

impl Scene {
    /// Creates an empty scene for a canvas of the given size.
    ///
    /// Returns an error when the canvas has no area.
    pub fn new(
        canvas_width: f32,
        canvas_height: f32,
        interface: InterfaceLayout,
    ) -> std::result::Result<Self, RenderingError> {
        if !(canvas_width > 0.0 && canvas_height > 0.0) {
            return Err(RenderingError::InvalidCanvas {
                width: canvas_width,
                height: canvas_height,
            });
        }

        Ok(Self {
            canvas_width,
            canvas_height,
            background: Color::from(farm_dash_core::palette::BLUE_LIGHT),
            interface,
            game_state: GameState::Title,
            hud: HudPresentation::default(),
            crop_buttons: Vec::new(),
            plots: Vec::new(),
            particles: Vec::new(),
            log: Vec::new(),
            overlay: None,
        })
    }

    /// Canvas dimensions as a vector.
    #[must_use]
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame outside the canvas.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Farm Dash scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the measured frame delta
    /// and the input captured since the previous frame, and rewrites the scene
    /// before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Backend that drives a fixed number of frames without opening a window.
///
/// Every frame advances by the same synthetic delta, which makes runs
/// reproducible. Scripted input is delivered on the requested frame indices.
#[derive(Clone, Debug)]
pub struct HeadlessBackend {
    frames: u32,
    frame_dt: Duration,
    script: Vec<(u32, FrameInput)>,
}

impl HeadlessBackend {
    /// Creates a backend that stops after `frames` frames of `frame_dt` each.
    #[must_use]
    pub fn new(frames: u32, frame_dt: Duration) -> Self {
        Self {
            frames,
            frame_dt,
            script: Vec::new(),
        }
    }

    /// Delivers `input` on frame `frame` (zero-based).
    #[must_use]
    pub fn with_input(mut self, frame: u32, input: FrameInput) -> Self {
        self.script.push((frame, input));
        self
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        log::info!(
            "running '{window_title}' headless for {} frames of {:?}",
            self.frames,
            self.frame_dt
        );

        for frame in 0..self.frames {
            let input = self
                .script
                .iter()
                .find(|(at, _)| *at == frame)
                .map(|(_, input)| *input)
                .unwrap_or_default();
            update_scene(self.frame_dt, input, &mut scene);
        }
        Ok(())
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The canvas must have a positive area.
    InvalidCanvas {
        /// Provided width.
        width: f32,
        /// Provided height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCanvas { width, height } => {
                write!(f, "canvas must have a positive size (received {width}x{height})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn side_panel_scene() -> Scene {
        Scene::new(1000.0, 750.0, InterfaceLayout::SidePanel { width: 280.0 })
            .expect("valid canvas")
    }

    #[test]
    fn scene_creation_rejects_empty_canvas_without_panicking() {
        let error = Scene::new(0.0, 750.0, InterfaceLayout::SidePanel { width: 280.0 })
            .expect_err("zero width must be rejected");

        assert_eq!(
            error,
            RenderingError::InvalidCanvas {
                width: 0.0,
                height: 750.0
            }
        );
    }

    #[test]
    fn new_scene_starts_on_title_without_content() {
        let scene = side_panel_scene();

        assert_eq!(scene.game_state, GameState::Title);
        assert!(scene.plots.is_empty());
        assert!(scene.particles.is_empty());
        assert!(scene.log.is_empty());
        assert!(scene.overlay.is_none());
        assert_eq!(scene.canvas_size(), Vec2::new(1000.0, 750.0));
    }

    #[test]
    fn color_conversion_from_rgb_is_opaque() {
        let color = Color::from(Rgb::from_rgb(255, 0, 51));

        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 1.0));
        assert_eq!(color.with_alpha(1.5).alpha, 1.0);
    }

    #[test]
    fn frame_input_mirrors_click_target() {
        assert!(FrameInput::from_click(ClickTarget::Overlay).primary_action);
        assert_eq!(
            FrameInput::from_click(ClickTarget::CropButton(CropKind::Carrot)).select_crop,
            Some(CropKind::Carrot)
        );
        assert_eq!(
            FrameInput::from_click(ClickTarget::Playfield(CanvasPoint::new(1.0, 2.0)))
                .pointer_click,
            Some(CanvasPoint::new(1.0, 2.0))
        );
        assert_eq!(
            FrameInput::from_click(ClickTarget::Interface),
            FrameInput::default()
        );
    }

    #[test]
    fn headless_backend_runs_fixed_frames_with_scripted_input() {
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&observed);
        let input = FrameInput {
            primary_action: true,
            ..FrameInput::default()
        };
        let backend = HeadlessBackend::new(3, Duration::from_millis(20)).with_input(1, input);

        backend
            .run(
                Presentation::new("test", Color::new(0.0, 0.0, 0.0, 1.0), side_panel_scene()),
                move |dt, input, _scene| sink.borrow_mut().push((dt, input.primary_action)),
            )
            .expect("headless run succeeds");

        let dt = Duration::from_millis(20);
        assert_eq!(
            *observed.borrow(),
            vec![(dt, false), (dt, true), (dt, false)]
        );
    }
}
