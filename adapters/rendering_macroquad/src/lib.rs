#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Farm Dash.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter owns no game logic. Each frame it scales the fixed-size canvas
//! into the window, routes the mouse and keyboard through the scene's hit
//! areas, hands the resulting input to the update closure and executes the
//! primitive draw commands derived from the updated scene.

use anyhow::Result;
use farm_dash_core::CropKind;
use farm_dash_rendering::{
    visuals::{self, DrawCommand, TextAlign},
    Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use std::time::Duration;

const DEFAULT_WINDOW_WIDTH: i32 = 1000;
const DEFAULT_WINDOW_HEIGHT: i32 = 750;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `Enter` or `Space` presses the overlay button.
    primary_action: bool,
    /// `1`, `2` and `3` pick a seed.
    select_crop: Option<CropKind>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let primary_action = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space);
        let select_crop = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3]
            .into_iter()
            .zip(CropKind::ALL)
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, crop)| crop);

        Self {
            quit_requested,
            primary_action,
            select_crop,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_width: i32,
    window_height: i32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = i32::try_from(width.max(1)).unwrap_or(DEFAULT_WINDOW_WIDTH);
        self.window_height = i32::try_from(height.max(1)).unwrap_or(DEFAULT_WINDOW_HEIGHT);
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_width,
            window_height,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: true,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    log::info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let metrics_before = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let frame_input = gather_frame_input(&scene, &metrics_before, keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                for command in visuals::scene_draw_commands(&scene) {
                    draw_command(&command, &metrics);
                }

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Mapping between canvas space and window pixels for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    /// Fits the canvas into the screen, preserving its aspect ratio and centering it.
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let canvas = scene.canvas_size();
        let scale = if canvas.x <= f32::EPSILON || canvas.y <= f32::EPSILON {
            1.0
        } else {
            (screen_width / canvas.x).min(screen_height / canvas.y).max(0.0)
        };
        let offset = ((Vec2::new(screen_width, screen_height) - canvas * scale) * 0.5)
            .max(Vec2::ZERO);

        Self { scale, offset }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    fn to_canvas(&self, point: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        Some((point - self.offset) / self.scale)
    }
}

fn gather_frame_input(
    scene: &Scene,
    metrics: &SceneMetrics,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    let clicked = is_mouse_button_pressed(MouseButton::Left);
    gather_frame_input_from_observations(
        scene,
        metrics,
        Vec2::new(cursor_x, cursor_y),
        clicked,
        keyboard,
    )
}

fn gather_frame_input_from_observations(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    clicked: bool,
    keyboard: KeyboardShortcuts,
) -> FrameInput {
    let mut input = if clicked {
        metrics
            .to_canvas(cursor_position)
            .map(|canvas_position| {
                FrameInput::from_click(visuals::route_click(scene, canvas_position))
            })
            .unwrap_or_default()
    } else {
        FrameInput::default()
    };

    if keyboard.primary_action && scene.overlay.is_some() {
        input.primary_action = true;
    }
    if input.select_crop.is_none() {
        input.select_crop = keyboard.select_crop;
    }
    input
}

fn draw_command(command: &DrawCommand, metrics: &SceneMetrics) {
    match command {
        DrawCommand::FillRect { rect, color } => {
            let min = metrics.to_screen(rect.min);
            let size = rect.size * metrics.scale;
            macroquad::shapes::draw_rectangle(
                min.x,
                min.y,
                size.x,
                size.y,
                to_macroquad_color(*color),
            );
        }
        DrawCommand::StrokeRect {
            rect,
            thickness,
            color,
        } => {
            let min = metrics.to_screen(rect.min);
            let size = rect.size * metrics.scale;
            macroquad::shapes::draw_rectangle_lines(
                min.x,
                min.y,
                size.x,
                size.y,
                (thickness * metrics.scale).max(1.0),
                to_macroquad_color(*color),
            );
        }
        DrawCommand::FillCircle {
            center,
            radius,
            color,
        } => {
            let center = metrics.to_screen(*center);
            macroquad::shapes::draw_circle(
                center.x,
                center.y,
                radius * metrics.scale,
                to_macroquad_color(*color),
            );
        }
        DrawCommand::Text {
            text,
            position,
            font_size,
            color,
            align,
        } => {
            let font_size = (font_size * metrics.scale).max(1.0);
            let mut anchor = metrics.to_screen(*position);
            if *align == TextAlign::Center {
                let dimensions = macroquad::text::measure_text(text, None, font_size as u16, 1.0);
                anchor.x -= dimensions.width / 2.0;
            }
            let _ = macroquad::text::draw_text(
                text,
                anchor.x,
                anchor.y,
                font_size,
                to_macroquad_color(*color),
            );
        }
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
