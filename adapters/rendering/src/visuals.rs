//! Backend-independent geometry for drawing a [`Scene`] and hit-testing clicks.
//!
//! Every coordinate here lives in canvas space. Backends scale the resulting
//! primitives onto the window and map window clicks back before routing them.

use farm_dash_core::{palette, CanvasPoint, CropKind, PlotRect};
use glam::Vec2;

use crate::{Color, InterfaceLayout, PlotPresentation, PlotVisual, Scene};

const PLOT_STROKE: f32 = 2.0;
const GAUGE_HEIGHT: f32 = 8.0;
const MARGIN: f32 = 16.0;

const PANEL_HUD_FONT: f32 = 24.0;
const PANEL_HUD_SPACING: f32 = 28.0;
const PANEL_HEADING_Y: f32 = 135.0;
const PANEL_BUTTON_TOP: f32 = 150.0;
const PANEL_BUTTON_HEIGHT: f32 = 56.0;
const PANEL_BUTTON_GAP: f32 = 10.0;
const PANEL_LOG_FONT: f32 = 18.0;
const PANEL_LOG_SPACING: f32 = 22.0;

const STACKED_STATUS_HEIGHT: f32 = 50.0;
const STACKED_HUD_FONT: f32 = 22.0;
const STACKED_BUTTON_INSET: f32 = 8.0;
const STACKED_LOG_FONT: f32 = 13.0;

const BUTTON_LABEL_FONT: f32 = 20.0;
const BUTTON_DETAIL_FONT: f32 = 14.0;

const OVERLAY_TITLE_FONT: f32 = 48.0;
const OVERLAY_BODY_FONT: f32 = 22.0;
const OVERLAY_LINE_SPACING: f32 = 30.0;
const OVERLAY_PROMPT_FONT: f32 = 28.0;
const OVERLAY_PROMPT_SIZE: Vec2 = Vec2::new(260.0, 56.0);

/// Label drawn above a growing crop that can still be watered.
pub const WATER_HINT: &str = "Water me";

/// Label drawn above a ripe crop.
pub const READY_LABEL: &str = "Ready!";

/// Axis-aligned rectangle in canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }
}

impl From<PlotRect> for Rect {
    fn from(rect: PlotRect) -> Self {
        let origin = rect.origin();
        Self::new(Vec2::new(origin.x, origin.y), Vec2::splat(rect.size()))
    }
}

/// Horizontal anchoring of text relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// The position marks the start of the baseline.
    Left,
    /// The position marks the middle of the baseline.
    Center,
}

/// Primitive drawing operation in canvas space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    FillRect {
        /// Covered area.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Outlined area.
        rect: Rect,
        /// Line thickness.
        thickness: f32,
        /// Line color.
        color: Color,
    },
    /// Filled circle.
    FillCircle {
        /// Circle center.
        center: Vec2,
        /// Circle radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Single line of text.
    Text {
        /// Text content.
        text: String,
        /// Baseline anchor.
        position: Vec2,
        /// Font size in canvas pixels.
        font_size: f32,
        /// Text color.
        color: Color,
        /// Horizontal anchoring.
        align: TextAlign,
    },
}

/// Element found under a click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickTarget {
    /// The overlay covers the canvas; any click on it triggers its action.
    Overlay,
    /// A seed button.
    CropButton(CropKind),
    /// The playfield around and including the grid.
    Playfield(CanvasPoint),
    /// Interface area that does not react to clicks.
    Interface,
    /// Outside of the canvas.
    OutsideCanvas,
}

/// Resolves which element of the scene sits under `point`.
#[must_use]
pub fn route_click(scene: &Scene, point: Vec2) -> ClickTarget {
    let canvas = Rect::new(Vec2::ZERO, scene.canvas_size());
    if !canvas.contains(point) {
        return ClickTarget::OutsideCanvas;
    }
    if scene.overlay.is_some() {
        return ClickTarget::Overlay;
    }
    if let Some((crop, _)) = crop_button_rects(scene)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
    {
        return ClickTarget::CropButton(crop);
    }
    if interface_rects(scene).iter().any(|rect| rect.contains(point)) {
        return ClickTarget::Interface;
    }
    ClickTarget::Playfield(CanvasPoint::new(point.x, point.y))
}

/// Areas reserved for the interface.
#[must_use]
pub fn interface_rects(scene: &Scene) -> Vec<Rect> {
    match scene.interface {
        InterfaceLayout::SidePanel { width } => {
            vec![Rect::new(Vec2::ZERO, Vec2::new(width, scene.canvas_height))]
        }
        InterfaceLayout::Stacked {
            top_height,
            bottom_height,
        } => vec![
            Rect::new(Vec2::ZERO, Vec2::new(scene.canvas_width, top_height)),
            Rect::new(
                Vec2::new(0.0, scene.canvas_height - bottom_height),
                Vec2::new(scene.canvas_width, bottom_height),
            ),
        ],
    }
}

/// Seed buttons paired with the area they occupy.
#[must_use]
pub fn crop_button_rects(scene: &Scene) -> Vec<(CropKind, Rect)> {
    let count = scene.crop_buttons.len();
    scene
        .crop_buttons
        .iter()
        .enumerate()
        .map(|(index, button)| {
            let rect = match scene.interface {
                InterfaceLayout::SidePanel { width } => Rect::new(
                    Vec2::new(
                        MARGIN,
                        PANEL_BUTTON_TOP + index as f32 * (PANEL_BUTTON_HEIGHT + PANEL_BUTTON_GAP),
                    ),
                    Vec2::new((width - 2.0 * MARGIN).max(0.0), PANEL_BUTTON_HEIGHT),
                ),
                InterfaceLayout::Stacked { top_height, .. } => {
                    let available = scene.canvas_width - MARGIN * (count as f32 + 1.0);
                    let width = (available / count.max(1) as f32).max(0.0);
                    let height = (top_height - STACKED_STATUS_HEIGHT - 2.0 * STACKED_BUTTON_INSET)
                        .max(0.0);
                    Rect::new(
                        Vec2::new(
                            MARGIN + index as f32 * (width + MARGIN),
                            STACKED_STATUS_HEIGHT + STACKED_BUTTON_INSET,
                        ),
                        Vec2::new(width, height),
                    )
                }
            };
            (button.crop, rect)
        })
        .collect()
}

/// Produces the primitives for a whole frame in painter's order.
#[must_use]
pub fn scene_draw_commands(scene: &Scene) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::FillRect {
        rect: Rect::new(Vec2::ZERO, scene.canvas_size()),
        color: scene.background,
    }];

    for plot in &scene.plots {
        commands.extend(plot_draw_commands(plot));
    }
    for particle in &scene.particles {
        commands.push(DrawCommand::FillCircle {
            center: particle.position,
            radius: particle.radius,
            color: particle.color,
        });
    }

    commands.extend(interface_draw_commands(scene));

    if let Some(overlay) = &scene.overlay {
        commands.extend(overlay_draw_commands(scene, overlay));
    }
    commands
}

/// Primitives for one plot: soil, outline and the crop in its current stage.
#[must_use]
pub fn plot_draw_commands(plot: &PlotPresentation) -> Vec<DrawCommand> {
    let rect = Rect::from(plot.rect);
    let width = plot.rect.size();
    let center = Vec2::new(plot.rect.center().x, plot.rect.center().y);
    let label_position = Vec2::new(center.x, center.y - width * 0.3);
    let label_font = width * 0.1;

    let mut commands = vec![
        DrawCommand::FillRect {
            rect,
            color: Color::from(palette::BROWN),
        },
        DrawCommand::StrokeRect {
            rect,
            thickness: PLOT_STROKE,
            color: Color::from(palette::BLACK),
        },
    ];

    match plot.visual {
        PlotVisual::Empty => {}
        PlotVisual::Growing {
            progress,
            color,
            needs_water,
        } => {
            let crop_width = width * 0.2 * progress.max(0.1);
            let crop_height = crop_width * 1.5;
            commands.push(DrawCommand::FillRect {
                rect: Rect::new(
                    Vec2::new(center.x - crop_width / 2.0, center.y - crop_width * 0.75),
                    Vec2::new(crop_width, crop_height),
                ),
                color,
            });

            let gauge_width = width * 0.4;
            let gauge_min = Vec2::new(center.x - gauge_width / 2.0, center.y + width * 0.2);
            commands.push(DrawCommand::FillRect {
                rect: Rect::new(gauge_min, Vec2::new(gauge_width, GAUGE_HEIGHT)),
                color: Color::from(palette::BLACK),
            });
            commands.push(DrawCommand::FillRect {
                rect: Rect::new(
                    gauge_min,
                    Vec2::new(gauge_width * progress.clamp(0.0, 1.0), GAUGE_HEIGHT),
                ),
                color,
            });

            if needs_water {
                commands.push(DrawCommand::Text {
                    text: WATER_HINT.to_owned(),
                    position: label_position,
                    font_size: label_font,
                    color: Color::from(palette::BLUE_LIGHT),
                    align: TextAlign::Center,
                });
            }
        }
        PlotVisual::Ready { color } => {
            commands.push(DrawCommand::FillCircle {
                center,
                radius: width * 0.3,
                color,
            });
            commands.push(DrawCommand::Text {
                text: READY_LABEL.to_owned(),
                position: label_position,
                font_size: label_font,
                color: Color::from(palette::YELLOW),
                align: TextAlign::Center,
            });
        }
    }
    commands
}

fn panel_color() -> Color {
    Color::from_rgb_u8(20, 60, 20).with_alpha(0.85)
}

fn text(text: &str, position: Vec2, font_size: f32, color: Color) -> DrawCommand {
    DrawCommand::Text {
        text: text.to_owned(),
        position,
        font_size,
        color,
        align: TextAlign::Left,
    }
}

/// Primitives for the panels: status texts, seed buttons and the log.
#[must_use]
pub fn interface_draw_commands(scene: &Scene) -> Vec<DrawCommand> {
    let white = Color::from(palette::WHITE);
    let mut commands: Vec<DrawCommand> = interface_rects(scene)
        .into_iter()
        .map(|rect| DrawCommand::FillRect {
            rect,
            color: panel_color(),
        })
        .collect();

    let hud = [&scene.hud.score, &scene.hud.coins, &scene.hud.timer];
    match scene.interface {
        InterfaceLayout::SidePanel { .. } => {
            for (index, line) in hud.iter().enumerate() {
                let y = MARGIN + PANEL_HUD_FONT + index as f32 * PANEL_HUD_SPACING;
                commands.push(text(line, Vec2::new(MARGIN, y), PANEL_HUD_FONT, white));
            }
            commands.push(text(
                "Seeds",
                Vec2::new(MARGIN, PANEL_HEADING_Y),
                BUTTON_DETAIL_FONT,
                white,
            ));
        }
        InterfaceLayout::Stacked { .. } => {
            let column = scene.canvas_width / hud.len() as f32;
            let y = (STACKED_STATUS_HEIGHT + STACKED_HUD_FONT) / 2.0;
            for (index, line) in hud.iter().enumerate() {
                let x = MARGIN + index as f32 * column;
                commands.push(text(line, Vec2::new(x, y), STACKED_HUD_FONT, white));
            }
        }
    }

    for ((_, rect), button) in crop_button_rects(scene).into_iter().zip(&scene.crop_buttons) {
        let fill = if button.selected {
            Color::from(palette::GREEN_DARK)
        } else {
            Color::from_rgb_u8(60, 60, 60).with_alpha(0.9)
        };
        commands.push(DrawCommand::FillRect { rect, color: fill });
        if button.selected {
            commands.push(DrawCommand::StrokeRect {
                rect,
                thickness: PLOT_STROKE,
                color: Color::from(palette::YELLOW),
            });
        }
        let inner = rect.min + Vec2::splat(STACKED_BUTTON_INSET);
        commands.push(text(
            &button.label,
            Vec2::new(inner.x, inner.y + BUTTON_LABEL_FONT),
            BUTTON_LABEL_FONT,
            white,
        ));
        commands.push(text(
            &button.detail,
            Vec2::new(inner.x, rect.max().y - STACKED_BUTTON_INSET),
            BUTTON_DETAIL_FONT,
            white,
        ));
    }

    commands.extend(log_draw_commands(scene));
    commands
}

/// Log lines anchored to the bottom of their area, newest last.
#[must_use]
pub fn log_draw_commands(scene: &Scene) -> Vec<DrawCommand> {
    let (font_size, spacing) = match scene.interface {
        InterfaceLayout::SidePanel { .. } => (PANEL_LOG_FONT, PANEL_LOG_SPACING),
        InterfaceLayout::Stacked { .. } => (STACKED_LOG_FONT, STACKED_LOG_FONT),
    };
    let bottom = scene.canvas_height - MARGIN / 2.0;
    let count = scene.log.len();

    scene
        .log
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let lines_below = (count - 1 - index) as f32;
            text(
                &line.text,
                Vec2::new(MARGIN, bottom - lines_below * spacing),
                font_size,
                line.color.with_alpha(line.opacity),
            )
        })
        .collect()
}

fn overlay_draw_commands(scene: &Scene, overlay: &crate::OverlayPresentation) -> Vec<DrawCommand> {
    let white = Color::from(palette::WHITE);
    let center_x = scene.canvas_width / 2.0;
    let centered = |content: &str, y: f32, font_size: f32, color: Color| DrawCommand::Text {
        text: content.to_owned(),
        position: Vec2::new(center_x, y),
        font_size,
        color,
        align: TextAlign::Center,
    };

    let mut commands = vec![
        DrawCommand::FillRect {
            rect: Rect::new(Vec2::ZERO, scene.canvas_size()),
            color: overlay.backdrop,
        },
        centered(
            &overlay.title,
            scene.canvas_height * 0.3,
            OVERLAY_TITLE_FONT,
            Color::from(palette::YELLOW),
        ),
    ];

    let body_top = scene.canvas_height * 0.42;
    for (index, line) in overlay.message.lines().enumerate() {
        commands.push(centered(
            line,
            body_top + index as f32 * OVERLAY_LINE_SPACING,
            OVERLAY_BODY_FONT,
            white,
        ));
    }

    let prompt_center = Vec2::new(center_x, scene.canvas_height * 0.82);
    let prompt_rect = Rect::new(prompt_center - OVERLAY_PROMPT_SIZE / 2.0, OVERLAY_PROMPT_SIZE);
    commands.push(DrawCommand::FillRect {
        rect: prompt_rect,
        color: Color::from(palette::ORANGE),
    });
    commands.push(centered(
        &overlay.prompt,
        prompt_center.y + OVERLAY_PROMPT_FONT / 3.0,
        OVERLAY_PROMPT_FONT,
        white,
    ));
    commands
}

#[cfg(test)]
mod tests {
    use farm_dash_core::{CanvasPoint, GameState};

    use super::*;
    use crate::{CropButtonPresentation, LogLinePresentation, OverlayPresentation};

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    fn plot(visual: PlotVisual) -> PlotPresentation {
        PlotPresentation {
            rect: PlotRect::new(CanvasPoint::new(370.0, 105.0), 160.0),
            visual,
        }
    }

    fn scene(interface: InterfaceLayout) -> Scene {
        let mut scene = Scene::new(1000.0, 750.0, interface).expect("valid canvas");
        scene.crop_buttons = CropKind::ALL
            .iter()
            .map(|crop| CropButtonPresentation {
                crop: *crop,
                label: format!("{crop:?}"),
                detail: String::new(),
                selected: *crop == CropKind::Lettuce,
            })
            .collect();
        scene
    }

    #[test]
    fn empty_plot_is_soil_with_outline() {
        let commands = plot_draw_commands(&plot(PlotVisual::Empty));

        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[1],
            DrawCommand::StrokeRect { thickness, .. } if thickness == 2.0
        ));
    }

    #[test]
    fn growing_crop_scales_with_progress_and_fills_gauge() {
        let color = Color::from(palette::GREEN_DARK);
        let commands = plot_draw_commands(&plot(PlotVisual::Growing {
            progress: 0.5,
            color,
            needs_water: true,
        }));

        let DrawCommand::FillRect { rect: crop, .. } = commands[2] else {
            panic!("expected crop rectangle, found {:?}", commands[2]);
        };
        assert_close(crop.size.x, 16.0);
        assert_close(crop.size.y, 24.0);
        assert_close(crop.min.x, 442.0);
        assert_close(crop.min.y, 173.0);

        let DrawCommand::FillRect { rect: gauge, .. } = commands[4] else {
            panic!("expected gauge fill, found {:?}", commands[4]);
        };
        assert_close(gauge.size.x, 32.0);
        assert_close(gauge.min.y, 217.0);

        assert!(matches!(
            &commands[5],
            DrawCommand::Text { text, .. } if text == WATER_HINT
        ));
    }

    #[test]
    fn seedling_keeps_minimum_size_and_watered_plot_hides_hint() {
        let commands = plot_draw_commands(&plot(PlotVisual::Growing {
            progress: 0.0,
            color: Color::from(palette::ORANGE),
            needs_water: false,
        }));

        let DrawCommand::FillRect { rect: crop, .. } = commands[2] else {
            panic!("expected crop rectangle");
        };
        assert_close(crop.size.x, 3.2);
        assert!(!commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Text { .. })));
    }

    #[test]
    fn ready_crop_draws_circle_and_label() {
        let commands = plot_draw_commands(&plot(PlotVisual::Ready {
            color: Color::from(palette::YELLOW),
        }));

        assert!(matches!(
            commands[2],
            DrawCommand::FillCircle { radius, .. } if (radius - 48.0).abs() < 1e-4
        ));
        assert!(matches!(
            &commands[3],
            DrawCommand::Text { text, .. } if text == READY_LABEL
        ));
    }

    #[test]
    fn overlay_swallows_every_click_on_canvas() {
        let mut scene = scene(InterfaceLayout::SidePanel { width: 280.0 });
        scene.overlay = Some(OverlayPresentation {
            title: "Game over!".to_owned(),
            message: "Final score: 5".to_owned(),
            prompt: "Play again".to_owned(),
            backdrop: Color::new(0.0, 0.0, 0.0, 0.75),
        });

        assert_eq!(route_click(&scene, Vec2::new(40.0, 200.0)), ClickTarget::Overlay);
        assert_eq!(
            route_click(&scene, Vec2::new(-1.0, 200.0)),
            ClickTarget::OutsideCanvas
        );
    }

    #[test]
    fn side_panel_routes_buttons_panel_and_playfield() {
        let scene = scene(InterfaceLayout::SidePanel { width: 280.0 });

        assert_eq!(
            route_click(&scene, Vec2::new(100.0, 150.0 + 66.0 + 10.0)),
            ClickTarget::CropButton(CropKind::Carrot)
        );
        assert_eq!(route_click(&scene, Vec2::new(100.0, 700.0)), ClickTarget::Interface);
        assert_eq!(
            route_click(&scene, Vec2::new(450.0, 185.0)),
            ClickTarget::Playfield(CanvasPoint::new(450.0, 185.0))
        );
    }

    #[test]
    fn stacked_interface_reserves_both_bands() {
        let scene = scene(InterfaceLayout::Stacked {
            top_height: 120.0,
            bottom_height: 70.0,
        });

        let buttons = crop_button_rects(&scene);
        assert_eq!(buttons.len(), 3);
        assert!(buttons
            .iter()
            .all(|(_, rect)| rect.min.y >= 50.0 && rect.max().y <= 120.0));
        assert_eq!(
            route_click(&scene, buttons[2].1.min + Vec2::splat(1.0)),
            ClickTarget::CropButton(CropKind::Pumpkin)
        );
        assert_eq!(route_click(&scene, Vec2::new(500.0, 720.0)), ClickTarget::Interface);
        assert!(matches!(
            route_click(&scene, Vec2::new(500.0, 300.0)),
            ClickTarget::Playfield(_)
        ));
    }

    #[test]
    fn log_lines_fade_and_stack_upwards() {
        let mut scene = scene(InterfaceLayout::SidePanel { width: 280.0 });
        scene.game_state = GameState::Playing;
        scene.log = vec![
            LogLinePresentation {
                id: 1,
                text: "old".to_owned(),
                color: Color::from(palette::WHITE),
                opacity: 0.2,
            },
            LogLinePresentation {
                id: 2,
                text: "new".to_owned(),
                color: Color::from(palette::WHITE),
                opacity: 1.0,
            },
        ];

        let commands = log_draw_commands(&scene);
        let [DrawCommand::Text {
            position: old_position,
            color: old_color,
            ..
        }, DrawCommand::Text {
            position: new_position,
            color: new_color,
            ..
        }] = commands.as_slice()
        else {
            panic!("expected two log lines, found {commands:?}");
        };
        assert!(old_position.y < new_position.y);
        assert_close(old_color.alpha, 0.2);
        assert_close(new_color.alpha, 1.0);
    }

    #[test]
    fn frame_starts_with_background_and_ends_with_overlay() {
        let mut scene = scene(InterfaceLayout::SidePanel { width: 280.0 });
        scene.plots.push(plot(PlotVisual::Empty));
        scene.overlay = Some(OverlayPresentation {
            title: "Title".to_owned(),
            message: "line one\nline two".to_owned(),
            prompt: "Go".to_owned(),
            backdrop: Color::new(0.0, 0.5, 0.0, 0.9),
        });

        let commands = scene_draw_commands(&scene);

        assert_eq!(
            commands.first(),
            Some(&DrawCommand::FillRect {
                rect: Rect::new(Vec2::ZERO, Vec2::new(1000.0, 750.0)),
                color: scene.background,
            })
        );
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Text { text, .. }) if text == "Go"
        ));
        let body_lines = commands
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::Text { text, .. } if text.starts_with("line"))
            })
            .count();
        assert_eq!(body_lines, 2);
    }
}
