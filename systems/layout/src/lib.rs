#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure layout system that positions the plot grid on the canvas.
//!
//! The canvas keeps a fixed internal resolution regardless of the window it is
//! shown in. Wide viewports reserve a side panel to the left of the grid and use
//! a fixed plot size. Narrow viewports stack the interface above and the log
//! below the grid, so the plot size is derived from the vertical space left
//! between those bands.
//!
//! The layout is evaluated once per grid construction. Resizing the window
//! afterwards does not move the plots.

use farm_dash_core::{CanvasPoint, GridLayout};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of the viewport the game is shown in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewportClass {
    /// Desktop-style window with room for a side panel.
    Wide,
    /// Phone-style portrait window.
    Narrow,
}

impl ViewportClass {
    /// Classifies a window by width; widths up to `threshold` count as narrow.
    #[must_use]
    pub fn classify(window_width: f32, threshold: f32) -> Self {
        if window_width <= threshold {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// Fixed measurements the layout is derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConstants {
    /// Internal canvas width.
    pub canvas_width: f32,
    /// Internal canvas height.
    pub canvas_height: f32,
    /// Plots along each side of the grid.
    pub grid_dimension: u32,
    /// Gap between neighbouring plots.
    pub padding: f32,
    /// Plot edge length on wide viewports.
    pub default_plot_size: f32,
    /// Width reserved for the side panel on wide viewports.
    pub panel_width: f32,
    /// Height reserved above the grid on narrow viewports (status bar and seed panel).
    pub top_ui_height: f32,
    /// Height reserved below the grid on narrow viewports (message log).
    pub bottom_log_height: f32,
    /// Window widths up to this value use the narrow layout.
    pub narrow_threshold: f32,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            canvas_width: 1000.0,
            canvas_height: 750.0,
            grid_dimension: 3,
            padding: 30.0,
            default_plot_size: 160.0,
            panel_width: 280.0,
            top_ui_height: 50.0 + 70.0,
            bottom_log_height: 70.0,
            narrow_threshold: 768.0,
        }
    }
}

impl LayoutConstants {
    /// Classifies `window_width` against the configured threshold.
    #[must_use]
    pub fn classify(&self, window_width: f32) -> ViewportClass {
        ViewportClass::classify(window_width, self.narrow_threshold)
    }

    /// Checks that both viewport classes produce a grid that fits its usable area.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid_dimension == 0 {
            return Err(LayoutError::EmptyGrid);
        }
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(LayoutError::EmptyCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(LayoutError::NegativePadding {
                padding: self.padding,
            });
        }
        let narrow = compute_layout(ViewportClass::Narrow, self);
        if narrow.plot_size() < 1.0 {
            return Err(LayoutError::NoRoomForPlots {
                usable_height: self.narrow_usable_height(),
            });
        }
        let usable_width = self.canvas_width - self.panel_width;
        let wide = compute_layout(ViewportClass::Wide, self);
        if !(wide.plot_size() >= 1.0
            && wide.extent() <= usable_width
            && wide.extent() <= self.canvas_height)
        {
            return Err(LayoutError::WideGridOverflow {
                extent: wide.extent(),
                usable_width,
                usable_height: self.canvas_height,
            });
        }
        Ok(())
    }

    fn fixed_padding(&self) -> f32 {
        self.grid_dimension.saturating_sub(1) as f32 * self.padding
    }

    fn narrow_usable_height(&self) -> f32 {
        self.canvas_height - self.top_ui_height - self.bottom_log_height
    }
}

/// Computes plot size and grid origin for the given viewport class.
#[must_use]
pub fn compute_layout(viewport: ViewportClass, constants: &LayoutConstants) -> GridLayout {
    let dimension = constants.grid_dimension;
    let plot_size = match viewport {
        ViewportClass::Wide => constants.default_plot_size,
        ViewportClass::Narrow => {
            let remainder = constants.narrow_usable_height() - constants.fixed_padding();
            (remainder / dimension.max(1) as f32).floor().max(0.0)
        }
    };

    let extent = dimension as f32 * plot_size + constants.fixed_padding();
    let origin = match viewport {
        ViewportClass::Wide => {
            let usable_width = constants.canvas_width - constants.panel_width;
            CanvasPoint::new(
                constants.panel_width + (usable_width - extent) / 2.0,
                (constants.canvas_height - extent) / 2.0,
            )
        }
        ViewportClass::Narrow => CanvasPoint::new(
            (constants.canvas_width - extent) / 2.0,
            constants.top_ui_height + (constants.narrow_usable_height() - extent) / 2.0,
        ),
    };

    GridLayout::new(dimension, plot_size, constants.padding, origin)
}

/// Reasons a set of layout constants cannot host a grid.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum LayoutError {
    /// The grid would contain no plots.
    #[error("grid dimension must be at least 1")]
    EmptyGrid,
    /// The canvas has no area.
    #[error("canvas must have a positive size (received {width}x{height})")]
    EmptyCanvas {
        /// Configured canvas width.
        width: f32,
        /// Configured canvas height.
        height: f32,
    },
    /// Plots would overlap.
    #[error("padding must be a non-negative number of pixels (received {padding})")]
    NegativePadding {
        /// Configured gap between plots.
        padding: f32,
    },
    /// The wide grid does not fit beside the side panel.
    #[error("wide grid spans {extent} px but only {usable_width}x{usable_height} px are free")]
    WideGridOverflow {
        /// Edge length of the whole grid.
        extent: f32,
        /// Canvas width left of the side panel.
        usable_width: f32,
        /// Canvas height.
        usable_height: f32,
    },
    /// The narrow layout leaves no room between the reserved bands.
    #[error("narrow layout leaves {usable_height} px for the grid, too little for any plot")]
    NoRoomForPlots {
        /// Height left between the top interface and the log.
        usable_height: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn wide_layout_centres_fixed_plots_beside_the_panel() {
        let layout = compute_layout(ViewportClass::Wide, &LayoutConstants::default());

        assert_eq!(layout.dimension(), 3);
        assert_close(layout.plot_size(), 160.0);
        assert_close(layout.extent(), 540.0);
        assert_close(layout.origin().x, 370.0);
        assert_close(layout.origin().y, 105.0);
    }

    #[test]
    fn narrow_layout_derives_plot_size_from_usable_height() {
        let layout = compute_layout(ViewportClass::Narrow, &LayoutConstants::default());

        assert_close(layout.plot_size(), 166.0);
        assert_close(layout.extent(), 558.0);
        assert_close(layout.origin().x, 221.0);
        assert_close(layout.origin().y, 121.0);
    }

    #[test]
    fn narrow_grid_fits_between_reserved_bands() {
        let constants = LayoutConstants {
            canvas_height: 641.0,
            ..LayoutConstants::default()
        };
        let layout = compute_layout(ViewportClass::Narrow, &constants);

        let top = layout.origin().y;
        let bottom = top + layout.extent();
        assert!(top >= constants.top_ui_height);
        assert!(bottom <= constants.canvas_height - constants.bottom_log_height);
        assert_eq!(layout.plot_size(), layout.plot_size().floor());
    }

    #[test]
    fn classify_treats_threshold_as_narrow() {
        assert_eq!(ViewportClass::classify(768.0, 768.0), ViewportClass::Narrow);
        assert_eq!(ViewportClass::classify(769.0, 768.0), ViewportClass::Wide);
        assert_eq!(
            LayoutConstants::default().classify(1280.0),
            ViewportClass::Wide
        );
    }

    #[test]
    fn validate_rejects_grids_without_room() {
        let cramped = LayoutConstants {
            canvas_height: 250.0,
            ..LayoutConstants::default()
        };
        assert!(matches!(
            cramped.validate(),
            Err(LayoutError::NoRoomForPlots { .. })
        ));
        let empty = LayoutConstants {
            grid_dimension: 0,
            ..LayoutConstants::default()
        };
        assert_eq!(empty.validate(), Err(LayoutError::EmptyGrid));
        assert_eq!(LayoutConstants::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_wide_grids_that_leave_the_canvas() {
        let slim = LayoutConstants {
            canvas_width: 600.0,
            ..LayoutConstants::default()
        };
        assert_eq!(
            slim.validate(),
            Err(LayoutError::WideGridOverflow {
                extent: 540.0,
                usable_width: 320.0,
                usable_height: 750.0,
            })
        );

        let tall_plots = LayoutConstants {
            default_plot_size: 260.0,
            panel_width: 100.0,
            ..LayoutConstants::default()
        };
        assert!(matches!(
            tall_plots.validate(),
            Err(LayoutError::WideGridOverflow { extent, .. }) if extent > 750.0
        ));

        let fitting = LayoutConstants {
            canvas_width: 820.0,
            ..LayoutConstants::default()
        };
        assert_eq!(fitting.validate(), Ok(()));
        let layout = compute_layout(ViewportClass::Wide, &fitting);
        assert!(layout.origin().x >= fitting.panel_width);
        assert!(layout.origin().x + layout.extent() <= fitting.canvas_width);
    }

    #[test]
    fn validate_rejects_negative_padding() {
        let overlapping = LayoutConstants {
            padding: -5.0,
            ..LayoutConstants::default()
        };

        assert_eq!(
            overlapping.validate(),
            Err(LayoutError::NegativePadding { padding: -5.0 })
        );
    }

    #[test]
    fn partial_toml_overrides_keep_remaining_defaults() {
        let constants: LayoutConstants =
            toml::from_str("padding = 20.0\npanel_width = 300.0").expect("valid layout table");

        assert_close(constants.padding, 20.0);
        assert_close(constants.panel_width, 300.0);
        assert_eq!(constants.grid_dimension, 3);
    }
}
