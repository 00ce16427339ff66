use farm_dash_core::{
    CropDefinition, CropKind, PlotCoord, PlotRect, PlotSnapshot, PlotState,
};

/// Extra decay applied to the growth timer of a watered plot, per second.
const WATERED_GROWTH_BONUS: f32 = 0.5;

#[derive(Clone, Debug)]
pub(crate) struct Plot {
    coord: PlotCoord,
    rect: PlotRect,
    state: PlotState,
}

impl Plot {
    pub(crate) fn new(coord: PlotCoord, rect: PlotRect) -> Self {
        Self {
            coord,
            rect,
            state: PlotState::Empty,
        }
    }

    pub(crate) fn coord(&self) -> PlotCoord {
        self.coord
    }

    pub(crate) fn rect(&self) -> PlotRect {
        self.rect
    }

    pub(crate) fn state(&self) -> PlotState {
        self.state
    }

    pub(crate) fn snapshot(&self) -> PlotSnapshot {
        PlotSnapshot {
            coord: self.coord,
            rect: self.rect,
            state: self.state,
        }
    }

    /// Puts a fresh seed into the plot. Callers only plant into empty plots.
    pub(crate) fn plant(&mut self, crop: CropKind, definition: &CropDefinition) {
        debug_assert!(matches!(self.state, PlotState::Empty), "plot is occupied");

        let duration = definition.growth_duration.max(0.0);
        self.state = PlotState::Growing {
            crop,
            growth_timer: duration,
            max_growth_time: duration,
            watered: false,
        };
    }

    /// Applies the one-time watering boost to a growing plot.
    ///
    /// Returns `None` when the plot was already watered this cycle or holds no
    /// growing crop.
    pub(crate) fn water(&mut self, definition: &CropDefinition) -> Option<CropKind> {
        match &mut self.state {
            PlotState::Growing {
                crop,
                growth_timer,
                watered,
                ..
            } => {
                if *watered {
                    return None;
                }
                *watered = true;
                *growth_timer = (*growth_timer - definition.water_boost).max(0.0);
                Some(*crop)
            }
            PlotState::Empty | PlotState::Ready { .. } => None,
        }
    }

    /// Empties a ripe plot, returning the crop that was picked.
    pub(crate) fn harvest(&mut self) -> Option<CropKind> {
        match self.state {
            PlotState::Ready { crop } => {
                self.state = PlotState::Empty;
                Some(crop)
            }
            PlotState::Empty | PlotState::Growing { .. } => None,
        }
    }

    /// Advances the growth timer by `dt` seconds.
    ///
    /// Returns the crop when this call made the plot ripe.
    pub(crate) fn advance(&mut self, dt: f32) -> Option<CropKind> {
        let PlotState::Growing {
            crop,
            growth_timer,
            watered,
            ..
        } = &mut self.state
        else {
            return None;
        };

        *growth_timer -= dt;
        if *watered {
            *growth_timer -= dt * WATERED_GROWTH_BONUS;
        }

        if *growth_timer <= 0.0 {
            let crop = *crop;
            self.state = PlotState::Ready { crop };
            return Some(crop);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use farm_dash_core::{CanvasPoint, CropTable};

    use super::*;

    fn plot() -> Plot {
        Plot::new(
            PlotCoord::new(0, 0),
            PlotRect::new(CanvasPoint::new(0.0, 0.0), 100.0),
        )
    }

    fn growth_timer(plot: &Plot) -> f32 {
        match plot.state() {
            PlotState::Growing { growth_timer, .. } => growth_timer,
            other => panic!("expected growing plot, found {other:?}"),
        }
    }

    #[test]
    fn planting_snapshots_duration_and_clears_watered() {
        let crops = CropTable::default();
        let mut plot = plot();

        plot.plant(CropKind::Carrot, crops.get(CropKind::Carrot));
        assert_eq!(
            plot.state(),
            PlotState::Growing {
                crop: CropKind::Carrot,
                growth_timer: 5.0,
                max_growth_time: 5.0,
                watered: false,
            }
        );
    }

    #[test]
    fn watering_floors_timer_at_zero() {
        let crops = CropTable::default();
        let mut plot = plot();
        plot.plant(CropKind::Lettuce, crops.get(CropKind::Lettuce));
        let _ = plot.advance(2.5);

        assert_eq!(plot.water(crops.get(CropKind::Lettuce)), Some(CropKind::Lettuce));
        assert_eq!(growth_timer(&plot), 0.0);
        assert!(plot.state().watered());
    }

    #[test]
    fn boosted_to_zero_ripens_on_next_advance() {
        let crops = CropTable::default();
        let mut plot = plot();
        plot.plant(CropKind::Lettuce, crops.get(CropKind::Lettuce));
        let _ = plot.advance(2.5);
        let _ = plot.water(crops.get(CropKind::Lettuce));

        assert_eq!(plot.advance(0.0), Some(CropKind::Lettuce));
        assert_eq!(
            plot.state(),
            PlotState::Ready {
                crop: CropKind::Lettuce
            }
        );
    }

    #[test]
    fn empty_and_ready_plots_are_inert() {
        let crops = CropTable::default();
        let mut plot = plot();
        assert_eq!(plot.advance(10.0), None);
        assert_eq!(plot.state(), PlotState::Empty);

        plot.plant(CropKind::Lettuce, crops.get(CropKind::Lettuce));
        assert_eq!(plot.advance(3.0), Some(CropKind::Lettuce));
        assert_eq!(plot.advance(3.0), None);
        assert_eq!(plot.harvest(), Some(CropKind::Lettuce));
        assert_eq!(plot.harvest(), None);
    }

    #[test]
    fn only_growing_plots_take_water() {
        let crops = CropTable::default();
        let lettuce = crops.get(CropKind::Lettuce);
        let mut plot = plot();
        assert_eq!(plot.water(lettuce), None);
        assert_eq!(plot.state(), PlotState::Empty);

        plot.plant(CropKind::Lettuce, lettuce);
        assert_eq!(plot.water(lettuce), Some(CropKind::Lettuce));
        assert_eq!(plot.water(lettuce), None);

        assert_eq!(plot.advance(3.0), Some(CropKind::Lettuce));
        assert_eq!(plot.water(lettuce), None);
        assert_eq!(
            plot.state(),
            PlotState::Ready {
                crop: CropKind::Lettuce
            }
        );
    }
}
