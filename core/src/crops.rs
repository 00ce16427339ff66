//! Static crop catalogue.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{palette, Rgb};

/// Crops that can be planted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropKind {
    /// Fast, cheap crop.
    Lettuce,
    /// Mid-range crop.
    Carrot,
    /// Slow crop with the largest reward.
    Pumpkin,
}

impl CropKind {
    /// Every crop in selection order; the first entry is the default choice.
    pub const ALL: [CropKind; 3] = [Self::Lettuce, Self::Carrot, Self::Pumpkin];

    /// Crop armed when a session starts.
    #[must_use]
    pub const fn first() -> Self {
        Self::ALL[0]
    }
}

/// Static description of a crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropDefinition {
    /// Name shown in buttons and log messages.
    pub name: String,
    /// Color of the crop icon and growth gauge.
    pub color: Rgb,
    /// Seconds from planting to harvest without watering.
    pub growth_duration: f32,
    /// Seconds removed from the growth timer at the moment of watering.
    pub water_boost: f32,
    /// Coins spent to plant the crop.
    pub cost: u32,
    /// Score awarded on harvest.
    pub score: u32,
    /// Coins awarded on harvest.
    #[serde(rename = "yield")]
    pub coin_yield: u32,
}

/// Immutable table of every crop definition, built once at start-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropTable {
    lettuce: CropDefinition,
    carrot: CropDefinition,
    pumpkin: CropDefinition,
}

impl CropTable {
    /// Creates a table from explicit definitions.
    #[must_use]
    pub fn new(lettuce: CropDefinition, carrot: CropDefinition, pumpkin: CropDefinition) -> Self {
        Self {
            lettuce,
            carrot,
            pumpkin,
        }
    }

    /// Definition associated with `kind`.
    #[must_use]
    pub fn get(&self, kind: CropKind) -> &CropDefinition {
        match kind {
            CropKind::Lettuce => &self.lettuce,
            CropKind::Carrot => &self.carrot,
            CropKind::Pumpkin => &self.pumpkin,
        }
    }

    /// Iterates the definitions in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (CropKind, &CropDefinition)> {
        CropKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Checks that every definition describes a playable crop.
    pub fn validate(&self) -> Result<(), CropTableError> {
        for (crop, definition) in self.iter() {
            if definition.name.trim().is_empty() {
                return Err(CropTableError::MissingName { crop });
            }
            let duration = definition.growth_duration;
            if !(duration.is_finite() && duration > 0.0) {
                return Err(CropTableError::InvalidDuration {
                    crop,
                    duration,
                });
            }
            let boost = definition.water_boost;
            if !(boost.is_finite() && boost >= 0.0) {
                return Err(CropTableError::InvalidWaterBoost {
                    crop,
                    boost,
                });
            }
        }
        Ok(())
    }
}

impl Default for CropTable {
    fn default() -> Self {
        Self {
            lettuce: CropDefinition {
                name: "Lettuce".to_owned(),
                color: palette::GREEN_DARK,
                growth_duration: 3.0,
                water_boost: 1.0,
                cost: 1,
                score: 5,
                coin_yield: 1,
            },
            carrot: CropDefinition {
                name: "Carrot".to_owned(),
                color: palette::ORANGE,
                growth_duration: 5.0,
                water_boost: 1.5,
                cost: 2,
                score: 15,
                coin_yield: 3,
            },
            pumpkin: CropDefinition {
                name: "Pumpkin".to_owned(),
                color: palette::YELLOW,
                growth_duration: 10.0,
                water_boost: 3.0,
                cost: 3,
                score: 40,
                coin_yield: 5,
            },
        }
    }
}

/// Reasons a crop table cannot be used for play.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum CropTableError {
    /// The crop has no display name.
    #[error("crop {crop:?} has an empty name")]
    MissingName {
        /// Offending crop.
        crop: CropKind,
    },
    /// The crop would never need to grow, or would never finish.
    #[error("crop {crop:?} must grow for a finite positive duration (received {duration})")]
    InvalidDuration {
        /// Offending crop.
        crop: CropKind,
        /// Configured duration in seconds.
        duration: f32,
    },
    /// Watering would slow the crop down or is not a number of seconds.
    #[error("crop {crop:?} must have a finite, non-negative water boost (received {boost})")]
    InvalidWaterBoost {
        /// Offending crop.
        crop: CropKind,
        /// Configured boost in seconds.
        boost: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_lists_crops_in_selection_order() {
        let table = CropTable::default();
        let names: Vec<_> = table.iter().map(|(_, crop)| crop.name.as_str()).collect();

        assert_eq!(names, ["Lettuce", "Carrot", "Pumpkin"]);
        assert_eq!(CropKind::first(), CropKind::Lettuce);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn lettuce_matches_reference_economy() {
        let table = CropTable::default();
        let lettuce = table.get(CropKind::Lettuce);

        assert_eq!(lettuce.cost, 1);
        assert_eq!(lettuce.score, 5);
        assert_eq!(lettuce.coin_yield, 1);
        assert!((lettuce.growth_duration - 3.0).abs() < f32::EPSILON);
        assert!((lettuce.water_boost - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut pumpkin = CropTable::default().get(CropKind::Pumpkin).clone();
        pumpkin.growth_duration = 0.0;
        let defaults = CropTable::default();
        let table = CropTable::new(
            defaults.get(CropKind::Lettuce).clone(),
            defaults.get(CropKind::Carrot).clone(),
            pumpkin,
        );

        assert_eq!(
            table.validate(),
            Err(CropTableError::InvalidDuration {
                crop: CropKind::Pumpkin,
                duration: 0.0,
            })
        );
    }

    #[test]
    fn validate_rejects_non_finite_timings() {
        let defaults = CropTable::default();
        let with_carrot = |carrot| {
            CropTable::new(
                defaults.get(CropKind::Lettuce).clone(),
                carrot,
                defaults.get(CropKind::Pumpkin).clone(),
            )
        };

        let mut endless = defaults.get(CropKind::Carrot).clone();
        endless.growth_duration = f32::INFINITY;
        assert!(matches!(
            with_carrot(endless).validate(),
            Err(CropTableError::InvalidDuration {
                crop: CropKind::Carrot,
                ..
            })
        ));

        let mut undefined = defaults.get(CropKind::Carrot).clone();
        undefined.water_boost = f32::NAN;
        assert!(matches!(
            with_carrot(undefined).validate(),
            Err(CropTableError::InvalidWaterBoost {
                crop: CropKind::Carrot,
                ..
            })
        ));
    }

    #[test]
    fn crop_table_round_trips_through_bincode() {
        let table = CropTable::default();
        let bytes = bincode::serialize(&table).expect("serialize");
        let restored: CropTable = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, table);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_crops() {
        let source = r#"
            [carrot]
            name = "Golden carrot"
            color = { red = 255, green = 215, blue = 0 }
            growth_duration = 4.0
            water_boost = 2.0
            cost = 4
            score = 30
            yield = 6
        "#;
        let table: CropTable = toml::from_str(source).expect("valid crop table");

        assert_eq!(table.get(CropKind::Carrot).name, "Golden carrot");
        assert_eq!(table.get(CropKind::Carrot).coin_yield, 6);
        assert_eq!(table.get(CropKind::Lettuce), CropTable::default().get(CropKind::Lettuce));
    }
}
