#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded queue of short notifications that fade out over a few seconds.
//!
//! The log only observes world events. Nothing in the simulation reads it back.

use std::{collections::VecDeque, sync::Arc};

use farm_dash_core::{palette, CropTable, Event, RejectionReason, Rgb};

/// Maximum number of messages shown at once.
pub const DEFAULT_CAPACITY: usize = 5;

/// Seconds a message stays on screen.
pub const DISPLAY_DURATION: f32 = 3.0;

/// Opacity a message keeps until it disappears.
pub const MIN_OPACITY: f32 = 0.2;

/// Stable handle the presentation layer pairs with its widget for a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogEntryId(u64);

impl LogEntryId {
    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Single notification waiting to fade out.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    id: LogEntryId,
    text: String,
    color: Rgb,
    remaining: f32,
}

impl LogEntry {
    /// Handle assigned when the message was added.
    #[must_use]
    pub fn id(&self) -> LogEntryId {
        self.id
    }

    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Message color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Seconds left before the message is removed.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Linear fade clamped to [`MIN_OPACITY`].
    #[must_use]
    pub fn opacity(&self) -> f32 {
        (self.remaining / DISPLAY_DURATION).clamp(MIN_OPACITY, 1.0)
    }
}

/// Fading message log fed by world events.
#[derive(Debug)]
pub struct TransientLog {
    crops: Arc<CropTable>,
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl TransientLog {
    /// Creates an empty log holding up to [`DEFAULT_CAPACITY`] messages.
    #[must_use]
    pub fn new(crops: Arc<CropTable>) -> Self {
        Self::with_capacity(crops, DEFAULT_CAPACITY)
    }

    /// Creates an empty log holding up to `capacity` messages.
    #[must_use]
    pub fn with_capacity(crops: Arc<CropTable>, capacity: usize) -> Self {
        Self {
            crops,
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    /// Appends a message, evicting the oldest one when the log is full.
    pub fn push(&mut self, text: impl Into<String>, color: Rgb) -> LogEntryId {
        if self.capacity == 0 {
            self.next_id += 1;
            return LogEntryId(self.next_id);
        }
        while self.entries.len() >= self.capacity {
            let _ = self.entries.pop_front();
        }

        self.next_id += 1;
        let id = LogEntryId(self.next_id);
        let text = text.into();
        log::debug!("log: {text}");
        self.entries.push_back(LogEntry {
            id,
            text,
            color,
            remaining: DISPLAY_DURATION,
        });
        id
    }

    /// Counts every message down by `dt` seconds and drops expired ones.
    pub fn advance(&mut self, dt: f32) {
        self.entries.retain_mut(|entry| {
            entry.remaining -= dt;
            entry.remaining > 0.0
        });
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Visible messages from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Number of visible messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no message is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes world events, turning them into messages and advancing time.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => self.advance(dt.as_secs_f32()),
                Event::SessionReset => self.clear(),
                Event::CropSelected { crop } => {
                    let text = format!("Selected seed: {}", self.crops.get(*crop).name);
                    let _ = self.push(text, palette::WHITE);
                }
                Event::CropPlanted { crop, cost, .. } => {
                    let text = format!(
                        "Planted {} (cost: -{cost}C)",
                        self.crops.get(*crop).name
                    );
                    let _ = self.push(text, palette::RED_COST);
                }
                Event::PlotWatered { crop, .. } => {
                    let text = format!("Watered {} (growth boosted)", self.crops.get(*crop).name);
                    let _ = self.push(text, palette::BLUE_LIGHT);
                }
                Event::CropHarvested {
                    crop, score, coins, ..
                } => {
                    let text = format!(
                        "Harvested {}! (+{score}P, +{coins}C)",
                        self.crops.get(*crop).name
                    );
                    let _ = self.push(text, palette::GREEN_GAIN);
                }
                Event::ActionRejected { reason } => {
                    let (text, color) = rejection_message(*reason);
                    let _ = self.push(text, color);
                }
                Event::GameStateChanged { .. } | Event::CropRipened { .. } => {}
            }
        }
    }
}

fn rejection_message(reason: RejectionReason) -> (&'static str, Rgb) {
    match reason {
        RejectionReason::InsufficientFunds { .. } => ("Not enough coins!", palette::RED_COST),
        RejectionReason::AlreadyWatered => ("Already watered", palette::WHITE),
        RejectionReason::NoPlotAtPointer => ("Nothing to do there", palette::WHITE),
        RejectionReason::NotPlaying => ("The game is not running", palette::WHITE),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use farm_dash_core::{CanvasPoint, CropKind, PlotCoord};

    use super::*;

    fn log() -> TransientLog {
        TransientLog::new(Arc::new(CropTable::default()))
    }

    fn texts(log: &TransientLog) -> Vec<&str> {
        log.iter().map(LogEntry::text).collect()
    }

    #[test]
    fn full_log_evicts_oldest_first() {
        let mut log = log();
        for index in 0..7 {
            let _ = log.push(format!("message {index}"), palette::WHITE);
        }

        assert_eq!(
            texts(&log),
            ["message 2", "message 3", "message 4", "message 5", "message 6"]
        );
    }

    #[test]
    fn opacity_fades_linearly_and_clamps() {
        let mut log = log();
        let _ = log.push("hello", palette::WHITE);
        let entry = log.iter().next().expect("entry present");
        assert!((entry.opacity() - 1.0).abs() < 1e-6);

        log.advance(1.5);
        let entry = log.iter().next().expect("entry present");
        assert!((entry.opacity() - 0.5).abs() < 1e-6);

        log.advance(1.2);
        let entry = log.iter().next().expect("entry present");
        assert!((entry.opacity() - MIN_OPACITY).abs() < 1e-6);
    }

    #[test]
    fn messages_expire_after_display_duration() {
        let mut log = log();
        let _ = log.push("first", palette::WHITE);
        log.advance(2.0);
        let _ = log.push("second", palette::WHITE);

        log.advance(1.0);
        assert_eq!(texts(&log), ["second"]);

        log.advance(2.0);
        assert!(log.is_empty());
    }

    #[test]
    fn entry_ids_are_unique_and_increasing() {
        let mut log = log();
        let first = log.push("a", palette::WHITE);
        let second = log.push("b", palette::WHITE);
        assert!(second > first);
    }

    #[test]
    fn world_events_produce_catalogued_messages() {
        let mut log = log();
        let center = CanvasPoint::new(0.0, 0.0);
        let plot = PlotCoord::new(0, 0);

        log.handle(&[
            Event::CropSelected {
                crop: CropKind::Carrot,
            },
            Event::CropPlanted {
                plot,
                crop: CropKind::Carrot,
                center,
                cost: 2,
            },
            Event::PlotWatered {
                plot,
                crop: CropKind::Carrot,
                center,
            },
            Event::CropHarvested {
                plot,
                crop: CropKind::Carrot,
                center,
                score: 15,
                coins: 3,
            },
            Event::ActionRejected {
                reason: RejectionReason::InsufficientFunds {
                    required: 2,
                    available: 1,
                },
            },
        ]);

        assert_eq!(
            texts(&log),
            [
                "Selected seed: Carrot",
                "Planted Carrot (cost: -2C)",
                "Watered Carrot (growth boosted)",
                "Harvested Carrot! (+15P, +3C)",
                "Not enough coins!",
            ]
        );
        let colors: Vec<_> = log.iter().map(LogEntry::color).collect();
        assert_eq!(
            colors,
            [
                palette::WHITE,
                palette::RED_COST,
                palette::BLUE_LIGHT,
                palette::GREEN_GAIN,
                palette::RED_COST,
            ]
        );
    }

    #[test]
    fn session_reset_clears_before_new_messages() {
        let mut log = log();
        let _ = log.push("old", palette::WHITE);

        log.handle(&[
            Event::SessionReset,
            Event::CropSelected {
                crop: CropKind::Lettuce,
            },
        ]);

        assert_eq!(texts(&log), ["Selected seed: Lettuce"]);
    }

    #[test]
    fn time_advanced_event_fades_messages() {
        let mut log = log();
        let _ = log.push("tick", palette::WHITE);

        log.handle(&[Event::TimeAdvanced {
            dt: Duration::from_secs(3),
        }]);

        assert!(log.is_empty());
    }
}
