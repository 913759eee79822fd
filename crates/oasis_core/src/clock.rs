//! Global time scale and the simulated game clock.

use crate::config::ClockConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier applied uniformly to every organism's frame delta.
///
/// The clock also clamps the raw frame delta: a negative or non-finite `dt`
/// contributes no time, which keeps the per-organism update free of that
/// check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    time_scale: f64,
    min_scale: f64,
    max_scale: f64,
    /// Simulated seconds since the clock started, including `start_seconds`.
    elapsed: f64,
}

impl SimulationClock {
    pub fn new(config: &ClockConfig) -> Self {
        Self {
            time_scale: config
                .initial_time_scale
                .clamp(config.min_time_scale, config.max_time_scale),
            min_scale: config.min_time_scale,
            max_scale: config.max_time_scale,
            elapsed: config.start_seconds.max(0.0),
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Sets the scale, clamped to the configured bounds. Returns the applied value.
    pub fn set_time_scale(&mut self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.time_scale;
        }
        self.time_scale = scale.clamp(self.min_scale, self.max_scale);
        self.time_scale
    }

    /// Adds `delta` to the current scale (keyboard-style adjustment).
    pub fn nudge(&mut self, delta: f64) -> f64 {
        self.set_time_scale(self.time_scale + delta)
    }

    pub fn pause(&mut self) {
        self.set_time_scale(0.0);
    }

    pub fn reset(&mut self) {
        self.set_time_scale(1.0);
    }

    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Frame delta in simulated seconds, without advancing the clock.
    #[inline]
    pub fn scaled(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        dt * self.time_scale
    }

    /// Advances the game clock by one frame and returns the scaled delta.
    pub fn advance(&mut self, dt: f64) -> f64 {
        let scaled = self.scaled(dt);
        self.elapsed += scaled;
        scaled
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn game_time(&self) -> GameTime {
        GameTime::from_seconds(self.elapsed)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

/// Whole-second breakdown of the game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTime {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl GameTime {
    pub fn from_seconds(total: f64) -> Self {
        let total = if total.is_finite() && total > 0.0 {
            total as u64
        } else {
            0
        };
        Self {
            days: total / 86_400,
            hours: ((total % 86_400) / 3_600) as u8,
            minutes: ((total % 3_600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}d:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_applies_multiplier() {
        let mut clock = SimulationClock::default();
        clock.set_time_scale(2.5);
        assert!((clock.scaled(0.1) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_negative_and_nan_dt_contribute_nothing() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_time_scale_clamped() {
        let mut clock = SimulationClock::new(&ClockConfig {
            max_time_scale: 100.0,
            ..Default::default()
        });
        assert_eq!(clock.set_time_scale(1_000.0), 100.0);
        assert_eq!(clock.nudge(-500.0), 0.0);
        assert!(clock.is_paused());
        clock.reset();
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_nan_scale_ignored() {
        let mut clock = SimulationClock::default();
        clock.set_time_scale(f64::NAN);
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn test_game_time_display() {
        let t = GameTime::from_seconds(90_061.7);
        assert_eq!(t.to_string(), "01d:01:01:01");
        assert_eq!(GameTime::from_seconds(-5.0).to_string(), "00d:00:00:00");
    }

    #[test]
    fn test_advance_accumulates_scaled_time() {
        let mut clock = SimulationClock::new(&ClockConfig {
            start_seconds: 3_600.0,
            ..Default::default()
        });
        clock.set_time_scale(10.0);
        for _ in 0..6 {
            clock.advance(1.0);
        }
        assert!((clock.elapsed() - 3_660.0).abs() < 1e-9);
        assert_eq!(clock.game_time().minutes, 1);
        assert_eq!(clock.game_time().hours, 1);
    }
}
