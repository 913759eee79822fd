use anyhow::Result;
use oasis_data::{AnimalKind, LiveEvent, OrganismKind};
use serde::Serialize;

use crate::model::config::SimConfig;
use crate::model::world::World;

/// Event counts accumulated between two reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventTally {
    pub spawned: u64,
    pub expired: u64,
    pub destroyed: u64,
    pub fell_asleep: u64,
    pub woke: u64,
    pub retreated: u64,
}

impl EventTally {
    pub fn record(&mut self, event: &LiveEvent) {
        let slot = match event {
            LiveEvent::Spawned { .. } => &mut self.spawned,
            LiveEvent::Expired { .. } => &mut self.expired,
            LiveEvent::Destroyed { .. } => &mut self.destroyed,
            LiveEvent::FellAsleep { .. } => &mut self.fell_asleep,
            LiveEvent::Woke { .. } => &mut self.woke,
            LiveEvent::Retreated { .. } => &mut self.retreated,
        };
        *slot += 1;
    }
}

/// Population summary printed by the headless runner.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tick: u64,
    pub game_time: String,
    pub time_scale: f64,
    pub population: usize,
    pub trees: usize,
    pub prey: usize,
    pub predators: usize,
    pub sleeping: usize,
    pub occupied_cells: usize,
    pub events: EventTally,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[tick {:>6}] {} x{:<6} pop {:>4} (trees {}, prey {}, predators {}) asleep {} cells {} | +{} -{} retreats {}",
            self.tick,
            self.game_time,
            self.time_scale,
            self.population,
            self.trees,
            self.prey,
            self.predators,
            self.sleeping,
            self.occupied_cells,
            self.events.spawned,
            self.events.expired + self.events.destroyed,
            self.events.retreated,
        )
    }
}

/// Headless driver: feeds a fixed frame delta into the world and collects reports.
pub struct App {
    pub running: bool,
    pub world: World,
    pub dt: f64,
    pub report_every: u64,
    tally: EventTally,
}

impl App {
    pub fn new(config: SimConfig, dt: f64, report_every: u64) -> Result<Self> {
        anyhow::ensure!(
            dt.is_finite() && dt > 0.0,
            "Frame delta must be a positive number of seconds"
        );
        let world = World::new(config)?;
        let mut app = Self {
            running: true,
            world,
            dt,
            report_every: report_every.max(1),
            tally: EventTally::default(),
        };
        // Initial population is reported with the first summary.
        let initial = app.world.drain_events();
        app.absorb(&initial);
        Ok(app)
    }

    fn absorb(&mut self, events: &[LiveEvent]) {
        for event in events {
            self.tally.record(event);
        }
    }

    /// Runs one frame. Returns a report when this tick is a reporting tick.
    pub fn step(&mut self) -> Option<Report> {
        let events = self.world.update(self.dt);
        self.absorb(&events);
        if self.world.tick % self.report_every == 0 {
            Some(self.take_report())
        } else {
            None
        }
    }

    /// Summary of the current world; resets the event tally.
    pub fn take_report(&mut self) -> Report {
        let world = &self.world;
        let report = Report {
            tick: world.tick,
            game_time: world.clock.game_time().to_string(),
            time_scale: world.time_scale(),
            population: world.population_count(),
            trees: world.count_by_kind(OrganismKind::Tree),
            prey: world.count_by_kind(OrganismKind::Animal(AnimalKind::Prey)),
            predators: world.count_by_kind(OrganismKind::Animal(AnimalKind::Predator)),
            sleeping: world.sleeping_count(),
            occupied_cells: world.occupancy.len(),
            events: self.tally,
        };
        self.tally = EventTally::default();
        report
    }

    /// Runs `ticks` frames, handing every report to `on_report`.
    pub fn run<F>(&mut self, ticks: u64, mut on_report: F)
    where
        F: FnMut(&Report),
    {
        for _ in 0..ticks {
            if !self.running {
                break;
            }
            if let Some(report) = self.step() {
                on_report(&report);
            }
        }
        self.running = false;
        tracing::info!(
            tick = self.world.tick,
            population = self.world.population_count(),
            spawned = self.world.metrics.counter("spawned"),
            expired = self.world.metrics.counter("expired"),
            retreated = self.world.metrics.counter("retreated"),
            "Headless run finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.world.seed = Some(7);
        config
    }

    #[test]
    fn test_first_report_counts_initial_population() {
        crate::model::metrics::init_logging();
        let mut app = App::new(quiet_config(), 0.1, 5).expect("app");
        let mut reports = Vec::new();
        app.run(10, |r| reports.push(r.clone()));
        assert_eq!(reports.len(), 2);
        assert!(reports[0].events.spawned >= 16);
        assert_eq!(reports[1].tick, 10);
        assert!(!app.running);
    }

    #[test]
    fn test_rejects_bad_dt() {
        assert!(App::new(quiet_config(), 0.0, 1).is_err());
        assert!(App::new(quiet_config(), f64::NAN, 1).is_err());
    }
}
