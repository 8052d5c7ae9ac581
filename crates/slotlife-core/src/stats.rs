//! Population statistics and per-tick event counters.

use crate::Sex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate over every creature on the grid after a tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub males: u32,
    pub females: u32,
    /// Females currently carrying offspring
    pub pregnant: u32,
    /// Offspring carried across all females
    pub embryos: u32,
    /// Highest energy seen; zero for an empty population
    pub max_energy: f64,
    /// Mean energy; `None` when there is nobody to average over
    pub average_energy: Option<f64>,
    #[serde(skip)]
    total_energy: f64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of samples into a finished snapshot
    pub fn collect<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut stats = samples
            .into_iter()
            .fold(Self::new(), |mut stats, sample| {
                stats.record(sample);
                stats
            });
        stats.finish();
        stats
    }

    /// Add one creature to the running totals
    pub fn record(&mut self, sample: Sample) {
        self.total_energy += sample.energy;
        if sample.energy > self.max_energy {
            self.max_energy = sample.energy;
        }
        match sample.sex {
            Sex::Male => self.males += 1,
            Sex::Female => self.females += 1,
        }
        if sample.gestating > 0 {
            self.pregnant += 1;
            self.embryos += sample.gestating as u32;
        }
    }

    /// Derive the averages from the running totals
    pub fn finish(&mut self) {
        let total = self.total();
        self.average_energy = if total == 0 {
            None
        } else {
            Some(self.total_energy / total as f64)
        };
    }

    pub fn total(&self) -> u32 {
        self.males + self.females
    }

    /// Males per female; `None` without females
    pub fn sex_ratio(&self) -> Option<f64> {
        if self.females == 0 {
            None
        } else {
            Some(self.males as f64 / self.females as f64)
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Total: {} (m/f: ", self.total())?;
        match self.sex_ratio() {
            Some(ratio) => write!(f, "{:.1}", ratio)?,
            None => write!(f, "n/a")?,
        }
        write!(f, ") | Energy: ")?;
        match self.average_energy {
            Some(average) => write!(f, "{:.1}", average)?,
            None => write!(f, "n/a")?,
        }
        write!(f, " (max: {:.1})", self.max_energy)
    }
}

/// What the statistics need to know about one creature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub sex: Sex,
    pub energy: f64,
    pub gestating: usize,
}

/// Things that happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    pub moves: u64,
    pub fights: u64,
    pub conceptions: u64,
    pub births: u64,
    pub discards: u64,
    pub deaths: u64,
}

impl TickEvents {
    /// Add another set of counters into this one
    pub fn absorb(&mut self, other: &TickEvents) {
        self.moves += other.moves;
        self.fights += other.fights;
        self.conceptions += other.conceptions;
        self.births += other.births;
        self.discards += other.discards;
        self.deaths += other.deaths;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(sex: Sex, energy: f64) -> Sample {
        Sample {
            sex,
            energy,
            gestating: 0,
        }
    }

    #[test]
    fn test_empty_population_has_no_average() {
        let stats = Stats::collect(Vec::new());
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.average_energy, None);
        assert_eq!(stats.sex_ratio(), None);
        assert_eq!(stats.max_energy, 0.0);
        assert_eq!(
            stats.to_string(),
            "Total: 0 (m/f: n/a) | Energy: n/a (max: 0.0)"
        );
    }

    #[test]
    fn test_collect() {
        let stats = Stats::collect(vec![
            sample(Sex::Male, 120.0),
            sample(Sex::Female, 60.0),
            Sample {
                sex: Sex::Female,
                energy: 30.0,
                gestating: 3,
            },
        ]);

        assert_eq!(stats.males, 1);
        assert_eq!(stats.females, 2);
        assert_eq!(stats.pregnant, 1);
        assert_eq!(stats.embryos, 3);
        assert_eq!(stats.max_energy, 120.0);
        assert_eq!(stats.average_energy, Some(70.0));
        assert_eq!(stats.sex_ratio(), Some(0.5));
        assert_eq!(
            stats.to_string(),
            "Total: 3 (m/f: 0.5) | Energy: 70.0 (max: 120.0)"
        );
    }

    #[test]
    fn test_tick_events_absorb() {
        let mut totals = TickEvents::default();
        let tick = TickEvents {
            moves: 4,
            births: 1,
            deaths: 2,
            ..Default::default()
        };
        totals.absorb(&tick);
        totals.absorb(&tick);
        assert_eq!(totals.moves, 8);
        assert_eq!(totals.births, 2);
        assert_eq!(totals.deaths, 4);
        assert_eq!(totals.fights, 0);
    }

    proptest! {
        #[test]
        fn prop_average_is_bounded_by_max(energies in prop::collection::vec((any::<bool>(), 0.1f64..500.0), 1..64)) {
            let stats = Stats::collect(energies.iter().map(|&(male, energy)| {
                sample(if male { Sex::Male } else { Sex::Female }, energy)
            }));

            prop_assert_eq!(stats.total() as usize, energies.len());
            let average = stats.average_energy.unwrap();
            prop_assert!(average <= stats.max_energy + 1e-9);
            prop_assert!(average > 0.0);
        }
    }
}
