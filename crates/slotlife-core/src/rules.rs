//! Fixed behaviour constants.
//!
//! Energies are in arbitrary units; probabilities are compared against a
//! uniform draw in `[0, 1)`.

/// Offspring conceived per pregnancy
pub const LITTER_SIZE: usize = 3;
/// Energy an embryo starts with
pub const EMBRYO_ENERGY: f64 = 10.0;
/// Energy an embryo gains each tick it is carried
pub const EMBRYO_GROWTH: f64 = 10.0;
/// Embryo energy at which delivery is attempted
pub const DELIVERY_ENERGY: f64 = 40.0;
/// Embryo energy at which an undeliverable embryo is given up
pub const DISCARD_ENERGY: f64 = 50.0;
/// Energy the mother spends on each birth
pub const DELIVERY_COST: f64 = EMBRYO_ENERGY / 2.0;
/// Energy the initiating partner spends to conceive a litter
pub const MATING_COST: f64 = LITTER_SIZE as f64 * EMBRYO_ENERGY;

/// Base energy of a founder creature
pub const FOUNDER_ENERGY: f64 = 100.0;
/// Founders lose a whole number of units drawn from `0..FOUNDER_JITTER`
pub const FOUNDER_JITTER: u32 = 5;
/// Founder males start this much stronger
pub const MALE_ENERGY_FACTOR: f64 = 1.2;

/// Creatures below this energy always want to act
pub const EAGER_ENERGY: f64 = 80.0;
/// Chance a well-fed creature wants to act anyway
pub const EAGER_CHANCE: f64 = 0.4;
/// Chance an eager creature still sits the tick out
pub const IDLE_CHANCE: f64 = 0.2;
/// Chance a mating attempt turns into a fight
pub const MATING_REFUSAL: f64 = 0.25;
/// Chance a weaker creature picks a fight anyway
pub const PROVOKE_CHANCE: f64 = 0.2;
/// Chance the stronger creature loses a fight
pub const UPSET_CHANCE: f64 = 0.25;
/// Share of the loser's energy taken by the winner of a fight
pub const PLUNDER_RATE: f64 = 0.05;
/// Fraction of energy spent per body carried on a move
pub const MOVE_COST_PER_BODY: f64 = 0.01;

/// Default share of cells populated at start
pub const POPULATION_DENSITY: f64 = 0.5;

/// Upper bounds of the display energy bands
pub const FAINT_BAND: f64 = 20.0;
pub const LOW_BAND: f64 = 40.0;
pub const HIGH_BAND: f64 = 60.0;
