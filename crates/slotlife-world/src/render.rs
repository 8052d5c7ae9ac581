//! Read-only display snapshot of the grid.
//!
//! Colors and terminal control are left to the caller; a [`Glyph`] only says
//! which symbol to draw and which tint applies.

use crate::creature::Creature;
use crate::grid::Cell;
use serde::{Deserialize, Serialize};
use slotlife_core::{rules, Sex};
use std::fmt;

/// Energy band of an occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyBand {
    Faint,
    Low,
    High,
    Peak,
}

impl EnergyBand {
    pub fn of(energy: f64) -> Self {
        if energy <= rules::FAINT_BAND {
            EnergyBand::Faint
        } else if energy <= rules::LOW_BAND {
            EnergyBand::Low
        } else if energy <= rules::HIGH_BAND {
            EnergyBand::High
        } else {
            EnergyBand::Peak
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            EnergyBand::Faint => '.',
            EnergyBand::Low => 'o',
            EnergyBand::High => 'O',
            EnergyBand::Peak => '@',
        }
    }
}

/// How an occupant should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Male,
    Female,
    /// A female carrying offspring
    Expecting,
}

/// What to draw for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Glyph {
    Empty,
    Occupied { band: EnergyBand, tint: Tint },
}

impl Glyph {
    pub fn of_creature(creature: &Creature) -> Self {
        let tint = match creature.sex() {
            Sex::Male => Tint::Male,
            Sex::Female if creature.is_expecting() => Tint::Expecting,
            Sex::Female => Tint::Female,
        };
        Glyph::Occupied {
            band: EnergyBand::of(creature.energy()),
            tint,
        }
    }

    pub fn of_cell(cell: &Cell) -> Self {
        cell.occupant().map_or(Glyph::Empty, Glyph::of_creature)
    }

    pub fn symbol(&self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Occupied { band, .. } => band.symbol(),
        }
    }

    pub fn tint(&self) -> Option<Tint> {
        match self {
            Glyph::Empty => None,
            Glyph::Occupied { tint, .. } => Some(*tint),
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
