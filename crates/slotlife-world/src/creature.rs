//! Creature state and energy bookkeeping.

use crate::chance::Chance;
use slotlife_core::{rules, CreatureId, Error, IdSource, Position, Result, Sample, Sex};

/// State shared by both sexes
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    id: CreatureId,
    energy: f64,
    location: Option<Position>,
}

impl Vitals {
    fn new(id: CreatureId, energy: f64) -> Self {
        Self {
            id,
            energy,
            location: None,
        }
    }
}

/// A creature, alive on the grid or carried as an embryo
#[derive(Debug, Clone, PartialEq)]
pub enum Creature {
    Male(Vitals),
    Female {
        vitals: Vitals,
        gestating: Vec<Offspring>,
    },
}

/// Result of taking energy from a creature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Withdrawal {
    /// Energy actually taken, never more than the creature had
    pub amount: f64,
    /// The creature ran dry and has been (or must be) removed
    pub depleted: bool,
}

impl Creature {
    /// A creature of the given sex with exactly `energy`
    pub fn new(id: CreatureId, sex: Sex, energy: f64) -> Self {
        let vitals = Vitals::new(id, energy);
        match sex {
            Sex::Male => Creature::Male(vitals),
            Sex::Female => Creature::Female {
                vitals,
                gestating: Vec::new(),
            },
        }
    }

    /// A randomly sexed creature for the initial population.
    ///
    /// Energy is [`rules::FOUNDER_ENERGY`] minus a whole-number jitter, and
    /// males are scaled up by [`rules::MALE_ENERGY_FACTOR`] afterwards.
    pub fn founder<C: Chance + ?Sized>(id: CreatureId, chance: &mut C) -> Self {
        let sex = random_sex(chance);
        let mut energy = rules::FOUNDER_ENERGY - chance.below(rules::FOUNDER_JITTER) as f64;
        if sex == Sex::Male {
            energy *= rules::MALE_ENERGY_FACTOR;
        }
        Self::new(id, sex, energy)
    }

    /// A randomly sexed embryo at [`rules::EMBRYO_ENERGY`]
    pub fn embryo<C: Chance + ?Sized>(id: CreatureId, chance: &mut C) -> Self {
        Self::new(id, random_sex(chance), rules::EMBRYO_ENERGY)
    }

    fn vitals(&self) -> &Vitals {
        match self {
            Creature::Male(vitals) => vitals,
            Creature::Female { vitals, .. } => vitals,
        }
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        match self {
            Creature::Male(vitals) => vitals,
            Creature::Female { vitals, .. } => vitals,
        }
    }

    pub fn id(&self) -> CreatureId {
        self.vitals().id
    }

    pub fn sex(&self) -> Sex {
        match self {
            Creature::Male(_) => Sex::Male,
            Creature::Female { .. } => Sex::Female,
        }
    }

    pub fn energy(&self) -> f64 {
        self.vitals().energy
    }

    /// The cell this creature occupies; `None` once removed or while unborn
    pub fn location(&self) -> Option<Position> {
        self.vitals().location
    }

    pub(crate) fn set_location(&mut self, location: Option<Position>) {
        self.vitals_mut().location = location;
    }

    /// Bodies moved along when this creature moves: itself plus any embryos
    pub fn body_count(&self) -> usize {
        1 + self.gestating().len()
    }

    pub fn gestating(&self) -> &[Offspring] {
        match self {
            Creature::Male(_) => &[],
            Creature::Female { gestating, .. } => gestating,
        }
    }

    pub fn is_expecting(&self) -> bool {
        !self.gestating().is_empty()
    }

    /// Only a female that is not already carrying can conceive
    pub fn can_conceive(&self) -> bool {
        matches!(self, Creature::Female { gestating, .. } if gestating.is_empty())
    }

    pub(crate) fn gain_energy(&mut self, amount: f64) {
        self.vitals_mut().energy += amount;
    }

    pub(crate) fn scale_energy(&mut self, factor: f64) {
        self.vitals_mut().energy *= factor;
    }

    /// Take up to `amount` energy, never more than the creature holds.
    ///
    /// Removing a depleted creature from its cell is the grid's job; see
    /// [`crate::Grid::withdraw_energy`].
    pub fn withdraw_energy(&mut self, amount: f64) -> Withdrawal {
        let vitals = self.vitals_mut();
        let amount = amount.min(vitals.energy);
        vitals.energy -= amount;
        Withdrawal {
            amount,
            depleted: vitals.energy <= 0.0,
        }
    }

    /// Start carrying `litter`. Returns false, leaving the litter unused, when
    /// this creature cannot conceive.
    pub(crate) fn conceive(&mut self, litter: Vec<Creature>) -> bool {
        match self {
            Creature::Female { gestating, .. } if gestating.is_empty() => {
                gestating.extend(litter.into_iter().map(Offspring::new));
                true
            }
            _ => false,
        }
    }

    pub(crate) fn offspring_mut(&mut self, offspring: CreatureId) -> Result<&mut Offspring> {
        let mother = self.id();
        match self {
            Creature::Female { gestating, .. } => gestating
                .iter_mut()
                .find(|carried| carried.id() == offspring)
                .ok_or(Error::NotCarried { offspring, mother }),
            Creature::Male(_) => Err(Error::NotCarried { offspring, mother }),
        }
    }

    /// Take a carried offspring out of the gestating list
    pub(crate) fn release(&mut self, offspring: CreatureId) -> Result<Offspring> {
        let mother = self.id();
        match self {
            Creature::Female { gestating, .. } => {
                let index = gestating
                    .iter()
                    .position(|carried| carried.id() == offspring)
                    .ok_or(Error::NotCarried { offspring, mother })?;
                Ok(gestating.remove(index))
            }
            Creature::Male(_) => Err(Error::NotCarried { offspring, mother }),
        }
    }

    pub fn sample(&self) -> Sample {
        Sample {
            sex: self.sex(),
            energy: self.energy(),
            gestating: self.gestating().len(),
        }
    }
}

/// Random sex, both equally likely
fn random_sex<C: Chance + ?Sized>(chance: &mut C) -> Sex {
    Sex::all()[chance.below(2) as usize]
}

/// Build a full litter of freshly conceived embryos
pub(crate) fn litter<C: Chance + ?Sized>(ids: &mut IdSource, chance: &mut C) -> Vec<Creature> {
    (0..rules::LITTER_SIZE)
        .map(|_| Creature::embryo(ids.allocate(), chance))
        .collect()
}

/// An embryo carried by a female until it is delivered or discarded
#[derive(Debug, Clone, PartialEq)]
pub struct Offspring {
    embryo: Creature,
}

impl Offspring {
    fn new(embryo: Creature) -> Self {
        Self { embryo }
    }

    pub fn id(&self) -> CreatureId {
        self.embryo.id()
    }

    pub fn energy(&self) -> f64 {
        self.embryo.energy()
    }

    pub fn embryo(&self) -> &Creature {
        &self.embryo
    }

    /// Mature by one tick; returns the new energy
    pub(crate) fn grow(&mut self) -> f64 {
        self.embryo.gain_energy(rules::EMBRYO_GROWTH);
        self.embryo.energy()
    }

    pub(crate) fn into_creature(self) -> Creature {
        self.embryo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_creature_creation() {
        let male = Creature::new(CreatureId(1), Sex::Male, 100.0);
        assert_eq!(male.sex(), Sex::Male);
        assert_eq!(male.energy(), 100.0);
        assert_eq!(male.body_count(), 1);
        assert!(male.location().is_none());
        assert!(!male.can_conceive());

        let female = Creature::new(CreatureId(2), Sex::Female, 90.0);
        assert!(female.can_conceive());
        assert!(!female.is_expecting());
    }

    #[test]
    fn test_founder_energy() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for n in 0..200 {
            let founder = Creature::founder(CreatureId(n), &mut rng);
            let base = match founder.sex() {
                Sex::Male => founder.energy() / rules::MALE_ENERGY_FACTOR,
                Sex::Female => founder.energy(),
            };
            let jitter = rules::FOUNDER_ENERGY - base;
            assert!(jitter > -1e-9);
            assert!(jitter < rules::FOUNDER_JITTER as f64);
            assert!((jitter - jitter.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_withdraw_energy_is_clamped() {
        let mut creature = Creature::new(CreatureId(1), Sex::Male, 10.0);

        let taken = creature.withdraw_energy(4.0);
        assert_eq!(taken.amount, 4.0);
        assert!(!taken.depleted);
        assert_eq!(creature.energy(), 6.0);

        let taken = creature.withdraw_energy(50.0);
        assert_eq!(taken.amount, 6.0);
        assert!(taken.depleted);
        assert_eq!(creature.energy(), 0.0);
    }

    #[test]
    fn test_conception_and_release() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = IdSource::new();
        let mut female = Creature::new(ids.allocate(), Sex::Female, 80.0);

        assert!(female.conceive(litter(&mut ids, &mut rng)));
        assert_eq!(female.gestating().len(), rules::LITTER_SIZE);
        assert_eq!(female.body_count(), 1 + rules::LITTER_SIZE);
        assert!(female.is_expecting());
        assert!(!female.can_conceive());
        assert!(female
            .gestating()
            .iter()
            .all(|offspring| offspring.energy() == rules::EMBRYO_ENERGY));

        // Already carrying
        assert!(!female.conceive(litter(&mut ids, &mut rng)));
        assert_eq!(female.gestating().len(), rules::LITTER_SIZE);

        let first = female.gestating()[0].id();
        let released = female.release(first).unwrap();
        assert_eq!(released.id(), first);
        assert_eq!(female.gestating().len(), rules::LITTER_SIZE - 1);

        assert!(matches!(
            female.release(first),
            Err(Error::NotCarried { offspring, .. }) if offspring == first
        ));
    }

    #[test]
    fn test_male_cannot_conceive() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = IdSource::new();
        let mut male = Creature::new(ids.allocate(), Sex::Male, 80.0);
        assert!(!male.conceive(litter(&mut ids, &mut rng)));
        assert!(male.offspring_mut(CreatureId(99)).is_err());
    }

    #[test]
    fn test_offspring_growth() {
        let mut offspring = Offspring::new(Creature::new(CreatureId(5), Sex::Female, 10.0));
        assert_eq!(offspring.grow(), 20.0);
        assert_eq!(offspring.grow(), 30.0);
        assert_eq!(offspring.into_creature().energy(), 30.0);
    }
}
