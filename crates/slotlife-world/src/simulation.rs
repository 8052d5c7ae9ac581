//! Simulation engine for a world of slots.

use crate::chance::Chance;
use crate::creature::{self, Creature, Offspring};
use crate::grid::{Grid, Traversal};
use crate::render::Glyph;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotlife_core::{
    rules, CreatureId, Error, IdSource, Position, Result, Sex, Stats, TickEvents, WorldConfig,
};
use tracing::{debug, info, instrument, trace};

pub struct Simulation<C = ChaCha8Rng> {
    grid: Grid,
    chance: C,
    ids: IdSource,
    seed: Option<u64>,
    ticks: u64,
    stats: Stats,
    events: TickEvents,
    totals: TickEvents,
}

impl Simulation<ChaCha8Rng> {
    /// A half-populated world seeded from entropy
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::from_config(&WorldConfig {
            width,
            height,
            ..Default::default()
        })
    }

    /// A half-populated world with a fixed seed
    pub fn seeded(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::from_config(&WorldConfig {
            width,
            height,
            seed: Some(seed),
            ..Default::default()
        })
    }

    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        let mut sim = Self::with_chance(
            config.width,
            config.height,
            ChaCha8Rng::seed_from_u64(seed),
        )?;
        sim.seed = Some(seed);
        let founders = sim.populate(config.population_density)?;

        info!(
            width = config.width,
            height = config.height,
            seed,
            founders,
            males = sim.stats.males,
            females = sim.stats.females,
            "World created"
        );

        Ok(sim)
    }
}

impl<C: Chance> Simulation<C> {
    /// An empty world drawing from `chance`
    pub fn with_chance(width: usize, height: usize, chance: C) -> Result<Self> {
        let grid = Grid::new(width, height)?;

        Ok(Self {
            grid,
            chance,
            ids: IdSource::new(),
            seed: None,
            ticks: 0,
            stats: Stats::collect(std::iter::empty()),
            events: TickEvents::default(),
            totals: TickEvents::default(),
        })
    }

    /// Give each vacant cell a founder with probability `density`. Returns the
    /// number of founders placed.
    pub fn populate(&mut self, density: f64) -> Result<usize> {
        let mut founders = 0;
        for index in self.grid.indices(Traversal::Forward) {
            let position = self.grid.index_to_pos(index);
            if self.chance.uniform() > 1.0 - density && self.grid.is_vacant(position) {
                let founder = Creature::founder(self.ids.allocate(), &mut self.chance);
                self.grid.place(position, founder)?;
                founders += 1;
            }
        }
        self.refresh_stats();
        Ok(founders)
    }

    /// Place a creature with exactly `energy` at `position`
    pub fn spawn(&mut self, position: Position, sex: Sex, energy: f64) -> Result<CreatureId> {
        let id = self.ids.allocate();
        self.grid.place(position, Creature::new(id, sex, energy))?;
        self.refresh_stats();
        Ok(id)
    }

    /// Advance one step: every occupied cell acts once, last cell first, then
    /// the statistics are recomputed
    #[instrument(level = "debug", skip(self), fields(tick = self.ticks + 1))]
    pub fn tick(&mut self) -> Result<&mut Self> {
        self.events = TickEvents::default();

        // Moves and births land on the following cell, which a reverse pass
        // has normally already visited.
        for index in self.grid.indices(Traversal::Reverse) {
            let position = self.grid.index_to_pos(index);
            self.tick_cell(position)?;
        }

        self.ticks += 1;
        self.totals.absorb(&self.events);
        self.refresh_stats();

        debug!(
            tick = self.ticks,
            population = self.stats.total(),
            moves = self.events.moves,
            fights = self.events.fights,
            conceptions = self.events.conceptions,
            births = self.events.births,
            discards = self.events.discards,
            deaths = self.events.deaths,
            "Tick complete"
        );

        Ok(self)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Events of the most recent tick
    pub fn last_events(&self) -> &TickEvents {
        &self.events
    }

    /// Events since construction
    pub fn totals(&self) -> &TickEvents {
        &self.totals
    }

    /// Completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Seed of the built-in generator, when the world was built from one
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn creature_at(&self, position: Position) -> Option<&Creature> {
        self.grid.occupant(position)
    }

    /// One glyph per cell, row by row
    pub fn render_rows(&self) -> Vec<Vec<Glyph>> {
        self.grid
            .rows()
            .map(|row| row.iter().map(Glyph::of_cell).collect())
            .collect()
    }

    fn refresh_stats(&mut self) {
        self.stats = Stats::collect(self.grid.creatures().map(Creature::sample));
    }

    fn tick_cell(&mut self, position: Position) -> Result<()> {
        let expecting = match self.grid.occupant(position) {
            Some(creature) => creature.is_expecting(),
            None => return Ok(()),
        };

        if expecting {
            self.tick_gestation(position)?;
            if self.grid.is_vacant(position) {
                return Ok(());
            }
        }

        self.act(position)
    }

    /// Grow every carried offspring, delivering or discarding those that are
    /// ready. Works from a snapshot of ids since the list shrinks as we go.
    fn tick_gestation(&mut self, mother: Position) -> Result<()> {
        let carried: Vec<CreatureId> = self
            .grid
            .occupant_mut(mother)?
            .gestating()
            .iter()
            .map(Offspring::id)
            .collect();

        for offspring in carried {
            if self.grid.is_vacant(mother) {
                break;
            }

            let energy = self
                .grid
                .occupant_mut(mother)?
                .offspring_mut(offspring)?
                .grow();

            if energy >= rules::DELIVERY_ENERGY
                && !self.deliver(mother, offspring)?
                && energy >= rules::DISCARD_ENERGY
            {
                self.discard(mother, offspring)?;
            }
        }

        Ok(())
    }

    /// Birth onto the next cell if it is free. Returns whether it happened.
    fn deliver(&mut self, mother: Position, offspring: CreatureId) -> Result<bool> {
        self.grid.occupant_mut(mother)?.offspring_mut(offspring)?;

        let destination = self.grid.next(mother);
        if !self.grid.is_vacant(destination) {
            return Ok(false);
        }

        let newborn = self
            .grid
            .occupant_mut(mother)?
            .release(offspring)?
            .into_creature();
        let withdrawal = self.grid.withdraw_energy(mother, rules::DELIVERY_COST)?;
        if withdrawal.depleted {
            self.record_death(mother);
        }

        trace!(
            offspring = %offspring,
            sex = %newborn.sex(),
            at = %destination,
            "Offspring delivered"
        );
        self.grid.place(destination, newborn)?;
        self.events.births += 1;

        Ok(true)
    }

    /// Give up an offspring, returning its energy to the mother
    fn discard(&mut self, mother: Position, offspring: CreatureId) -> Result<()> {
        let female = self.grid.occupant_mut(mother)?;
        let mut embryo = female.release(offspring)?.into_creature();
        let residual = embryo.energy();
        let withdrawal = embryo.withdraw_energy(residual);
        female.gain_energy(withdrawal.amount);

        trace!(offspring = %offspring, residual = withdrawal.amount, "Offspring discarded");
        self.events.discards += 1;

        Ok(())
    }

    fn act(&mut self, position: Position) -> Result<()> {
        let energy = self
            .grid
            .occupant(position)
            .map(Creature::energy)
            .ok_or(Error::Vacant(position))?;

        let eager = energy < rules::EAGER_ENERGY || self.chance.uniform() < rules::EAGER_CHANCE;
        if !eager || self.chance.uniform() <= rules::IDLE_CHANCE {
            return Ok(());
        }

        let target = self.grid.next(position);
        // A lone cell is its own successor; nobody interacts with themselves.
        if target == position {
            return Ok(());
        }

        if self.grid.is_vacant(target) {
            self.advance(position, target)
        } else {
            self.interact(position, target)
        }
    }

    /// Move onto the free cell ahead, paying for every body carried
    fn advance(&mut self, from: Position, to: Position) -> Result<()> {
        let creature = self.grid.occupant_mut(from)?;
        let bodies = creature.body_count();
        creature.scale_energy(1.0 - rules::MOVE_COST_PER_BODY * bodies as f64);
        self.grid.relocate(from, to)?;

        trace!(%from, %to, bodies, "Creature moved");
        self.events.moves += 1;
        Ok(())
    }

    fn interact(&mut self, actor: Position, other: Position) -> Result<()> {
        let (actor_sex, actor_energy, actor_fertile) = self.profile(actor)?;
        let (other_sex, other_energy, other_fertile) = self.profile(other)?;

        if actor_sex != other_sex {
            let parent = if actor_fertile {
                Some(actor)
            } else if other_fertile {
                Some(other)
            } else {
                None
            };

            if let Some(parent) = parent {
                if actor_energy > rules::MATING_COST
                    && self.chance.uniform() > rules::MATING_REFUSAL
                {
                    return self.mate(actor, parent);
                }
                return self.fight(actor, other);
            }
        }

        if actor_energy > other_energy || self.chance.uniform() < rules::PROVOKE_CHANCE {
            self.fight(actor, other)?;
        }

        Ok(())
    }

    fn profile(&self, position: Position) -> Result<(Sex, f64, bool)> {
        let creature = self
            .grid
            .occupant(position)
            .ok_or(Error::Vacant(position))?;
        Ok((creature.sex(), creature.energy(), creature.can_conceive()))
    }

    /// The actor pays for a litter which `parent` starts carrying
    fn mate(&mut self, actor: Position, parent: Position) -> Result<()> {
        let withdrawal = self.grid.withdraw_energy(actor, rules::MATING_COST)?;
        if withdrawal.depleted {
            self.record_death(actor);
            return Ok(());
        }

        let litter = creature::litter(&mut self.ids, &mut self.chance);
        if self.grid.occupant_mut(parent)?.conceive(litter) {
            trace!(%actor, mother = %parent, "Litter conceived");
            self.events.conceptions += 1;
        }

        Ok(())
    }

    /// The winner takes a share of the loser's energy; a drained loser dies
    fn fight(&mut self, actor: Position, other: Position) -> Result<()> {
        let (_, actor_energy, _) = self.profile(actor)?;
        let (_, other_energy, _) = self.profile(other)?;

        let (winner, loser, loser_energy) =
            if other_energy < actor_energy && self.chance.uniform() > rules::UPSET_CHANCE {
                (actor, other, other_energy)
            } else {
                (other, actor, actor_energy)
            };

        let withdrawal = self
            .grid
            .withdraw_energy(loser, loser_energy * rules::PLUNDER_RATE)?;
        self.grid.occupant_mut(winner)?.gain_energy(withdrawal.amount);

        trace!(%winner, %loser, amount = withdrawal.amount, "Fight resolved");
        self.events.fights += 1;
        if withdrawal.depleted {
            self.record_death(loser);
        }

        Ok(())
    }

    fn record_death(&mut self, position: Position) {
        trace!(at = %position, "Creature died");
        self.events.deaths += 1;
    }
}
