use crate::config::{ConfigError, SimConfig};
use crate::entity::{Entity, EntityId};
use crate::metrics::{EntitySnapshot, PopulationCounts, RunSummary, TurnReport, TurnSample};
use crate::rng::{create_rng, RandomSource};
use crate::species::{Habitat, Species};
use phases::snapshot::TurnSnapshot;
use rand_chacha::ChaCha12Rng;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("position ({x}, {y}) lies outside the world")]
    OutOfBounds { x: f64, y: f64 },
    #[error("{species} cannot be placed at ({x}, {y}): wrong habitat")]
    WrongHabitat { species: Species, x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("sample_every must be positive")]
    InvalidSampleEvery,
}

/// Offspring proposed during the action phase; joins the population only if
/// admission accepts it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Offspring {
    pub species: Species,
    pub position: [f64; 2],
}

/// The ecosystem coordinator. Sole owner and mutator of the population.
///
/// Each [`World::advance_turn`] runs reset, snapshot, act, cull, admit, and
/// settle as one atomic unit; readers only ever observe state between turns.
pub struct World<R = ChaCha12Rng> {
    entities: Vec<Entity>,
    config: SimConfig,
    rng: R,
    turn: u64,
    next_stable_id: EntityId,
}

impl World<ChaCha12Rng> {
    /// An empty world drawing from a ChaCha stream seeded with `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self, WorldError> {
        let rng = create_rng(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> World<R> {
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self {
            entities: Vec::new(),
            config,
            rng,
            turn: 0,
            next_stable_id: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn turn_count(&self) -> u64 {
        self.turn
    }

    /// True once the turn counter has reached `config.max_turns`.
    pub fn is_finished(&self) -> bool {
        self.turn >= self.config.max_turns
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Place one individual. Fish must go inside the lake, everything else
    /// outside it. Returns the new entity's stable id.
    pub fn add_entity(
        &mut self,
        species: Species,
        position: [f64; 2],
    ) -> Result<EntityId, WorldError> {
        let [x, y] = position;
        if !(x.is_finite() && y.is_finite() && self.config.bounds().contains(position)) {
            return Err(WorldError::OutOfBounds { x, y });
        }
        let in_lake = self.config.lake.contains(position);
        let fits = match species.habitat() {
            Habitat::Land => !in_lake,
            Habitat::Lake => in_lake,
        };
        if !fits {
            return Err(WorldError::WrongHabitat { species, x, y });
        }
        Ok(self.spawn(species, position))
    }

    /// Fill the world with `config.initial`, plants first and fish last.
    pub fn populate(&mut self) {
        for species in Species::ALL {
            for _ in 0..self.config.initial.count(species) {
                let position = self.random_habitat_point(species);
                self.spawn(species, position);
            }
        }
        log::debug!(
            "populated world with {} entities: {:?}",
            self.entities.len(),
            self.population_counts()
        );
    }

    pub fn live_entities(&self) -> Vec<EntitySnapshot> {
        self.entities
            .iter()
            .filter(|e| e.alive)
            .map(|e| EntitySnapshot {
                stable_id: e.stable_id,
                species: e.species,
                position: e.position,
                vitality: e.vitality,
                max_vitality: self.config.species.get(e.species).max_vitality,
                age: e.age,
            })
            .collect()
    }

    pub fn population_counts(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for e in self.entities.iter().filter(|e| e.alive) {
            counts.increment(e.species);
        }
        counts
    }

    /// Advance the simulation by one turn.
    pub fn advance_turn(&mut self) -> TurnReport {
        self.step_reset_phase();
        let snapshot = TurnSnapshot::capture(&self.entities, &self.config);
        let pending = self.step_act_phase(&snapshot);
        let deaths = self.step_cull_phase();
        let (births, discarded) = self.step_admission_phase(&pending);
        let (fish_respawned, fish_trimmed) = self.step_settlement_phase();
        self.turn = self.turn.saturating_add(1);

        let report = TurnReport {
            turn: self.turn,
            deaths,
            offspring_proposed: pending.len(),
            births,
            discarded,
            fish_respawned,
            fish_trimmed,
            counts: self.population_counts(),
        };
        log::debug!(
            "turn {}: deaths={} births={} discarded={} counts={:?}",
            report.turn,
            report.deaths,
            report.births,
            report.discarded,
            report.counts
        );
        report
    }

    /// Advance up to `turns` turns, stopping early at `config.max_turns`, and
    /// sample population counts every `sample_every` turns.
    pub fn run(&mut self, turns: u64, sample_every: u64) -> Result<RunSummary, RunError> {
        self.run_with(turns, sample_every, |_| {})
    }

    /// Like [`World::run`], calling `on_turn` after every completed turn.
    pub fn run_with(
        &mut self,
        turns: u64,
        sample_every: u64,
        mut on_turn: impl FnMut(&TurnReport),
    ) -> Result<RunSummary, RunError> {
        if sample_every == 0 {
            return Err(RunError::InvalidSampleEvery);
        }
        let mut summary = RunSummary::new(self.config.seed, sample_every);
        summary.final_counts = self.population_counts();
        for step in 1..=turns {
            if self.is_finished() {
                log::info!("turn ceiling {} reached", self.config.max_turns);
                break;
            }
            let report = self.advance_turn();
            summary.record(&report);
            on_turn(&report);
            if step % sample_every == 0 {
                summary.samples.push(TurnSample {
                    turn: report.turn,
                    counts: report.counts,
                });
            }
        }
        if summary.turns > 0 && summary.samples.last().map(|s| s.turn) != Some(self.turn) {
            summary.samples.push(TurnSample {
                turn: self.turn,
                counts: summary.final_counts,
            });
        }
        Ok(summary)
    }

    /// Run the turns left before `config.max_turns`, calling `on_turn` after
    /// each one.
    pub fn run_to_completion(
        &mut self,
        sample_every: u64,
        on_turn: impl FnMut(&TurnReport),
    ) -> Result<RunSummary, RunError> {
        let remaining = self.config.max_turns.saturating_sub(self.turn);
        self.run_with(remaining, sample_every, on_turn)
    }

    fn spawn(&mut self, species: Species, position: [f64; 2]) -> EntityId {
        let heading = self.rng.uniform_range(0.0, 2.0 * PI);
        let stable_id = self.next_stable_id;
        self.next_stable_id = self.next_stable_id.saturating_add(1);
        self.entities.push(Entity::new(
            stable_id,
            species,
            position,
            heading,
            self.config.species.get(species),
        ));
        stable_id
    }

    fn random_habitat_point(&mut self, species: Species) -> [f64; 2] {
        match species.habitat() {
            Habitat::Lake => {
                let lake = self.config.lake;
                lake.random_point(&mut self.rng)
            }
            Habitat::Land => {
                let margin = self.config.placement_margin;
                let (w, h) = (self.config.world_width, self.config.world_height);
                loop {
                    let x = self.rng.uniform_range(margin, w - margin);
                    let y = self.rng.uniform_range(margin, h - margin);
                    if !self.config.lake.contains([x, y]) {
                        return [x, y];
                    }
                }
            }
        }
    }
}

mod phases;
