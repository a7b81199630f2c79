use crate::region::{Lake, WorldBounds};
use crate::rng::RandomSource;
use crate::species::{Habitat, Species, SpeciesProfile};
use std::f64::consts::PI;

/// Fraction of its step a fish backs off after bumping into the shore.
const SHORE_NUDGE_FRACTION: f64 = 0.1;

/// Stable identifier handed out by `World::add_entity`; never reused.
pub type EntityId = u64;

/// One individual of any species.
///
/// Within a turn an entity is addressed by its slot in the world's arena;
/// `stable_id` survives culls and is never reused.
#[derive(Clone, Debug)]
pub struct Entity {
    pub stable_id: EntityId,
    pub species: Species,
    pub position: [f64; 2],
    pub vitality: f64,
    pub age: u64,
    pub alive: bool,
    /// Direction of travel in radians.
    pub heading: f64,
    pub step: f64,
    /// Set by a counted pairing; cleared at the start of every turn.
    pub reproduced: bool,
    /// Turns left before the next feeding attempt.
    pub feed_cooldown: u32,
    /// Turns left before the next pairing.
    pub repro_cooldown: u32,
}

impl Entity {
    pub fn new(
        stable_id: EntityId,
        species: Species,
        position: [f64; 2],
        heading: f64,
        profile: &SpeciesProfile,
    ) -> Self {
        Self {
            stable_id,
            species,
            position,
            vitality: profile.initial_vitality,
            age: 0,
            alive: true,
            heading,
            step: profile.step,
            reproduced: false,
            feed_cooldown: 0,
            repro_cooldown: 0,
        }
    }

    #[inline]
    pub fn distance_to(&self, point: [f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Add vitality, never exceeding `cap`.
    pub fn gain_vitality(&mut self, amount: f64, cap: f64) {
        self.vitality = (self.vitality + amount).min(cap);
    }

    /// Subtract vitality and die at or below zero. Returns whether still alive.
    pub fn pay_vitality(&mut self, amount: f64) -> bool {
        self.vitality -= amount;
        if self.vitality <= 0.0 {
            self.alive = false;
        }
        self.alive
    }

    /// Wander one step. Land animals bounce off the lake and the world edge;
    /// fish bounce off the shore from the inside. Plants stay put.
    pub fn wander<R: RandomSource + ?Sized>(
        &mut self,
        profile: &SpeciesProfile,
        bounds: &WorldBounds,
        lake: &Lake,
        rng: &mut R,
    ) {
        if !self.species.is_mobile() {
            return;
        }
        self.heading += rng.uniform_range(-profile.heading_jitter, profile.heading_jitter);
        let (sin_h, cos_h) = self.heading.sin_cos();
        let tentative = [
            self.position[0] + cos_h * self.step,
            self.position[1] + sin_h * self.step,
        ];

        match self.species.habitat() {
            Habitat::Land => {
                if lake.contains(tentative) {
                    self.heading +=
                        PI + rng.uniform_range(-profile.deflect_jitter, profile.deflect_jitter);
                    return;
                }
                self.position = bounds.clamp(tentative);
                let (hit_x, hit_y) = bounds.touches_edge(self.position);
                if hit_x {
                    self.heading = PI - self.heading;
                }
                if hit_y {
                    self.heading = -self.heading;
                }
            }
            Habitat::Lake => {
                if lake.contains(tentative) {
                    self.position = tentative;
                    return;
                }
                self.heading +=
                    PI + rng.uniform_range(-profile.deflect_jitter, profile.deflect_jitter);
                let (sin_h, cos_h) = self.heading.sin_cos();
                let backoff = self.step * SHORE_NUDGE_FRACTION;
                let nudged = [
                    self.position[0] - cos_h * backoff,
                    self.position[1] - sin_h * backoff,
                ];
                if lake.contains(nudged) {
                    self.position = nudged;
                }
            }
        }
    }

    /// Advance age by one turn, decay vitality, and tick cooldowns.
    ///
    /// Plants are pinned to their initial vitality and never age out.
    pub fn age_one_turn(&mut self, profile: &SpeciesProfile) {
        self.age = self.age.saturating_add(1);
        self.feed_cooldown = self.feed_cooldown.saturating_sub(1);
        self.repro_cooldown = self.repro_cooldown.saturating_sub(1);

        if self.species == Species::Plant {
            self.vitality = profile.initial_vitality;
            return;
        }
        self.vitality -= profile.decay_per_turn;
        let too_old = profile.max_age.is_some_and(|limit| self.age > limit);
        if self.vitality <= 0.0 || too_old {
            self.alive = false;
        }
    }
}
