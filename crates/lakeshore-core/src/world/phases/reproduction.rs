use super::super::{Offspring, World};
use super::snapshot::TurnSnapshot;
use crate::rng::RandomSource;
use crate::species::{Habitat, Species};

impl<R: RandomSource> World<R> {
    /// Plants may spread a sprout; animals look for a partner.
    pub(in crate::world) fn step_reproduction(
        &mut self,
        slot: usize,
        snapshot: &TurnSnapshot,
    ) -> Option<Offspring> {
        debug_assert!(self.entities[slot].alive, "dead entities do not reproduce");
        match self.entities[slot].species {
            Species::Plant => self.try_spread(slot, snapshot),
            Species::Herbivore | Species::Carnivore | Species::Omnivore | Species::Fish => {
                self.try_pair(slot, snapshot)
            }
        }
    }

    fn try_spread(&mut self, slot: usize, snapshot: &TurnSnapshot) -> Option<Offspring> {
        let profile = self.config.species.get(Species::Plant);
        let (chance, spread) = (profile.reproduction_chance, profile.offspring_spread);
        if chance <= 0.0 || snapshot.count(Species::Plant) >= self.config.caps.plant_max {
            return None;
        }
        if self.rng.uniform() >= chance {
            return None;
        }
        let origin = self.entities[slot].position;
        let dx = self.rng.uniform_range(-spread, spread);
        let dy = self.rng.uniform_range(-spread, spread);
        let position = self.config.bounds().clamp([origin[0] + dx, origin[1] + dy]);
        if self.config.lake.contains(position) {
            return None;
        }
        Some(Offspring {
            species: Species::Plant,
            position,
        })
    }

    /// Pair with the first eligible same-species partner in range.
    ///
    /// Both parents pay the cost as soon as a partner is found. Only when
    /// both survive the payment and the gate draw passes is the pairing
    /// counted: both are flagged and put on cooldown, and one offspring is
    /// proposed near the initiator.
    fn try_pair(&mut self, slot: usize, snapshot: &TurnSnapshot) -> Option<Offspring> {
        let (species, position) = {
            let e = &self.entities[slot];
            if e.reproduced || e.repro_cooldown > 0 {
                return None;
            }
            (e.species, e.position)
        };
        if species == Species::Fish && snapshot.count(Species::Fish) >= self.config.caps.fish_max {
            return None;
        }
        let profile = self.config.species.get(species);
        let (radius, cost, cooldown, chance) = (
            profile.mating_radius,
            profile.reproduction_cost,
            profile.reproduction_cooldown,
            profile.reproduction_chance,
        );

        let partner = self.first_match(snapshot, species, position, radius, |other, e| {
            other != slot && e.alive && !e.reproduced && e.repro_cooldown == 0
        })?;

        let initiator_alive = self.entities[slot].pay_vitality(cost);
        let partner_alive = self.entities[partner].pay_vitality(cost);
        if !(initiator_alive && partner_alive) {
            log::trace!("{species} pairing at turn {} cost a parent its life", self.turn + 1);
            return None;
        }
        if self.rng.uniform() >= chance {
            return None;
        }
        for parent in [slot, partner] {
            let e = &mut self.entities[parent];
            e.reproduced = true;
            e.repro_cooldown = cooldown;
        }
        let origin = self.entities[slot].position;
        self.place_offspring(species, origin)
    }

    /// Scatter an offspring around `origin`. Land offspring are clamped to
    /// the world and must land dry within `spawn_attempts` tries; fish that
    /// scatter out of the lake are resampled inside it.
    fn place_offspring(&mut self, species: Species, origin: [f64; 2]) -> Option<Offspring> {
        let spread = self.config.species.get(species).offspring_spread;
        let bounds = self.config.bounds();
        let lake = self.config.lake;

        for _ in 0..self.config.spawn_attempts {
            let dx = self.rng.uniform_range(-spread, spread);
            let dy = self.rng.uniform_range(-spread, spread);
            let candidate = [origin[0] + dx, origin[1] + dy];
            let position = match species.habitat() {
                Habitat::Land => {
                    let clamped = bounds.clamp(candidate);
                    if lake.contains(clamped) {
                        continue;
                    }
                    clamped
                }
                Habitat::Lake if lake.contains(candidate) => candidate,
                Habitat::Lake => lake.random_point(&mut self.rng),
            };
            return Some(Offspring { species, position });
        }
        log::trace!(
            "{species} offspring discarded after {} placement attempts",
            self.config.spawn_attempts
        );
        None
    }
}
