use super::super::World;
use super::snapshot::TurnSnapshot;
use crate::rng::RandomSource;

impl<R: RandomSource> World<R> {
    /// Try the diet entries in order and strike the first live prey in range.
    ///
    /// A strike always kills the prey; the gain is applied only if the success
    /// draw passes. Returns whether a strike happened.
    pub(in crate::world) fn step_feeding(&mut self, slot: usize, snapshot: &TurnSnapshot) -> bool {
        let (species, position, cooldown) = {
            let e = &self.entities[slot];
            debug_assert!(e.alive, "dead entities do not feed");
            (e.species, e.position, e.feed_cooldown)
        };
        if cooldown > 0 {
            return false;
        }
        let profile = self.config.species.get(species);
        let cap = profile.max_vitality;

        for i in 0..profile.diet.len() {
            let entry = self.config.species.get(species).diet[i];
            let prey = self.first_match(snapshot, entry.prey, position, entry.radius, |other, e| {
                other != slot && e.alive
            });
            let Some(prey) = prey else {
                continue;
            };

            self.entities[prey].alive = false;
            let prey_id = self.entities[prey].stable_id;
            let fed = entry.success_chance >= 1.0 || self.rng.uniform() < entry.success_chance;
            let consumer = &mut self.entities[slot];
            if fed {
                consumer.gain_vitality(entry.gain, cap);
            }
            consumer.feed_cooldown = entry.cooldown;
            log::trace!(
                "{} #{} struck {} #{} (fed: {})",
                species,
                consumer.stable_id,
                entry.prey,
                prey_id,
                fed
            );
            return true;
        }
        false
    }
}
