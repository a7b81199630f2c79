use super::super::{Offspring, World};
use super::snapshot::TurnSnapshot;
use crate::rng::RandomSource;

impl<R: RandomSource> World<R> {
    /// Give every snapshot member its turn in arena order: wander, age, then
    /// feed and pair if still alive. Returns offspring proposed along the way.
    pub(in crate::world) fn step_act_phase(&mut self, snapshot: &TurnSnapshot) -> Vec<Offspring> {
        let bounds = self.config.bounds();
        let lake = self.config.lake;
        let mut pending = Vec::new();

        for slot in 0..self.entities.len() {
            // Eaten or spent earlier this turn.
            if !self.entities[slot].alive {
                continue;
            }
            {
                let entity = &mut self.entities[slot];
                let profile = self.config.species.get(entity.species);
                entity.wander(profile, &bounds, &lake, &mut self.rng);
                entity.age_one_turn(profile);
                if !entity.alive {
                    log::trace!(
                        "{} #{} died of age or hunger at turn {}",
                        entity.species,
                        entity.stable_id,
                        self.turn + 1
                    );
                    continue;
                }
            }
            self.step_feeding(slot, snapshot);
            if let Some(offspring) = self.step_reproduction(slot, snapshot) {
                pending.push(offspring);
            }
        }
        pending
    }
}
