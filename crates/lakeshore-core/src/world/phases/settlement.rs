use super::super::World;
use crate::rng::RandomSource;
use crate::species::Species;

impl<R: RandomSource> World<R> {
    /// Hold the fish population within `[fish_min, fish_max]`.
    ///
    /// Below the floor, fresh fish are spawned at random lake points. Above
    /// the ceiling, the weakest are removed: lowest vitality first, then
    /// youngest, then earliest arena slot. Returns `(respawned, trimmed)`.
    pub(in crate::world) fn step_settlement_phase(&mut self) -> (usize, usize) {
        let (fish_min, fish_max) = (self.config.caps.fish_min, self.config.caps.fish_max);
        let fish: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive && e.species == Species::Fish)
            .map(|(slot, _)| slot)
            .collect();

        if fish.len() < fish_min {
            let missing = fish_min - fish.len();
            let lake = self.config.lake;
            for _ in 0..missing {
                let position = lake.random_point(&mut self.rng);
                self.spawn(Species::Fish, position);
            }
            log::trace!("respawned {missing} fish to restore the floor");
            return (missing, 0);
        }

        if fish.len() > fish_max {
            let excess = fish.len() - fish_max;
            let mut ranked = fish;
            ranked.sort_by(|&a, &b| {
                let (ea, eb) = (&self.entities[a], &self.entities[b]);
                ea.vitality
                    .total_cmp(&eb.vitality)
                    .then(ea.age.cmp(&eb.age))
            });
            let mut doomed = vec![false; self.entities.len()];
            for &slot in &ranked[..excess] {
                doomed[slot] = true;
            }
            let mut slot = 0;
            self.entities.retain(|_| {
                let keep = !doomed[slot];
                slot += 1;
                keep
            });
            log::trace!("trimmed {excess} fish to enforce the ceiling");
            return (0, excess);
        }
        (0, 0)
    }
}
