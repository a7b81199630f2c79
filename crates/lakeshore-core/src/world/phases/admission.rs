use super::super::{Offspring, World};
use crate::metrics::PopulationCounts;
use crate::rng::RandomSource;
use crate::species::Species;

impl<R: RandomSource> World<R> {
    /// Drop every entity that died this turn. Returns how many were removed.
    pub(in crate::world) fn step_cull_phase(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.alive);
        before - self.entities.len()
    }

    /// Admit pending offspring one species at a time, checking caps against
    /// running counts. Returns `(admitted, discarded)`.
    pub(in crate::world) fn step_admission_phase(
        &mut self,
        pending: &[Offspring],
    ) -> (usize, usize) {
        let mut counts = self.population_counts();
        // Omnivores are held below the herbivore count as it stood before any
        // herbivore offspring were admitted.
        let herbivores_after_cull = counts.herbivores;
        let mut admitted = 0;
        let mut discarded = 0;

        for species in Species::ADMISSION_ORDER {
            for offspring in pending.iter().filter(|o| o.species == species) {
                if self.admits(species, &counts, herbivores_after_cull) {
                    self.spawn(species, offspring.position);
                    counts.increment(species);
                    admitted += 1;
                } else {
                    discarded += 1;
                }
            }
        }
        if discarded > 0 {
            log::trace!("admission discarded {discarded} offspring at capacity");
        }
        (admitted, discarded)
    }

    fn admits(
        &self,
        species: Species,
        counts: &PopulationCounts,
        herbivores_after_cull: usize,
    ) -> bool {
        let caps = &self.config.caps;
        let current = counts.get(species);
        match species {
            Species::Herbivore => current < caps.herbivore_max,
            Species::Omnivore => current < caps.omnivore_max && current < herbivores_after_cull,
            Species::Carnivore => current < caps.carnivore_max,
            Species::Fish => current < caps.fish_max,
            Species::Plant => current < caps.plant_max,
        }
    }
}
