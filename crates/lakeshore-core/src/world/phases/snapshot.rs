use super::super::World;
use crate::config::SimConfig;
use crate::entity::Entity;
use crate::rng::RandomSource;
use crate::spatial::{self, SlotLocation};
use crate::species::Species;
use rstar::RTree;

/// Who was alive when the turn began, per species, in arena order.
///
/// Membership is frozen for the whole act phase; positions are not. Newly
/// proposed offspring never appear here.
pub(in crate::world) struct TurnSnapshot {
    slots: [Vec<usize>; 5],
    indexes: Option<[RTree<SlotLocation>; 5]>,
    /// How far a member may have wandered from its indexed position.
    drift: f64,
}

impl TurnSnapshot {
    pub(in crate::world) fn capture(entities: &[Entity], config: &SimConfig) -> Self {
        let mut slots: [Vec<usize>; 5] = Default::default();
        for (slot, entity) in entities.iter().enumerate() {
            if entity.alive {
                slots[entity.species.index()].push(slot);
            }
        }
        let indexes = config
            .use_spatial_index
            .then(|| Species::ALL.map(|s| spatial::build_index(&slots[s.index()], entities)));
        Self {
            slots,
            indexes,
            drift: config.species.max_step() + 1e-9,
        }
    }

    pub(in crate::world) fn slots(&self, species: Species) -> &[usize] {
        &self.slots[species.index()]
    }

    pub(in crate::world) fn count(&self, species: Species) -> usize {
        self.slots[species.index()].len()
    }
}

impl<R: RandomSource> World<R> {
    pub(in crate::world) fn step_reset_phase(&mut self) {
        for entity in &mut self.entities {
            entity.reproduced = false;
        }
    }

    /// First snapshot member of `species`, in snapshot order, whose current
    /// position is strictly within `radius` of `center` and which `accept`s.
    pub(in crate::world) fn first_match(
        &self,
        snapshot: &TurnSnapshot,
        species: Species,
        center: [f64; 2],
        radius: f64,
        accept: impl Fn(usize, &Entity) -> bool,
    ) -> Option<usize> {
        let slots = snapshot.slots(species);
        let matches = |slot: usize| {
            let entity = &self.entities[slot];
            entity.distance_to(center) < radius && accept(slot, entity)
        };
        match &snapshot.indexes {
            // Positions may have moved by up to `drift` since the index was
            // built, so widen the query and re-check against live positions.
            Some(indexes) => spatial::query_ranks(
                &indexes[species.index()],
                center,
                radius + snapshot.drift,
            )
            .into_iter()
            .map(|rank| slots[rank as usize])
            .find(|&slot| matches(slot)),
            None => slots.iter().copied().find(|&slot| matches(slot)),
        }
    }
}
