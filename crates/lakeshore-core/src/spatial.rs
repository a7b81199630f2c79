use crate::entity::Entity;
use rstar::{RTree, RTreeObject, AABB};

/// Position-only record of one snapshot member, tagged with its rank in the
/// snapshot list so query results can be put back into scan order.
#[derive(Clone, Debug)]
pub struct SlotLocation {
    pub rank: u32,
    pub position: [f64; 2],
}

impl RTreeObject for SlotLocation {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Build an R*-tree over the given arena slots via bulk_load (O(n log n)).
pub fn build_index(slots: &[usize], entities: &[Entity]) -> RTree<SlotLocation> {
    let locations: Vec<SlotLocation> = slots
        .iter()
        .enumerate()
        .map(|(rank, &slot)| SlotLocation {
            rank: rank as u32,
            position: entities[slot].position,
        })
        .collect();
    RTree::bulk_load(locations)
}

/// Ranks of indexed members within `radius` (inclusive) of `center`, ascending.
///
/// Ascending rank is snapshot order, so walking the result and taking the
/// first acceptable member reproduces a linear first-match scan.
pub fn query_ranks(tree: &RTree<SlotLocation>, center: [f64; 2], radius: f64) -> Vec<u32> {
    let envelope = AABB::from_corners(
        [center[0] - radius, center[1] - radius],
        [center[0] + radius, center[1] + radius],
    );
    let r_sq = radius * radius;
    let mut ranks: Vec<u32> = tree
        .locate_in_envelope(&envelope)
        .filter(|loc| {
            let dx = loc.position[0] - center[0];
            let dy = loc.position[1] - center[1];
            dx * dx + dy * dy <= r_sq
        })
        .map(|loc| loc.rank)
        .collect();
    ranks.sort_unstable();
    ranks
}
