mod act;
mod admission;
mod feeding;
mod reproduction;
mod settlement;
pub(super) mod snapshot;
