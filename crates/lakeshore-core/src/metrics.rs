use crate::entity::EntityId;
use crate::species::Species;
use serde::{Deserialize, Serialize};

/// Live head-count per species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
    pub omnivores: usize,
    pub fish: usize,
}

impl PopulationCounts {
    pub fn get(&self, species: Species) -> usize {
        match species {
            Species::Plant => self.plants,
            Species::Herbivore => self.herbivores,
            Species::Carnivore => self.carnivores,
            Species::Omnivore => self.omnivores,
            Species::Fish => self.fish,
        }
    }

    pub fn increment(&mut self, species: Species) {
        let slot = match species {
            Species::Plant => &mut self.plants,
            Species::Herbivore => &mut self.herbivores,
            Species::Carnivore => &mut self.carnivores,
            Species::Omnivore => &mut self.omnivores,
            Species::Fish => &mut self.fish,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.plants + self.herbivores + self.carnivores + self.omnivores + self.fish
    }
}

/// Read-only view of one live entity, for display and analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub stable_id: EntityId,
    pub species: Species,
    pub position: [f64; 2],
    pub vitality: f64,
    /// Species cap, so a renderer can draw a health bar without the config.
    pub max_vitality: f64,
    pub age: u64,
}

/// What happened during one call to `advance_turn`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Turn counter after the advance.
    pub turn: u64,
    /// Entities removed by the cull (starved, aged out, eaten, or spent).
    pub deaths: usize,
    /// Offspring proposed during the action phase.
    pub offspring_proposed: usize,
    /// Offspring that passed admission.
    pub births: usize,
    /// Offspring rejected by a population cap.
    pub discarded: usize,
    /// Fish spawned to restore the floor.
    pub fish_respawned: usize,
    /// Fish removed to enforce the ceiling.
    pub fish_trimmed: usize,
    /// Population after settlement.
    pub counts: PopulationCounts,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnSample {
    pub turn: u64,
    pub counts: PopulationCounts,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub seed: u64,
    pub turns: u64,
    pub sample_every: u64,
    pub final_counts: PopulationCounts,
    pub samples: Vec<TurnSample>,
    #[serde(default)]
    pub total_births: usize,
    #[serde(default)]
    pub total_deaths: usize,
    #[serde(default)]
    pub total_discarded: usize,
    #[serde(default)]
    pub total_fish_respawned: usize,
    #[serde(default)]
    pub total_fish_trimmed: usize,
}

impl RunSummary {
    pub(crate) fn new(seed: u64, sample_every: u64) -> Self {
        Self {
            schema_version: default_schema_version(),
            seed,
            turns: 0,
            sample_every,
            final_counts: PopulationCounts::default(),
            samples: Vec::new(),
            total_births: 0,
            total_deaths: 0,
            total_discarded: 0,
            total_fish_respawned: 0,
            total_fish_trimmed: 0,
        }
    }

    pub(crate) fn record(&mut self, report: &TurnReport) {
        self.turns += 1;
        self.total_births += report.births;
        self.total_deaths += report.deaths;
        self.total_discarded += report.discarded;
        self.total_fish_respawned += report.fish_respawned;
        self.total_fish_trimmed += report.fish_trimmed;
        self.final_counts = report.counts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_each_species_separately() {
        let mut counts = PopulationCounts::default();
        counts.increment(Species::Fish);
        counts.increment(Species::Fish);
        counts.increment(Species::Plant);
        assert_eq!(counts.get(Species::Fish), 2);
        assert_eq!(counts.get(Species::Plant), 1);
        assert_eq!(counts.get(Species::Herbivore), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn summary_accumulates_reports() {
        let mut summary = RunSummary::new(1, 10);
        let report = TurnReport {
            turn: 1,
            deaths: 2,
            births: 1,
            discarded: 3,
            fish_respawned: 1,
            counts: PopulationCounts {
                fish: 2,
                ..PopulationCounts::default()
            },
            ..TurnReport::default()
        };
        summary.record(&report);
        summary.record(&report);
        assert_eq!(summary.turns, 2);
        assert_eq!(summary.total_deaths, 4);
        assert_eq!(summary.total_births, 2);
        assert_eq!(summary.total_discarded, 6);
        assert_eq!(summary.total_fish_respawned, 2);
        assert_eq!(summary.final_counts.fish, 2);
    }

    #[test]
    fn legacy_summary_json_fills_missing_totals() {
        let json = r#"{
            "seed": 3,
            "turns": 0,
            "sample_every": 5,
            "final_counts": {
                "plants": 0, "herbivores": 0, "carnivores": 0, "omnivores": 0, "fish": 2
            },
            "samples": []
        }"#;
        let summary: RunSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.schema_version, 1);
        assert_eq!(summary.total_births, 0);
        assert_eq!(summary.final_counts.fish, 2);
    }
}
