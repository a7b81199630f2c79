use crate::region::{Lake, WorldBounds};
use crate::species::{Species, SpeciesProfile, SpeciesTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Starting head-count per species for [`crate::world::World::populate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialPopulation {
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
    pub omnivores: usize,
    pub fish: usize,
}

impl Default for InitialPopulation {
    fn default() -> Self {
        Self {
            plants: 500,
            herbivores: 9,
            carnivores: 4,
            omnivores: 4,
            fish: 5,
        }
    }
}

impl InitialPopulation {
    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Plant => self.plants,
            Species::Herbivore => self.herbivores,
            Species::Carnivore => self.carnivores,
            Species::Omnivore => self.omnivores,
            Species::Fish => self.fish,
        }
    }
}

/// Admission caps and the hard fish bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationCaps {
    /// Herbivore offspring are admitted while the herbivore count is below this.
    pub herbivore_max: usize,
    /// Omnivore offspring also need the omnivore count below the herbivore count.
    pub omnivore_max: usize,
    pub carnivore_max: usize,
    /// Settlement respawns fish up to this floor.
    pub fish_min: usize,
    /// Settlement trims fish down to this ceiling; fish only pair below it.
    pub fish_max: usize,
    /// Plants only spread, and sprouts are only admitted, below this.
    pub plant_max: usize,
}

impl Default for PopulationCaps {
    fn default() -> Self {
        Self {
            herbivore_max: 40,
            omnivore_max: 40,
            carnivore_max: 15,
            fish_min: 2,
            fish_max: 10,
            plant_max: 10_000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Turn ceiling after which a driver stops advancing the world.
    pub max_turns: u64,
    /// World width in world units.
    pub world_width: f64,
    /// World height in world units.
    pub world_height: f64,
    /// Bounding rectangle of the elliptical lake.
    pub lake: Lake,
    /// Initial land placement keeps this distance from the world edge.
    pub placement_margin: f64,
    /// Placement tries per offspring before the spawn is discarded.
    pub spawn_attempts: usize,
    /// Head-counts used by `World::populate`.
    pub initial: InitialPopulation,
    /// Admission and settlement limits.
    pub caps: PopulationCaps,
    /// Per-species behavior constants.
    pub species: SpeciesTable,
    /// Use the R*-tree broad phase for neighbour scans. Results are identical
    /// either way; this only trades index build cost against scan cost.
    pub use_spatial_index: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_turns: 9_000,
            world_width: 480.0,
            world_height: 380.0,
            lake: Lake::default(),
            placement_margin: 50.0,
            spawn_attempts: 5,
            initial: InitialPopulation::default(),
            caps: PopulationCaps::default(),
            species: SpeciesTable::default(),
            use_spatial_index: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world_width and world_height must be positive and finite")]
    InvalidWorldSize,
    #[error("max_turns must be positive")]
    InvalidMaxTurns,
    #[error("lake must be a non-degenerate rectangle strictly inside the world")]
    InvalidLake,
    #[error("placement_margin must be finite, non-negative, and leave a non-empty area")]
    InvalidPlacementMargin,
    #[error("the land placement area lies entirely inside the lake")]
    PlacementAreaFlooded,
    #[error("spawn_attempts must be positive")]
    InvalidSpawnAttempts,
    #[error("fish_min ({min}) must be positive and not exceed fish_max ({max})")]
    InvalidFishBounds { min: usize, max: usize },
    #[error("{species} profile: {field} must be finite and non-negative")]
    InvalidProfileValue {
        species: Species,
        field: &'static str,
    },
    #[error("{species} profile: {field} must be finite and within [0,1]")]
    InvalidProfileProbability {
        species: Species,
        field: &'static str,
    },
    #[error("{species} profile: initial_vitality must be positive and not exceed max_vitality")]
    InvalidInitialVitality { species: Species },
    #[error("{species} diet cannot list its own species")]
    SelfPredation { species: Species },
}

impl SimConfig {
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds {
            width: self.world_width,
            height: self.world_height,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_world()?;
        self.validate_placement()?;
        self.validate_caps()?;
        for species in Species::ALL {
            self.validate_profile(species, self.species.get(species))?;
        }
        Ok(())
    }

    fn validate_world(&self) -> Result<(), ConfigError> {
        if !(self.world_width.is_finite()
            && self.world_height.is_finite()
            && self.world_width > 0.0
            && self.world_height > 0.0)
        {
            return Err(ConfigError::InvalidWorldSize);
        }
        if self.max_turns == 0 {
            return Err(ConfigError::InvalidMaxTurns);
        }
        let lake = &self.lake;
        let finite = [lake.x_min, lake.x_max, lake.y_min, lake.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !(finite && lake.x_min < lake.x_max && lake.y_min < lake.y_max) {
            return Err(ConfigError::InvalidLake);
        }
        if !lake.fits_within(&self.bounds()) {
            return Err(ConfigError::InvalidLake);
        }
        Ok(())
    }

    fn validate_placement(&self) -> Result<(), ConfigError> {
        let margin = self.placement_margin;
        if !(margin.is_finite()
            && margin >= 0.0
            && 2.0 * margin < self.world_width
            && 2.0 * margin < self.world_height)
        {
            return Err(ConfigError::InvalidPlacementMargin);
        }
        // The ellipse is convex: if every corner of the placement rectangle is
        // wet, so is the whole rectangle.
        let (x0, x1) = (margin, self.world_width - margin);
        let (y0, y1) = (margin, self.world_height - margin);
        if [[x0, y0], [x0, y1], [x1, y0], [x1, y1]]
            .iter()
            .all(|&corner| self.lake.contains(corner))
        {
            return Err(ConfigError::PlacementAreaFlooded);
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::InvalidSpawnAttempts);
        }
        Ok(())
    }

    fn validate_caps(&self) -> Result<(), ConfigError> {
        let caps = &self.caps;
        if caps.fish_min == 0 || caps.fish_min > caps.fish_max {
            return Err(ConfigError::InvalidFishBounds {
                min: caps.fish_min,
                max: caps.fish_max,
            });
        }
        Ok(())
    }

    fn validate_profile(
        &self,
        species: Species,
        profile: &SpeciesProfile,
    ) -> Result<(), ConfigError> {
        let non_negative = [
            ("max_vitality", profile.max_vitality),
            ("decay_per_turn", profile.decay_per_turn),
            ("step", profile.step),
            ("heading_jitter", profile.heading_jitter),
            ("deflect_jitter", profile.deflect_jitter),
            ("mating_radius", profile.mating_radius),
            ("reproduction_cost", profile.reproduction_cost),
            ("offspring_spread", profile.offspring_spread),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidProfileValue { species, field });
            }
        }
        if !(profile.initial_vitality.is_finite()
            && profile.initial_vitality > 0.0
            && profile.initial_vitality <= profile.max_vitality)
        {
            return Err(ConfigError::InvalidInitialVitality { species });
        }
        if !is_probability(profile.reproduction_chance) {
            return Err(ConfigError::InvalidProfileProbability {
                species,
                field: "reproduction_chance",
            });
        }
        for entry in &profile.diet {
            if entry.prey == species {
                return Err(ConfigError::SelfPredation { species });
            }
            if !(entry.radius.is_finite() && entry.radius >= 0.0) {
                return Err(ConfigError::InvalidProfileValue {
                    species,
                    field: "diet.radius",
                });
            }
            if !(entry.gain.is_finite() && entry.gain >= 0.0) {
                return Err(ConfigError::InvalidProfileValue {
                    species,
                    field: "diet.gain",
                });
            }
            if !is_probability(entry.success_chance) {
                return Err(ConfigError::InvalidProfileProbability {
                    species,
                    field: "diet.success_chance",
                });
            }
        }
        Ok(())
    }
}

fn is_probability(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::DietEntry;

    #[test]
    fn validate_accepts_default() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_invalid_world_size() {
        let config = SimConfig {
            world_width: -1.0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWorldSize));

        let config = SimConfig {
            world_height: f64::NAN,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWorldSize));
    }

    #[test]
    fn validate_rejects_lake_touching_world_edge() {
        let config = SimConfig {
            lake: Lake {
                x_min: 0.0,
                ..Lake::default()
            },
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLake));

        let config = SimConfig {
            lake: Lake {
                x_min: 300.0,
                x_max: 200.0,
                ..Lake::default()
            },
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLake));
    }

    #[test]
    fn validate_rejects_flooded_placement_area() {
        let config = SimConfig {
            world_width: 100.0,
            world_height: 100.0,
            lake: Lake {
                x_min: 1.0,
                x_max: 99.0,
                y_min: 1.0,
                y_max: 99.0,
            },
            placement_margin: 40.0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PlacementAreaFlooded));
    }

    #[test]
    fn validate_rejects_bad_fish_bounds() {
        let mut config = SimConfig::default();
        config.caps.fish_min = 11;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFishBounds { min: 11, max: 10 })
        );
    }

    #[test]
    fn validate_rejects_bad_profile_values() {
        let mut config = SimConfig::default();
        config.species.fish.decay_per_turn = -0.1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidProfileValue {
                species: Species::Fish,
                field: "decay_per_turn",
            })
        );

        let mut config = SimConfig::default();
        config.species.carnivore.diet[0].success_chance = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidProfileProbability {
                species: Species::Carnivore,
                field: "diet.success_chance",
            })
        );

        let mut config = SimConfig::default();
        config.species.omnivore.initial_vitality = 5_000.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidInitialVitality {
                species: Species::Omnivore
            })
        );
    }

    #[test]
    fn validate_rejects_cannibal_diet() {
        let mut config = SimConfig::default();
        config.species.carnivore.diet.push(DietEntry {
            prey: Species::Carnivore,
            radius: 10.0,
            gain: 1.0,
            success_chance: 1.0,
            cooldown: 1,
        });
        assert_eq!(
            config.validate(),
            Err(ConfigError::SelfPredation {
                species: Species::Carnivore
            })
        );
    }

    #[test]
    fn partial_config_json_deserializes_with_defaults() {
        let json = r#"{
            "seed": 7,
            "max_turns": 100,
            "caps": { "herbivore_max": 12 }
        }"#;
        let cfg: SimConfig = serde_json::from_str(json).expect("partial config should parse");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.max_turns, 100);
        assert_eq!(cfg.caps.herbivore_max, 12);
        assert_eq!(cfg.caps.fish_max, 10);
        assert_eq!(cfg.lake, Lake::default());
        assert_eq!(cfg.species, SpeciesTable::default());
        assert!(cfg.use_spatial_index);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = serde_json::to_string(&SimConfig::default()).unwrap();
        let cfg: SimConfig = serde_json::from_str(&json).unwrap();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.species.omnivore.diet.len(), 2);
        assert_eq!(cfg.species.plant.max_age, None);
        assert_eq!(cfg.species.fish.reproduction_cooldown, 50);
        assert_eq!(cfg.initial, InitialPopulation::default());
        assert_eq!(cfg.caps, PopulationCaps::default());
    }

    #[test]
    fn error_display_messages() {
        let cases = vec![
            (
                ConfigError::InvalidWorldSize,
                "world_width and world_height must be positive and finite",
            ),
            (
                ConfigError::InvalidFishBounds { min: 3, max: 2 },
                "fish_min (3) must be positive and not exceed fish_max (2)",
            ),
            (
                ConfigError::InvalidProfileValue {
                    species: Species::Herbivore,
                    field: "step",
                },
                "herbivore profile: step must be finite and non-negative",
            ),
            (
                ConfigError::SelfPredation {
                    species: Species::Fish,
                },
                "fish diet cannot list its own species",
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
