use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of individual in the ecosystem.
///
/// Behavior is selected by matching on this tag once per entity per turn;
/// the numeric constants live in the matching [`SpeciesProfile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Plant,
    Herbivore,
    Carnivore,
    Omnivore,
    Fish,
}

/// Where a species may stand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Habitat {
    /// Anywhere in the world except the lake.
    Land,
    /// Only inside the lake.
    Lake,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Plant,
        Species::Herbivore,
        Species::Carnivore,
        Species::Omnivore,
        Species::Fish,
    ];

    /// Order in which pending offspring are considered for admission.
    /// Plant sprouts go last so they never crowd out animal births.
    pub const ADMISSION_ORDER: [Species; 5] = [
        Species::Herbivore,
        Species::Omnivore,
        Species::Carnivore,
        Species::Fish,
        Species::Plant,
    ];

    pub fn habitat(self) -> Habitat {
        match self {
            Self::Fish => Habitat::Lake,
            Self::Plant | Self::Herbivore | Self::Carnivore | Self::Omnivore => Habitat::Land,
        }
    }

    /// Plants never move.
    pub fn is_mobile(self) -> bool {
        !matches!(self, Self::Plant)
    }

    /// Dense index used for per-species arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::Plant => 0,
            Self::Herbivore => 1,
            Self::Carnivore => 2,
            Self::Omnivore => 3,
            Self::Fish => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plant => "plant",
            Self::Herbivore => "herbivore",
            Self::Carnivore => "carnivore",
            Self::Omnivore => "omnivore",
            Self::Fish => "fish",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One feeding option: which prey, how close, and what it pays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DietEntry {
    pub prey: Species,
    /// Prey must be strictly closer than this.
    pub radius: f64,
    /// Vitality gained on a successful meal, before clamping to the cap.
    pub gain: f64,
    /// Probability that a strike yields the gain. The prey dies either way.
    pub success_chance: f64,
    /// Turns before the consumer may feed again.
    pub cooldown: u32,
}

/// Numeric constants for one species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Vitality at birth. Plants are reset to this value every turn.
    pub initial_vitality: f64,
    /// Upper clamp applied on every vitality gain.
    pub max_vitality: f64,
    /// Vitality lost per turn of aging.
    pub decay_per_turn: f64,
    /// Death once age exceeds this; `None` never ages out.
    pub max_age: Option<u64>,
    /// Distance covered per turn.
    pub step: f64,
    /// Half-width of the per-turn heading perturbation.
    pub heading_jitter: f64,
    /// Half-width of the jitter added to the pi turn-around at an obstacle.
    pub deflect_jitter: f64,
    /// Partners must be strictly closer than this.
    pub mating_radius: f64,
    /// Vitality both parents pay when a pairing is committed.
    pub reproduction_cost: f64,
    /// Turns before either parent may pair again after a counted pairing.
    pub reproduction_cooldown: u32,
    /// Probability that a committed pairing counts. For plants, the chance to
    /// spread a sprout each turn.
    pub reproduction_chance: f64,
    /// Half-width of the offspring placement offset around the parent.
    pub offspring_spread: f64,
    /// Feeding options, tried in order; the first with a match wins.
    pub diet: Vec<DietEntry>,
}

impl SpeciesProfile {
    pub fn plant() -> Self {
        Self {
            initial_vitality: 999.0,
            max_vitality: 999.0,
            decay_per_turn: 0.0,
            max_age: None,
            step: 0.0,
            heading_jitter: 0.0,
            deflect_jitter: 0.0,
            mating_radius: 0.0,
            reproduction_cost: 0.0,
            reproduction_cooldown: 0,
            reproduction_chance: 0.20,
            offspring_spread: 25.0,
            diet: Vec::new(),
        }
    }

    pub fn herbivore() -> Self {
        Self {
            initial_vitality: 1200.0,
            max_vitality: 10_000.0,
            reproduction_cost: 500.0,
            reproduction_cooldown: 25,
            diet: vec![DietEntry {
                prey: Species::Plant,
                radius: 30.0,
                gain: 20.0,
                success_chance: 1.0,
                cooldown: 4,
            }],
            ..Self::land_animal()
        }
    }

    pub fn carnivore() -> Self {
        Self {
            initial_vitality: 950.0,
            max_vitality: 1150.0,
            reproduction_cost: 400.0,
            reproduction_cooldown: 40,
            diet: vec![DietEntry {
                prey: Species::Herbivore,
                radius: 18.0,
                gain: 10.0,
                success_chance: 0.7,
                cooldown: 15,
            }],
            ..Self::land_animal()
        }
    }

    pub fn omnivore() -> Self {
        Self {
            initial_vitality: 920.0,
            max_vitality: 1100.0,
            reproduction_cost: 350.0,
            reproduction_cooldown: 40,
            diet: vec![
                DietEntry {
                    prey: Species::Plant,
                    radius: 20.0,
                    gain: 8.0,
                    success_chance: 1.0,
                    cooldown: 4,
                },
                DietEntry {
                    prey: Species::Herbivore,
                    radius: 18.0,
                    gain: 8.0,
                    success_chance: 0.6,
                    cooldown: 8,
                },
            ],
            ..Self::land_animal()
        }
    }

    pub fn fish() -> Self {
        Self {
            initial_vitality: 1000.0,
            max_vitality: 1000.0,
            decay_per_turn: 0.05,
            max_age: Some(50_000),
            step: 1.2,
            heading_jitter: 0.15,
            deflect_jitter: 0.5,
            mating_radius: 28.0,
            reproduction_cost: 50.0,
            reproduction_cooldown: 50,
            reproduction_chance: 0.35,
            offspring_spread: 10.0,
            diet: Vec::new(),
        }
    }

    /// Movement, aging, and pairing constants shared by the land animals.
    fn land_animal() -> Self {
        Self {
            initial_vitality: 1000.0,
            max_vitality: 1000.0,
            decay_per_turn: 0.15,
            max_age: Some(300_000),
            step: 2.0,
            heading_jitter: 0.06,
            deflect_jitter: 0.1,
            mating_radius: 28.0,
            reproduction_cost: 0.0,
            reproduction_cooldown: 0,
            reproduction_chance: 0.25,
            offspring_spread: 20.0,
            diet: Vec::new(),
        }
    }
}

/// One profile per species.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesTable {
    pub plant: SpeciesProfile,
    pub herbivore: SpeciesProfile,
    pub carnivore: SpeciesProfile,
    pub omnivore: SpeciesProfile,
    pub fish: SpeciesProfile,
}

impl Default for SpeciesTable {
    fn default() -> Self {
        Self {
            plant: SpeciesProfile::plant(),
            herbivore: SpeciesProfile::herbivore(),
            carnivore: SpeciesProfile::carnivore(),
            omnivore: SpeciesProfile::omnivore(),
            fish: SpeciesProfile::fish(),
        }
    }
}

impl SpeciesTable {
    pub fn get(&self, species: Species) -> &SpeciesProfile {
        match species {
            Species::Plant => &self.plant,
            Species::Herbivore => &self.herbivore,
            Species::Carnivore => &self.carnivore,
            Species::Omnivore => &self.omnivore,
            Species::Fish => &self.fish,
        }
    }

    /// Largest distance any entity can travel in one turn.
    pub fn max_step(&self) -> f64 {
        Species::ALL
            .iter()
            .map(|&s| self.get(s).step)
            .fold(0.0, f64::max)
    }
}
