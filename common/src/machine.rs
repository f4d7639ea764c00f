use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Game;

/// Unique machine code in the vendor catalog.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MachineId(pub String);

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five cabinet lines in the catalog. Lines differ only in their fixed
/// factory specs; every other behavior is shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineKind {
    ClassicalArcade,
    DanceRevolution,
    ShootingMachine,
    RacingMachine,
    VirtualReality,
}

impl MachineKind {
    /// Factory specs for this cabinet line, before any material adjustment.
    pub fn base_specs(self) -> MachineSpecs {
        let (weight, power_consumption, processor, memory, base_price) = match self {
            MachineKind::ClassicalArcade => (110.0, 220.0, "Dual-Core", "4GB", 600.0),
            MachineKind::DanceRevolution => (120.0, 250.0, "Quad-Core", "8GB", 700.0),
            MachineKind::ShootingMachine => (130.0, 240.0, "Quad-Core", "8GB", 650.0),
            MachineKind::RacingMachine => (125.0, 230.0, "Hexa-Core", "16GB", 700.0),
            MachineKind::VirtualReality => (140.0, 300.0, "Octa-Core", "16GB", 800.0),
        };
        MachineSpecs {
            dimensions: "1.5m x 1m x 2m".to_string(),
            weight,
            power_consumption,
            processor: processor.to_string(),
            memory: memory.to_string(),
            base_price,
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineKind::ClassicalArcade => "Classical Arcade",
            MachineKind::DanceRevolution => "Dance Revolution",
            MachineKind::ShootingMachine => "Shooting Machine",
            MachineKind::RacingMachine => "Racing Machine",
            MachineKind::VirtualReality => "Virtual Reality",
        };
        write!(f, "{name}")
    }
}

/// Physical and pricing specs of a cabinet. Always derived from the pair
/// (kind, material); never set independently of that rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSpecs {
    pub dimensions: String,
    pub weight: f64,
    pub power_consumption: f64,
    pub processor: String,
    pub memory: String,
    pub base_price: f64,
}

/// Cabinet material chosen by the buyer. Serialized as its display string;
/// anything outside the table is kept verbatim and gets no adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Material {
    Wood,
    Aluminum,
    CarbonFiber,
    Other(String),
}

impl Material {
    /// Lenient parse: trims and lowercases before matching the table.
    pub fn parse(s: &str) -> Material {
        match s.trim().to_lowercase().as_str() {
            "wood" => Material::Wood,
            "aluminum" => Material::Aluminum,
            "carbon fiber" => Material::CarbonFiber,
            _ => Material::Other(s.trim().to_string()),
        }
    }

    /// Spec multipliers for this material, or `None` when it is not in the
    /// table and the factory specs stand.
    pub fn factors(&self) -> Option<MaterialFactors> {
        match self {
            Material::Wood => Some(MaterialFactors {
                base_price: 0.95,
                weight: 1.10,
                power_consumption: 1.15,
            }),
            Material::Aluminum => Some(MaterialFactors {
                base_price: 1.10,
                weight: 0.95,
                power_consumption: 1.0,
            }),
            Material::CarbonFiber => Some(MaterialFactors {
                base_price: 1.20,
                weight: 0.85,
                power_consumption: 0.90,
            }),
            Material::Other(_) => None,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Wood => write!(f, "wood"),
            Material::Aluminum => write!(f, "aluminum"),
            Material::CarbonFiber => write!(f, "carbon fiber"),
            Material::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<Material> for String {
    fn from(material: Material) -> String {
        material.to_string()
    }
}

impl From<String> for Material {
    fn from(s: String) -> Material {
        Material::parse(&s)
    }
}

/// Multipliers one material applies to a cabinet's factory specs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialFactors {
    pub base_price: f64,
    pub weight: f64,
    pub power_consumption: f64,
}

/// Apply the material table to a set of factory specs. One table serves
/// every cabinet line; unknown materials leave the specs untouched.
pub fn apply_material(base: MachineSpecs, material: &Material) -> MachineSpecs {
    match material.factors() {
        Some(f) => MachineSpecs {
            weight: base.weight * f.weight,
            power_consumption: base.power_consumption * f.power_consumption,
            base_price: base.base_price * f.base_price,
            ..base
        },
        None => base,
    }
}

/// A cabinet in the catalog, or a buyer's customized copy of one.
///
/// `specs` is always derived from (kind, material). Changing the material
/// re-derives from the factory table, so adjustments never compound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    #[serde(rename = "machine_id")]
    pub id: MachineId,
    #[serde(rename = "type")]
    pub kind: MachineKind,
    material: Material,
    pub color: String,
    pub player_count: u32,
    #[serde(flatten)]
    specs: MachineSpecs,
    #[serde(default)]
    games: Vec<Game>,
}

impl Machine {
    /// Build a cabinet from the factory table for its line.
    pub fn new(
        id: MachineId,
        kind: MachineKind,
        material: Material,
        color: impl Into<String>,
        player_count: u32,
    ) -> Self {
        let specs = apply_material(kind.base_specs(), &material);
        Machine {
            id,
            kind,
            material,
            color: color.into(),
            player_count,
            specs,
            games: Vec::new(),
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Change the material and re-derive the specs from the factory table.
    pub fn set_material(&mut self, material: Material) {
        self.specs = apply_material(self.kind.base_specs(), &material);
        self.material = material;
    }

    pub fn specs(&self) -> &MachineSpecs {
        &self.specs
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Attach a game. Its stored price is already final.
    pub fn add_game(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Cabinet price plus every attached game's price, counted exactly once.
    pub fn total_price(&self) -> f64 {
        self.specs.base_price + self.games.iter().map(|g| g.price).sum::<f64>()
    }
}
