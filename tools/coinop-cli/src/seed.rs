//! Starter catalog for a fresh install. The shop is useless until the
//! machine and game stores have templates in them; `--seed` writes these.

use coinop_common::game::{Game, GameEdition, GameId};
use coinop_common::machine::{Machine, MachineId, MachineKind, Material};

use crate::store::{StoreError, Stores};

/// One cabinet per line, factory-configured.
pub fn demo_machines() -> Vec<Machine> {
    vec![
        Machine::new(
            MachineId("M1".into()),
            MachineKind::ClassicalArcade,
            Material::Wood,
            "red",
            2,
        ),
        Machine::new(
            MachineId("M2".into()),
            MachineKind::DanceRevolution,
            Material::Aluminum,
            "blue",
            2,
        ),
        Machine::new(
            MachineId("M3".into()),
            MachineKind::ShootingMachine,
            Material::Aluminum,
            "black",
            2,
        ),
        Machine::new(
            MachineId("M4".into()),
            MachineKind::RacingMachine,
            Material::CarbonFiber,
            "silver",
            1,
        ),
        Machine::new(
            MachineId("M5".into()),
            MachineKind::VirtualReality,
            Material::CarbonFiber,
            "white",
            1,
        ),
    ]
}

/// A handful of titles across both editions.
pub fn demo_games() -> Vec<Game> {
    vec![
        Game::new(
            GameId("G1".into()),
            "Asteroid Run",
            "shooter",
            GameEdition::Standard,
            20.0,
        ),
        Game::new(
            GameId("G2".into()),
            "Neon Drift",
            "racing",
            GameEdition::HighDefinition,
            50.0,
        )
        .with_credits("M. Ito", "L. Vargas", 2023),
        Game::new(
            GameId("G3".into()),
            "Puzzle Palace",
            "puzzle",
            GameEdition::Standard,
            15.0,
        ),
        Game::new(
            GameId("G4".into()),
            "Galaxy Siege",
            "shooter",
            GameEdition::HighDefinition,
            45.0,
        )
        .with_credits("A. Reyes", "K. Osei", 2024),
        Game::new(
            GameId("G5".into()),
            "Dance Fever",
            "rhythm",
            GameEdition::Standard,
            30.0,
        ),
    ]
}

/// Fill empty machine/game stores with the demo catalog. Stores that
/// already hold data are left alone.
pub fn write_demo_catalog(stores: &Stores) -> Result<(), StoreError> {
    if stores.machines.load()?.is_empty() {
        stores.machines.save(&demo_machines())?;
    }
    if stores.games.load()?.is_empty() {
        stores.games.save(&demo_games())?;
    }
    Ok(())
}
