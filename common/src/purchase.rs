use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::machine::{Machine, MachineId, MachineKind, Material};
use crate::user::UserId;

/// Frozen copy of a configured machine at purchase time. Later edits to the
/// catalog never reach back into recorded purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub machine_id: MachineId,
    #[serde(rename = "type")]
    pub kind: MachineKind,
    pub material: Material,
    pub color: String,
    pub player_count: u32,
    /// Titles of the games attached at checkout. May be empty.
    pub games_added: Vec<String>,
}

impl MachineSnapshot {
    pub fn of(machine: &Machine) -> Self {
        MachineSnapshot {
            machine_id: machine.id.clone(),
            kind: machine.kind,
            material: machine.material().clone(),
            color: machine.color.clone(),
            player_count: machine.player_count,
            games_added: machine.games().iter().map(|g| g.title.clone()).collect(),
        }
    }
}

/// One entry in the append-only purchase log. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub user_id: UserId,
    pub address: String,
    pub machine: MachineSnapshot,
    pub total_price: f64,
    pub purchase_date: DateTime<Utc>,
}

impl Purchase {
    /// Record a purchase of `machine` as currently configured, stamped `at`.
    pub fn new(
        user_id: UserId,
        address: impl Into<String>,
        machine: &Machine,
        at: DateTime<Utc>,
    ) -> Self {
        Purchase {
            user_id,
            address: address.into(),
            machine: MachineSnapshot::of(machine),
            total_price: machine.total_price(),
            purchase_date: at,
        }
    }
}
