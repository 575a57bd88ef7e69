use serde::Serialize;

use crate::types::{Achievement, OwnedBuilding, Player, ResourceDebit};

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub player: Player,
    /// False when the player already existed and nothing changed.
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CafeView {
    pub player: Player,
    pub buildings: Vec<OwnedBuilding>,
    pub upgrade_cost: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Upgraded {
    pub level: i64,
    pub balance: i64,
    pub new_achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Purchased {
    pub building_name: String,
    pub level: i64,
    pub cost: i64,
    pub balance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceDebit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Collected {
    pub resource: String,
    pub amount: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credited {
    pub amount: i64,
    pub balance: i64,
}
