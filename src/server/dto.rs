use serde::{Deserialize, Serialize};

use crate::bot::Inbound;
use crate::types::{Building, Player};

/// An update relayed from the messaging platform.
///
/// Exactly one of `text` (a typed message) or `callback` (a pressed button's
/// payload) must be set.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub user_id: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub callback: Option<String>,
}

impl UpdateRequest {
    pub fn inbound(&self) -> Result<Inbound, &'static str> {
        match (&self.text, &self.callback) {
            (Some(text), None) => Ok(Inbound::Text(text.clone())),
            (None, Some(data)) => Ok(Inbound::Callback(data.clone())),
            (Some(_), Some(_)) => Err("Only one of text or callback may be set"),
            (None, None) => Err("Either text or callback is required"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: i64,
    pub cafe_name: String,
    pub balance: i64,
    pub level: i64,
}

impl LeaderboardEntry {
    pub fn ranked(players: Vec<Player>) -> Vec<Self> {
        players
            .into_iter()
            .enumerate()
            .map(|(i, p)| Self {
                rank: i + 1,
                user_id: p.user_id,
                cafe_name: p.cafe_name,
                balance: p.balance,
                level: p.level,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ShopItem {
    pub name: String,
    pub base_cost: i64,
    pub resource_cost: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<&'static str>,
}

impl From<Building> for ShopItem {
    fn from(b: Building) -> Self {
        Self {
            resource: crate::game::catalog::required_resource(&b.name),
            name: b.name,
            base_cost: b.base_cost,
            resource_cost: b.resource_cost,
        }
    }
}
