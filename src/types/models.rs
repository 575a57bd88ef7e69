use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::AchievementCondition;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub user_id: i64,
    pub cafe_name: String,
    pub balance: i64,
    pub level: i64,
    /// Reserved for passive income; nothing reads it yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_income: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    pub base_cost: i64,
    pub income_multiplier: f64,
    pub resource_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedBuilding {
    pub user_id: i64,
    pub building_name: String,
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedResource {
    pub user_id: i64,
    pub resource_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub condition: AchievementCondition,
}
