use serde::Serialize;

/// Writes produced by a validated `/upgrade`, applied in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradePlan {
    pub user_id: i64,
    pub cost: i64,
    pub new_level: i64,
    pub achievement_ids: Vec<i64>,
}

/// Writes produced by a validated building purchase, applied in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchasePlan {
    pub user_id: i64,
    pub building_name: String,
    pub cost: i64,
    pub new_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceDebit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDebit {
    pub name: String,
    pub amount: i64,
}
