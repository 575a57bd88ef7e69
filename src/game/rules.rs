//! Pure game rules: given the current rows, decide what a command does.
//!
//! Nothing here touches the store. Each `plan_*` function either rejects the
//! command or returns the exact set of writes to apply.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use super::catalog::required_resource;
use crate::error::{Error, Result};
use crate::types::{
    Achievement, Building, OwnedBuilding, Player, PurchasePlan, ResourceDebit, UpgradePlan,
};

pub const DEFAULT_CAFE_NAME: &str = "Street Cafe";
pub const STARTING_BALANCE: i64 = 100;
pub const STARTING_LEVEL: i64 = 1;
pub const UPGRADE_COST: i64 = 50;
pub const LEADERBOARD_SIZE: i64 = 10;
pub const MIN_COLLECT: i64 = 1;
pub const MAX_COLLECT: i64 = 5;

#[must_use]
pub fn new_player(user_id: i64, now: DateTime<Utc>) -> Player {
    Player {
        user_id,
        cafe_name: DEFAULT_CAFE_NAME.to_string(),
        balance: STARTING_BALANCE,
        level: STARTING_LEVEL,
        last_income: None,
        created_at: now,
    }
}

/// Debits the upgrade price, bumps the level, and picks up every achievement
/// the new level satisfies that the player does not hold yet.
pub fn plan_upgrade(
    player: &Player,
    catalog: &[Achievement],
    earned: &[Achievement],
) -> Result<UpgradePlan> {
    if player.balance < UPGRADE_COST {
        return Err(Error::InsufficientFunds {
            required: UPGRADE_COST,
            available: player.balance,
        });
    }

    let new_level = player.level + 1;
    let achievement_ids = catalog
        .iter()
        .filter(|a| a.condition.is_met(new_level))
        .filter(|a| !earned.iter().any(|e| e.id == a.id))
        .map(|a| a.id)
        .collect();

    Ok(UpgradePlan {
        user_id: player.user_id,
        cost: UPGRADE_COST,
        new_level,
        achievement_ids,
    })
}

/// `available` is the player's stock of the building's required resource,
/// ignored when the building needs none.
pub fn plan_purchase(
    player: &Player,
    building: &Building,
    owned: Option<&OwnedBuilding>,
    available: i64,
) -> Result<PurchasePlan> {
    if player.balance < building.base_cost {
        return Err(Error::InsufficientFunds {
            required: building.base_cost,
            available: player.balance,
        });
    }

    let resource = match required_resource(&building.name) {
        Some(name) if available < building.resource_cost => {
            return Err(Error::InsufficientResource {
                resource: name.to_string(),
                required: building.resource_cost,
                available,
            });
        }
        Some(name) => Some(ResourceDebit {
            name: name.to_string(),
            amount: building.resource_cost,
        }),
        None => None,
    };

    Ok(PurchasePlan {
        user_id: player.user_id,
        building_name: building.name.clone(),
        cost: building.base_cost,
        new_level: owned.map_or(1, |b| b.level + 1),
        resource,
    })
}

/// Picks one of the seeded resources and a quantity, both uniformly.
pub fn roll_collection<'a, R: Rng>(
    resources: &'a [String],
    rng: &mut R,
) -> Result<(&'a str, i64)> {
    let resource = resources
        .choose(rng)
        .ok_or_else(|| Error::Config("no collectable resources are seeded".to_string()))?;
    let amount = rng.gen_range(MIN_COLLECT..=MAX_COLLECT);
    Ok((resource.as_str(), amount))
}

/// Parses an admin credit amount. Only positive integers are accepted.
pub fn parse_amount(raw: &str) -> Result<i64> {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(Error::InvalidAmount(raw.to_string())),
    }
}
