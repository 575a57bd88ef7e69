use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::catalog::required_resource;
use super::outcome::*;
use super::rules;
use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Achievement, Building, OwnedResource, Player};

/// Runs player commands against the store.
///
/// Every mutating command holds the command lock from its first read to its
/// last write, so two commands never interleave their read-modify-write on
/// the same player row.
pub struct Engine {
    store: Arc<dyn Store>,
    admin_id: Option<i64>,
    rng: Mutex<StdRng>,
    command_lock: Mutex<()>,
}

impl Engine {
    pub fn new(store: Arc<dyn Store>, admin_id: Option<i64>) -> Self {
        Self::with_rng(store, admin_id, StdRng::from_entropy())
    }

    pub fn with_rng(store: Arc<dyn Store>, admin_id: Option<i64>, rng: StdRng) -> Self {
        Self {
            store,
            admin_id,
            rng: Mutex::new(rng),
            command_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.command_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn require_player(&self, user_id: i64) -> Result<Player> {
        self.store.get_player(user_id)?.ok_or(Error::NotRegistered)
    }

    pub fn register(&self, user_id: i64) -> Result<Registration> {
        let _guard = self.lock();

        let created = self
            .store
            .create_player(&rules::new_player(user_id, Utc::now()))?;
        if created {
            info!("Registered player {}", user_id);
        }

        let player = self.require_player(user_id)?;
        Ok(Registration { player, created })
    }

    pub fn view_cafe(&self, user_id: i64) -> Result<CafeView> {
        let player = self.require_player(user_id)?;
        let buildings = self.store.list_owned_buildings(user_id)?;

        Ok(CafeView {
            player,
            buildings,
            upgrade_cost: rules::UPGRADE_COST,
        })
    }

    pub fn upgrade(&self, user_id: i64) -> Result<Upgraded> {
        let _guard = self.lock();

        let player = self.require_player(user_id)?;
        let catalog = self.store.list_achievements()?;
        let earned = self.store.list_earned_achievements(user_id)?;

        let plan = rules::plan_upgrade(&player, &catalog, &earned)?;
        self.store.apply_upgrade(&plan)?;

        let new_achievements: Vec<Achievement> = catalog
            .into_iter()
            .filter(|a| plan.achievement_ids.contains(&a.id))
            .collect();

        info!(
            "Player {} upgraded cafe to level {} ({} new achievements)",
            user_id,
            plan.new_level,
            new_achievements.len()
        );

        Ok(Upgraded {
            level: plan.new_level,
            balance: player.balance - plan.cost,
            new_achievements,
        })
    }

    pub fn list_shop(&self) -> Result<Vec<Building>> {
        self.store.list_buildings()
    }

    pub fn purchase(&self, user_id: i64, building_name: &str) -> Result<Purchased> {
        let _guard = self.lock();

        let building = self
            .store
            .get_building(building_name)?
            .ok_or_else(|| Error::UnknownBuilding(building_name.to_string()))?;
        let player = self.require_player(user_id)?;
        let owned = self.store.get_owned_building(user_id, &building.name)?;
        let available = match required_resource(&building.name) {
            Some(resource) => self.store.get_resource_quantity(user_id, resource)?,
            None => 0,
        };

        let plan = rules::plan_purchase(&player, &building, owned.as_ref(), available)?;
        self.store.apply_purchase(&plan)?;

        info!(
            "Player {} bought {} (now level {})",
            user_id, plan.building_name, plan.new_level
        );

        Ok(Purchased {
            building_name: plan.building_name,
            level: plan.new_level,
            cost: plan.cost,
            balance: player.balance - plan.cost,
            resource: plan.resource,
        })
    }

    pub fn collect(&self, user_id: i64) -> Result<Collected> {
        let _guard = self.lock();

        self.require_player(user_id)?;
        let resources = self.store.list_resources()?;

        let (resource, amount) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rules::roll_collection(&resources, &mut *rng)?
        };
        self.store.add_resource(user_id, resource, amount)?;
        let total = self.store.get_resource_quantity(user_id, resource)?;

        debug!("Player {} collected {} x{}", user_id, resource, amount);

        Ok(Collected {
            resource: resource.to_string(),
            amount,
            total,
        })
    }

    pub fn inventory(&self, user_id: i64) -> Result<Vec<OwnedResource>> {
        self.require_player(user_id)?;
        self.store.list_owned_resources(user_id)
    }

    pub fn achievements(&self, user_id: i64) -> Result<Vec<Achievement>> {
        self.require_player(user_id)?;
        self.store.list_earned_achievements(user_id)
    }

    pub fn leaderboard(&self) -> Result<Vec<Player>> {
        self.store.top_players(rules::LEADERBOARD_SIZE)
    }

    /// Credits the caller's own balance. Only the configured admin may call it.
    pub fn admin_credit(&self, caller_id: i64, raw_amount: &str) -> Result<Credited> {
        if self.admin_id != Some(caller_id) {
            return Err(Error::Unauthorized);
        }
        let amount = rules::parse_amount(raw_amount)?;

        let _guard = self.lock();
        let player = self.require_player(caller_id)?;
        let balance = player
            .balance
            .checked_add(amount)
            .ok_or_else(|| Error::InvalidAmount(raw_amount.trim().to_string()))?;
        self.store.credit_balance(caller_id, amount)?;

        info!("Admin {} credited {} coins", caller_id, amount);

        Ok(Credited { amount, balance })
    }
}
