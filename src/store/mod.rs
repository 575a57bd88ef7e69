mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::game::Catalog;
use crate::types::*;

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    /// Inserts catalog rows that are not present yet. Safe to call on every start.
    fn seed_catalog(&self, catalog: &Catalog) -> Result<()>;

    // Player operations
    /// Returns false if a player with the same user id already exists.
    fn create_player(&self, player: &Player) -> Result<bool>;
    fn get_player(&self, user_id: i64) -> Result<Option<Player>>;
    fn credit_balance(&self, user_id: i64, amount: i64) -> Result<()>;
    fn top_players(&self, limit: i64) -> Result<Vec<Player>>;

    // Building operations
    fn list_buildings(&self) -> Result<Vec<Building>>;
    fn get_building(&self, name: &str) -> Result<Option<Building>>;
    fn list_owned_buildings(&self, user_id: i64) -> Result<Vec<OwnedBuilding>>;
    fn get_owned_building(&self, user_id: i64, name: &str) -> Result<Option<OwnedBuilding>>;

    // Resource operations
    fn list_resources(&self) -> Result<Vec<String>>;
    fn get_resource_quantity(&self, user_id: i64, name: &str) -> Result<i64>;
    fn add_resource(&self, user_id: i64, name: &str, amount: i64) -> Result<()>;
    fn list_owned_resources(&self, user_id: i64) -> Result<Vec<OwnedResource>>;

    // Achievement operations
    fn list_achievements(&self) -> Result<Vec<Achievement>>;
    fn list_earned_achievements(&self, user_id: i64) -> Result<Vec<Achievement>>;

    // Compound transitions, each applied in a single transaction
    fn apply_upgrade(&self, plan: &UpgradePlan) -> Result<()>;
    fn apply_purchase(&self, plan: &PurchasePlan) -> Result<()>;

    fn close(&self) -> Result<()>;
}
