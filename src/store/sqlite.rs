use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::game::Catalog;
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .inspect_err(|e| tracing::error!("Invalid date in database: '{}' - {}", s, e))
        .ok()
}

const PLAYER_COLUMNS: &str = "user_id, cafe_name, balance, level, last_income, created_at";

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        user_id: row.get(0)?,
        cafe_name: row.get(1)?,
        balance: row.get(2)?,
        level: row.get(3)?,
        last_income: row.get::<_, Option<String>>(4)?.as_deref().and_then(parse_date),
        created_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

fn building_from_row(row: &Row<'_>) -> rusqlite::Result<Building> {
    Ok(Building {
        name: row.get(0)?,
        base_cost: row.get(1)?,
        income_multiplier: row.get(2)?,
        resource_cost: row.get(3)?,
    })
}

type AchievementRow = (i64, String, String, String);

fn achievement_row(row: &Row<'_>) -> rusqlite::Result<AchievementRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Collects raw achievement rows, then parses each stored condition into its typed form.
fn collect_achievements(
    rows: impl Iterator<Item = rusqlite::Result<AchievementRow>>,
) -> Result<Vec<Achievement>> {
    rows.map(|row| -> Result<Achievement> {
        let (id, name, description, condition) = row?;
        Ok(Achievement {
            id,
            name,
            description,
            condition: condition.parse()?,
        })
    })
    .collect()
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn seed_catalog(&self, catalog: &Catalog) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        for building in &catalog.buildings {
            tx.execute(
                "INSERT OR IGNORE INTO buildings (name, base_cost, income_multiplier, resource_cost)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    building.name,
                    building.base_cost,
                    building.income_multiplier,
                    building.resource_cost,
                ],
            )?;
        }

        for resource in &catalog.resources {
            tx.execute(
                "INSERT OR IGNORE INTO resources (name) VALUES (?1)",
                params![resource],
            )?;
        }

        for achievement in &catalog.achievements {
            tx.execute(
                "INSERT OR IGNORE INTO achievements (name, description, condition)
                 VALUES (?1, ?2, ?3)",
                params![
                    achievement.name,
                    achievement.description,
                    achievement.condition.to_string(),
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    // Player operations

    fn create_player(&self, player: &Player) -> Result<bool> {
        let rows = self.conn().execute(
            "INSERT OR IGNORE INTO players (user_id, cafe_name, balance, level, last_income, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                player.user_id,
                player.cafe_name,
                player.balance,
                player.level,
                player.last_income.map(|d| d.format("%Y-%m-%d").to_string()),
                format_datetime(&player.created_at),
            ],
        )?;
        Ok(rows > 0)
    }

    fn get_player(&self, user_id: i64) -> Result<Option<Player>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE user_id = ?1"),
            params![user_id],
            player_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn credit_balance(&self, user_id: i64, amount: i64) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE players SET balance = balance + ?2 WHERE user_id = ?1",
            params![user_id, amount],
        )?;

        if rows == 0 {
            return Err(Error::NotRegistered);
        }
        Ok(())
    }

    fn top_players(&self, limit: i64) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY balance DESC, id ASC LIMIT ?1"
        ))?;

        let rows = stmt.query_map(params![limit], player_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Building operations

    fn list_buildings(&self) -> Result<Vec<Building>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name, base_cost, income_multiplier, resource_cost FROM buildings ORDER BY id",
        )?;

        let rows = stmt.query_map([], building_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_building(&self, name: &str) -> Result<Option<Building>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT name, base_cost, income_multiplier, resource_cost FROM buildings WHERE name = ?1",
            params![name],
            building_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_owned_buildings(&self, user_id: i64) -> Result<Vec<OwnedBuilding>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT ob.user_id, ob.building_name, ob.level
             FROM owned_buildings ob
             JOIN buildings b ON b.name = ob.building_name
             WHERE ob.user_id = ?1
             ORDER BY b.id",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(OwnedBuilding {
                user_id: row.get(0)?,
                building_name: row.get(1)?,
                level: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_owned_building(&self, user_id: i64, name: &str) -> Result<Option<OwnedBuilding>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT user_id, building_name, level FROM owned_buildings
             WHERE user_id = ?1 AND building_name = ?2",
            params![user_id, name],
            |row| {
                Ok(OwnedBuilding {
                    user_id: row.get(0)?,
                    building_name: row.get(1)?,
                    level: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    // Resource operations

    fn list_resources(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT name FROM resources ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_resource_quantity(&self, user_id: i64, name: &str) -> Result<i64> {
        let conn = self.conn();
        let quantity: Option<i64> = conn
            .query_row(
                "SELECT quantity FROM owned_resources WHERE user_id = ?1 AND resource_name = ?2",
                params![user_id, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(quantity.unwrap_or(0))
    }

    fn add_resource(&self, user_id: i64, name: &str, amount: i64) -> Result<()> {
        self.conn().execute(
            "INSERT INTO owned_resources (user_id, resource_name, quantity) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, resource_name) DO UPDATE SET quantity = quantity + excluded.quantity",
            params![user_id, name, amount],
        )?;
        Ok(())
    }

    fn list_owned_resources(&self, user_id: i64) -> Result<Vec<OwnedResource>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT o.user_id, o.resource_name, o.quantity
             FROM owned_resources o
             JOIN resources r ON r.name = o.resource_name
             WHERE o.user_id = ?1
             ORDER BY r.id",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok(OwnedResource {
                user_id: row.get(0)?,
                resource_name: row.get(1)?,
                quantity: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Achievement operations

    fn list_achievements(&self) -> Result<Vec<Achievement>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, description, condition FROM achievements ORDER BY id")?;

        let rows = stmt.query_map([], achievement_row)?;

        collect_achievements(rows)
    }

    fn list_earned_achievements(&self, user_id: i64) -> Result<Vec<Achievement>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT a.id, a.name, a.description, a.condition
             FROM earned_achievements e
             JOIN achievements a ON a.id = e.achievement_id
             WHERE e.user_id = ?1
             ORDER BY a.id",
        )?;

        let rows = stmt.query_map(params![user_id], achievement_row)?;

        collect_achievements(rows)
    }

    // Compound transitions

    fn apply_upgrade(&self, plan: &UpgradePlan) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let rows = tx.execute(
            "UPDATE players SET balance = balance - ?2, level = ?3 WHERE user_id = ?1",
            params![plan.user_id, plan.cost, plan.new_level],
        )?;
        if rows == 0 {
            return Err(Error::NotRegistered);
        }

        for achievement_id in &plan.achievement_ids {
            tx.execute(
                "INSERT OR IGNORE INTO earned_achievements (user_id, achievement_id) VALUES (?1, ?2)",
                params![plan.user_id, achievement_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn apply_purchase(&self, plan: &PurchasePlan) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        // Dropping `tx` on an early return rolls every statement back.
        if let Some(debit) = &plan.resource {
            let rows = tx.execute(
                "UPDATE owned_resources SET quantity = quantity - ?3
                 WHERE user_id = ?1 AND resource_name = ?2 AND quantity >= ?3",
                params![plan.user_id, debit.name, debit.amount],
            )?;
            if rows == 0 && debit.amount > 0 {
                return Err(Error::InsufficientResource {
                    resource: debit.name.clone(),
                    required: debit.amount,
                    available: 0,
                });
            }
        }

        tx.execute(
            "INSERT INTO owned_buildings (user_id, building_name, level) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, building_name) DO UPDATE SET level = excluded.level",
            params![plan.user_id, plan.building_name, plan.new_level],
        )?;

        let rows = tx.execute(
            "UPDATE players SET balance = balance - ?2 WHERE user_id = ?1",
            params![plan.user_id, plan.cost],
        )?;
        if rows == 0 {
            return Err(Error::NotRegistered);
        }

        tx.commit()?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let conn = self.conn();
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
        Ok(())
    }
}
