pub const SCHEMA: &str = r#"
-- Players are created by /start and never deleted
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order, leaderboard tiebreak
    user_id INTEGER NOT NULL UNIQUE,
    cafe_name TEXT NOT NULL,
    balance INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    last_income TEXT,                      -- YYYY-MM-DD, currently unused
    created_at TEXT DEFAULT (datetime('now'))
);

-- Catalog: buildings available in the shop
CREATE TABLE IF NOT EXISTS buildings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    base_cost INTEGER NOT NULL,
    income_multiplier REAL NOT NULL DEFAULT 1.0,
    resource_cost INTEGER NOT NULL DEFAULT 0
);

-- Catalog: collectable resources
CREATE TABLE IF NOT EXISTS resources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Catalog: achievements, condition stored as text ("level >= N")
CREATE TABLE IF NOT EXISTS achievements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    condition TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS owned_buildings (
    user_id INTEGER NOT NULL REFERENCES players(user_id),
    building_name TEXT NOT NULL REFERENCES buildings(name),
    level INTEGER NOT NULL DEFAULT 1,
    UNIQUE(user_id, building_name)
);

CREATE TABLE IF NOT EXISTS owned_resources (
    user_id INTEGER NOT NULL REFERENCES players(user_id),
    resource_name TEXT NOT NULL REFERENCES resources(name),
    quantity INTEGER NOT NULL DEFAULT 0,
    UNIQUE(user_id, resource_name)
);

CREATE TABLE IF NOT EXISTS earned_achievements (
    user_id INTEGER NOT NULL REFERENCES players(user_id),
    achievement_id INTEGER NOT NULL REFERENCES achievements(id),
    earned_at TEXT DEFAULT (datetime('now')),
    PRIMARY KEY (user_id, achievement_id)
);

CREATE INDEX IF NOT EXISTS idx_players_balance ON players(balance);
CREATE INDEX IF NOT EXISTS idx_owned_buildings_user ON owned_buildings(user_id);
CREATE INDEX IF NOT EXISTS idx_owned_resources_user ON owned_resources(user_id);
"#;
