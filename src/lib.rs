//! # Cafebot
//!
//! A chat-bot idle game: players open a cafe, collect resources, buy and
//! upgrade buildings, earn achievements, and compete on a leaderboard.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cafebot::bot::{Dispatcher, Inbound};
//! use cafebot::config::BotConfig;
//! use cafebot::game::Catalog;
//! use cafebot::store::{SqliteStore, Store};
//!
//! let config = BotConfig::default();
//! let store = SqliteStore::new(config.db_path()).unwrap();
//! store.initialize().unwrap();
//! store.seed_catalog(&Catalog::default()).unwrap();
//!
//! let dispatcher = Dispatcher::new(Arc::new(store), &config);
//! let reply = dispatcher.handle(42, &Inbound::Text("/start".into()));
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `cafebot` binary. Disable with `default-features = false`.

pub mod bot;
pub mod config;
pub mod error;
pub mod game;
pub mod server;
pub mod store;
pub mod types;
