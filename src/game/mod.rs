//! The cafe economy: catalog data, pure rules, and the engine that applies them.

pub mod catalog;
mod engine;
mod outcome;
pub mod rules;

pub use catalog::Catalog;
pub use engine::Engine;
pub use outcome::*;
