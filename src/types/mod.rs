mod condition;
mod models;
mod plan;

pub use condition::AchievementCondition;
pub use models::*;
pub use plan::*;
