//! Static reference data seeded into the catalog tables at startup.

use crate::types::{AchievementCondition, Building};

pub const COFFEE_BEANS: &str = "Кофейные зерна";
pub const MILK: &str = "Молоко";
pub const SUGAR: &str = "Сахар";

/// The resources `/collect` can yield.
pub const RESOURCES: [&str; 3] = [COFFEE_BEANS, MILK, SUGAR];

pub const FIRST_UPGRADE_ACHIEVEMENT: &str = "Начинающий Бариста";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementSeed {
    pub name: String,
    pub description: String,
    pub condition: AchievementCondition,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub buildings: Vec<Building>,
    pub resources: Vec<String>,
    pub achievements: Vec<AchievementSeed>,
}

impl Default for Catalog {
    fn default() -> Self {
        let building = |name: &str, base_cost, income_multiplier, resource_cost| Building {
            name: name.to_string(),
            base_cost,
            income_multiplier,
            resource_cost,
        };
        let achievement = |name: &str, description: &str, level| AchievementSeed {
            name: name.to_string(),
            description: description.to_string(),
            condition: AchievementCondition::LevelAtLeast(level),
        };

        Self {
            buildings: vec![
                building("Магазин", 100, 1.2, 2),
                building("Склад", 150, 1.5, 3),
                building("Офис", 200, 2.0, 5),
                building("Терраса", 80, 1.1, 0),
            ],
            resources: RESOURCES.iter().map(|r| (*r).to_string()).collect(),
            achievements: vec![
                achievement(FIRST_UPGRADE_ACHIEVEMENT, "Улучшите кафе до 2 уровня", 2),
                achievement("Опытный Бариста", "Улучшите кафе до 5 уровня", 5),
                achievement("Мастер Кофе", "Улучшите кафе до 10 уровня", 10),
            ],
        }
    }
}

/// The resource a building consumes on purchase, if any.
#[must_use]
pub fn required_resource(building_name: &str) -> Option<&'static str> {
    match building_name {
        "Магазин" => Some(COFFEE_BEANS),
        "Склад" => Some(MILK),
        "Офис" => Some(SUGAR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_resource_mapping() {
        assert_eq!(required_resource("Магазин"), Some(COFFEE_BEANS));
        assert_eq!(required_resource("Склад"), Some(MILK));
        assert_eq!(required_resource("Офис"), Some(SUGAR));
        assert_eq!(required_resource("Терраса"), None);
        assert_eq!(required_resource("anything"), None);
    }

    #[test]
    fn test_default_catalog_is_consistent() {
        let catalog = Catalog::default();
        for building in &catalog.buildings {
            if let Some(resource) = required_resource(&building.name) {
                assert!(catalog.resources.iter().any(|r| r == resource));
                assert!(building.resource_cost > 0);
            }
        }
        assert!(
            catalog
                .achievements
                .iter()
                .any(|a| a.name == FIRST_UPGRADE_ACHIEVEMENT
                    && a.condition == AchievementCondition::LevelAtLeast(2))
        );
    }
}
