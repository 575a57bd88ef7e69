//! Turns engine outcomes into chat replies.

use super::command::{BUY_PREFIX, MY_CAFE_CALLBACK, SHOP_CALLBACK, UPGRADE_CALLBACK};
use super::reply::{Button, Reply, escape_markdown};
use crate::error::Error;
use crate::game::{CafeView, Collected, Credited, Purchased, Registration, Upgraded};
use crate::types::{Achievement, Building, OwnedResource, Player};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

pub fn welcome(chat_id: i64, registration: &Registration) -> Reply {
    let player = &registration.player;
    let text = if registration.created {
        format!(
            "☕ Добро пожаловать! Вы открыли кафе *{}*.\nНа счету {} монет. Загляните в /my_cafe или /help.",
            escape_markdown(&player.cafe_name),
            player.balance
        )
    } else {
        format!(
            "С возвращением! Ваше кафе *{}* уже работает. Загляните в /my_cafe.",
            escape_markdown(&player.cafe_name)
        )
    };

    Reply::markdown(chat_id, text)
        .with_row(vec![Button::callback("🏠 Моё кафе", MY_CAFE_CALLBACK)])
}

pub fn cafe(chat_id: i64, view: &CafeView) -> Reply {
    let player = &view.player;
    let mut text = format!(
        "🏠 *{}*\n💰 Баланс: {} монет\n⭐ Уровень: {}\n",
        escape_markdown(&player.cafe_name),
        player.balance,
        player.level
    );

    if view.buildings.is_empty() {
        text.push_str("\nЗданий пока нет. Загляните в /shop.");
    } else {
        text.push_str("\n🏢 Здания:\n");
        for building in &view.buildings {
            text.push_str(&format!(
                "• {} (ур. {})\n",
                escape_markdown(&building.building_name),
                building.level
            ));
        }
    }

    Reply::markdown(chat_id, text).with_row(vec![
        Button::callback(
            format!("⬆️ Улучшить кафе ({} монет)", view.upgrade_cost),
            UPGRADE_CALLBACK,
        ),
        Button::callback("🛒 Магазин", SHOP_CALLBACK),
    ])
}

pub fn upgraded(chat_id: i64, outcome: &Upgraded) -> Reply {
    let mut text = format!(
        "⬆️ Кафе улучшено до уровня *{}*! Осталось {} монет.",
        outcome.level, outcome.balance
    );

    if !outcome.new_achievements.is_empty() {
        text.push_str("\n\n🏆 Новые достижения:");
        for achievement in &outcome.new_achievements {
            text.push_str(&format!("\n• *{}*", escape_markdown(&achievement.name)));
        }
    }

    Reply::markdown(chat_id, text)
}

pub fn shop(chat_id: i64, buildings: &[Building]) -> Reply {
    if buildings.is_empty() {
        return Reply::plain(chat_id, "Магазин пока пуст.");
    }

    let mut text = String::from("🛒 *Магазин зданий*\n");
    for building in buildings {
        text.push_str(&format!(
            "\n• {}: {} монет",
            escape_markdown(&building.name),
            building.base_cost
        ));
    }

    buildings.iter().fold(Reply::markdown(chat_id, text), |reply, b| {
        reply.with_row(vec![Button::callback(
            format!("{} ({} монет)", b.name, b.base_cost),
            format!("{BUY_PREFIX}{}", b.name),
        )])
    })
}

pub fn purchased(chat_id: i64, outcome: &Purchased) -> Reply {
    let mut text = if outcome.level == 1 {
        format!("🏗 Вы купили *{}*!", escape_markdown(&outcome.building_name))
    } else {
        format!(
            "🏗 *{}* улучшено до уровня {}!",
            escape_markdown(&outcome.building_name),
            outcome.level
        )
    };

    text.push_str(&format!("\nПотрачено {} монет", outcome.cost));
    if let Some(debit) = &outcome.resource {
        text.push_str(&format!(" и {} × {}", debit.amount, escape_markdown(&debit.name)));
    }
    text.push_str(&format!(". Баланс: {} монет.", outcome.balance));

    Reply::markdown(chat_id, text)
}

pub fn collected(chat_id: i64, outcome: &Collected) -> Reply {
    Reply::plain(
        chat_id,
        format!(
            "📦 Вы собрали {} × {}. Теперь у вас {}.",
            outcome.amount, outcome.resource, outcome.total
        ),
    )
}

pub fn inventory(chat_id: i64, resources: &[OwnedResource]) -> Reply {
    if resources.is_empty() {
        return Reply::plain(chat_id, "🎒 Инвентарь пуст. Соберите ресурсы командой /collect.");
    }

    let mut text = String::from("🎒 *Инвентарь*\n");
    for resource in resources {
        text.push_str(&format!(
            "\n• {}: {}",
            escape_markdown(&resource.resource_name),
            resource.quantity
        ));
    }
    Reply::markdown(chat_id, text)
}

pub fn achievements(chat_id: i64, achievements: &[Achievement]) -> Reply {
    if achievements.is_empty() {
        return Reply::plain(chat_id, "🏆 Достижений пока нет. Улучшайте кафе командой /upgrade.");
    }

    let mut text = String::from("🏆 *Достижения*\n");
    for achievement in achievements {
        text.push_str(&format!(
            "\n• *{}*: _{}_",
            escape_markdown(&achievement.name),
            escape_markdown(&achievement.description)
        ));
    }
    Reply::markdown(chat_id, text)
}

pub fn leaderboard(chat_id: i64, players: &[Player]) -> Reply {
    if players.is_empty() {
        return Reply::plain(chat_id, "📊 В рейтинге пока никого нет.");
    }

    let mut text = String::from("📊 *Лучшие кафе*\n");
    for (i, player) in players.iter().enumerate() {
        let place = MEDALS
            .get(i)
            .map_or_else(|| format!("{}.", i + 1), |m| (*m).to_string());
        text.push_str(&format!(
            "\n{} {} (ур. {}): {} монет",
            place,
            escape_markdown(&player.cafe_name),
            player.level,
            player.balance
        ));
    }
    Reply::markdown(chat_id, text)
}

pub fn credited(chat_id: i64, outcome: &Credited) -> Reply {
    Reply::plain(
        chat_id,
        format!(
            "💰 Начислено {} монет. Баланс: {} монет.",
            outcome.amount, outcome.balance
        ),
    )
}

pub fn game_link(chat_id: i64, url: &str) -> Reply {
    Reply::plain(
        chat_id,
        "Welcome to Crypto Coffee! Click the button below to visit your coffee shop:",
    )
    .with_row(vec![Button::url("Visit the 3D Coffee Shop", url)])
}

pub fn help(chat_id: i64) -> Reply {
    Reply::plain(
        chat_id,
        "Команды:\n\
         /start — открыть кафе\n\
         /my_cafe — ваше кафе\n\
         /upgrade — улучшить кафе\n\
         /shop — магазин зданий\n\
         /collect — собрать ресурсы\n\
         /inventory — инвентарь\n\
         /achievements — достижения\n\
         /leaderboard — рейтинг\n\
         /game — открыть 3D кафе",
    )
}

pub fn unknown(chat_id: i64) -> Reply {
    Reply::plain(chat_id, "Не понимаю эту команду. Список команд: /help")
}

/// Plain-language reply for a failed command.
pub fn error(chat_id: i64, err: &Error) -> Reply {
    let text = match err {
        Error::NotRegistered => "Сначала откройте кафе командой /start.".to_string(),
        Error::InsufficientFunds {
            required,
            available,
        } => format!("Недостаточно монет: нужно {required}, у вас {available}."),
        Error::InsufficientResource {
            resource,
            required,
            available,
        } => format!("Недостаточно ресурса «{resource}»: нужно {required}, у вас {available}."),
        Error::UnknownBuilding(name) => format!("Здание «{name}» не найдено. Загляните в /shop."),
        Error::Unauthorized => "Эта команда доступна только администратору.".to_string(),
        Error::InvalidAmount(_) => {
            "Укажите положительное целое число, например: /add_coins 100".to_string()
        }
        _ => "Что-то пошло не так. Попробуйте позже.".to_string(),
    };
    Reply::plain(chat_id, text)
}
