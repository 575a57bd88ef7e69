use std::sync::Arc;

use tracing::{error, warn};

use super::command::{Command, Inbound};
use super::format;
use super::reply::Reply;
use crate::config::BotConfig;
use crate::error::Result;
use crate::game::Engine;
use crate::store::Store;

/// Routes inbound updates to the engine and renders the result.
pub struct Dispatcher {
    engine: Engine,
    web_app_url: String,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn Store>, config: &BotConfig) -> Self {
        Self::with_engine(Engine::new(store, config.admin_id), config)
    }

    pub fn with_engine(engine: Engine, config: &BotConfig) -> Self {
        Self {
            engine,
            web_app_url: config.web_app_url.clone(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Handles one update from `user_id`. Always produces a reply; failures
    /// are logged and turned into a message for the player.
    pub fn handle(&self, user_id: i64, inbound: &Inbound) -> Reply {
        match Command::parse(inbound) {
            Some(command) => self.dispatch(user_id, &command),
            None => format::unknown(user_id),
        }
    }

    pub fn dispatch(&self, user_id: i64, command: &Command) -> Reply {
        match self.run(user_id, command) {
            Ok(reply) => reply,
            Err(e) if e.is_player_facing() => {
                warn!("{} from user {} rejected: {}", command, user_id, e);
                format::error(user_id, &e)
            }
            Err(e) => {
                error!("{} from user {} failed: {}", command, user_id, e);
                format::error(user_id, &e)
            }
        }
    }

    fn run(&self, user_id: i64, command: &Command) -> Result<Reply> {
        let engine = &self.engine;
        let reply = match command {
            Command::Start => format::welcome(user_id, &engine.register(user_id)?),
            Command::MyCafe => format::cafe(user_id, &engine.view_cafe(user_id)?),
            Command::Upgrade => format::upgraded(user_id, &engine.upgrade(user_id)?),
            Command::Shop => format::shop(user_id, &engine.list_shop()?),
            Command::Buy(name) => format::purchased(user_id, &engine.purchase(user_id, name)?),
            Command::Collect => format::collected(user_id, &engine.collect(user_id)?),
            Command::Inventory => format::inventory(user_id, &engine.inventory(user_id)?),
            Command::Achievements => {
                format::achievements(user_id, &engine.achievements(user_id)?)
            }
            Command::Leaderboard => format::leaderboard(user_id, &engine.leaderboard()?),
            Command::AddCoins(amount) => {
                format::credited(user_id, &engine.admin_credit(user_id, amount)?)
            }
            Command::Game => format::game_link(user_id, &self.web_app_url),
            Command::Help => format::help(user_id),
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::bot::ButtonAction;
    use crate::game::Catalog;
    use crate::store::SqliteStore;

    const ADMIN: i64 = 1;

    fn dispatcher() -> Dispatcher {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store.seed_catalog(&Catalog::default()).unwrap();
        let config = BotConfig {
            admin_id: Some(ADMIN),
            ..BotConfig::default()
        };
        let engine = Engine::with_rng(Arc::new(store), config.admin_id, StdRng::seed_from_u64(1));
        Dispatcher::with_engine(engine, &config)
    }

    fn text(d: &Dispatcher, user_id: i64, msg: &str) -> Reply {
        d.handle(user_id, &Inbound::Text(msg.to_string()))
    }

    #[test]
    fn test_unregistered_user_is_prompted_to_start() {
        let d = dispatcher();
        let reply = text(&d, 42, "/my_cafe");
        assert!(reply.text.contains("/start"));
        assert_eq!(reply.chat_id, 42);
    }

    #[test]
    fn test_shop_button_round_trips_into_purchase() {
        let d = dispatcher();
        text(&d, ADMIN, "/start");

        let shop = text(&d, ADMIN, "/shop");
        let terrace = shop
            .buttons()
            .find_map(|b| match &b.action {
                ButtonAction::Callback(data) if data.ends_with("Терраса") => Some(data.clone()),
                _ => None,
            })
            .unwrap();

        let reply = d.handle(ADMIN, &Inbound::Callback(terrace));
        assert!(reply.text.contains("Терраса"));

        let cafe = d.engine().view_cafe(ADMIN).unwrap();
        assert_eq!(cafe.player.balance, 20);
        assert_eq!(cafe.buildings[0].building_name, "Терраса");
    }

    #[test]
    fn test_upgrade_reports_new_achievement() {
        let d = dispatcher();
        text(&d, 42, "/start");
        let reply = text(&d, 42, "/upgrade");
        assert!(reply.text.contains("Начинающий Бариста"));

        let listed = text(&d, 42, "/achievements");
        assert!(listed.text.contains("Начинающий Бариста"));
    }

    #[test]
    fn test_add_coins_for_non_admin_is_refused() {
        let d = dispatcher();
        text(&d, 42, "/start");
        let reply = text(&d, 42, "/add_coins 1000");
        assert!(reply.text.contains("администратору"));
        assert_eq!(d.engine().view_cafe(42).unwrap().player.balance, 100);
    }

    #[test]
    fn test_add_coins_for_admin() {
        let d = dispatcher();
        text(&d, ADMIN, "/start");
        let reply = text(&d, ADMIN, "/add_coins 900");
        assert!(reply.text.contains("1000"));
    }

    #[test]
    fn test_game_and_help_need_no_registration() {
        let d = dispatcher();
        let game = text(&d, 5, "/game");
        assert!(matches!(
            game.buttons().next().map(|b| &b.action),
            Some(ButtonAction::Url(_))
        ));

        let help = text(&d, 5, "/help");
        assert!(help.text.contains("/collect"));
    }

    #[test]
    fn test_unknown_input_gets_hint() {
        let d = dispatcher();
        assert!(text(&d, 5, "привет").text.contains("/help"));
        assert!(d
            .handle(5, &Inbound::Callback("bogus".to_string()))
            .text
            .contains("/help"));
    }
}
