mod bot;

pub use bot::{BotConfig, DEFAULT_WEB_APP_URL};
