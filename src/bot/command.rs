use std::fmt;

/// Callback payload prefix for shop buttons: `buy:<building name>`.
pub const BUY_PREFIX: &str = "buy:";
pub const UPGRADE_CALLBACK: &str = "upgrade";
pub const SHOP_CALLBACK: &str = "shop";
pub const MY_CAFE_CALLBACK: &str = "my_cafe";

/// What the transport delivered: a typed message or a pressed button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Callback(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    MyCafe,
    Upgrade,
    Shop,
    Buy(String),
    Collect,
    Inventory,
    Achievements,
    Leaderboard,
    AddCoins(String),
    Game,
    Help,
}

impl Command {
    /// Parses a chat message. Returns `None` for plain text and unknown commands.
    ///
    /// A `@botname` suffix on the command word is ignored, as group chats send it.
    pub fn parse_text(text: &str) -> Option<Command> {
        let text = text.trim();
        let rest = text.strip_prefix('/')?;
        let (word, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let name = word.split('@').next().unwrap_or(word);
        let args = args.trim();

        let command = match name {
            "start" => Command::Start,
            "my_cafe" => Command::MyCafe,
            "upgrade" => Command::Upgrade,
            "shop" => Command::Shop,
            "buy" if !args.is_empty() => Command::Buy(args.to_string()),
            "collect" => Command::Collect,
            "inventory" => Command::Inventory,
            "achievements" => Command::Achievements,
            "leaderboard" => Command::Leaderboard,
            "add_coins" => Command::AddCoins(args.to_string()),
            "game" => Command::Game,
            "help" => Command::Help,
            _ => return None,
        };
        Some(command)
    }

    /// Parses the payload of a pressed inline button.
    pub fn parse_callback(data: &str) -> Option<Command> {
        if let Some(name) = data.strip_prefix(BUY_PREFIX) {
            let name = name.trim();
            return (!name.is_empty()).then(|| Command::Buy(name.to_string()));
        }

        match data {
            UPGRADE_CALLBACK => Some(Command::Upgrade),
            SHOP_CALLBACK => Some(Command::Shop),
            MY_CAFE_CALLBACK => Some(Command::MyCafe),
            _ => None,
        }
    }

    pub fn parse(inbound: &Inbound) -> Option<Command> {
        match inbound {
            Inbound::Text(text) => Self::parse_text(text),
            Inbound::Callback(data) => Self::parse_callback(data),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::MyCafe => "my_cafe",
            Command::Upgrade => "upgrade",
            Command::Shop => "shop",
            Command::Buy(_) => "buy",
            Command::Collect => "collect",
            Command::Inventory => "inventory",
            Command::Achievements => "achievements",
            Command::Leaderboard => "leaderboard",
            Command::AddCoins(_) => "add_coins",
            Command::Game => "game",
            Command::Help => "help",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Buy(name) => write!(f, "/buy {name}"),
            Command::AddCoins(amount) => write!(f, "/add_coins {amount}"),
            other => write!(f, "/{}", other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse_text("/start"), Some(Command::Start));
        assert_eq!(Command::parse_text("  /my_cafe "), Some(Command::MyCafe));
        assert_eq!(Command::parse_text("/leaderboard"), Some(Command::Leaderboard));
        assert_eq!(Command::parse_text("/game"), Some(Command::Game));
    }

    #[test]
    fn test_parse_strips_bot_mention() {
        assert_eq!(
            Command::parse_text("/upgrade@CafeBot"),
            Some(Command::Upgrade)
        );
        assert_eq!(
            Command::parse_text("/add_coins@CafeBot 500"),
            Some(Command::AddCoins("500".to_string()))
        );
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            Command::parse_text("/add_coins   42"),
            Some(Command::AddCoins("42".to_string()))
        );
        assert_eq!(
            Command::parse_text("/add_coins"),
            Some(Command::AddCoins(String::new()))
        );
        assert_eq!(
            Command::parse_text("/buy Склад"),
            Some(Command::Buy("Склад".to_string()))
        );
        assert_eq!(Command::parse_text("/buy"), None);
    }

    #[test]
    fn test_plain_text_and_unknown_commands() {
        assert_eq!(Command::parse_text("hello"), None);
        assert_eq!(Command::parse_text("/dance"), None);
        assert_eq!(Command::parse_text(""), None);
    }

    #[test]
    fn test_parse_callbacks() {
        assert_eq!(
            Command::parse_callback("buy:Магазин"),
            Some(Command::Buy("Магазин".to_string()))
        );
        assert_eq!(Command::parse_callback("buy:"), None);
        assert_eq!(Command::parse_callback("upgrade"), Some(Command::Upgrade));
        assert_eq!(Command::parse_callback("shop"), Some(Command::Shop));
        assert_eq!(Command::parse_callback("my_cafe"), Some(Command::MyCafe));
        assert_eq!(Command::parse_callback("sell:Склад"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::Collect.to_string(), "/collect");
        assert_eq!(Command::Buy("Офис".to_string()).to_string(), "/buy Офис");
    }
}
