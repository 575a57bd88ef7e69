use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid achievement condition: {0}")]
    InvalidCondition(String),

    #[error("player is not registered")]
    NotRegistered,

    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: i64, available: i64 },

    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResource {
        resource: String,
        required: i64,
        available: i64,
    },

    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl Error {
    /// True for errors caused by the player's request rather than the store.
    #[must_use]
    pub fn is_player_facing(&self) -> bool {
        matches!(
            self,
            Error::NotRegistered
                | Error::InsufficientFunds { .. }
                | Error::InsufficientResource { .. }
                | Error::UnknownBuilding(_)
                | Error::Unauthorized
                | Error::InvalidAmount(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
