use thiserror::Error;

#[derive(Error, Debug)]
pub enum OdysseyError {
    #[error("Card not found: {0}")]
    CardNotFound(u64),

    #[error("Storage read failure: {0}")]
    StoreRead(#[source] std::io::Error),

    #[error("Storage write failure: {0}")]
    StoreWrite(#[source] std::io::Error),

    #[error("Card store is corrupt: {0}")]
    CorruptStore(#[source] serde_json::Error),

    #[error("No card id left after {0}")]
    IdsExhausted(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, OdysseyError>;
