use const_format::concatcp;
use ride_share_lib::InvalidRecordId;
use thiserror::Error;

mod config;
pub mod database;
mod data_manager;
mod password;

pub use config::{MatchingConfig, StoreConfig};
pub use data_manager::*;

pub const DATA_DIR: &str = "data/";
pub const DATABASE_PATH: &str = concatcp!(DATA_DIR, "ride_share.db");

#[derive(Debug, Error)]
pub enum DataManagerError {
    #[error("database error: {0}")]
    Database(String),
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidRecordId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid email or password")]
    Unauthorized,
    #[error("credential error: {0}")]
    Credentials(String),
}
