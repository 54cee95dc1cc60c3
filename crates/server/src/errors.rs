use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("migration failed: {0}")]
    Migration(String),
}
