use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown organization code: {0}")]
    UnknownOrganization(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;
