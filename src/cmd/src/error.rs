use std::result;

use rentals_gen::error::RentalsGenError;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad request: {0:?}")]
    BadRequest(String),
    #[error("config: {0:?}")]
    Config(#[from] config::ConfigError),
    #[error("date parse: {0:?}")]
    DateParse(#[from] chrono::ParseError),
    #[error("gen: {0:?}")]
    Gen(#[from] RentalsGenError),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("CSVError: {0:?}")]
    CSVError(#[from] csv::Error),
    #[error("SetGlobalDefault: {0:?}")]
    SetGlobalDefaultError(SetGlobalDefaultError),
}
