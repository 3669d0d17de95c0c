use std::io;
use std::result;

use rand::distributions::WeightedError;
use thiserror::Error;
pub type Result<T> = result::Result<T, RentalsGenError>;

#[derive(Error, Debug)]
pub enum RentalsGenError {
    #[error("Internal: {0:?}")]
    Internal(String),
    #[error("Config: {0:?}")]
    Config(String),
    #[error("NoCandidates")]
    NoCandidates,
    #[error("WeightedIndex: {0:?}")]
    WeightedIndex(#[from] WeightedError),
    #[error("CSVError: {0:?}")]
    CSVError(#[from] csv::Error),
    #[error("IOError: {0:?}")]
    IOError(#[from] io::Error),
}
