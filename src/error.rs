use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemperError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid ratio syntax '{0}' (expected integer/integer)")]
    InvalidRatioSyntax(String),

    #[error("Invalid ratio {n}/{d}: numerator and denominator must be positive")]
    InvalidRatio { n: u64, d: u64 },

    #[error("Ratio arithmetic overflowed while normalizing {n}/{d}")]
    RatioOverflow { n: u64, d: u64 },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type TfResult<T> = Result<T, TemperError>;
