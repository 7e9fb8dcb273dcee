use thiserror::Error;

#[derive(Error, Debug)]
pub enum AimError {
    #[error("Invalid turn speed range: min {min}, max {max}")]
    InvalidTurnSpeed { min: f32, max: f32 },

    #[error("Invalid reset threshold: {0}")]
    InvalidResetThreshold(f32),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AimError {
    /// Configuration problems are permanent; only IO may succeed on retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AimError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, AimError>;
