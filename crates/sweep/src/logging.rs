//! Logging Setup

use crate::SweepError;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install a human-readable global subscriber
pub fn init_logging(level: Level) -> Result<(), SweepError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SweepError::Logging(e.to_string()))
}

/// Install a JSON-lines global subscriber
pub fn init_json_logging(level: Level) -> Result<(), SweepError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| SweepError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging(Level::DEBUG);
        assert!(matches!(init_logging(Level::INFO), Err(SweepError::Logging(_))));
        assert!(init_json_logging(Level::INFO).is_err());
    }
}
