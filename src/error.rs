//! Ship configuration error types.
//!
//! None of these are fatal.  They are logged once where they are detected and
//! the affected feature (usually firing on one power-up level) is disabled.
//!
//! ## Usage
//!
//! ```rust
//! use vertical_shooter::error::ConfigError;
//! use vertical_shooter::ship::fire_points::FirePointTable;
//! use vertical_shooter::ship::power_up::PowerUpLevel;
//!
//! let table = FirePointTable::default();
//! let errors: Vec<ConfigError> = table.validate();
//! assert!(errors.is_empty());
//! assert!(table.resolve(PowerUpLevel::MAX).is_ok());
//! ```

use std::fmt;

/// Problems found in the fire-point configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The fire-point table has no entries at all; the ship can never fire.
    EmptyFirePointTable,

    /// An entry exists for `level` but lists no spawn points.
    EmptySpawnPoints {
        /// Power-up level the entry was declared for.
        level: u8,
    },

    /// No entry with usable spawn points matches `level`.
    MissingFirePoints {
        /// Power-up level that has nothing to fire.
        level: u8,
    },

    /// An entry was declared for a level outside `0..=max`; it can never be selected.
    LevelOutOfRange {
        /// Level written in the configuration.
        level: u8,
        /// Highest valid level.
        max: u8,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyFirePointTable => {
                write!(f, "fire-point table is empty; firing is disabled on every level")
            }
            ConfigError::EmptySpawnPoints { level } => write!(
                f,
                "fire-point entry for power-up level {} has no spawn points",
                level
            ),
            ConfigError::MissingFirePoints { level } => write!(
                f,
                "no fire points configured for power-up level {}; firing disabled on that level",
                level
            ),
            ConfigError::LevelOutOfRange { level, max } => write!(
                f,
                "fire-point entry for power-up level {} is outside 0..={} and will never be used",
                level, max
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_level() {
        let msg = ConfigError::MissingFirePoints { level: 3 }.to_string();
        assert!(msg.contains("level 3"), "unexpected message: {msg}");
    }
}
