//! Arena configuration

use crate::decl::Decl;
use crate::error::ConfigError;
use serde::Deserialize;

/// Alignment of every [`Decl`] a context places
pub const NODE_ALIGNMENT: usize = std::mem::align_of::<Decl>();

/// Alignment used when none is configured
pub const DEFAULT_ALIGNMENT: usize = 8;

/// Settings for a [`DeclContext`](crate::DeclContext)
///
/// ```toml
/// capacity = 4096
/// alignment = 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Number of declarations to reserve room for up front
    pub capacity: usize,
    /// Alignment every node address is guaranteed to satisfy; a power of two
    /// no larger than [`NODE_ALIGNMENT`]
    pub alignment: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            alignment: DEFAULT_ALIGNMENT,
        }
    }
}

impl ArenaConfig {
    /// Parses and validates a TOML configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::InvalidAlignment`] for an unusable alignment.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every placed declaration will satisfy the configured
    /// alignment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAlignment`] if the alignment is not a
    /// power of two or exceeds [`NODE_ALIGNMENT`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alignment.is_power_of_two() || self.alignment > NODE_ALIGNMENT {
            return Err(ConfigError::InvalidAlignment {
                alignment: self.alignment,
                supported: NODE_ALIGNMENT,
            });
        }
        Ok(())
    }
}
