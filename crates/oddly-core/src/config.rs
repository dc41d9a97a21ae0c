//! Store and registry configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a store keeps its values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StorageStrategy {
    /// Scalars are copied into the slot; heap values go through the registry.
    #[default]
    Tagged,
    /// Every non-nil value goes through the registry, scalars included.
    Registry,
}

impl StorageStrategy {
    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Tagged => "tagged",
            Self::Registry => "registry",
        }
    }
}

impl fmt::Display for StorageStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tagged" => Ok(Self::Tagged),
            "registry" => Ok(Self::Registry),
            other => Err(ConfigError::UnknownStrategy {
                name: other.to_string(),
            }),
        }
    }
}

/// Per-store configuration.
///
/// Validated when the store is created; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage strategy. Default: [`StorageStrategy::Tagged`].
    pub strategy: StorageStrategy,

    /// Type label shown by `to_string`. Default: `"OddlyEven"`.
    pub label: String,
}

impl StoreConfig {
    /// Default label, the store's host-visible type name.
    pub const DEFAULT_LABEL: &'static str = "OddlyEven";

    /// Config with the given strategy and the default label.
    pub fn new(strategy: StorageStrategy) -> Self {
        Self {
            strategy,
            label: Self::DEFAULT_LABEL.to_string(),
        }
    }

    /// Check the config for values the store cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        if self.label.chars().any(char::is_control) {
            return Err(ConfigError::InvalidLabel {
                label: self.label.clone(),
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(StorageStrategy::default())
    }
}

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Table slots reserved up front. Default: 64.
    pub initial_capacity: usize,
}

impl RegistryConfig {
    /// Default reserved slot count.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

    /// Upper bound on `initial_capacity`. Slot indices are 32-bit.
    pub const MAX_INITIAL_CAPACITY: usize = 1 << 24;

    /// Check the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity > Self::MAX_INITIAL_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.initial_capacity,
                max: Self::MAX_INITIAL_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_store_config_is_valid_and_tagged() {
        let config = StoreConfig::default();
        assert_eq!(config.strategy, StorageStrategy::Tagged);
        assert_eq!(config.label, "OddlyEven");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_label_rejected() {
        let config = StoreConfig {
            label: String::new(),
            ..StoreConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyLabel));
    }

    #[test]
    fn control_chars_in_label_rejected() {
        let config = StoreConfig {
            label: "Odd\nly".into(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLabel { .. })
        ));
    }

    #[test]
    fn strategy_parses_by_name() {
        assert_eq!("tagged".parse::<StorageStrategy>(), Ok(StorageStrategy::Tagged));
        assert_eq!("registry".parse::<StorageStrategy>(), Ok(StorageStrategy::Registry));
        assert_eq!(
            "easy".parse::<StorageStrategy>(),
            Err(ConfigError::UnknownStrategy {
                name: "easy".into()
            })
        );
        assert_eq!(StorageStrategy::Registry.to_string(), "registry");
    }

    #[test]
    fn registry_capacity_bounded() {
        assert!(RegistryConfig::default().validate().is_ok());
        let config = RegistryConfig {
            initial_capacity: RegistryConfig::MAX_INITIAL_CAPACITY + 1,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityTooLarge { .. })
        ));
    }
}
