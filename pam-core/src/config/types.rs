//! Configuration type definitions
//!
//! These settings come from the planner's section of the host
//! configuration and are immutable once loaded.

use heapless::String;

use crate::traits::ConfigSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum mesh profile name length
pub const MAX_PROFILE_LEN: usize = 16;

/// Mesh profile used when the configuration does not name one
pub const DEFAULT_PROFILE: &str = "ratos";

/// Static planner settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlannerConfig {
    /// Margin added around the declared print area (mm)
    pub offset: f32,
    /// Mesh profile the calibration result is stored under; an empty
    /// profile leaves the host's default in effect
    pub profile: String<MAX_PROFILE_LEN>,
    /// Clamp probe counts to the configured interpolation algorithm's
    /// valid sample range
    pub algorithm_clamp: bool,
    /// Probe index forwarded as the zero reference of the stored mesh
    pub relative_reference_index: i32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let mut profile = String::new();
        let _ = profile.push_str(DEFAULT_PROFILE);
        Self {
            offset: 0.0,
            profile,
            algorithm_clamp: true,
            relative_reference_index: -1,
        }
    }
}

impl PlannerConfig {
    /// Read settings from the host's configuration section
    ///
    /// A profile name longer than [`MAX_PROFILE_LEN`] falls back to
    /// [`DEFAULT_PROFILE`] rather than truncating.
    pub fn from_source<C: ConfigSource>(source: &C) -> Self {
        let defaults = Self::default();

        let mut profile = String::new();
        if profile
            .push_str(source.get_str("profile", DEFAULT_PROFILE))
            .is_err()
        {
            profile.clear();
            let _ = profile.push_str(DEFAULT_PROFILE);
        }

        Self {
            offset: source.get_float("offset", defaults.offset),
            profile,
            algorithm_clamp: source.get_bool("algorithm_clamp", defaults.algorithm_clamp),
            relative_reference_index: source
                .get_int("relative_reference_index", defaults.relative_reference_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        offset: f32,
        profile: &'static str,
    }

    impl ConfigSource for FakeSource {
        fn get_float(&self, name: &str, default: f32) -> f32 {
            if name == "offset" {
                self.offset
            } else {
                default
            }
        }

        fn get_int(&self, _name: &str, default: i32) -> i32 {
            default
        }

        fn get_bool(&self, _name: &str, default: bool) -> bool {
            default
        }

        fn get_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
            if name == "profile" {
                self.profile
            } else {
                default
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.offset, 0.0);
        assert_eq!(config.profile.as_str(), "ratos");
        assert!(config.algorithm_clamp);
        assert_eq!(config.relative_reference_index, -1);
    }

    #[test]
    fn test_from_source() {
        let source = FakeSource {
            offset: 7.5,
            profile: "adaptive",
        };
        let config = PlannerConfig::from_source(&source);
        assert_eq!(config.offset, 7.5);
        assert_eq!(config.profile.as_str(), "adaptive");
        assert!(config.algorithm_clamp);
    }

    #[test]
    fn test_overlong_profile_falls_back() {
        let source = FakeSource {
            offset: 0.0,
            profile: "a-profile-name-well-past-sixteen-chars",
        };
        let config = PlannerConfig::from_source(&source);
        assert_eq!(config.profile.as_str(), DEFAULT_PROFILE);
    }
}
