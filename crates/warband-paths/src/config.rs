use crate::error::{PathError, Result};

/// Engine-wide tuning, fixed for the lifetime of a
/// [`Pathfinder`](crate::Pathfinder).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    /// Maximum number of cached routes. `0` disables caching.
    pub cache_capacity: usize,
    /// How many waypoints ahead smoothing tries to shortcut to.
    pub smoothing_lookahead: usize,
    /// Drift, in cells, under which an existing path is reused.
    pub reuse_threshold_cells: f32,
    /// Largest ring searched when the requested target is blocked.
    pub snap_radius: i32,
    /// Abort a search after popping this many nodes. `None` runs every
    /// search to completion.
    pub max_iterations: Option<usize>,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            smoothing_lookahead: 3,
            reuse_threshold_cells: 5.0,
            snap_radius: 10,
            max_iterations: None,
        }
    }
}

impl PathfinderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_lookahead == 0 {
            return Err(PathError::InvalidConfig("smoothing_lookahead must be at least 1"));
        }
        if !self.reuse_threshold_cells.is_finite() || self.reuse_threshold_cells < 0.0 {
            return Err(PathError::InvalidConfig(
                "reuse_threshold_cells must be finite and non-negative",
            ));
        }
        if self.snap_radius < 0 {
            return Err(PathError::InvalidConfig("snap_radius must be non-negative"));
        }
        if self.max_iterations == Some(0) {
            return Err(PathError::InvalidConfig("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = PathfinderConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.smoothing_lookahead, 3);
        assert_eq!(c.reuse_threshold_cells, 5.0);
        assert_eq!(c.snap_radius, 10);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let bad = [
            PathfinderConfig {
                smoothing_lookahead: 0,
                ..Default::default()
            },
            PathfinderConfig {
                reuse_threshold_cells: f32::NAN,
                ..Default::default()
            },
            PathfinderConfig {
                snap_radius: -1,
                ..Default::default()
            },
            PathfinderConfig {
                max_iterations: Some(0),
                ..Default::default()
            },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(PathError::InvalidConfig(_))));
        }
    }

    #[test]
    fn zero_capacity_is_allowed() {
        let c = PathfinderConfig {
            cache_capacity: 0,
            ..Default::default()
        };
        assert!(c.validate().is_ok());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let c: PathfinderConfig = serde_json::from_str(r#"{"cache_capacity": 2}"#).unwrap();
        assert_eq!(c.cache_capacity, 2);
        assert_eq!(c.smoothing_lookahead, 3);
        assert_eq!(c.max_iterations, None);
    }
}
