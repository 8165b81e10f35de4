use warband_core::{Owner, WorldPoint};

use crate::error::{PathError, Result};

/// Per-request pathfinding options.
///
/// Every field has a documented default (see [`Default`]). With the `serde`
/// feature, missing fields in a serialized document fall back to those
/// defaults instead of failing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfindOptions {
    /// Treat cells occupied by units as free. Default `false`.
    pub ignore_units: bool,
    /// Treat cells with resource nodes as free. Default `false`.
    pub ignore_resources: bool,
    /// Treat cells with buildings as free. Default `false`.
    pub ignore_buildings: bool,
    /// Allow the four diagonal steps. Default `true`.
    pub allow_diagonal: bool,
    /// Unit diameter in world units. Default `1.0`.
    pub unit_size: f32,
    /// Who is moving; own walls do not block. Default `Owner(0)`.
    pub owner: Owner,
    /// Extra clearance around the unit in world units. Default `0.0`.
    pub pathing_radius: f32,
}

impl Default for PathfindOptions {
    fn default() -> Self {
        Self {
            ignore_units: false,
            ignore_resources: false,
            ignore_buildings: false,
            allow_diagonal: true,
            unit_size: 1.0,
            owner: Owner(0),
            pathing_radius: 0.0,
        }
    }
}

impl PathfindOptions {
    pub fn with_ignore_units(mut self, v: bool) -> Self {
        self.ignore_units = v;
        self
    }

    pub fn with_ignore_resources(mut self, v: bool) -> Self {
        self.ignore_resources = v;
        self
    }

    pub fn with_ignore_buildings(mut self, v: bool) -> Self {
        self.ignore_buildings = v;
        self
    }

    pub fn with_diagonal(mut self, v: bool) -> Self {
        self.allow_diagonal = v;
        self
    }

    pub fn with_unit_size(mut self, size: f32) -> Self {
        self.unit_size = size;
        self
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_pathing_radius(mut self, radius: f32) -> Self {
        self.pathing_radius = radius;
        self
    }

    /// Reject sizes that would poison the footprint computation.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("unit_size", self.unit_size),
            ("pathing_radius", self.pathing_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PathError::InvalidOption { name, value });
            }
        }
        Ok(())
    }

    /// Half-width, in cells, of the square footprint a unit occupies.
    ///
    /// `0` means the unit fits in a single cell. The full footprint spans
    /// `ceil((unit_size + pathing_radius) / cell_size)` cells (at least one),
    /// centred on the unit's cell.
    pub fn footprint_radius(&self, cell_size: f32) -> i32 {
        let span = ((self.unit_size + self.pathing_radius) / cell_size)
            .ceil()
            .max(1.0);
        span as i32 / 2
    }
}

/// Reject NaN / infinite coordinates before they reach grid conversion.
pub(crate) fn check_finite(what: &'static str, p: WorldPoint) -> Result<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(PathError::NonFinite { what, x: p.x, y: p.y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = PathfindOptions::default();
        assert!(!o.ignore_units);
        assert!(!o.ignore_resources);
        assert!(!o.ignore_buildings);
        assert!(o.allow_diagonal);
        assert_eq!(o.unit_size, 1.0);
        assert_eq!(o.owner, Owner(0));
        assert_eq!(o.pathing_radius, 0.0);
    }

    #[test]
    fn builders_touch_one_field() {
        let o = PathfindOptions::default()
            .with_owner(Owner(3))
            .with_diagonal(false);
        assert_eq!(o.owner, Owner(3));
        assert!(!o.allow_diagonal);
        assert_eq!(o.unit_size, 1.0);
    }

    #[test]
    fn footprint_radius_from_sizes() {
        let o = PathfindOptions::default();
        assert_eq!(o.footprint_radius(20.0), 0);
        assert_eq!(o.with_unit_size(20.0).footprint_radius(20.0), 0);
        assert_eq!(o.with_unit_size(30.0).footprint_radius(20.0), 1);
        assert_eq!(
            o.with_unit_size(30.0)
                .with_pathing_radius(30.0)
                .footprint_radius(20.0),
            1
        );
        assert_eq!(o.with_unit_size(80.0).footprint_radius(20.0), 2);
        assert_eq!(o.with_unit_size(0.0).footprint_radius(20.0), 0);
    }

    #[test]
    fn validate_rejects_garbage_sizes() {
        assert!(PathfindOptions::default().validate().is_ok());
        let err = PathfindOptions::default()
            .with_unit_size(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            PathError::InvalidOption {
                name: "unit_size",
                ..
            }
        ));
        assert!(
            PathfindOptions::default()
                .with_pathing_radius(-1.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn check_finite_rejects_nan() {
        assert!(check_finite("start", WorldPoint::new(1.0, 2.0)).is_ok());
        let err = check_finite("end", WorldPoint::new(f32::NAN, 2.0)).unwrap_err();
        assert!(err.to_string().starts_with("end position is not finite"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_document_merges_over_defaults() {
        let o: PathfindOptions =
            serde_json::from_str(r#"{"ignore_units": true, "owner": 4}"#).unwrap();
        assert!(o.ignore_units);
        assert_eq!(o.owner, Owner(4));
        assert!(o.allow_diagonal);
        assert_eq!(o.unit_size, 1.0);
    }

    #[test]
    fn options_round_trip() {
        let o = PathfindOptions::default()
            .with_unit_size(12.5)
            .with_ignore_resources(true);
        let json = serde_json::to_string(&o).unwrap();
        let back: PathfindOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(o, back);
    }
}
