//! Moving a group of units as one body.

use warband_core::{GameMap, WorldPoint};

use crate::error::Result;
use crate::options::{PathfindOptions, check_finite};
use crate::pathfinder::Pathfinder;

/// One unit of a formation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormationMember {
    pub position: WorldPoint,
    /// Unit diameter in world units.
    pub size: f32,
}

/// A group of units that travels together.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formation {
    pub members: Vec<FormationMember>,
}

impl Formation {
    pub fn new(members: Vec<FormationMember>) -> Self {
        Self { members }
    }

    /// Mean member position, or `None` for an empty formation.
    pub fn centroid(&self) -> Option<WorldPoint> {
        if self.members.is_empty() {
            return None;
        }
        let sum = self
            .members
            .iter()
            .fold(WorldPoint::new(0.0, 0.0), |acc, m| acc + m.position);
        Some(sum / self.members.len() as f32)
    }

    /// Largest distance from the centroid to a member position.
    pub fn spread(&self) -> f32 {
        let Some(c) = self.centroid() else {
            return 0.0;
        };
        self.members
            .iter()
            .map(|m| m.position.distance(c))
            .fold(0.0, f32::max)
    }

    /// Size of the largest member, `0.0` when empty.
    pub fn max_unit_size(&self) -> f32 {
        self.members.iter().map(|m| m.size).fold(0.0, f32::max)
    }
}

/// Cardinal direction a formation faces. `Down` is towards growing `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Facing along the dominant axis of `delta`. Horizontal wins ties;
    /// a zero delta has no facing.
    pub fn from_delta(delta: WorldPoint) -> Option<Facing> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        let facing = if delta.x.abs() >= delta.y.abs() {
            if delta.x > 0.0 { Facing::Right } else { Facing::Left }
        } else if delta.y > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        };
        Some(facing)
    }
}

/// The route for a formation's centroid and the facing at each waypoint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormationPath {
    pub path: Vec<WorldPoint>,
    /// Same length as `path`. Entry `i` faces from waypoint `i` to `i + 1`;
    /// the last entry repeats the final facing.
    pub facings: Vec<Facing>,
}

/// Facings for consecutive waypoints. Zero-length segments keep the
/// previous facing, starting from [`Facing::Down`].
pub fn facings_along(path: &[WorldPoint]) -> Vec<Facing> {
    let mut facings = Vec::with_capacity(path.len());
    let mut current = Facing::default();
    for w in path.windows(2) {
        current = Facing::from_delta(w[1] - w[0]).unwrap_or(current);
        facings.push(current);
    }
    if !path.is_empty() {
        facings.push(current);
    }
    facings
}

impl<M: GameMap> Pathfinder<M> {
    /// Route a whole formation to `target`.
    ///
    /// The centroid is pathed with the unit size raised to the largest
    /// member and the pathing radius widened by the formation's span, so
    /// the route keeps room for the group. `Ok(None)` for an empty formation
    /// or an unreachable target.
    pub fn find_formation_path(
        &mut self,
        formation: &Formation,
        target: WorldPoint,
        opts: &PathfindOptions,
    ) -> Result<Option<FormationPath>> {
        let Some(centre) = formation.centroid() else {
            return Ok(None);
        };
        check_finite("formation centroid", centre)?;

        let group = opts
            .with_unit_size(opts.unit_size.max(formation.max_unit_size()))
            .with_pathing_radius(opts.pathing_radius + 2.0 * formation.spread());
        let path = self.find_path(centre, target, &group)?;
        if path.len() <= 1 {
            log::debug!(
                "formation of {} at {centre} cannot reach {target}",
                formation.members.len()
            );
            return Ok(None);
        }
        let facings = facings_along(&path);
        Ok(Some(FormationPath { path, facings }))
    }
}

#[cfg(test)]
mod tests {
    use warband_core::{Point, TileMap};

    use super::*;
    use crate::config::PathfinderConfig;
    use crate::error::PathError;
    use crate::passability::Passability;

    fn wp(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn member(x: f32, y: f32) -> FormationMember {
        FormationMember {
            position: wp(x, y),
            size: 1.0,
        }
    }

    #[test]
    fn centroid_and_spread() {
        let f = Formation::new(vec![member(0.0, 0.0), member(4.0, 0.0), member(2.0, 6.0)]);
        assert_eq!(f.centroid(), Some(wp(2.0, 2.0)));
        assert_eq!(f.spread(), 4.0);
        assert_eq!(f.max_unit_size(), 1.0);

        let empty = Formation::default();
        assert_eq!(empty.centroid(), None);
        assert_eq!(empty.spread(), 0.0);
    }

    #[test]
    fn facing_from_dominant_axis() {
        assert_eq!(Facing::from_delta(wp(3.0, 1.0)), Some(Facing::Right));
        assert_eq!(Facing::from_delta(wp(-3.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_delta(wp(1.0, 3.0)), Some(Facing::Down));
        assert_eq!(Facing::from_delta(wp(1.0, -3.0)), Some(Facing::Up));
        assert_eq!(Facing::from_delta(wp(2.0, -2.0)), Some(Facing::Right));
        assert_eq!(Facing::from_delta(wp(0.0, 0.0)), None);
    }

    #[test]
    fn facings_repeat_last_segment() {
        let path = [wp(0.0, 0.0), wp(10.0, 0.0), wp(10.0, 0.0), wp(10.0, -10.0)];
        assert_eq!(
            facings_along(&path),
            vec![Facing::Right, Facing::Right, Facing::Up, Facing::Up]
        );
        assert_eq!(facings_along(&[wp(1.0, 1.0)]), vec![Facing::Down]);
        assert!(facings_along(&[]).is_empty());
    }

    #[test]
    fn formation_routes_around_narrow_gap() {
        // A one-cell gap at the top and a three-cell gap at the bottom.
        let map = TileMap::from_ascii(
            "
.....#.....
.....#.....
.....#.....
.....#.....
...........
.....#.....
...........
...........
...........
.....#.....
.....#.....",
            10.0,
        )
        .unwrap();
        let mut pf = Pathfinder::new(map, PathfinderConfig::default()).unwrap();
        let formation = Formation::new(vec![
            member(15.0, 15.0),
            member(25.0, 15.0),
            member(15.0, 25.0),
            member(25.0, 25.0),
        ]);
        let target = wp(95.0, 15.0);
        let plan = pf
            .find_formation_path(&formation, target, &PathfindOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(plan.path.first(), formation.centroid().as_ref());
        assert_eq!(plan.path.last(), Some(&target));
        assert_eq!(plan.facings.len(), plan.path.len());

        // Every intermediate waypoint leaves room for the whole group.
        let group = PathfindOptions::default().with_pathing_radius(2.0 * formation.spread());
        let pass = Passability::new(pf.map(), &group);
        assert_eq!(pass.footprint_radius(), 1);
        let mapper = pf.mapper();
        for p in &plan.path[1..plan.path.len() - 1] {
            let cell = mapper.world_to_grid(*p);
            assert!(pass.is_passable(cell), "{cell} is too tight");
            assert_ne!(cell, Point::new(5, 4));
        }
    }

    #[test]
    fn single_member_matches_plain_path() {
        let map = TileMap::new(12, 12, 10.0);
        let mut pf = Pathfinder::new(map, PathfinderConfig::default()).unwrap();
        let formation = Formation::new(vec![member(5.0, 5.0)]);
        let opts = PathfindOptions::default();
        let plan = pf
            .find_formation_path(&formation, wp(115.0, 5.0), &opts)
            .unwrap()
            .unwrap();
        assert_eq!(plan.path, pf.find_path(wp(5.0, 5.0), wp(115.0, 5.0), &opts).unwrap());
        assert!(plan.facings.iter().all(|&f| f == Facing::Right));
    }

    #[test]
    fn empty_or_unreachable_is_none() {
        let map = TileMap::from_ascii(
            "
.......
....###
....#.#
....###",
            10.0,
        )
        .unwrap();
        let mut pf = Pathfinder::new(map, PathfinderConfig::default()).unwrap();
        let opts = PathfindOptions::default();
        assert_eq!(
            pf.find_formation_path(&Formation::default(), wp(5.0, 5.0), &opts)
                .unwrap(),
            None
        );
        let lone = Formation::new(vec![member(5.0, 5.0)]);
        assert_eq!(
            pf.find_formation_path(&lone, wp(55.0, 25.0), &opts).unwrap(),
            None
        );
    }

    #[test]
    fn rejects_non_finite_members() {
        let mut pf = Pathfinder::new(TileMap::new(4, 4, 10.0), PathfinderConfig::default()).unwrap();
        let f = Formation::new(vec![member(f32::NAN, 0.0)]);
        let err = pf
            .find_formation_path(&f, wp(1.0, 1.0), &PathfindOptions::default())
            .unwrap_err();
        assert!(matches!(err, PathError::NonFinite { .. }));
    }
}
