use warband_core::{GameMap, Point, Range};

use crate::options::PathfindOptions;

/// Answers whether a unit described by a [`PathfindOptions`] may stand on a
/// cell.
///
/// Borrowing only, so any number of independent searches can build their
/// own oracle over the same map.
pub struct Passability<'a, M: GameMap + ?Sized> {
    map: &'a M,
    opts: &'a PathfindOptions,
    footprint: i32,
}

impl<'a, M: GameMap + ?Sized> Passability<'a, M> {
    pub fn new(map: &'a M, opts: &'a PathfindOptions) -> Self {
        Self {
            map,
            opts,
            footprint: opts.footprint_radius(map.cell_size()),
        }
    }

    /// Half-width of the square footprint checked around each cell.
    #[inline]
    pub fn footprint_radius(&self) -> i32 {
        self.footprint
    }

    /// Checks, in order: bounds, terrain, buildings, resources, units, and
    /// then the static checks again over the rest of the footprint. Unit
    /// occupancy only matters on the centre cell.
    pub fn is_passable(&self, p: Point) -> bool {
        if !self.is_clear(p) {
            return false;
        }
        if !self.opts.ignore_units && !self.map.units_at(p).is_empty() {
            return false;
        }
        if self.footprint > 0 {
            return Range::centered(p, self.footprint)
                .iter()
                .filter(|&q| q != p)
                .all(|q| self.is_clear(q));
        }
        true
    }

    fn is_clear(&self, p: Point) -> bool {
        if !self.map.is_in_bounds(p) || !self.map.is_walkable(p) {
            return false;
        }
        if !self.opts.ignore_buildings
            && self
                .map
                .buildings_at(p)
                .iter()
                .any(|b| b.blocks(self.opts.owner))
        {
            return false;
        }
        self.opts.ignore_resources || self.map.resources_at(p).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warband_core::{Owner, TileMap};

    const MAP: &str = "
.....#.
.W.w...
.g.G...
.R.....
....U..
.......";

    fn map() -> TileMap {
        TileMap::from_ascii(MAP, 10.0).unwrap()
    }

    #[test]
    fn open_ground_and_bounds() {
        let m = map();
        let o = PathfindOptions::default();
        let pass = Passability::new(&m, &o);
        assert!(pass.is_passable(Point::new(0, 0)));
        assert!(!pass.is_passable(Point::new(5, 0)));
        assert!(!pass.is_passable(Point::new(-1, 0)));
        assert!(!pass.is_passable(Point::new(0, 6)));
    }

    #[test]
    fn walls_depend_on_owner() {
        let m = map();
        let home = PathfindOptions::default().with_owner(Owner(1));
        let rival = PathfindOptions::default().with_owner(Owner(2));
        assert!(Passability::new(&m, &home).is_passable(Point::new(1, 1)));
        assert!(!Passability::new(&m, &home).is_passable(Point::new(3, 1)));
        assert!(!Passability::new(&m, &rival).is_passable(Point::new(1, 1)));
        assert!(Passability::new(&m, &rival).is_passable(Point::new(3, 1)));
    }

    #[test]
    fn open_gates_pass_anyone_closed_gates_nobody() {
        let m = map();
        for owner in [Owner(0), Owner(1), Owner(2)] {
            let o = PathfindOptions::default().with_owner(owner);
            let pass = Passability::new(&m, &o);
            assert!(pass.is_passable(Point::new(1, 2)));
            assert!(!pass.is_passable(Point::new(3, 2)));
        }
    }

    #[test]
    fn ignore_flags() {
        let m = map();
        let o = PathfindOptions::default();
        let pass = Passability::new(&m, &o);
        assert!(!pass.is_passable(Point::new(1, 3)));
        assert!(!pass.is_passable(Point::new(4, 4)));
        assert!(!pass.is_passable(Point::new(3, 1)));

        let o = PathfindOptions::default()
            .with_ignore_resources(true)
            .with_ignore_units(true)
            .with_ignore_buildings(true);
        let pass = Passability::new(&m, &o);
        assert!(pass.is_passable(Point::new(1, 3)));
        assert!(pass.is_passable(Point::new(4, 4)));
        assert!(pass.is_passable(Point::new(3, 1)));
        assert!(pass.is_passable(Point::new(3, 2)));
        // Terrain is never ignored.
        assert!(!pass.is_passable(Point::new(5, 0)));
    }

    #[test]
    fn footprint_checks_neighbourhood_but_not_units() {
        let m = map();
        let big = PathfindOptions::default().with_unit_size(30.0);
        let pass = Passability::new(&m, &big);
        assert_eq!(pass.footprint_radius(), 1);
        // (4,1) is open but touches the rock at (5,0).
        assert!(!pass.is_passable(Point::new(4, 1)));
        // (5,4) has the unit at (4,4) next to it; only the centre cares.
        assert!(pass.is_passable(Point::new(5, 4)));
        // Footprint may not leave the map.
        assert!(!pass.is_passable(Point::new(0, 5)));
    }
}
