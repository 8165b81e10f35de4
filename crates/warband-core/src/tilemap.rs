//! An in-memory [`GameMap`] backed by a dense tile array.
//!
//! [`TileMap`] is what tests and demos use, and what a game can use directly
//! if it does not keep its own spatial index. Maps can be built cell by cell
//! or parsed from ASCII art with [`TileMap::from_ascii`].

use crate::geom::{Point, Range};
use crate::map::{Building, GameMap, Owner, ResourceNode, UnitId};

/// Terrain cost multiplier used for `~` cells in ASCII maps.
pub const ROUGH_FACTOR: f32 = 2.0;

/// The owner of `W`, `G` and `g` cells in ASCII maps.
pub const ASCII_HOME: Owner = Owner(1);

/// The owner of `w` and `B` cells in ASCII maps.
pub const ASCII_RIVAL: Owner = Owner(2);

#[derive(Debug, Clone)]
struct Tile {
    walkable: bool,
    factor: f32,
    buildings: Vec<Building>,
    resources: Vec<ResourceNode>,
    units: Vec<UnitId>,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            walkable: true,
            factor: 1.0,
            buildings: Vec::new(),
            resources: Vec::new(),
            units: Vec::new(),
        }
    }
}

/// A rectangular map of tiles with terrain, buildings, resources and units.
#[derive(Debug, Clone)]
pub struct TileMap {
    tiles: Vec<Tile>,
    bounds: Range,
    cell_size: f32,
}

impl TileMap {
    /// Create an open, walkable map of `width` × `height` cells.
    pub fn new(width: i32, height: i32, cell_size: f32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            tiles: vec![Tile::default(); bounds.len()],
            bounds,
            cell_size,
        }
    }

    /// Parse a map from ASCII art.
    ///
    /// | char | meaning |
    /// |---|---|
    /// | `.` | open ground |
    /// | `#` | unwalkable terrain |
    /// | `~` | rough ground ([`ROUGH_FACTOR`]) |
    /// | `B` | structure owned by [`ASCII_RIVAL`] |
    /// | `W` / `w` | wall owned by [`ASCII_HOME`] / [`ASCII_RIVAL`] |
    /// | `G` / `g` | closed / open gate owned by [`ASCII_HOME`] |
    /// | `R` | resource node |
    /// | `U` | unit (ids assigned in reading order from 1) |
    ///
    /// Leading and trailing whitespace of the whole string is trimmed, and
    /// every line must have the same width.
    pub fn from_ascii(s: &str, cell_size: f32) -> Result<Self, MapParseError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim_end).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != width) {
            return Err(MapParseError::InconsistentWidth {
                expected: width,
            });
        }

        let mut map = Self::new(width as i32, lines.len() as i32, cell_size);
        let mut next_unit = 1;
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    '.' => {}
                    '#' => map.set_walkable(p, false),
                    '~' => map.set_movement_factor(p, ROUGH_FACTOR),
                    'B' => map.add_building(p, Building::structure(ASCII_RIVAL)),
                    'W' => map.add_building(p, Building::wall(ASCII_HOME)),
                    'w' => map.add_building(p, Building::wall(ASCII_RIVAL)),
                    'G' => map.add_building(p, Building::gate(ASCII_HOME, false)),
                    'g' => map.add_building(p, Building::gate(ASCII_HOME, true)),
                    'R' => map.add_resource(p, ResourceNode { amount: 100 }),
                    'U' => {
                        map.add_unit(p, UnitId(next_unit));
                        next_unit += 1;
                    }
                    _ => return Err(MapParseError::InvalidChar { ch, pos: p }),
                }
            }
        }
        Ok(map)
    }

    /// Width in cells.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height in cells.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    fn tile(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, p: Point) -> Option<&mut Tile> {
        self.index(p).map(|i| &mut self.tiles[i])
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.bounds.width() + p.x) as usize)
    }

    /// Set terrain walkability. Does nothing if out of bounds.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(t) = self.tile_mut(p) {
            t.walkable = walkable;
        }
    }

    /// Set the terrain cost multiplier. Negative factors are stored as 0.
    pub fn set_movement_factor(&mut self, p: Point, factor: f32) {
        if let Some(t) = self.tile_mut(p) {
            t.factor = factor.max(0.0);
        }
    }

    pub fn add_building(&mut self, p: Point, b: Building) {
        if let Some(t) = self.tile_mut(p) {
            t.buildings.push(b);
        }
    }

    /// Fill every cell of `area` with `b`.
    pub fn add_building_area(&mut self, area: Range, b: Building) {
        for p in area.intersect(self.bounds) {
            self.add_building(p, b);
        }
    }

    pub fn clear_buildings(&mut self, p: Point) {
        if let Some(t) = self.tile_mut(p) {
            t.buildings.clear();
        }
    }

    /// Open or close every gate on `p`.
    pub fn set_gates_open(&mut self, p: Point, open: bool) {
        if let Some(t) = self.tile_mut(p) {
            for b in t.buildings.iter_mut().filter(|b| b.is_gate()) {
                b.open = open;
            }
        }
    }

    pub fn add_resource(&mut self, p: Point, r: ResourceNode) {
        if let Some(t) = self.tile_mut(p) {
            t.resources.push(r);
        }
    }

    pub fn clear_resources(&mut self, p: Point) {
        if let Some(t) = self.tile_mut(p) {
            t.resources.clear();
        }
    }

    pub fn add_unit(&mut self, p: Point, id: UnitId) {
        if let Some(t) = self.tile_mut(p) {
            t.units.push(id);
        }
    }

    /// Remove `id` from `p`. Returns whether it was there.
    pub fn remove_unit(&mut self, p: Point, id: UnitId) -> bool {
        let Some(t) = self.tile_mut(p) else {
            return false;
        };
        let before = t.units.len();
        t.units.retain(|&u| u != id);
        t.units.len() != before
    }

    /// Move `id` from `from` to `to`.
    pub fn move_unit(&mut self, id: UnitId, from: Point, to: Point) {
        if self.remove_unit(from, id) {
            self.add_unit(to, id);
        }
    }
}

impl GameMap for TileMap {
    fn bounds(&self) -> Range {
        self.bounds
    }

    fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn is_walkable(&self, p: Point) -> bool {
        self.tile(p).is_some_and(|t| t.walkable)
    }

    fn movement_factor(&self, p: Point) -> f32 {
        self.tile(p).map_or(1.0, |t| t.factor)
    }

    fn buildings_at(&self, p: Point) -> &[Building] {
        match self.tile(p) {
            Some(t) => &t.buildings,
            None => &[],
        }
    }

    fn resources_at(&self, p: Point) -> &[ResourceNode] {
        match self.tile(p) {
            Some(t) => &t.resources,
            None => &[],
        }
    }

    fn units_at(&self, p: Point) -> &[UnitId] {
        match self.tile(p) {
            Some(t) => &t.units,
            None => &[],
        }
    }
}

/// Errors that can occur when parsing an ASCII map.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapParseError {
    /// Lines have inconsistent widths.
    #[error("map lines must all be {expected} cells wide")]
    InconsistentWidth { expected: usize },
    /// A character outside the legend was found.
    #[error("map contains invalid char \u{201c}{ch}\u{201d} at {pos}")]
    InvalidChar { ch: char, pos: Point },
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEEP: &str = "
.....
.#W~.
.BgG.
.RU..";

    #[test]
    fn parse_legend() {
        let m = TileMap::from_ascii(KEEP, 16.0).unwrap();
        assert_eq!(m.bounds(), Range::new(0, 0, 5, 4));
        assert_eq!(m.cell_size(), 16.0);
        assert!(m.is_walkable(Point::new(0, 0)));
        assert!(!m.is_walkable(Point::new(1, 1)));
        assert_eq!(m.buildings_at(Point::new(2, 1)), &[Building::wall(ASCII_HOME)]);
        assert_eq!(m.movement_factor(Point::new(3, 1)), ROUGH_FACTOR);
        assert_eq!(m.buildings_at(Point::new(1, 2)), &[Building::structure(ASCII_RIVAL)]);
        assert!(m.buildings_at(Point::new(2, 2))[0].open);
        assert!(!m.buildings_at(Point::new(3, 2))[0].open);
        assert_eq!(m.resources_at(Point::new(1, 3)).len(), 1);
        assert_eq!(m.units_at(Point::new(2, 3)), &[UnitId(1)]);
    }

    #[test]
    fn out_of_bounds_queries_are_empty() {
        let m = TileMap::new(3, 3, 10.0);
        let out = Point::new(5, -1);
        assert!(!m.is_in_bounds(out));
        assert!(!m.is_walkable(out));
        assert!(m.buildings_at(out).is_empty());
        assert!(m.units_at(out).is_empty());
    }

    #[test]
    fn inconsistent_width_error() {
        let err = TileMap::from_ascii("...\n....", 1.0).unwrap_err();
        assert_eq!(err, MapParseError::InconsistentWidth { expected: 3 });
    }

    #[test]
    fn invalid_char_error() {
        let err = TileMap::from_ascii("..\n.x", 1.0).unwrap_err();
        assert_eq!(
            err,
            MapParseError::InvalidChar {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn units_move_between_cells() {
        let mut m = TileMap::new(4, 4, 1.0);
        let a = Point::new(0, 0);
        let b = Point::new(3, 3);
        m.add_unit(a, UnitId(7));
        m.move_unit(UnitId(7), a, b);
        assert!(m.units_at(a).is_empty());
        assert_eq!(m.units_at(b), &[UnitId(7)]);
        assert!(!m.remove_unit(a, UnitId(7)));
    }

    #[test]
    fn gates_can_be_toggled() {
        let mut m = TileMap::new(2, 1, 1.0);
        let p = Point::new(1, 0);
        m.add_building(p, Building::gate(Owner(3), false));
        m.set_gates_open(p, true);
        assert!(m.buildings_at(p)[0].open);
    }

    #[test]
    fn building_area_is_clipped_to_map() {
        let mut m = TileMap::new(4, 4, 1.0);
        m.add_building_area(Range::new(2, 2, 8, 8), Building::structure(Owner(1)));
        assert_eq!(m.buildings_at(Point::new(3, 3)).len(), 1);
        assert!(m.buildings_at(Point::new(1, 1)).is_empty());
    }
}
