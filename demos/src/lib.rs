//! A small skirmish scenario shared by the demo binaries.
//!
//! Demonstrates: random map generation, plain and unit-avoiding path
//! requests, path reuse after drift, formation routing, the route cache
//! and engine statistics.

use rand::{Rng, SeedableRng};
use warband_core::{Building, GameMap, Owner, Point, Range, ResourceNode, TileMap, UnitId, WorldPoint};
use warband_paths::{
    Facing, Formation, FormationMember, GridMapper, PathError, PathfindOptions, Pathfinder,
    PathfinderConfig, Stats, line_cells,
};

pub const WIDTH: i32 = 48;
pub const HEIGHT: i32 = 20;
pub const CELL_SIZE: f32 = 16.0;

pub const HOME: Owner = Owner(1);
pub const RIVAL: Owner = Owner(2);

// ---------------------------------------------------------------------------
// Map generation
// ---------------------------------------------------------------------------

/// Build a battlefield: scattered rocks and rough ground, a home palisade
/// with a gate, a rival keep, a few resource nodes and some idle units.
///
/// A three-cell-wide road runs along the top edge and down the right edge,
/// so the camp in the top-left corner always reaches the far corner.
pub fn generate_map(seed: u64) -> TileMap {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut map = TileMap::new(WIDTH, HEIGHT, CELL_SIZE);

    for p in map.bounds() {
        match rng.random_range(0..100) {
            0..8 => map.set_walkable(p, false),
            8..16 => map.set_movement_factor(p, 2.0),
            _ => {}
        }
    }

    // Home palisade: a wall column with a gate in the middle.
    for p in Range::new(14, 3, 15, HEIGHT - 2) {
        map.set_walkable(p, true);
        if p.y == HEIGHT / 2 {
            map.add_building(p, Building::gate(HOME, true));
        } else {
            map.add_building(p, Building::wall(HOME));
        }
    }

    // Rival keep.
    map.add_building_area(Range::new(34, 6, 39, 12), Building::structure(RIVAL));

    for _ in 0..6 {
        let p = Point::new(rng.random_range(0..WIDTH), rng.random_range(0..HEIGHT));
        map.add_resource(p, ResourceNode { amount: 250 });
    }

    for p in road() {
        map.set_walkable(p, true);
        map.set_movement_factor(p, 1.0);
        map.clear_buildings(p);
        map.clear_resources(p);
    }

    let mut id = 1;
    while id <= 8 {
        let p = Point::new(rng.random_range(20..WIDTH), rng.random_range(0..HEIGHT));
        if on_road(p) {
            continue;
        }
        map.add_unit(p, UnitId(id));
        id += 1;
    }
    map
}

fn road() -> impl Iterator<Item = Point> {
    Range::new(0, 0, WIDTH, 3)
        .iter()
        .chain(Range::new(WIDTH - 3, 3, WIDTH, HEIGHT).iter())
}

fn on_road(p: Point) -> bool {
    p.y < 3 || p.x >= WIDTH - 3
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// One labelled result of the scenario.
pub struct Outcome {
    pub label: String,
    pub path: Vec<WorldPoint>,
    pub facings: Vec<Facing>,
}

pub struct Skirmish {
    pf: Pathfinder<TileMap>,
    rng: rand::rngs::StdRng,
}

impl Skirmish {
    pub fn new(seed: u64) -> Result<Self, PathError> {
        let pf = Pathfinder::new(generate_map(seed), PathfinderConfig::default())?;
        Ok(Self {
            pf,
            rng: rand::rngs::StdRng::seed_from_u64(seed.wrapping_add(1)),
        })
    }

    pub fn mapper(&self) -> GridMapper {
        self.pf.mapper()
    }

    pub fn stats(&self) -> Stats {
        self.pf.stats()
    }

    /// Issue every kind of request once and collect the results.
    pub fn run(&mut self) -> Result<Vec<Outcome>, PathError> {
        let mapper = self.pf.mapper();
        let camp = mapper.grid_to_world(Point::new(1, 1));
        let far_corner = mapper.grid_to_world(Point::new(WIDTH - 2, HEIGHT - 2));
        let keep = mapper.grid_to_world(Point::new(36, 9));
        let home = PathfindOptions::default().with_owner(HOME);
        let mut outcomes = Vec::new();

        let path = self.pf.find_path(camp, far_corner, &home)?;
        outcomes.push(Outcome::plain("camp to far corner", path.clone()));

        // Same request again: served from the cache.
        let again = self.pf.find_path(camp, far_corner, &home)?;
        outcomes.push(Outcome::plain("camp to far corner (cached)", again));

        let stranger = PathfindOptions::default().with_owner(RIVAL);
        let path = self.pf.find_path(camp, far_corner, &stranger)?;
        outcomes.push(Outcome::plain("rival scout, home walls block it", path));

        let path = self.pf.find_path(camp, keep, &home)?;
        outcomes.push(Outcome::plain("march on the keep (snapped)", path));

        let path = self.pf.find_path_avoiding_units(camp, far_corner, &home)?;
        outcomes.push(Outcome::plain("avoiding units", path.clone()));

        // A unit knocked a little off its route picks it back up.
        let drifted = self.jitter(path[path.len() / 2]);
        let reused = self
            .pf
            .try_reuse_existing_path(drifted, far_corner, &path, &home)?;
        match reused {
            Some(p) => outcomes.push(Outcome::plain("rejoined after drift", p)),
            None => outcomes.push(Outcome::plain("drifted too far, no reuse", vec![drifted])),
        }

        let squad = Formation::new(
            [(1, 1), (2, 1), (1, 2), (2, 2)]
                .iter()
                .map(|&(x, y)| FormationMember {
                    position: mapper.grid_to_world(Point::new(x, y)),
                    size: CELL_SIZE * 0.6,
                })
                .collect(),
        );
        if let Some(plan) = self.pf.find_formation_path(&squad, far_corner, &home)? {
            outcomes.push(Outcome {
                label: "squad in formation".to_string(),
                path: plan.path,
                facings: plan.facings,
            });
        }
        Ok(outcomes)
    }

    /// Render the map with `path` drawn over it.
    pub fn render(&self, path: &[WorldPoint]) -> String {
        render(self.pf.map(), &self.pf.mapper(), path)
    }

    fn jitter(&mut self, p: WorldPoint) -> WorldPoint {
        let dx = self.rng.random_range(-CELL_SIZE..CELL_SIZE);
        let dy = self.rng.random_range(-CELL_SIZE..CELL_SIZE);
        p + WorldPoint::new(dx, dy)
    }
}

impl Outcome {
    fn plain(label: &str, path: Vec<WorldPoint>) -> Self {
        Self {
            label: label.to_string(),
            path,
            facings: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// ASCII rendering of `map`. Waypoints are `@`, the straight legs between
/// them `*`.
pub fn render<M: GameMap>(map: &M, mapper: &GridMapper, path: &[WorldPoint]) -> String {
    let bounds = map.bounds();
    let mut rows: Vec<Vec<char>> = (bounds.min.y..bounds.max.y)
        .map(|y| {
            (bounds.min.x..bounds.max.x)
                .map(|x| glyph(map, Point::new(x, y)))
                .collect()
        })
        .collect();

    let cells: Vec<Point> = path.iter().map(|&p| mapper.world_to_grid(p)).collect();
    let mut mark = |p: Point, ch: char| {
        if bounds.contains(p) {
            rows[(p.y - bounds.min.y) as usize][(p.x - bounds.min.x) as usize] = ch;
        }
    };
    for w in cells.windows(2) {
        for p in line_cells(w[0], w[1]) {
            mark(p, '*');
        }
    }
    for &p in &cells {
        mark(p, '@');
    }

    let mut out = String::with_capacity(rows.len() * (rows.first().map_or(0, Vec::len) + 1));
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn glyph<M: GameMap>(map: &M, p: Point) -> char {
    if !map.is_walkable(p) {
        return '#';
    }
    if let Some(b) = map.buildings_at(p).first() {
        return match (b.is_gate(), b.open) {
            (true, true) => 'g',
            (true, false) => 'G',
            _ if b.owner == HOME => 'W',
            _ => 'B',
        };
    }
    if !map.resources_at(p).is_empty() {
        return 'R';
    }
    if !map.units_at(p).is_empty() {
        return 'U';
    }
    if map.movement_factor(p) > 1.0 { '~' } else { '.' }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_map_is_deterministic() {
        let a = render(&generate_map(7), &GridMapper::new(CELL_SIZE), &[]);
        let b = render(&generate_map(7), &GridMapper::new(CELL_SIZE), &[]);
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), HEIGHT as usize);
        assert!(a.lines().all(|l| l.chars().count() == WIDTH as usize));
    }

    #[test]
    fn scenario_runs_and_uses_the_cache() {
        let mut s = Skirmish::new(42).unwrap();
        let outcomes = s.run().unwrap();
        assert!(outcomes.len() >= 6);
        assert!(outcomes[0].path.len() > 1);
        assert_eq!(outcomes[0].path, outcomes[1].path);
        assert!(s.stats().cache_hits >= 1);
        for o in &outcomes {
            assert!(!o.path.is_empty(), "{}", o.label);
        }
    }

    #[test]
    fn render_marks_path() {
        let map = TileMap::new(5, 1, 10.0);
        let mapper = GridMapper::new(10.0);
        let path = [WorldPoint::new(5.0, 5.0), WorldPoint::new(45.0, 5.0)];
        assert_eq!(render(&map, &mapper, &path), "@***@\n");
    }
}
