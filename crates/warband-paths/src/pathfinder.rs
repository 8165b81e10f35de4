use std::time::Instant;

use warband_core::{GameMap, Point, Range, WorldPoint};

use crate::astar::{SearchReport, SearchSpace, path_cost};
use crate::cache::{CacheKey, CachedRoute, PathCache};
use crate::config::PathfinderConfig;
use crate::distance::chebyshev;
use crate::error::{PathError, Result};
use crate::mapper::GridMapper;
use crate::options::{PathfindOptions, check_finite};
use crate::passability::Passability;
use crate::smoothing::{is_line_clear, post_process};
use crate::stats::{Counters, Stats};

/// The pathfinding engine for one map.
///
/// A `Pathfinder` owns its route cache, its search buffers and its
/// statistics, so several maps can run independent engines side by side.
/// `M` may be a map value or a reference to one, since `&M` is itself a
/// [`GameMap`].
///
/// The cache is not invalidated when the map changes: call
/// [`clear_cache`](Self::clear_cache) after edits that affect passability.
#[derive(Debug)]
pub struct Pathfinder<M: GameMap> {
    pub(crate) map: M,
    pub(crate) mapper: GridMapper,
    pub(crate) config: PathfinderConfig,
    cache: PathCache,
    search: SearchSpace,
    counters: Counters,
}

impl<M: GameMap> Pathfinder<M> {
    /// Create an engine for `map`. Fails if the config is out of range or
    /// the map has an unusable cell size.
    pub fn new(map: M, config: PathfinderConfig) -> Result<Self> {
        config.validate()?;
        let cell_size = map.cell_size();
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(PathError::InvalidCellSize(cell_size));
        }
        let mut search = SearchSpace::new();
        search.set_max_iterations(config.max_iterations);
        Ok(Self {
            map,
            mapper: GridMapper::new(cell_size),
            config,
            cache: PathCache::new(config.cache_capacity),
            search,
            counters: Counters::default(),
        })
    }

    /// The map this engine searches.
    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the map. Cached routes are kept.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// The validated engine configuration.
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// World/grid conversion for this map's cell size.
    pub fn mapper(&self) -> GridMapper {
        self.mapper
    }

    /// Counters of the last A* search run by this engine.
    pub fn last_search_report(&self) -> SearchReport {
        self.search.last_report()
    }

    /// Compute a path of world points from `start` to `end`.
    ///
    /// The result always begins at `start`. It ends at `end`, or at the
    /// centre of the nearest passable cell when `end` is blocked or off the
    /// map. A single-point path `[start]` means the target is unreachable.
    ///
    /// Only non-finite coordinates and invalid options are errors.
    pub fn find_path(
        &mut self,
        start: WorldPoint,
        end: WorldPoint,
        opts: &PathfindOptions,
    ) -> Result<Vec<WorldPoint>> {
        check_finite("start", start)?;
        check_finite("end", end)?;
        opts.validate()?;

        let bounds = self.map.bounds();
        if bounds.is_empty() {
            log::debug!("path request on an empty map");
            return Ok(vec![start]);
        }
        let start_cell = bounds.clamp(self.mapper.world_to_grid(start));
        let requested_cell = self.mapper.world_to_grid(end);
        let end_cell = bounds.clamp(requested_cell);
        let target = if end_cell == requested_cell {
            end
        } else {
            self.mapper.grid_to_world(end_cell)
        };

        let key = CacheKey::new(start_cell, end_cell, opts);
        if let Some(route) = self.cache.get(&key).cloned() {
            self.counters.record_hit();
            log::trace!("cache hit for {start_cell} -> {end_cell}");
            let end_point = route.target.unwrap_or(target);
            return Ok(self.finish(&route.waypoints, start, end_point, opts));
        }
        self.counters.record_miss();

        if start_cell.is_adjacent_or_same(end_cell) {
            log::trace!("{start_cell} -> {end_cell} is a single step");
            return Ok(vec![start, target]);
        }

        let (goal_cell, snapped) = if self.is_passable(end_cell, opts) {
            (end_cell, None)
        } else {
            match self.nearest_passable(end_cell, opts) {
                Some(cell) => {
                    log::debug!("target {end_cell} is blocked, snapping to {cell}");
                    (cell, Some(self.mapper.grid_to_world(cell)))
                }
                None => {
                    log::debug!(
                        "no passable cell within {} of {end_cell}",
                        self.config.snap_radius
                    );
                    return Ok(vec![start]);
                }
            }
        };

        let cells = self.run_search(start_cell, goal_cell, opts);
        if cells.is_empty() {
            log::debug!("{goal_cell} is unreachable from {start_cell}");
            return Ok(vec![start]);
        }
        let waypoints = self.mapper.cells_to_world(&cells);
        let end_point = snapped.unwrap_or(target);
        let path = self.finish(&waypoints, start, end_point, opts);

        if waypoints.len() > 2 {
            let evicted = self.cache.insert(
                key,
                CachedRoute {
                    waypoints,
                    target: snapped,
                },
            );
            if !evicted.is_empty() {
                log::debug!("evicted {} cached route(s)", evicted.len());
            }
        }
        Ok(path)
    }

    /// Like [`find_path`](Self::find_path) with units treated as obstacles,
    /// retrying with units ignored when that finds nothing.
    pub fn find_path_avoiding_units(
        &mut self,
        start: WorldPoint,
        end: WorldPoint,
        opts: &PathfindOptions,
    ) -> Result<Vec<WorldPoint>> {
        let path = self.find_path(start, end, &opts.with_ignore_units(false))?;
        if path.len() > 1 {
            return Ok(path);
        }
        log::debug!("no path around units from {start} to {end}, ignoring them");
        self.find_path(start, end, &opts.with_ignore_units(true))
    }

    /// Raw A* between two cells, without caching or post-processing. Empty
    /// when `end` cannot be reached.
    pub fn grid_path(&mut self, start: Point, end: Point, opts: &PathfindOptions) -> Vec<Point> {
        self.run_search(start, end, opts)
    }

    /// Whether a unit described by `opts` may stand on `cell`.
    pub fn is_passable(&self, cell: Point, opts: &PathfindOptions) -> bool {
        Passability::new(&self.map, opts).is_passable(cell)
    }

    /// Whether the straight grid line between two world points is clear.
    /// The cell holding `a` is not tested.
    pub fn is_line_clear(&self, a: WorldPoint, b: WorldPoint, opts: &PathfindOptions) -> bool {
        is_line_clear(&self.map, a, b, opts)
    }

    /// Movement cost of a grid path on this map.
    pub fn path_cost(&self, cells: &[Point]) -> f32 {
        path_cost(&self.map, cells)
    }

    /// Forget every cached route.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Snapshot of the search and cache counters.
    pub fn stats(&self) -> Stats {
        self.counters.snapshot(self.cache.len())
    }

    /// Zero the counters. Cached routes are kept.
    pub fn reset_stats(&mut self) {
        self.counters.reset();
    }

    fn run_search(&mut self, start: Point, end: Point, opts: &PathfindOptions) -> Vec<Point> {
        let began = Instant::now();
        let cells = self.search.a_star(&self.map, start, end, opts);
        self.counters.record_search(began.elapsed());
        let report = self.search.last_report();
        log::debug!(
            "A* {start} -> {end}: {} cells, {} expanded, {} generated",
            cells.len(),
            report.expanded,
            report.generated
        );
        cells
    }

    fn finish(
        &self,
        waypoints: &[WorldPoint],
        start: WorldPoint,
        end: WorldPoint,
        opts: &PathfindOptions,
    ) -> Vec<WorldPoint> {
        post_process(
            &self.map,
            waypoints,
            start,
            end,
            opts,
            self.config.smoothing_lookahead,
        )
    }

    /// The passable cell closest to `cell`, searching square rings of
    /// growing radius. Within a ring the Euclidean-nearest cell wins, then
    /// the first in row-major order.
    fn nearest_passable(&self, cell: Point, opts: &PathfindOptions) -> Option<Point> {
        let pass = Passability::new(&self.map, opts);
        (1..=self.config.snap_radius).find_map(|r| {
            Range::centered(cell, r)
                .iter()
                .filter(|&p| chebyshev(p, cell) == r && pass.is_passable(p))
                .min_by_key(|&p| {
                    let d = p - cell;
                    d.x * d.x + d.y * d.y
                })
        })
    }
}
