//! Grid pathfinding for real-time strategy units.
//!
//! Units live in continuous world space; searches run on the map's square
//! grid. [`Pathfinder`] ties the pieces together for one map:
//!
//! - **A\*** over 8- or 4-connected cells with terrain cost factors
//!   ([`SearchSpace::a_star`])
//! - a **passability oracle** honouring buildings, ownership, resources,
//!   units and unit footprints ([`Passability`])
//! - **line-of-sight smoothing** that drops redundant waypoints
//!   ([`smooth_path`], [`post_process`])
//! - a bounded FIFO **route cache** ([`PathCache`])
//! - **path reuse** for units that drift off a route
//!   ([`Pathfinder::try_reuse_existing_path`])
//! - **formation routing** with per-waypoint facings
//!   ([`Pathfinder::find_formation_path`])
//!
//! Unreachable targets are not errors: they produce a single-point path at
//! the start. [`PathError`] only reports non-finite coordinates and invalid
//! options or configuration.
//!
//! # Example
//!
//! ```
//! use warband_core::{TileMap, WorldPoint};
//! use warband_paths::{PathfindOptions, Pathfinder, PathfinderConfig};
//!
//! let map = TileMap::from_ascii(
//!     "
//! ........
//! ...##...
//! ...##...
//! ........",
//!     16.0,
//! )
//! .unwrap();
//! let mut pf = Pathfinder::new(map, PathfinderConfig::default()).unwrap();
//! let start = WorldPoint::new(8.0, 24.0);
//! let end = WorldPoint::new(120.0, 24.0);
//! let path = pf.find_path(start, end, &PathfindOptions::default()).unwrap();
//! assert_eq!(path.first(), Some(&start));
//! assert_eq!(path.last(), Some(&end));
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for options, configuration,
//!   statistics and formation types.

mod astar;
mod cache;
mod config;
mod distance;
mod error;
mod formation;
mod mapper;
mod options;
mod passability;
mod pathfinder;
mod queue;
mod reuse;
mod smoothing;
mod stats;

pub use astar::{SearchReport, SearchSpace, path_cost};
pub use cache::{CacheKey, CachedRoute, PathCache};
pub use config::PathfinderConfig;
pub use distance::{
    DIAGONAL_COST, STRAIGHT_COST, TIE_BREAKER, chebyshev, heuristic, octile, step_cost,
};
pub use error::{PathError, Result};
pub use formation::{Facing, Formation, FormationMember, FormationPath, facings_along};
pub use mapper::GridMapper;
pub use options::PathfindOptions;
pub use passability::Passability;
pub use pathfinder::Pathfinder;
pub use queue::IndexedQueue;
pub use smoothing::{is_line_clear, line_cells, post_process, smooth_path};
pub use stats::Stats;
