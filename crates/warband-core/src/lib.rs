//! Grid geometry and map queries for RTS pathfinding.
//!
//! This crate provides the foundational types shared by the *warband*
//! crates: integer grid cells and rectangles, continuous world positions,
//! the [`GameMap`] trait through which the pathfinder reads terrain and
//! entities, and [`TileMap`], a ready-made in-memory map.

pub mod geom;
pub mod map;
pub mod tilemap;

pub use geom::{Point, Range, WorldPoint};
pub use map::{Building, BuildingKind, GameMap, Owner, ResourceNode, UnitId};
pub use tilemap::{MapParseError, TileMap};
