//! The map collaborator consumed by pathfinding.
//!
//! The engine never owns terrain or entities. It reads them through
//! [`GameMap`], which a game implements over whatever storage it uses.

use crate::geom::{Point, Range};

/// Player identity. `Owner(0)` is the default, unaffiliated owner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Owner(pub u32);

/// What sort of building occupies a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    /// Houses, barracks, town centres and anything else solid.
    Structure,
    /// Wall segment.
    Wall,
    /// Gate set into a wall; passable while open.
    Gate,
}

/// A building footprint cell as seen by the pathfinder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub kind: BuildingKind,
    pub owner: Owner,
    pub open: bool,
}

impl Building {
    /// A solid structure.
    pub const fn structure(owner: Owner) -> Self {
        Self {
            kind: BuildingKind::Structure,
            owner,
            open: false,
        }
    }

    /// A wall segment.
    pub const fn wall(owner: Owner) -> Self {
        Self {
            kind: BuildingKind::Wall,
            owner,
            open: false,
        }
    }

    /// A gate, open or closed.
    pub const fn gate(owner: Owner, open: bool) -> Self {
        Self {
            kind: BuildingKind::Gate,
            owner,
            open,
        }
    }

    #[inline]
    pub fn is_gate(&self) -> bool {
        self.kind == BuildingKind::Gate
    }

    /// Whether this building stops a unit belonging to `mover`.
    ///
    /// Own walls never block their owner and open gates block nobody.
    /// Closed gates block everyone, owner included.
    #[inline]
    pub fn blocks(&self, mover: Owner) -> bool {
        match self.kind {
            BuildingKind::Structure => true,
            BuildingKind::Wall => self.owner != mover,
            BuildingKind::Gate => !self.open,
        }
    }
}

/// A harvestable resource node (tree, gold mine, berry bush...).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceNode {
    pub amount: u32,
}

/// Identity of a unit standing on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

/// Grid queries the pathfinder needs from the game map.
///
/// Implementations must be free of side effects: the pathfinder calls these
/// many times per search.
pub trait GameMap {
    /// The cells covered by the map.
    fn bounds(&self) -> Range;

    /// Side length of one grid cell in world units. Must be > 0.
    fn cell_size(&self) -> f32;

    /// Whether the underlying terrain can be walked on.
    fn is_walkable(&self, p: Point) -> bool;

    /// Terrain cost multiplier for entering `p`. `1.0` is normal ground.
    fn movement_factor(&self, p: Point) -> f32;

    /// Buildings occupying `p`.
    fn buildings_at(&self, p: Point) -> &[Building];

    /// Resource nodes occupying `p`.
    fn resources_at(&self, p: Point) -> &[ResourceNode];

    /// Units standing on `p`.
    fn units_at(&self, p: Point) -> &[UnitId];

    #[inline]
    fn is_in_bounds(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}

impl<M: GameMap + ?Sized> GameMap for &M {
    fn bounds(&self) -> Range {
        (**self).bounds()
    }

    fn cell_size(&self) -> f32 {
        (**self).cell_size()
    }

    fn is_walkable(&self, p: Point) -> bool {
        (**self).is_walkable(p)
    }

    fn movement_factor(&self, p: Point) -> f32 {
        (**self).movement_factor(p)
    }

    fn buildings_at(&self, p: Point) -> &[Building] {
        (**self).buildings_at(p)
    }

    fn resources_at(&self, p: Point) -> &[ResourceNode] {
        (**self).resources_at(p)
    }

    fn units_at(&self, p: Point) -> &[UnitId] {
        (**self).units_at(p)
    }

    fn is_in_bounds(&self, p: Point) -> bool {
        (**self).is_in_bounds(p)
    }
}
