use warband_core::{Point, WorldPoint};

/// Converts between world coordinates and grid cells for a fixed cell size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMapper {
    cell_size: f32,
}

impl GridMapper {
    /// Create a mapper. `cell_size` must be > 0.
    #[inline]
    pub const fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The cell containing `p`.
    #[inline]
    pub fn world_to_grid(&self, p: WorldPoint) -> Point {
        Point::new(
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    /// The centre of cell `c`.
    #[inline]
    pub fn grid_to_world(&self, c: Point) -> WorldPoint {
        WorldPoint::new(
            (c.x as f32 + 0.5) * self.cell_size,
            (c.y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Cell centres of a grid path, in order.
    pub fn cells_to_world(&self, cells: &[Point]) -> Vec<WorldPoint> {
        cells.iter().map(|&c| self.grid_to_world(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_grid_floors() {
        let m = GridMapper::new(20.0);
        assert_eq!(m.world_to_grid(WorldPoint::new(5.0, 5.0)), Point::new(0, 0));
        assert_eq!(m.world_to_grid(WorldPoint::new(205.0, 205.0)), Point::new(10, 10));
        assert_eq!(m.world_to_grid(WorldPoint::new(19.99, 20.0)), Point::new(0, 1));
        assert_eq!(m.world_to_grid(WorldPoint::new(-0.5, -20.5)), Point::new(-1, -2));
    }

    #[test]
    fn grid_to_world_is_cell_centre() {
        let m = GridMapper::new(20.0);
        assert_eq!(m.grid_to_world(Point::new(0, 0)), WorldPoint::new(10.0, 10.0));
        assert_eq!(m.grid_to_world(Point::new(9, 3)), WorldPoint::new(190.0, 70.0));
    }

    #[test]
    fn centre_maps_back_to_its_cell() {
        let m = GridMapper::new(7.5);
        for c in [Point::new(0, 0), Point::new(3, 11), Point::new(-4, 2)] {
            assert_eq!(m.world_to_grid(m.grid_to_world(c)), c);
        }
    }
}
