use warband_core::Point;

/// Cost of one cardinal step on normal terrain.
pub const STRAIGHT_COST: f32 = 10.0;

/// Cost of one diagonal step on normal terrain (≈ 10·√2).
pub const DIAGONAL_COST: f32 = 14.0;

/// Per-cell bias added to the heuristic to prefer straighter paths among
/// equal-cost ones.
pub const TIE_BREAKER: f32 = 0.001;

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: the cost of the cheapest obstacle-free path on normal
/// terrain with 8-way movement.
#[inline]
pub fn octile(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = (dx.min(dy) as f32, dx.max(dy) as f32);
    STRAIGHT_COST * (hi - lo) + DIAGONAL_COST * lo
}

/// A* heuristic: [`octile`] plus a tie-breaking bias of
/// [`TIE_BREAKER`] per unit of Manhattan distance.
#[inline]
pub fn heuristic(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    octile(a, b) + TIE_BREAKER * (dx + dy) as f32
}

/// Base cost of stepping from `from` to the adjacent `to`, before the
/// terrain factor is applied.
#[inline]
pub fn step_cost(from: Point, to: Point) -> f32 {
    if from.x != to.x && from.y != to.y {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octile_mixes_straight_and_diagonal() {
        let o = Point::ZERO;
        assert_eq!(octile(o, Point::new(9, 9)), 14.0 * 9.0);
        assert_eq!(octile(o, Point::new(5, 0)), 50.0);
        assert_eq!(octile(o, Point::new(3, 5)), 14.0 * 3.0 + 10.0 * 2.0);
        assert_eq!(octile(Point::new(3, 5), o), octile(o, Point::new(3, 5)));
    }

    #[test]
    fn heuristic_bias_is_small() {
        let a = Point::new(1, 1);
        let b = Point::new(7, 3);
        let bias = heuristic(a, b) - octile(a, b);
        assert!((bias - 0.008).abs() < 1e-4);
        assert_eq!(heuristic(a, a), 0.0);
    }

    #[test]
    fn chebyshev_distance() {
        assert_eq!(chebyshev(Point::new(0, 0), Point::new(3, -7)), 7);
        assert_eq!(chebyshev(Point::new(2, 2), Point::new(2, 2)), 0);
    }

    #[test]
    fn step_costs() {
        let p = Point::new(4, 4);
        assert_eq!(step_cost(p, p + Point::new(1, 0)), STRAIGHT_COST);
        assert_eq!(step_cost(p, p + Point::new(0, -1)), STRAIGHT_COST);
        assert_eq!(step_cost(p, p + Point::new(-1, 1)), DIAGONAL_COST);
    }
}
