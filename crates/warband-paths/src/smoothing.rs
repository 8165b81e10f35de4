//! Path post-processing: line-of-sight smoothing and endpoint anchoring.

use warband_core::{GameMap, Point, WorldPoint};

use crate::mapper::GridMapper;
use crate::options::PathfindOptions;
use crate::passability::Passability;

/// Cells visited by an integer Bresenham line from `a` to `b`, both
/// included.
pub fn line_cells(a: Point, b: Point) -> Vec<Point> {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut p = a;
    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        cells.push(p);
        if p == b {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
    }
    cells
}

/// Whether every cell on the grid line between two world points passes
/// the passability oracle. The cell holding `a` is not tested: like the
/// A* start cell, it is where the mover already stands.
pub fn is_line_clear<M: GameMap + ?Sized>(
    map: &M,
    a: WorldPoint,
    b: WorldPoint,
    opts: &PathfindOptions,
) -> bool {
    let mapper = GridMapper::new(map.cell_size());
    let pass = Passability::new(map, opts);
    line_clear(&pass, mapper.world_to_grid(a), mapper.world_to_grid(b))
}

fn line_clear<M: GameMap + ?Sized>(pass: &Passability<'_, M>, a: Point, b: Point) -> bool {
    line_cells(a, b).into_iter().skip(1).all(|c| pass.is_passable(c))
}

/// Greedy line-of-sight shortcutting.
///
/// From each kept waypoint, looks up to `lookahead` points ahead and jumps
/// to the furthest one with a clear line, falling back to the next point.
/// The result is always a subsequence of `path` that keeps both ends.
pub fn smooth_path<M: GameMap + ?Sized>(
    map: &M,
    path: &[WorldPoint],
    opts: &PathfindOptions,
    lookahead: usize,
) -> Vec<WorldPoint> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mapper = GridMapper::new(map.cell_size());
    let pass = Passability::new(map, opts);
    let cells: Vec<Point> = path.iter().map(|&p| mapper.world_to_grid(p)).collect();
    let last = path.len() - 1;

    let mut out = vec![path[0]];
    let mut i = 0;
    while i < last {
        let far = (i + lookahead.max(1)).min(last);
        let next = (i + 2..=far)
            .rev()
            .find(|&j| line_clear(&pass, cells[i], cells[j]))
            .unwrap_or(i + 1);
        out.push(path[next]);
        i = next;
    }
    out
}

/// Turn a raw cell-centre path into the path handed to a unit.
///
/// An empty `raw` path means "stay put" and yields `[start]`. Otherwise the
/// exact `start` is prepended, long paths are smoothed, and the exact `end`
/// is appended unless the path already finishes there. A leading waypoint
/// equal to `start` is not repeated.
pub fn post_process<M: GameMap + ?Sized>(
    map: &M,
    raw: &[WorldPoint],
    start: WorldPoint,
    end: WorldPoint,
    opts: &PathfindOptions,
    lookahead: usize,
) -> Vec<WorldPoint> {
    if raw.is_empty() {
        return vec![start];
    }
    let body = if raw.len() > 2 {
        smooth_path(map, raw, opts, lookahead)
    } else {
        raw.to_vec()
    };
    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(start);
    out.extend(body.into_iter().skip_while(|&p| p == start));
    if out.last() != Some(&end) {
        out.push(end);
    }
    out
}
