use std::collections::HashMap;

use warband_core::{GameMap, Point};

use crate::distance::{heuristic, step_cost};
use crate::options::PathfindOptions;
use crate::passability::Passability;
use crate::queue::IndexedQueue;

/// A cell reached by the current search. Lives in [`SearchSpace::nodes`];
/// `parent` is an index into the same arena.
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    pub(crate) cell: Point,
    pub(crate) g: f32,
    pub(crate) h: f32,
    pub(crate) f: f32,
    pub(crate) parent: Option<usize>,
    pub(crate) closed: bool,
}

/// Counters describing the most recent [`SearchSpace::a_star`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchReport {
    /// Nodes popped from the open queue.
    pub expanded: usize,
    /// Distinct cells that received a node.
    pub generated: usize,
    /// The search hit the iteration cap before finishing.
    pub truncated: bool,
}

/// Reusable A* state: a node arena, a cell → node side table and the open
/// queue.
///
/// The buffers are cleared, not freed, between searches, so repeated
/// queries stop allocating once they have warmed up.
#[derive(Debug, Default)]
pub struct SearchSpace {
    nodes: Vec<SearchNode>,
    index: HashMap<Point, usize>,
    open: IndexedQueue<usize>,
    max_iterations: Option<usize>,
    report: SearchReport,
}

impl SearchSpace {
    /// Create empty search buffers with no iteration cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort searches that pop more than `cap` nodes. `None` removes the cap.
    pub fn set_max_iterations(&mut self, cap: Option<usize>) {
        self.max_iterations = cap;
    }

    /// Counters of the most recent [`a_star`](Self::a_star) call.
    pub fn last_report(&self) -> SearchReport {
        self.report
    }

    /// Compute a least-cost grid path from `start` to `end`.
    ///
    /// Returns every cell from `start` to `end` inclusive, or an empty vector
    /// if `end` cannot be reached. Only neighbours are tested for
    /// passability; the start cell is where the unit already stands.
    pub fn a_star<M: GameMap + ?Sized>(
        &mut self,
        map: &M,
        start: Point,
        end: Point,
        opts: &PathfindOptions,
    ) -> Vec<Point> {
        self.reset();

        if start == end {
            return vec![start];
        }

        let pass = Passability::new(map, opts);
        let h = heuristic(start, end);
        let si = self.push_node(start, 0.0, h, None);
        self.open.enqueue(si, h);

        let found = 'search: loop {
            let Some(ci) = self.open.dequeue() else {
                break 'search None;
            };
            self.report.expanded += 1;

            if self
                .max_iterations
                .is_some_and(|cap| self.report.expanded > cap)
            {
                log::warn!(
                    "A* from {start} to {end} gave up after {} expansions",
                    self.report.expanded - 1
                );
                self.report.truncated = true;
                break 'search None;
            }

            let (cell, g) = {
                let n = &self.nodes[ci];
                (n.cell, n.g)
            };
            if cell == end {
                break 'search Some(ci);
            }
            self.nodes[ci].closed = true;

            let n8 = cell.neighbors_8();
            let n4 = cell.neighbors_4();
            let neighbors: &[Point] = if opts.allow_diagonal { &n8 } else { &n4 };

            for &np in neighbors {
                let existing = self.index.get(&np).copied();
                if existing.is_some_and(|ni| self.nodes[ni].closed) {
                    continue;
                }
                if !pass.is_passable(np) {
                    continue;
                }
                let tentative_g = g + step_cost(cell, np) * map.movement_factor(np);

                match existing {
                    Some(ni) => {
                        let n = &mut self.nodes[ni];
                        if tentative_g >= n.g {
                            continue;
                        }
                        n.g = tentative_g;
                        n.f = tentative_g + n.h;
                        n.parent = Some(ci);
                        let f = n.f;
                        if self.open.contains(ni) {
                            self.open.update_priority(ni, f);
                        } else {
                            self.open.enqueue(ni, f);
                        }
                    }
                    None => {
                        let h = heuristic(np, end);
                        let ni = self.push_node(np, tentative_g, h, Some(ci));
                        self.open.enqueue(ni, tentative_g + h);
                    }
                }
            }
        };

        self.report.generated = self.nodes.len();

        match found {
            Some(goal) => self.reconstruct(goal),
            None => Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.open.clear();
        self.report = SearchReport::default();
    }

    fn push_node(&mut self, cell: Point, g: f32, h: f32, parent: Option<usize>) -> usize {
        let i = self.nodes.len();
        self.nodes.push(SearchNode {
            cell,
            g,
            h,
            f: g + h,
            parent,
            closed: false,
        });
        self.index.insert(cell, i);
        i
    }

    fn reconstruct(&self, goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(goal);
        while let Some(i) = cur {
            path.push(self.nodes[i].cell);
            cur = self.nodes[i].parent;
        }
        path.reverse();
        path
    }
}

/// Movement cost of walking `cells` in order under the search's cost model.
pub fn path_cost<M: GameMap + ?Sized>(map: &M, cells: &[Point]) -> f32 {
    cells
        .windows(2)
        .map(|w| step_cost(w[0], w[1]) * map.movement_factor(w[1]))
        .sum()
}
