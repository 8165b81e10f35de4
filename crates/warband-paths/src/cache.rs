//! Bounded FIFO memo of computed routes.

use std::collections::{HashMap, VecDeque};

use warband_core::{Owner, Point, WorldPoint};

use crate::options::PathfindOptions;

/// Everything that can change the route computed between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    start: Point,
    end: Point,
    unit_size: u32,
    pathing_radius: u32,
    owner: Owner,
    flags: u8,
}

impl CacheKey {
    pub fn new(start: Point, end: Point, opts: &PathfindOptions) -> Self {
        let flags = u8::from(opts.ignore_units)
            | u8::from(opts.ignore_resources) << 1
            | u8::from(opts.ignore_buildings) << 2
            | u8::from(opts.allow_diagonal) << 3;
        Self {
            start,
            end,
            unit_size: opts.unit_size.to_bits(),
            pathing_radius: opts.pathing_radius.to_bits(),
            owner: opts.owner,
            flags,
        }
    }
}

/// A cached route: the cell-centre waypoints before smoothing and
/// anchoring.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedRoute {
    pub waypoints: Vec<WorldPoint>,
    /// Where the route really ends when the requested target was redirected
    /// (blocked or off the map). `None` means "the requested target".
    pub target: Option<WorldPoint>,
}

/// A key → route map that forgets its oldest entry once full.
#[derive(Clone, Debug)]
pub struct PathCache {
    entries: HashMap<CacheKey, CachedRoute>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl PathCache {
    /// Create a cache holding at most `capacity` routes. A capacity of 0
    /// stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Maximum number of routes kept.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CachedRoute> {
        self.entries.get(key)
    }

    /// Store `route` under `key`, replacing any previous route for the same
    /// key without changing its age. Returns the keys evicted to make room.
    pub fn insert(&mut self, key: CacheKey, route: CachedRoute) -> Vec<CacheKey> {
        if self.capacity == 0 {
            return Vec::new();
        }
        if self.entries.insert(key, route).is_none() {
            self.order.push_back(key);
        }
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            evicted.push(oldest);
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
