use warband_core::{GameMap, WorldPoint};

use crate::error::Result;
use crate::options::{PathfindOptions, check_finite};
use crate::pathfinder::Pathfinder;

impl<M: GameMap> Pathfinder<M> {
    /// Continue along `current` instead of searching from scratch.
    ///
    /// The mover rejoins `current` at its closest waypoint, provided that is
    /// within the reuse threshold. If the remaining path already ends near
    /// `target` it is returned with `target` appended; otherwise a fresh
    /// path from its end to `target` is spliced on.
    ///
    /// Returns `Ok(None)` when the mover has drifted too far, `current` is
    /// empty, or the spliced search finds nothing.
    pub fn try_reuse_existing_path(
        &mut self,
        mover: WorldPoint,
        target: WorldPoint,
        current: &[WorldPoint],
        opts: &PathfindOptions,
    ) -> Result<Option<Vec<WorldPoint>>> {
        check_finite("mover", mover)?;
        check_finite("target", target)?;
        opts.validate()?;

        let threshold = self.config.reuse_threshold_cells * self.mapper.cell_size();
        let closest = current
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance(mover)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((from, drift)) = closest else {
            return Ok(None);
        };
        if drift > threshold {
            log::trace!("mover at {mover} is {drift:.1} from its path, not reusing");
            return Ok(None);
        }

        let mut path = current[from..].to_vec();
        let tail = path[path.len() - 1];
        if tail.distance(target) <= threshold {
            if tail != target {
                path.push(target);
            }
            return Ok(Some(path));
        }

        let fresh = self.find_path(tail, target, opts)?;
        if fresh.len() <= 1 {
            return Ok(None);
        }
        path.extend(fresh.into_iter().skip(1));
        Ok(Some(path))
    }
}
