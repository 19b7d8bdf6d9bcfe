//! Unit ordering.
//!
//! A unit may only be checked once every unit it imports has published its
//! facts. Units are grouped into levels: all imports of a unit live in
//! earlier levels, so the units of one level can be checked concurrently.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use wrapck_analysis::WrapPolicy;
use wrapck_ir::{Program, UnitId};

/// Dependency-ordered levels of in-scope units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Each level sorted by unit path.
    pub levels: Vec<Vec<UnitId>>,
    /// Units outside the scope, never walked.
    pub skipped: Vec<UnitId>,
}

impl Schedule {
    pub fn build(program: &Program, policy: &WrapPolicy) -> Self {
        let mut schedule = Schedule::default();
        let mut paths: FxHashMap<UnitId, &str> = FxHashMap::default();
        let mut by_path: FxHashMap<&str, UnitId> = FxHashMap::default();
        for unit in &program.units {
            let path = program.name(unit.path);
            if policy.in_scope(path) {
                paths.insert(unit.id, path);
                by_path.insert(path, unit.id);
            } else {
                schedule.skipped.push(unit.id);
            }
        }

        // Pending import count per unit, and who waits on whom.
        let mut pending: FxHashMap<UnitId, usize> = FxHashMap::default();
        let mut dependents: FxHashMap<UnitId, Vec<UnitId>> = FxHashMap::default();
        for unit in &program.units {
            if !paths.contains_key(&unit.id) {
                continue;
            }
            let mut deps: Vec<UnitId> = unit
                .imports
                .iter()
                .filter_map(|&import| by_path.get(program.name(import)).copied())
                .filter(|&dep| dep != unit.id)
                .collect();
            deps.sort_unstable();
            deps.dedup();
            for &dep in &deps {
                dependents.entry(dep).or_default().push(unit.id);
            }
            pending.insert(unit.id, deps.len());
        }

        let path_of = |id: UnitId| paths.get(&id).copied().unwrap_or_default();
        while !pending.is_empty() {
            let mut level: Vec<UnitId> = pending
                .iter()
                .filter(|&(_, &count)| count == 0)
                .map(|(&id, _)| id)
                .collect();
            if level.is_empty() {
                // Every remaining unit waits on another: an import cycle.
                // Break it at the smallest path.
                let Some(forced) = pending.keys().copied().min_by_key(|&id| path_of(id)) else {
                    break;
                };
                warn!(unit = path_of(forced), "import cycle; checking unit before its imports");
                level.push(forced);
            }
            level.sort_unstable_by_key(|&id| path_of(id));

            for id in &level {
                pending.remove(id);
                for dependent in dependents.get(id).into_iter().flatten() {
                    if let Some(count) = pending.get_mut(dependent) {
                        *count = count.saturating_sub(1);
                    }
                }
            }
            debug!(level = schedule.levels.len(), units = level.len(), "level scheduled");
            schedule.levels.push(level);
        }
        schedule
    }

    /// All scheduled units, level by level.
    pub fn units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.levels.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Vec::is_empty)
    }
}
