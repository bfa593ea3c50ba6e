//! Map Table: architectural-to-physical register mapping, speculative and committed.
//!
//! Two parallel tables are kept: the *spec* map (used by rename to read source
//! operands and by fetch to know the speculative view of the world) and the *commit*
//! map (the architecturally-committed mapping, updated only at commit and restored
//! into the spec map wholesale on a flush).
//!
//! Backed by two `[PhysReg; 32]` arrays rather than a single packed integer — Rust's
//! array writes inside one `tick()` call already give the atomic-update guarantee the
//! packed-register trick exists to provide. Update order is load-bearing and
//! preserved exactly: commit write first, then flush-overlay (spec := commit if
//! flushing), then the rename write.

use crate::common::constants::N_LOGICAL;

/// Physical register id.
pub type PhysReg = usize;

/// A speculative rename write: architectural register `arch` now maps to `new_phys`.
#[derive(Debug, Clone, Copy)]
pub struct RenameWrite {
    /// Architectural register being renamed (never 0; callers must not rename x0).
    pub arch: usize,
    /// Newly allocated physical register for `arch`.
    pub new_phys: PhysReg,
}

/// A commit write: architectural register `arch` has definitely retired holding
/// physical register `committed_phys`.
#[derive(Debug, Clone, Copy)]
pub struct CommitWrite {
    /// Architectural register being committed.
    pub arch: usize,
    /// Physical register that is now the committed value for `arch`.
    pub committed_phys: PhysReg,
}

/// Architectural-to-physical map table with separate speculative and committed views.
#[derive(Debug, Clone)]
pub struct MapTable {
    spec: [PhysReg; N_LOGICAL],
    commit: [PhysReg; N_LOGICAL],
}

impl Default for MapTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MapTable {
    /// Creates a map table where every architectural register maps to the physical
    /// register of the same index (the initial 1:1 identity mapping).
    #[must_use]
    pub fn new() -> Self {
        let identity = std::array::from_fn(|i| i);
        Self {
            spec: identity,
            commit: identity,
        }
    }

    /// Reads the speculative mapping for an architectural register.
    #[must_use]
    pub fn read_spec(&self, arch: usize) -> PhysReg {
        self.spec[arch]
    }

    /// Reads the committed mapping for an architectural register.
    #[must_use]
    pub fn read_commit(&self, arch: usize) -> PhysReg {
        self.commit[arch]
    }

    /// Applies one cycle's worth of map-table updates in the mandated order:
    /// commit write, then flush-overlay (spec reloaded from commit), then rename
    /// write. Each step is optional and composes: a same-cycle rename+commit of
    /// the same architectural register yields `spec == commit == new_phys`, and a
    /// same-cycle flush-only yields `spec == commit`.
    pub fn tick(
        &mut self,
        commit_write: Option<CommitWrite>,
        flush: bool,
        rename_write: Option<RenameWrite>,
    ) {
        if let Some(cw) = commit_write {
            self.commit[cw.arch] = cw.committed_phys;
        }
        if flush {
            self.spec = self.commit;
        }
        if let Some(rw) = rename_write {
            self.spec[rw.arch] = rw.new_phys;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_commit_flush_sequence() {
        let mut mt = MapTable::new();
        assert_eq!(mt.read_spec(5), 5);
        assert_eq!(mt.read_commit(5), 5);

        // Rename x5 to p40.
        mt.tick(
            None,
            false,
            Some(RenameWrite {
                arch: 5,
                new_phys: 40,
            }),
        );
        assert_eq!(mt.read_spec(5), 40);
        assert_eq!(mt.read_commit(5), 5);

        // Commit x5 -> p40 (separate cycle).
        mt.tick(
            Some(CommitWrite {
                arch: 5,
                committed_phys: 40,
            }),
            false,
            None,
        );
        assert_eq!(mt.read_spec(5), 40);
        assert_eq!(mt.read_commit(5), 40);

        // Rename x5 again to p41, then flush: spec must revert to committed p40.
        mt.tick(
            None,
            false,
            Some(RenameWrite {
                arch: 5,
                new_phys: 41,
            }),
        );
        assert_eq!(mt.read_spec(5), 41);
        mt.tick(None, true, None);
        assert_eq!(mt.read_spec(5), 40);
        assert_eq!(mt.read_commit(5), 40);
    }

    #[test]
    fn same_cycle_rename_and_commit_of_same_register() {
        let mut mt = MapTable::new();
        mt.tick(
            Some(CommitWrite {
                arch: 3,
                committed_phys: 33,
            }),
            false,
            Some(RenameWrite {
                arch: 3,
                new_phys: 34,
            }),
        );
        // Commit lands first, then rename overlays spec on top of it.
        assert_eq!(mt.read_commit(3), 33);
        assert_eq!(mt.read_spec(3), 34);
    }

    #[test]
    fn same_cycle_flush_only_equalizes_spec_and_commit() {
        let mut mt = MapTable::new();
        mt.tick(
            None,
            false,
            Some(RenameWrite {
                arch: 1,
                new_phys: 10,
            }),
        );
        assert_ne!(mt.read_spec(1), mt.read_commit(1));
        mt.tick(None, true, None);
        assert_eq!(mt.read_spec(1), mt.read_commit(1));
    }
}
