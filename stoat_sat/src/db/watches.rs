/*!
Watch lists for two-watched-literal propagation.

For every literal `p` the table holds the watchers of `p`: one entry per
clause whose watched slot would be falsified by `p` becoming true. Each
entry carries a blocker, a second literal from the clause recorded at the
time the watch was made; when the blocker is already true the clause is
satisfied and propagation can skip the clause without touching the arena.

Watch entries are a denormalised index. Detaching a clause does not have to
find and remove its entries: the bucket is *smudged* instead, and entries
pointing at removed clauses are filtered out the next time the bucket is
cleaned, on lookup or in bulk before collection.
*/

use crate::{
    db::clause::{ClauseArena, ClauseRef},
    structures::Lit,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Watcher {
    pub cref: ClauseRef,
    pub blocker: Lit,
}

impl Watcher {
    pub fn new(cref: ClauseRef, blocker: Lit) -> Self {
        Watcher { cref, blocker }
    }
}

#[derive(Default)]
pub(crate) struct WatchLists {
    occs: Vec<Vec<Watcher>>,
    dirty: Vec<bool>,
    dirties: Vec<Lit>,
}

impl WatchLists {
    /// Extends the table with buckets for both polarities of a fresh
    /// variable.
    pub fn init_var(&mut self) {
        self.occs.push(Vec::default());
        self.occs.push(Vec::default());
        self.dirty.push(false);
        self.dirty.push(false);
    }

    /// The bucket for `p`, as last left. Callers wanting only live entries
    /// should [clean](Self::clean) first.
    pub fn occs_mut(&mut self, p: Lit) -> &mut Vec<Watcher> {
        &mut self.occs[p.index()]
    }

    /// Flags the bucket for `p` as holding entries of a detached clause.
    pub fn smudge(&mut self, p: Lit) {
        if !self.dirty[p.index()] {
            self.dirty[p.index()] = true;
            self.dirties.push(p);
        }
    }

    /// Drops entries whose clause has been removed, if the bucket is
    /// flagged. Only smudged buckets can hold such entries.
    pub fn clean(&mut self, p: Lit, arena: &ClauseArena) {
        if !self.dirty[p.index()] {
            return;
        }
        self.occs[p.index()].retain(|watcher| !arena.is_removed(watcher.cref));
        self.dirty[p.index()] = false;
    }

    /// Cleans every smudged bucket.
    pub fn clean_all(&mut self, arena: &ClauseArena) {
        for p in std::mem::take(&mut self.dirties) {
            // A bucket may have been cleaned on lookup since it was smudged.
            self.clean(p, arena);
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.occs.len()
    }

    /// The bucket at `index` in table order, for walks over every watcher.
    pub fn bucket_mut(&mut self, index: usize) -> &mut Vec<Watcher> {
        &mut self.occs[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smudge_then_clean() {
        let mut arena = ClauseArena::default();
        let live = arena
            .alloc(&[Lit::new(0, true), Lit::new(1, true)], false)
            .unwrap();
        let dead = arena
            .alloc(&[Lit::new(0, false), Lit::new(1, true)], false)
            .unwrap();
        arena.mark_removed(dead);

        let mut watches = WatchLists::default();
        watches.init_var();
        watches.init_var();
        let p = Lit::new(0, true);
        watches.occs_mut(p).push(Watcher::new(live, Lit::new(1, true)));
        watches.occs_mut(p).push(Watcher::new(dead, Lit::new(1, true)));

        watches.smudge(p);
        watches.smudge(p);
        watches.clean_all(&arena);

        let bucket = watches.occs_mut(p);
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].cref, live);
    }
}
