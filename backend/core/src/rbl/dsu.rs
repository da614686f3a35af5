//! Disjoint-set union over camper names.
//!
//! Used to contract hard `pair_with` edges into must-pair components before
//! the CSP solver ever sees them. Keyed by name rather than a dense integer
//! range because only the eligible population for a given session is ever
//! inserted.

use std::collections::HashMap;

/// Union-find over a fixed set of string keys, merging by rank with
/// one-step path compression (each traversed node is relinked to its
/// grandparent during `find`, rather than fully compressed to the root).
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: HashMap<String, String>,
    rank: HashMap<String, u32>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` as its own singleton set, if not already present.
    pub fn insert(&mut self, key: &str) {
        if !self.parent.contains_key(key) {
            self.parent.insert(key.to_string(), key.to_string());
            self.rank.insert(key.to_string(), 0);
        }
    }

    /// Returns the root of the set containing `key`, path-halving as it
    /// walks: every visited node is relinked to its grandparent.
    pub fn find(&mut self, key: &str) -> String {
        let mut current = key.to_string();
        loop {
            let parent = self.parent[&current].clone();
            if parent == current {
                return current;
            }
            let grandparent = self.parent[&parent].clone();
            self.parent.insert(current, grandparent.clone());
            current = grandparent;
        }
    }

    /// Merges the sets containing `a` and `b`. Smaller rank attaches under
    /// larger; equal ranks attach `b`'s root under `a`'s root and increment
    /// `a`'s rank.
    pub fn union(&mut self, a: &str, b: &str) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let rank_a = self.rank[&ra];
        let rank_b = self.rank[&rb];
        if rank_a > rank_b {
            self.parent.insert(rb, ra);
        } else if rank_b > rank_a {
            self.parent.insert(ra, rb);
        } else {
            self.parent.insert(rb, ra.clone());
            *self.rank.get_mut(&ra).unwrap() += 1;
        }
    }
}
