//! Injective assignment of needle indices to haystack indices.
//!
//! Augmenting-path maximum bipartite matching (Kuhn's algorithm). The
//! compatibility predicate is evaluated lazily and at most once per
//! `(needle, haystack)` pair, since each call may be a deep recursive match.
//! The memo only holds pairs that were actually evaluated.

use std::collections::HashMap;

/// True iff every needle index in `0..m` can be given a distinct haystack
/// index in `0..n` with `compatible(i, j)` holding for each pair.
///
/// Haystack indices may be left unassigned.
pub fn has_total_matching<F>(m: usize, n: usize, compatible: F) -> bool
where
    F: FnMut(usize, usize) -> bool,
{
    find_total_matching(m, n, compatible).is_some()
}

/// Like [`has_total_matching`], but returns the assignment that was found:
/// `assignment[i]` is the haystack index given to needle index `i`.
///
/// Any valid assignment may be returned; no particular one is preferred.
pub fn find_total_matching<F>(m: usize, n: usize, compatible: F) -> Option<Vec<usize>>
where
    F: FnMut(usize, usize) -> bool,
{
    if m > n {
        return None;
    }

    let mut graph = MemoGraph::new(n, compatible);
    // owner[j] = needle index currently holding haystack index j
    let mut owner: Vec<Option<usize>> = vec![None; n];

    for i in 0..m {
        let mut visited = vec![false; n];
        // Once a needle index fails to augment it never will, so the
        // maximum matching is already short of m.
        if !graph.augment(i, &mut visited, &mut owner) {
            return None;
        }
    }

    let mut assignment = vec![0; m];
    for (j, holder) in owner.iter().enumerate() {
        if let Some(i) = holder {
            assignment[*i] = j;
        }
    }
    Some(assignment)
}

struct MemoGraph<F> {
    n: usize,
    cache: HashMap<(usize, usize), bool>,
    compatible: F,
}

impl<F> MemoGraph<F>
where
    F: FnMut(usize, usize) -> bool,
{
    fn new(n: usize, compatible: F) -> Self {
        MemoGraph {
            n,
            cache: HashMap::new(),
            compatible,
        }
    }

    fn edge(&mut self, i: usize, j: usize) -> bool {
        if let Some(known) = self.cache.get(&(i, j)) {
            return *known;
        }
        let result = (self.compatible)(i, j);
        self.cache.insert((i, j), result);
        result
    }

    fn augment(&mut self, i: usize, visited: &mut [bool], owner: &mut [Option<usize>]) -> bool {
        for j in 0..self.n {
            if visited[j] || !self.edge(i, j) {
                continue;
            }
            visited[j] = true;
            let free = match owner[j] {
                None => true,
                Some(holder) => self.augment(holder, visited, owner),
            };
            if free {
                owner[j] = Some(i);
                return true;
            }
        }
        false
    }
}
