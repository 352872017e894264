//! Depth-first walks over the implication edges (REQUIRES and PROVIDES) of a graph under
//! construction.

use bootcfg_kernel::domain::FlagId;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) type Adjacency = BTreeMap<FlagId, BTreeSet<FlagId>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Returns the first cycle found, as a path that starts and ends on the same flag.
///
/// Roots and successors are visited in identifier order, so the reported cycle is stable.
pub(crate) fn find_cycle(adjacency: &Adjacency) -> Option<Vec<FlagId>> {
    let mut marks = BTreeMap::new();
    let mut path = Vec::new();

    adjacency.keys().find_map(|root| {
        if marks.contains_key(root) {
            return None;
        }
        visit(root, adjacency, &mut marks, &mut path)
    })
}

fn visit<'a>(
    node: &'a FlagId,
    adjacency: &'a Adjacency,
    marks: &mut BTreeMap<&'a FlagId, Mark>,
    path: &mut Vec<&'a FlagId>,
) -> Option<Vec<FlagId>> {
    marks.insert(node, Mark::InProgress);
    path.push(node);

    for next in adjacency.get(node).into_iter().flatten() {
        match marks.get(next) {
            Some(Mark::InProgress) => {
                let start = path.iter().position(|n| *n == next).unwrap_or_default();
                let mut cycle: Vec<FlagId> = path[start..].iter().map(|n| (*n).clone()).collect();
                cycle.push(next.clone());
                return Some(cycle);
            },
            Some(Mark::Done) => {},
            None => {
                if let Some(cycle) = visit(next, adjacency, marks, path) {
                    return Some(cycle);
                }
            },
        }
    }

    path.pop();
    marks.insert(node, Mark::Done);
    None
}

/// Whether `to` can be reached from `from` along one or more edges.
pub(crate) fn reaches(adjacency: &Adjacency, from: &FlagId, to: &FlagId) -> bool {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&FlagId> = adjacency.get(from).into_iter().flatten().collect();

    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if seen.insert(node) {
            stack.extend(adjacency.get(node).into_iter().flatten());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(edges: &[(&str, &str)]) -> Adjacency {
        let mut adj = Adjacency::new();
        for (from, to) in edges {
            adj.entry(FlagId::new(from)).or_default().insert(FlagId::new(to));
        }
        adj
    }

    fn names(path: &[FlagId]) -> Vec<&str> {
        path.iter().map(FlagId::as_str).collect()
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let adj = adjacency(&[("a", "b"), ("b", "c"), ("a", "c")]);
        assert_eq!(find_cycle(&adj), None);
    }

    #[test]
    fn two_node_cycle_is_reported_closed() {
        let adj = adjacency(&[("a", "b"), ("b", "a")]);
        let cycle = find_cycle(&adj).expect("cycle expected");
        assert_eq!(names(&cycle), ["a", "b", "a"]);
    }

    #[test]
    fn cycle_path_excludes_the_lead_in() {
        let adj = adjacency(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "b")]);
        let cycle = find_cycle(&adj).expect("cycle expected");
        assert_eq!(names(&cycle), ["b", "c", "d", "b"]);
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let adj = adjacency(&[("a", "a")]);
        assert_eq!(names(&find_cycle(&adj).unwrap()), ["a", "a"]);
    }

    #[test]
    fn reachability_follows_chains_only_forward() {
        let adj = adjacency(&[("a", "b"), ("b", "c")]);
        let (a, c) = (FlagId::new("a"), FlagId::new("c"));
        assert!(reaches(&adj, &a, &c));
        assert!(!reaches(&adj, &c, &a));
        assert!(!reaches(&adj, &a, &a));
    }
}
