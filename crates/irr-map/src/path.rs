//! Breadth-first route planning over the world graph.

use std::collections::{HashMap, VecDeque};

use crate::graph::{Transition, WorldGraph};

/// A planned route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResult {
    /// Locations entered along the route, excluding the start.
    pub path: Vec<String>,
    /// Commands to submit, in order, with multi-line exit commands expanded.
    pub commands: Vec<String>,
}

impl PathResult {
    /// Number of exits taken.
    pub fn hops(&self) -> usize {
        self.path.len()
    }
}

/// Find a route with the fewest exits from `start` to `end`.
///
/// Every exit counts as one hop however many commands it expands to. Among
/// equally short routes the first one reached in declaration order wins.
/// Gating flags are not consulted. Returns `None` when either endpoint is
/// unknown or `end` cannot be reached; `start == end` is an empty route.
pub fn find_path(graph: &WorldGraph, start: &str, end: &str) -> Option<PathResult> {
    if start == end {
        return Some(PathResult::default());
    }
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }

    let mut came_from: HashMap<&str, Option<(&str, &Transition)>> = HashMap::new();
    let mut queue = VecDeque::new();

    came_from.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            return Some(reconstruct(&came_from, end));
        }

        for exit in graph.exits(current) {
            let next = exit.to.as_str();
            if !came_from.contains_key(next) {
                came_from.insert(next, Some((current, exit)));
                queue.push_back(next);
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<&str, Option<(&str, &Transition)>>, end: &str) -> PathResult {
    let mut steps = Vec::new();
    let mut node = end;
    while let Some(&Some((prev, exit))) = came_from.get(node) {
        steps.push(exit);
        node = prev;
    }
    steps.reverse();

    PathResult {
        path: steps.iter().map(|e| e.to.clone()).collect(),
        commands: steps
            .iter()
            .copied()
            .flat_map(Transition::commands)
            .map(str::to_string)
            .collect(),
    }
}

impl WorldGraph {
    /// Shorthand for [`find_path`] on this graph.
    pub fn find_path(&self, start: &str, end: &str) -> Option<PathResult> {
        find_path(self, start, end)
    }
}
