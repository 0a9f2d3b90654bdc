//! Compass view of a location's immediate exits.

use std::collections::HashMap;

use crate::direction::Direction;
use crate::graph::WorldGraph;

/// What lies in one compass direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborInfo {
    /// Name of the adjacent location.
    pub name: String,
    /// What gates the exit, if anything.
    pub condition: Option<String>,
    /// Whether the exit is marked impassable.
    pub locked: bool,
}

/// Adjacent locations keyed by compass or vertical direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compass {
    slots: HashMap<Direction, NeighborInfo>,
}

impl Compass {
    /// The neighbor in a direction, if any.
    pub fn get(&self, dir: Direction) -> Option<&NeighborInfo> {
        self.slots.get(&dir)
    }

    /// Occupied slots in mini-map order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &NeighborInfo)> {
        Direction::COMPASS
            .into_iter()
            .filter_map(|d| self.slots.get(&d).map(|n| (d, n)))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no direction has a neighbor.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl WorldGraph {
    /// Read-only compass view of a location's exits.
    ///
    /// Special moves (enter, exit, climb, jump, launch) are left out. When a
    /// location declares two exits in the same direction the later one is
    /// shown. Unknown locations yield an empty compass.
    pub fn neighbors(&self, location: &str) -> Compass {
        let mut compass = Compass::default();
        for exit in self.exits(location).iter().filter(|e| e.dir.is_compass()) {
            compass.slots.insert(
                exit.dir,
                NeighborInfo {
                    name: exit.to.clone(),
                    condition: exit.condition.clone(),
                    locked: exit.locked,
                },
            );
        }
        compass
    }
}
