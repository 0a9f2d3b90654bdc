//! Locations, exits, and the validated world graph.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{MapError, MapResult};

const BUNDLED_MAP: &str = include_str!("../data/zork1.json");

/// A directed exit from one location to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Name of the target location.
    pub to: String,
    /// Direction tag of the exit.
    pub dir: Direction,
    /// Literal command text overriding the direction tag.
    /// Several commands are separated by newlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Human-readable description of what blocks the exit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Whether the exit is currently marked impassable. Display only.
    #[serde(default)]
    pub locked: bool,
}

impl Transition {
    /// Create an exit in the given direction.
    pub fn new(dir: Direction, to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            dir,
            command: None,
            condition: None,
            locked: false,
        }
    }

    /// Override the command sent to take this exit.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Mark the exit as gated by the given condition.
    pub fn gated(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self.locked = true;
        self
    }

    /// The commands to type, in order, to take this exit.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.command
            .as_deref()
            .unwrap_or(self.dir.command())
            .split('\n')
    }
}

/// A named location and its outgoing exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, also the location's key.
    pub name: String,
    /// Outgoing exits in declaration order.
    #[serde(default)]
    pub exits: Vec<Transition>,
}

impl Location {
    /// Create a location with no exits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exits: Vec::new(),
        }
    }

    /// Append an exit.
    pub fn with_exit(mut self, exit: Transition) -> Self {
        self.exits.push(exit);
        self
    }
}

#[derive(Deserialize)]
struct MapDocument {
    locations: Vec<Location>,
}

/// A static directed graph of locations.
///
/// Declaration order of locations and of each location's exits is kept,
/// since it decides which of several equally short routes the search finds.
#[derive(Debug, Clone)]
pub struct WorldGraph {
    locations: Vec<Location>,
    by_name: HashMap<String, usize>,
}

impl WorldGraph {
    /// Build a graph, rejecting duplicate names and exits to unknown locations.
    pub fn new(locations: Vec<Location>) -> MapResult<Self> {
        let mut by_name = HashMap::with_capacity(locations.len());
        for (i, loc) in locations.iter().enumerate() {
            if by_name.insert(loc.name.clone(), i).is_some() {
                return Err(MapError::DuplicateLocation(loc.name.clone()));
            }
        }

        for loc in &locations {
            if let Some(exit) = loc.exits.iter().find(|e| !by_name.contains_key(&e.to)) {
                return Err(MapError::DanglingEdge {
                    from: loc.name.clone(),
                    to: exit.to.clone(),
                });
            }
        }

        Ok(Self { locations, by_name })
    }

    /// Parse a graph from a JSON map document.
    pub fn from_json(json: &str) -> MapResult<Self> {
        let doc: MapDocument = serde_json::from_str(json)?;
        Self::new(doc.locations)
    }

    /// Read and parse a JSON map document from disk.
    pub fn from_path(path: &Path) -> MapResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The Zork I surface and underground map shipped with the crate.
    pub fn bundled() -> MapResult<Self> {
        Self::from_json(BUNDLED_MAP)
    }

    /// Look up a location by exact name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.by_name.get(name).map(|&i| &self.locations[i])
    }

    /// Look up a location that must exist.
    pub fn require(&self, name: &str) -> MapResult<&Location> {
        self.get(name)
            .ok_or_else(|| MapError::UnknownLocation(name.to_string()))
    }

    /// Whether the graph has a location with exactly this name.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Exits of a location, empty for unknown names.
    pub fn exits(&self, name: &str) -> &[Transition] {
        self.get(name).map(|l| l.exits.as_slice()).unwrap_or(&[])
    }

    /// Location names in declaration order.
    pub fn location_names(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|l| l.name.as_str())
    }

    /// Location names sorted alphabetically, for destination pickers.
    pub fn sorted_location_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.location_names().collect();
        names.sort_unstable();
        names
    }

    /// All locations in declaration order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the graph has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_map_loads_and_validates() {
        let graph = WorldGraph::bundled().unwrap();
        assert!(graph.contains("West of House"));
        assert!(graph.contains("Kitchen"));
        assert!(graph.contains("Land of the Dead"));
        assert_eq!(graph.location_names().next(), Some("West of House"));
    }

    #[test]
    fn duplicate_location_rejected() {
        let result = WorldGraph::new(vec![Location::new("Attic"), Location::new("Attic")]);
        assert!(matches!(result, Err(MapError::DuplicateLocation(n)) if n == "Attic"));
    }

    #[test]
    fn dangling_exit_rejected() {
        let result = WorldGraph::new(vec![
            Location::new("Attic").with_exit(Transition::new(Direction::Down, "Kitchen")),
        ]);
        match result {
            Err(MapError::DanglingEdge { from, to }) => {
                assert_eq!(from, "Attic");
                assert_eq!(to, "Kitchen");
            }
            other => panic!("expected dangling edge, got {other:?}"),
        }
    }

    #[test]
    fn require_names_the_missing_location() {
        let graph = WorldGraph::bundled().unwrap();
        assert_eq!(graph.require("Kitchen").unwrap().name, "Kitchen");
        let err = graph.require("Atlantis").unwrap_err();
        assert!(matches!(&err, MapError::UnknownLocation(n) if n == "Atlantis"));
        assert_eq!(err.to_string(), "unknown location: Atlantis");
    }

    #[test]
    fn exit_commands_split_on_newlines() {
        let plain = Transition::new(Direction::Up, "Attic");
        assert_eq!(plain.commands().collect::<Vec<_>>(), vec!["u"]);

        let scripted =
            Transition::new(Direction::Down, "Cellar").with_command("move rug\nopen trap door\nd");
        assert_eq!(
            scripted.commands().collect::<Vec<_>>(),
            vec!["move rug", "open trap door", "d"]
        );
    }

    #[test]
    fn json_document_round_trips_gating_fields() {
        let json = r#"{ "locations": [
            { "name": "Round Room", "exits": [
                { "to": "Dome Room", "dir": "u", "condition": "Need rope", "locked": true }
            ] },
            { "name": "Dome Room", "exits": [ { "to": "Round Room", "dir": "d" } ] }
        ] }"#;
        let graph = WorldGraph::from_json(json).unwrap();
        let exit = &graph.exits("Round Room")[0];
        assert_eq!(exit.dir, Direction::Up);
        assert!(exit.locked);
        assert_eq!(exit.condition.as_deref(), Some("Need rope"));
        assert!(!graph.exits("Dome Room")[0].locked);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            WorldGraph::from_json("{ \"locations\": 3 }"),
            Err(MapError::Parse(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tiny.json");
        std::fs::write(&path, r#"{ "locations": [ { "name": "Clearing" } ] }"#).unwrap();

        let graph = WorldGraph::from_path(&path).unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.exits("Clearing").is_empty());
    }

    #[test]
    fn unknown_location_has_no_exits() {
        let graph = WorldGraph::bundled().unwrap();
        assert!(graph.get("Narnia").is_none());
        assert!(graph.exits("Narnia").is_empty());
    }

    #[test]
    fn sorted_names_are_alphabetical() {
        let graph = WorldGraph::bundled().unwrap();
        let names = graph.sorted_location_names();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(names, expected);
        assert_eq!(names.len(), graph.len());
    }
}
