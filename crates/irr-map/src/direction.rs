//! Movement directions used to tag exits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of direction tags an exit can carry.
///
/// The ten compass and vertical directions appear on the mini-map; the
/// remaining tags name special moves that only make sense as commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// North.
    #[serde(rename = "n")]
    North,
    /// South.
    #[serde(rename = "s")]
    South,
    /// East.
    #[serde(rename = "e")]
    East,
    /// West.
    #[serde(rename = "w")]
    West,
    /// Northeast.
    #[serde(rename = "ne")]
    Northeast,
    /// Northwest.
    #[serde(rename = "nw")]
    Northwest,
    /// Southeast.
    #[serde(rename = "se")]
    Southeast,
    /// Southwest.
    #[serde(rename = "sw")]
    Southwest,
    /// Up.
    #[serde(alias = "u")]
    Up,
    /// Down.
    #[serde(alias = "d")]
    Down,
    /// Enter a structure or opening.
    Enter,
    /// Leave a structure.
    Exit,
    /// Climb something.
    Climb,
    /// Jump.
    Jump,
    /// Launch a boat.
    Launch,
}

impl Direction {
    /// Compass and vertical directions, in mini-map order.
    pub const COMPASS: [Direction; 10] = [
        Direction::Northwest,
        Direction::North,
        Direction::Northeast,
        Direction::West,
        Direction::East,
        Direction::Southwest,
        Direction::South,
        Direction::Southeast,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse a direction from a tag or its long name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "enter" | "in" => Some(Self::Enter),
            "exit" | "out" => Some(Self::Exit),
            "climb" => Some(Self::Climb),
            "jump" => Some(Self::Jump),
            "launch" => Some(Self::Launch),
            _ => None,
        }
    }

    /// The command typed to move this way when an exit has no override.
    pub fn command(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::Northeast => "ne",
            Self::Northwest => "nw",
            Self::Southeast => "se",
            Self::Southwest => "sw",
            Self::Up => "u",
            Self::Down => "d",
            Self::Enter => "enter",
            Self::Exit => "exit",
            Self::Climb => "climb",
            Self::Jump => "jump",
            Self::Launch => "launch",
        }
    }

    /// Short uppercase label for compact displays.
    pub fn label(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
            Self::Northeast => "NE",
            Self::Northwest => "NW",
            Self::Southeast => "SE",
            Self::Southwest => "SW",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Enter => "ENTER",
            Self::Exit => "EXIT",
            Self::Climb => "CLIMB",
            Self::Jump => "JUMP",
            Self::Launch => "LAUNCH",
        }
    }

    /// Whether this direction has a slot on the compass view.
    pub fn is_compass(self) -> bool {
        Self::COMPASS.contains(&self)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_forms() {
        assert_eq!(Direction::parse("n"), Some(Direction::North));
        assert_eq!(Direction::parse("Southwest"), Some(Direction::Southwest));
        assert_eq!(Direction::parse("u"), Some(Direction::Up));
        assert_eq!(Direction::parse("launch"), Some(Direction::Launch));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn deserialize_accepts_vertical_aliases() {
        let up: Direction = serde_json::from_str("\"u\"").unwrap();
        let down: Direction = serde_json::from_str("\"down\"").unwrap();
        let ne: Direction = serde_json::from_str("\"ne\"").unwrap();
        assert_eq!(up, Direction::Up);
        assert_eq!(down, Direction::Down);
        assert_eq!(ne, Direction::Northeast);
    }

    #[test]
    fn special_moves_are_not_compass() {
        assert!(Direction::North.is_compass());
        assert!(Direction::Down.is_compass());
        assert!(!Direction::Enter.is_compass());
        assert!(!Direction::Launch.is_compass());
    }
}
