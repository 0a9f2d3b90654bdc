//! A checklist of walkthrough tasks and the player's progress through it.
//!
//! Progress is ticked off by hand and never touches the game state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// One task in the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    /// Stable identifier.
    pub id: &'static str,
    /// What to do.
    pub text: &'static str,
    /// Where or how to do it.
    pub hint: Option<&'static str>,
}

/// A group of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    /// Stable identifier.
    pub id: &'static str,
    /// Heading.
    pub title: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Tasks in suggested order.
    pub tasks: &'static [Task],
}

const fn task(id: &'static str, text: &'static str, hint: &'static str) -> Task {
    Task {
        id,
        text,
        hint: Some(hint),
    }
}

const fn bare(id: &'static str, text: &'static str) -> Task {
    Task {
        id,
        text,
        hint: None,
    }
}

const PHASES: &[Phase] = &[
    Phase {
        id: "phase1",
        title: "Phase 1: Setup",
        description: "Secure tools and first treasures.",
        tasks: &[
            task("p1_egg", "Get the Jewel-Encrusted Egg (Up a Tree)", "N, N from start, then UP"),
            task("p1_enter", "Enter the White House", "Behind house, OPEN WINDOW, ENTER"),
            task("p1_lamp", "Take the Brass Lantern", "Living Room"),
            task("p1_sword", "Take the Elvish Sword", "Living Room"),
            task("p1_trapdoor", "Open the Trap Door", "MOVE RUG, OPEN TRAP DOOR"),
            task("p1_painting", "Get the Painting", "Gallery (East of Chasm)"),
            bare("p1_deposit1", "Deposit first treasures in Trophy Case"),
        ],
    },
    Phase {
        id: "phase2",
        title: "Phase 2: Puzzles",
        description: "Solve the Dam and Coal Mine.",
        tasks: &[
            task("p2_troll", "Defeat the Troll", "Troll Room"),
            task("p2_dam", "Solve the Dam Puzzle", "Wrench, Buttons"),
            task("p2_trunk", "Get the Trunk of Jewels", "Reservoir (after draining)"),
            task("p2_boat", "Inflate and Launch the Boat", "Dam Base, Air Pump"),
            task("p2_emerald", "Get the Large Emerald", "Inside Red Buoy"),
            task("p2_scarab", "Get the Jeweled Scarab", "Sandy Cave (dig)"),
            task("p2_bracelet", "Get the Sapphire Bracelet", "Gas Room (no flame!)"),
            task("p2_coal", "Get the Coal", "Coal Mine Dead End"),
            task("p2_diamond", "Turn Coal into Diamond", "Machine Room"),
            task("p2_jade", "Get the Jade Figurine", "Bat Room (use Garlic)"),
            task("p2_bar", "Get the Platinum Bar", "Loud Room (ECHO)"),
            task("p2_trident", "Get the Crystal Trident", "Atlantis Room"),
            bare("p2_deposit2", "Deposit all treasures in Trophy Case"),
        ],
    },
    Phase {
        id: "phase3",
        title: "Phase 3: Endgame",
        description: "Defeat the Thief and enter the Barrow.",
        tasks: &[
            task("p3_maze", "Navigate the Maze", "Drop items to mark"),
            task("p3_coins", "Get the Bag of Coins", "Maze 5"),
            task("p3_cyclops", "Defeat the Cyclops", "Say ULYSSES"),
            task("p3_thief", "Kill the Thief", "Treasure Room"),
            task("p3_chalice", "Get the Silver Chalice", "Treasure Room"),
            task("p3_hades", "Perform the Hades Ritual", "Bell, Candles, Book"),
            task("p3_skull", "Get the Crystal Skull", "Land of Living Dead"),
            task("p3_torch", "Get the Ivory Torch", "Torch Room"),
            task("p3_coffin", "Get the Gold Coffin", "Egyptian Room"),
            task("p3_sceptre", "Get the Sceptre", "Inside Coffin"),
            task("p3_rainbow", "Make the Rainbow Solid", "Wave Sceptre at Falls"),
            task("p3_pot", "Get the Pot of Gold", "End of Rainbow"),
            task("p3_canary", "Get the Clockwork Canary", "Open Egg (Thief opens it)"),
            task("p3_bauble", "Get the Brass Bauble", "Wind Canary in Forest"),
            bare("p3_deposit3", "Deposit ALL treasures (Score: 350)"),
            task("p3_barrow", "Enter the Stone Barrow", "SW from West of House"),
            bare("p3_finish", "THE END!"),
        ],
    },
];

/// Every phase, in play order.
pub fn phases() -> &'static [Phase] {
    PHASES
}

/// Look up a task by identifier.
pub fn task_by_id(id: &str) -> Option<&'static Task> {
    PHASES.iter().flat_map(|p| p.tasks).find(|t| t.id == id)
}

/// Number of tasks across all phases.
pub fn total_tasks() -> usize {
    PHASES.iter().map(|p| p.tasks.len()).sum()
}

/// The set of tasks marked done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkthroughProgress {
    done: BTreeSet<String>,
}

impl WalkthroughProgress {
    /// Create progress with nothing done.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a task between done and not done.
    ///
    /// Returns the new state.
    pub fn toggle(&mut self, id: &str) -> SessionResult<bool> {
        if task_by_id(id).is_none() {
            return Err(SessionError::UnknownTask(id.to_string()));
        }
        if self.done.remove(id) {
            Ok(false)
        } else {
            self.done.insert(id.to_string());
            Ok(true)
        }
    }

    /// Whether a task is marked done.
    pub fn is_done(&self, id: &str) -> bool {
        self.done.contains(id)
    }

    /// Number of tasks done.
    pub fn completed(&self) -> usize {
        self.done.len()
    }

    /// Number of tasks overall.
    pub fn total(&self) -> usize {
        total_tasks()
    }

    /// Share of tasks done, from 0.0 to 1.0.
    pub fn fraction(&self) -> f64 {
        self.completed() as f64 / self.total() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_shape() {
        assert_eq!(phases().len(), 3);
        assert_eq!(total_tasks(), 37);
        assert_eq!(task_by_id("p1_lamp").unwrap().hint, Some("Living Room"));
        assert_eq!(task_by_id("p3_finish").unwrap().hint, None);
    }

    #[test]
    fn task_ids_are_unique() {
        let ids: BTreeSet<_> = phases().iter().flat_map(|p| p.tasks).map(|t| t.id).collect();
        assert_eq!(ids.len(), total_tasks());
    }

    #[test]
    fn toggle_flips() {
        let mut progress = WalkthroughProgress::new();
        assert!(progress.toggle("p1_lamp").unwrap());
        assert!(progress.is_done("p1_lamp"));
        assert_eq!(progress.completed(), 1);
        assert!(!progress.toggle("p1_lamp").unwrap());
        assert!(!progress.is_done("p1_lamp"));
        assert_eq!(progress.fraction(), 0.0);
    }

    #[test]
    fn unknown_task_is_an_error() {
        let mut progress = WalkthroughProgress::new();
        let err = progress.toggle("p9_nothing").unwrap_err();
        assert!(matches!(err, SessionError::UnknownTask(ref id) if id == "p9_nothing"));
        assert_eq!(progress.completed(), 0);
    }

    #[test]
    fn fraction_counts_all_phases() {
        let mut progress = WalkthroughProgress::new();
        for phase in phases() {
            for t in phase.tasks {
                progress.toggle(t.id).unwrap();
            }
        }
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn serde_roundtrip() {
        let mut progress = WalkthroughProgress::new();
        progress.toggle("p2_dam").unwrap();
        let json = serde_json::to_string(&progress).unwrap();
        let back: WalkthroughProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }
}
