//! Best-effort location and inventory inference from game text.
//!
//! Nothing here sees the interpreter's object model. Every guess comes from
//! pattern-matching printed text and may be wrong or stale; a later match
//! simply overwrites it.

use std::sync::LazyLock;

use irr_map::WorldGraph;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::output::OutputLog;

/// Printed when an object has been picked up.
const TAKEN_ACK: &str = "Taken.";
/// Heads the response to an inventory command.
const CARRYING_MARKER: &str = "You are carrying:";
/// Printed by an inventory command when nothing is held.
const EMPTY_HANDED: &str = "You are empty-handed.";

static STATUS_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static TAKE_COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\btake\s+(\w+)").unwrap());
static ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*an?\s+([^(]+)").unwrap());

/// Carried items, in order of discovery, each name at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Returns `false` if it was already present.
    pub fn add(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Replace the whole inventory, dropping repeated names.
    pub fn replace<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.items.clear();
        for item in items {
            self.add(item);
        }
    }

    /// Whether an item with exactly this name is held.
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Items in discovery order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Derives the current location and inventory from interpreter output.
#[derive(Debug, Clone)]
pub struct StateInferencer {
    location: String,
    inventory: Inventory,
    landmarks: Vec<String>,
    window: usize,
    status_seen: bool,
    listing_open: bool,
}

impl StateInferencer {
    /// Create an inferencer starting at the configured location.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            location: config.start_location.clone(),
            inventory: Inventory::new(),
            landmarks: config.landmarks.clone(),
            window: config.inference_window,
            status_seen: false,
            listing_open: false,
        }
    }

    /// The inferred location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The inferred inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Whether a status line has ever been received.
    pub fn has_status_line(&self) -> bool {
        self.status_seen
    }

    /// Whether an inventory listing is still being printed.
    pub fn is_listing_open(&self) -> bool {
        self.listing_open
    }

    /// Note that the interpreter has asked for input.
    ///
    /// An inventory listing in progress is complete at this point; later
    /// output no longer extends it.
    pub fn input_requested(&mut self) {
        self.listing_open = false;
    }

    /// Take the location from a status line.
    ///
    /// The line is split on runs of two or more spaces and the first
    /// segment is adopted if it names a location in the graph exactly.
    /// From the first status line on, narrative text is no longer scanned
    /// for locations. Returns whether the location changed.
    pub fn observe_status(&mut self, line: &str, graph: &WorldGraph) -> bool {
        self.status_seen = true;
        let name = STATUS_SPLIT.split(line.trim()).next().unwrap_or_default();
        if graph.contains(name) {
            return self.set_location(name);
        }
        false
    }

    /// Inspect a chunk that has just been appended to `log`.
    ///
    /// Returns whether the location or inventory changed.
    pub fn observe_output(&mut self, chunk: &str, log: &OutputLog) -> bool {
        let mut changed = false;

        if !self.status_seen
            && let Some(name) = self.landmarks.iter().find(|l| chunk.contains(l.as_str()))
        {
            let name = name.clone();
            changed |= self.set_location(&name);
        }

        let window = log.tail(self.window);

        if chunk.contains(TAKEN_ACK)
            && let Some(noun) = last_take_command(window)
            && self.inventory.add(noun.clone())
        {
            debug!("inventory: picked up {noun}");
            changed = true;
        }

        if chunk.contains(CARRYING_MARKER) {
            self.listing_open = true;
        }

        // A listing may arrive over several chunks; re-read it until the
        // next input request closes it.
        if self.listing_open {
            match window.iter().rposition(|l| l.contains(CARRYING_MARKER)) {
                Some(marker) => {
                    let items: Vec<String> = window[marker + 1..]
                        .iter()
                        .filter(|l| !l.trim().is_empty())
                        .filter_map(|l| head_noun(l))
                        .collect();
                    if items != self.inventory.items() {
                        debug!("inventory: listing shows {items:?}");
                        self.inventory.replace(items);
                        changed = true;
                    }
                }
                None => self.listing_open = false,
            }
        } else if chunk.contains(EMPTY_HANDED) && !self.inventory.is_empty() {
            debug!("inventory: empty-handed");
            self.inventory.replace(Vec::new());
            changed = true;
        }

        changed
    }

    fn set_location(&mut self, name: &str) -> bool {
        if self.location == name {
            return false;
        }
        debug!("location: {} -> {name}", self.location);
        self.location = name.to_string();
        true
    }
}

/// Noun of the most recent echoed command if it was `take <word>`, as typed.
fn last_take_command(window: &[String]) -> Option<String> {
    let command = window.iter().rev().find(|line| line.starts_with("> "))?;
    TAKE_COMMAND
        .captures(command)
        .map(|caps| caps[1].to_string())
}

/// Head noun of an item description such as "A brass lantern", lower-cased.
fn head_noun(line: &str) -> Option<String> {
    let caps = ITEM_LINE.captures(line)?;
    let noun = caps[1]
        .split_whitespace()
        .last()?
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    (!noun.is_empty()).then_some(noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inferencer() -> StateInferencer {
        StateInferencer::new(&SessionConfig::default())
    }

    fn feed(inf: &mut StateInferencer, log: &mut OutputLog, chunk: &str) -> bool {
        log.append(chunk);
        inf.observe_output(chunk, log)
    }

    #[test]
    fn starts_at_configured_location() {
        let inf = StateInferencer::new(&SessionConfig::default().with_start_location("Attic"));
        assert_eq!(inf.location(), "Attic");
        assert!(inf.inventory().is_empty());
    }

    #[test]
    fn narrative_fallback_uses_list_order() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        assert!(feed(&mut inf, &mut log, "Behind House\nYou are behind the white house. To the north is the Kitchen.\n"));
        // "Behind House" comes before "Kitchen" in the landmark list.
        assert_eq!(inf.location(), "Behind House");
    }

    #[test]
    fn narrative_fallback_is_case_sensitive() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        assert!(!feed(&mut inf, &mut log, "There is a small mailbox here.\n"));
        assert_eq!(inf.location(), "West of House");
    }

    #[test]
    fn status_line_sets_location() {
        let graph = WorldGraph::bundled().unwrap();
        let mut inf = inferencer();
        assert!(inf.observe_status(" Living Room                    Score: 10   Moves: 12", &graph));
        assert_eq!(inf.location(), "Living Room");
    }

    #[test]
    fn status_line_with_unknown_name_is_ignored() {
        let graph = WorldGraph::bundled().unwrap();
        let mut inf = inferencer();
        assert!(!inf.observe_status("Maze of Twisty Passages   Score: 0", &graph));
        assert_eq!(inf.location(), "West of House");
        assert!(inf.has_status_line());
    }

    #[test]
    fn status_line_disables_narrative_fallback() {
        let graph = WorldGraph::bundled().unwrap();
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        inf.observe_status("Attic   Score: 0   Moves: 40", &graph);
        feed(&mut inf, &mut log, "You can see the Kitchen below.\n");
        assert_eq!(inf.location(), "Attic");
    }

    #[test]
    fn taken_adds_typed_noun_once() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> take lamp");
        log.push_line("");
        assert!(feed(&mut inf, &mut log, "Taken.\n\n>"));
        assert_eq!(inf.inventory().items(), ["lamp"]);

        log.push_line("> take lamp");
        log.push_line("");
        assert!(!feed(&mut inf, &mut log, "Taken.\n\n>"));
        assert_eq!(inf.inventory().items(), ["lamp"]);
    }

    #[test]
    fn taken_preserves_case_as_typed() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> TAKE Sword");
        log.push_line("");
        feed(&mut inf, &mut log, "Taken.\n");
        assert_eq!(inf.inventory().items(), ["Sword"]);
    }

    #[test]
    fn taken_without_take_command_changes_nothing() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> get leaflet");
        log.push_line("");
        assert!(!feed(&mut inf, &mut log, "Taken.\n"));
        assert!(inf.inventory().is_empty());
    }

    #[test]
    fn take_command_outside_window_is_missed() {
        let config = SessionConfig::default().with_inference_window(3);
        let mut inf = StateInferencer::new(&config);
        let mut log = OutputLog::new();
        log.push_line("> take rope");
        log.append("\none\ntwo\nthree\n");
        feed(&mut inf, &mut log, "Taken.");
        assert!(inf.inventory().is_empty());
    }

    #[test]
    fn carrying_list_replaces_inventory() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> take leaflet");
        log.push_line("");
        feed(&mut inf, &mut log, "Taken.\n");
        assert_eq!(inf.inventory().items(), ["leaflet"]);

        log.push_line("> inventory");
        log.push_line("");
        feed(
            &mut inf,
            &mut log,
            "You are carrying:\nA brass lantern\nAn elvish sword\n\n>",
        );
        assert_eq!(inf.inventory().items(), ["lantern", "sword"]);
    }

    #[test]
    fn carrying_list_handles_article_case_and_notes() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        feed(
            &mut inf,
            &mut log,
            "You are carrying:\n  a brass lantern (providing light)\n  AN Elvish Sword\n",
        );
        assert_eq!(inf.inventory().items(), ["lantern", "sword"]);
    }

    #[test]
    fn taken_only_credits_the_latest_command() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> take sword");
        log.push_line("");
        feed(&mut inf, &mut log, "You can't see any sword here!\n\n>");
        log.push_line("> get lamp");
        log.push_line("");
        assert!(!feed(&mut inf, &mut log, "Taken.\n\n>"));
        assert!(inf.inventory().is_empty());
    }

    #[test]
    fn listing_split_over_chunks() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> inventory");
        log.push_line("");
        feed(&mut inf, &mut log, "You are carrying:\n");
        assert!(inf.is_listing_open());
        feed(&mut inf, &mut log, "A brass lantern\n");
        assert_eq!(inf.inventory().items(), ["lantern"]);
        feed(&mut inf, &mut log, "An elvish sword\n\n>");
        assert_eq!(inf.inventory().items(), ["lantern", "sword"]);

        inf.input_requested();
        assert!(!inf.is_listing_open());
        log.push_line("> look");
        log.push_line("");
        feed(&mut inf, &mut log, "A nasty knife lies here.\n\n>");
        assert_eq!(inf.inventory().items(), ["lantern", "sword"]);
    }

    #[test]
    fn empty_handed_clears_inventory() {
        let mut inf = inferencer();
        let mut log = OutputLog::new();
        log.push_line("> take egg");
        log.push_line("");
        feed(&mut inf, &mut log, "Taken.\n");
        assert!(feed(&mut inf, &mut log, "You are empty-handed.\n"));
        assert!(inf.inventory().is_empty());
    }

    #[test]
    fn head_noun_extraction() {
        assert_eq!(head_noun("A brass lantern"), Some("lantern".to_string()));
        assert_eq!(head_noun("An elvish sword."), Some("sword".to_string()));
        assert_eq!(head_noun("The sack contains:"), None);
        assert_eq!(head_noun(">"), None);
    }
}
