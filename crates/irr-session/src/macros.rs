//! Pre-authored command sequences.

/// A named, fixed sequence of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macro {
    /// Identifier used to run the macro.
    pub id: &'static str,
    /// Button label.
    pub label: &'static str,
    /// Commands, in submission order.
    pub commands: &'static [&'static str],
}

const MACROS: &[Macro] = &[
    Macro {
        id: "start_forest",
        label: "Start to Forest",
        commands: &["n", "n"],
    },
    Macro {
        id: "enter_house",
        label: "Enter House",
        commands: &["n", "e", "open window", "enter"],
    },
    Macro {
        id: "get_lantern",
        label: "Get Essentials",
        commands: &["w", "take lamp", "take sword"],
    },
    Macro {
        id: "open_trapdoor",
        label: "Open Trapdoor",
        commands: &["move rug", "open trap door"],
    },
    Macro {
        id: "get_egg",
        label: "Get Egg",
        commands: &["n", "n", "u", "take egg", "d"],
    },
    Macro {
        id: "dam_route",
        label: "Go to Dam",
        commands: &["n", "e", "e", "n", "e"],
    },
];

/// Every macro, in display order.
pub fn all() -> &'static [Macro] {
    MACROS
}

/// Look up a macro by identifier.
pub fn get(id: &str) -> Option<&'static Macro> {
    MACROS.iter().find(|m| m.id == id)
}
