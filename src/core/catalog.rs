//! Static reference lists used when planning.

/// Core HYROX station equipment.
pub const HYROX_EQUIPMENT: &[&str] = &[
    "SkiErg",
    "Concept2 Rower",
    "Assault Bike / Air Bike",
    "Sled",
    "Burpee Broad Jump Space",
    "Sandbag (10-20kg)",
    "Wall Balls (6-9kg)",
    "Farmer Carry Kettlebells/Dumbbells",
];

/// Equipment item names that serve the HYROX stations.
///
/// Used as a cycle allow-list, so entries are plain item names as a studio
/// would record them.
pub const HYROX_EQUIPMENT_NAMES: &[&str] = &[
    "SkiErg",
    "Concept2 Rower",
    "Rower",
    "Assault Bike",
    "Air Bike",
    "Sled",
    "Sandbag",
    "Wall Balls",
    "Wall Ball",
    "Kettlebells",
    "Kettlebell",
    "Dumbbells",
    "Dumbbell",
];

/// Sources for evidence-based programming.
pub const SCIENTIFIC_SOURCES: &[&str] = &[
    "Seiler, S. & Tønnessen, E. (2009). Intervals, Thresholds, and Long Slow Distance.",
    "Jones, A.M. et al. (2019). Critical Power: Implications for Determination of VO2max and Exercise Tolerance.",
    "Coffey, V.G. & Hawley, J.A. (2017). Concurrent exercise training: do opposites distract?",
    "Tabata, I. et al. (1996). Effects of moderate-intensity endurance and high-intensity intermittent training.",
    "Buchheit, M. & Laursen, P.B. (2013). High-intensity interval training, solutions to the programming puzzle.",
    "Bompa, T.O. & Haff, G.G. (2009). Periodization: Theory and Methodology of Training.",
    "Verkhoshansky, Y. & Siff, M.C. (2009). Supertraining.",
];

/// Messages rotated while a cycle is being generated.
pub const LOADING_MESSAGES: &[&str] = &[
    "Initializing Sport Science Model...",
    "Analyzing physiological demands...",
    "Structuring Mesocycle phases...",
    "Calculating progressive overload...",
    "Integrating deload & recovery weeks...",
    "Optimizing volume vs intensity...",
    "Finalizing periodization logic...",
];

/// Loading message for a tick count, wrapping around.
pub fn loading_message(tick: usize) -> &'static str {
    LOADING_MESSAGES[tick % LOADING_MESSAGES.len()]
}
