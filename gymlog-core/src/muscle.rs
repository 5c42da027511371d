//! Canonical muscle-group vocabulary.

/// Label used when a record carries no muscle name at all.
pub const OTHER: &str = "Other";

const SYNONYMS: &[(&str, &str)] = &[
    // Upper body
    ("biceps", "Biceps"),
    ("triceps", "Triceps"),
    ("forearms", "Forearms"),
    ("chest", "Chest"),
    ("pectoralis", "Chest"),
    ("lats", "Lats"),
    ("latissimus dorsi", "Lats"),
    ("trapezius", "Traps"),
    ("traps", "Traps"),
    ("delts", "Shoulders"),
    ("deltoids", "Shoulders"),
    ("deltoid", "Shoulders"),
    ("shoulders", "Shoulders"),
    // Core / back
    ("core", "Core"),
    ("abdominals", "Core"),
    ("abs", "Core"),
    ("obliques", "Obliques"),
    ("lower back", "Lower Back"),
    ("back", "Back"),
    // Lower body
    ("quadriceps", "Quadriceps"),
    ("quads", "Quadriceps"),
    ("hamstrings", "Hamstrings"),
    ("glutes", "Glutes"),
    ("calves", "Calves"),
    ("hip adductors", "Hip Adductors"),
    ("adductors", "Hip Adductors"),
    ("hip abductors", "Hip Abductors"),
    ("abductors", "Hip Abductors"),
    // Misc
    ("neck", "Neck"),
    ("full body", "Full Body"),
    ("cardio", "Cardio"),
];

/// Map a free-text muscle name onto the canonical vocabulary.
///
/// Known synonyms resolve through the table, unknown names are title-cased, and a
/// missing or blank name becomes [`OTHER`].
pub fn normalize(name: Option<&str>) -> String {
    let Some(trimmed) = name.map(str::trim).filter(|s| !s.is_empty()) else {
        return OTHER.to_string();
    };
    let key = trimmed.to_lowercase();
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| title_case(trimmed))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
