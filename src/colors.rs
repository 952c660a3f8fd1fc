/// Color used for any type name outside the canonical eighteen.
pub const FALLBACK_COLOR: &str = "#68A090";

const TYPE_COLORS: [(&str, &str); 18] = [
    ("normal", "#A8A77A"),
    ("fire", "#EE8130"),
    ("water", "#6390F0"),
    ("electric", "#F7D02C"),
    ("grass", "#7AC74C"),
    ("ice", "#96D9D6"),
    ("fighting", "#C22E28"),
    ("poison", "#A33EA1"),
    ("ground", "#E2BF65"),
    ("flying", "#A98FF3"),
    ("psychic", "#F95587"),
    ("bug", "#A6B91A"),
    ("rock", "#B6A136"),
    ("ghost", "#735797"),
    ("dragon", "#6F35FC"),
    ("dark", "#705746"),
    ("steel", "#B7B7CE"),
    ("fairy", "#D685AD"),
];

/// Display color for a type name, matched case-insensitively.
pub fn type_color(name: &str) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(type_name, _)| type_name.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
