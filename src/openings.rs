//! Static ECO code to opening name table.

/// Sorted by ECO code; lookups binary-search it. Covers the codes that
/// show up regularly in online rapid pools, not the full ECO volume set.
const ECO_OPENINGS: &[(&str, &str)] = &[
    ("A00", "Uncommon Opening"),
    ("A01", "Nimzo-Larsen Attack"),
    ("A02", "Bird's Opening"),
    ("A04", "Reti Opening"),
    ("A10", "English Opening"),
    ("A20", "English Opening"),
    ("A28", "English Opening: Four Knights"),
    ("A40", "Queen's Pawn Game"),
    ("A45", "Trompowsky Attack"),
    ("A46", "Indian Game"),
    ("A48", "London System"),
    ("B00", "Uncommon King's Pawn Opening"),
    ("B01", "Scandinavian Defense"),
    ("B02", "Alekhine's Defense"),
    ("B07", "Pirc Defense"),
    ("B10", "Caro-Kann Defense"),
    ("B12", "Caro-Kann Defense"),
    ("B20", "Sicilian Defense"),
    ("B21", "Sicilian: Smith-Morra Gambit"),
    ("B22", "Sicilian: Alapin"),
    ("B27", "Sicilian Defense"),
    ("B30", "Sicilian Defense"),
    ("B40", "Sicilian Defense"),
    ("B44", "Sicilian: Taimanov"),
    ("B50", "Sicilian Defense"),
    ("B90", "Sicilian: Najdorf"),
    ("C00", "French Defense"),
    ("C02", "French: Advance Variation"),
    ("C20", "King's Pawn Game"),
    ("C21", "Center Game"),
    ("C23", "Bishop's Opening"),
    ("C25", "Vienna Game"),
    ("C28", "Vienna Game"),
    ("C40", "King's Knight Opening"),
    ("C42", "Petrov's Defense"),
    ("C44", "Scotch Game"),
    ("C45", "Scotch Game"),
    ("C46", "Three Knights Game"),
    ("C47", "Four Knights Game"),
    ("C50", "Italian Game"),
    ("C55", "Italian Game: Two Knights"),
    ("C60", "Ruy Lopez"),
    ("C65", "Ruy Lopez: Berlin Defense"),
    ("D00", "Queen's Pawn Game"),
    ("D02", "London System"),
    ("D06", "Queen's Gambit"),
    ("D10", "Slav Defense"),
    ("D11", "Slav Defense"),
    ("D20", "Queen's Gambit Accepted"),
    ("D23", "Queen's Gambit Accepted"),
    ("D30", "Queen's Gambit Declined"),
    ("D31", "Queen's Gambit Declined"),
    ("D35", "Queen's Gambit Declined"),
    ("D37", "Queen's Gambit Declined"),
    ("D55", "Queen's Gambit Declined"),
    ("E00", "Indian Defense"),
    ("E04", "Catalan Opening"),
    ("E10", "Indian Defense"),
    ("E20", "Nimzo-Indian Defense"),
    ("E24", "Nimzo-Indian Defense"),
    ("E60", "King's Indian Defense"),
    ("E70", "King's Indian Defense"),
];

pub const UNKNOWN_OPENING: &str = "Unknown";

/// First table entry whose code starts with `prefix`, if any. The table
/// is sorted, so this is the lowest matching code.
fn prefix_match(prefix: &str) -> Option<&'static str> {
    let start = ECO_OPENINGS.partition_point(|(code, _)| *code < prefix);
    match ECO_OPENINGS.get(start) {
        Some((code, name)) if code.starts_with(prefix) => Some(name),
        _ => None,
    }
}

/// Resolves an ECO code to a human-readable opening name.
///
/// Exact match first, then the nearest 2-char and 1-char prefix match,
/// then the "Unknown" sentinel.
pub fn opening_name(eco_code: Option<&str>) -> &'static str {
    let Some(code) = eco_code.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_OPENING;
    };

    if let Ok(idx) = ECO_OPENINGS.binary_search_by(|(key, _)| (*key).cmp(code)) {
        return ECO_OPENINGS[idx].1;
    }

    for len in [2, 1] {
        if code.len() >= len
            && code.is_char_boundary(len)
            && let Some(name) = prefix_match(&code[..len])
        {
            return name;
        }
    }

    UNKNOWN_OPENING
}
