//! String cleaning for archive identifier columns
//!
//! Identifier columns sometimes come back from the archive with Python
//! byte-literal residue (`b'TIC 12345'`) and with textual missing-value
//! markers. Cleaning strips both.

/// Columns that receive string cleaning, in the order they are processed
pub const STRING_COLUMNS: [&str; 8] = [
    "pl_name",
    "hostname",
    "disc_facility",
    "st_spectype",
    "hd_name",
    "tic_id",
    "gaia_dr3_id",
    "gaia_dr2_id",
];

/// Textual renderings of a missing value
const MISSING_MARKERS: [&str; 2] = ["nan", "<NA>"];

/// Clean a single string field.
///
/// Drops a leading `b'` marker, then every single quote, then maps a value
/// that is entirely a missing-value marker to the empty string. Applying this
/// twice gives the same result as applying it once.
pub fn clean_field(value: &str) -> String {
    let value = value.strip_prefix("b'").unwrap_or(value);
    let stripped = value.replace('\'', "");
    if MISSING_MARKERS.contains(&stripped.as_str()) {
        String::new()
    } else {
        stripped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_byte_literal_markers() {
        assert_eq!(clean_field("b'TIC 1234567'"), "TIC 1234567");
        assert_eq!(clean_field("b'Gaia DR3 123'"), "Gaia DR3 123");
        assert_eq!(clean_field("HD 189733"), "HD 189733");
    }

    #[test]
    fn test_missing_markers_become_empty() {
        assert_eq!(clean_field("nan"), "");
        assert_eq!(clean_field("<NA>"), "");
        assert_eq!(clean_field("b'nan'"), "");
        // Only whole-value matches are treated as missing
        assert_eq!(clean_field("nanometer"), "nanometer");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "b'TIC 1'",
            "bb''",
            "b'b'x''",
            "'quoted'",
            "nan",
            "<NA>",
            "",
            "Kepler-10 b",
            "K2-18 b'",
        ];
        for input in inputs {
            let once = clean_field(input);
            assert_eq!(clean_field(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_planet_letter_survives() {
        // A trailing "b'" is the planet letter plus the closing quote
        assert_eq!(clean_field("b'Kepler-10 b'"), "Kepler-10 b");
        assert_eq!(clean_field("K2-18 b'"), "K2-18 b");
    }
}
