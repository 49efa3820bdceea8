//! Field normalization for the bilingual source dataset
//!
//! Every logical text field in the source file is offered in two candidate
//! columns (English and French). The first non-blank candidate wins.

/// Placeholder for a field whose every candidate is blank
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a blank manufacturer province code
pub const UNKNOWN_PROVINCE: &str = "??";

/// Return the first non-blank candidate, trimmed, or [`NOT_AVAILABLE`].
///
/// Total and pure: never fails, never allocates more than the result.
pub fn normalize(primary: &str, secondary: &str) -> String {
    let primary = primary.trim();
    if !primary.is_empty() {
        return primary.to_string();
    }

    let secondary = secondary.trim();
    if !secondary.is_empty() {
        return secondary.to_string();
    }

    NOT_AVAILABLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_wins_when_present() {
        assert_eq!(normalize("Cheddar", "Cheddar fort"), "Cheddar");
    }

    #[test]
    fn test_primary_is_trimmed() {
        assert_eq!(normalize("  Brie  ", "x"), "Brie");
    }

    #[test]
    fn test_blank_primary_falls_back_to_secondary() {
        assert_eq!(normalize(" ", "x"), "x");
        assert_eq!(normalize("", " Fromage frais\t"), "Fromage frais");
    }

    #[test]
    fn test_both_blank_yields_not_available() {
        assert_eq!(normalize("", ""), NOT_AVAILABLE);
        assert_eq!(normalize(" \t", "\n "), NOT_AVAILABLE);
    }

    #[test]
    fn test_province_sentinel_as_secondary() {
        assert_eq!(normalize("", UNKNOWN_PROVINCE), "??");
        assert_eq!(normalize("QC", UNKNOWN_PROVINCE), "QC");
    }

    #[test]
    fn test_all_pairs_follow_rule() {
        let samples = ["", " ", "a", " b ", "\tc"];
        for p in samples {
            for s in samples {
                let expected = if !p.trim().is_empty() {
                    p.trim()
                } else if !s.trim().is_empty() {
                    s.trim()
                } else {
                    NOT_AVAILABLE
                };
                assert_eq!(normalize(p, s), expected, "normalize({:?}, {:?})", p, s);
            }
        }
    }
}
