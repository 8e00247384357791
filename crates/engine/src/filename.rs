//! File-name canonicalization for loose identity matching.

use regex::Regex;

/// Strip one trailing UUID suffix (canonical 8-4-4-4-12 lowercase hex,
/// hyphen-joined, itself preceded by a hyphen) sitting immediately before
/// the file extension:
///
/// `report-123e4567-e89b-12d3-a456-426614174000.pdf` → `report.pdf`
///
/// Best-effort heuristic: anything merely resembling the pattern is left
/// untouched.
pub fn strip_uuid_suffix(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let re = Regex::new(
        r"-[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}(\.[^.]+)?$",
    )
    .unwrap();
    re.replace(name, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID_NAME: &str = "report-123e4567-e89b-12d3-a456-426614174000.pdf";

    #[test]
    fn strips_uuid_before_extension() {
        assert_eq!(strip_uuid_suffix(UUID_NAME), "report.pdf");
    }

    #[test]
    fn strips_uuid_without_extension() {
        assert_eq!(
            strip_uuid_suffix("report-123e4567-e89b-12d3-a456-426614174000"),
            "report"
        );
    }

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(strip_uuid_suffix("report.pdf"), "report.pdf");
        assert_eq!(strip_uuid_suffix(""), "");
    }

    #[test]
    fn near_misses_are_left_untouched() {
        // Uppercase hex is not the canonical form.
        let upper = "report-123E4567-E89B-12D3-A456-426614174000.pdf";
        assert_eq!(strip_uuid_suffix(upper), upper);
        // Wrong group length.
        let short = "report-123e4567-e89b-12d3-a456-4266141740.pdf";
        assert_eq!(strip_uuid_suffix(short), short);
        // No separating hyphen before the suffix.
        let glued = "report123e4567-e89b-12d3-a456-426614174000.pdf";
        assert_eq!(strip_uuid_suffix(glued), glued);
    }

    #[test]
    fn idempotent() {
        for name in [UUID_NAME, "report.pdf", "", "a-b-c.txt"] {
            let once = strip_uuid_suffix(name);
            assert_eq!(strip_uuid_suffix(&once), once);
        }
    }
}
