/// Widest a title or note is allowed to run on a single board line.
pub const CARD_TEXT_WIDTH: usize = 60;

/// Cap a string for single-line display.
///
/// Input shorter than `max` characters passes through untouched; anything
/// else is cut to exactly `max` characters with a `...` marker appended,
/// so output never exceeds `max + 3`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() < max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_unchanged() {
        let s = "x".repeat(CARD_TEXT_WIDTH - 1);
        assert_eq!(truncate(&s, CARD_TEXT_WIDTH), s);
    }

    #[test]
    fn input_at_the_limit_still_gets_the_marker() {
        let s = "x".repeat(CARD_TEXT_WIDTH);
        let out = truncate(&s, CARD_TEXT_WIDTH);
        assert_eq!(out.chars().count(), CARD_TEXT_WIDTH + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn long_input_is_cut_to_the_limit() {
        let s = "x".repeat(200);
        let out = truncate(&s, CARD_TEXT_WIDTH);
        assert_eq!(out, format!("{}...", "x".repeat(CARD_TEXT_WIDTH)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let s = "é".repeat(CARD_TEXT_WIDTH + 5);
        let out = truncate(&s, CARD_TEXT_WIDTH);
        assert_eq!(out, format!("{}...", "é".repeat(CARD_TEXT_WIDTH)));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(truncate("", CARD_TEXT_WIDTH), "");
    }
}
