use super::*;

#[test]
fn empty_bio_yields_two_empty_lines() {
    assert_eq!(wrap_bio("", 20), BioLines::default());
    assert_eq!(wrap_bio("   \t ", 20), BioLines::default());
    assert!(!wrap_bio("", 20).has_second_line());
}

#[test]
fn splits_at_pre_append_threshold() {
    let lines = wrap_bio("a bb ccc dddddddddddddddddd", 20);
    assert_eq!(lines.line1, "a bb ccc ");
    assert_eq!(lines.line2, "dddddddddddddddddd ");
    assert!(lines.has_second_line());
}

#[test]
fn known_bio_split() {
    let lines = wrap_bio("Loves cooking and hiking", DEFAULT_LINE_BUDGET);
    assert_eq!(lines.line1, "Loves cooking and ");
    assert_eq!(lines.line2, "hiking ");
}

#[test]
fn short_bio_stays_on_first_line() {
    let lines = wrap_bio("Chef", DEFAULT_LINE_BUDGET);
    assert_eq!(lines.line1, "Chef ");
    assert_eq!(lines.line2, "");
    assert!(!lines.has_second_line());
}

#[test]
fn first_word_always_lands_on_line_one() {
    let long = "x".repeat(35);
    let lines = wrap_bio(&format!("{long} tail"), 20);
    assert_eq!(lines.line1, format!("{long} "));
    assert_eq!(lines.line2, "tail ");
}

#[test]
fn word_equal_to_remaining_budget_spills() {
    // "abcdefghi " is 10 chars; 10 + 10 is not < 20.
    let lines = wrap_bio("abcdefghi abcdefghij", 20);
    assert_eq!(lines.line1, "abcdefghi ");
    assert_eq!(lines.line2, "abcdefghij ");
}

#[test]
fn flow_never_returns_to_line_one() {
    let lines = wrap_bio("aaaaaaaaaaaaaaa bbbbbbbbbb c", 20);
    assert_eq!(lines.line1, "aaaaaaaaaaaaaaa ");
    assert_eq!(lines.line2, "bbbbbbbbbb c ");
}

#[test]
fn lengths_are_counted_in_chars() {
    // Eight two-byte chars would overflow a byte-based budget of 20.
    let lines = wrap_bio("éééééééé éééééééé", 20);
    assert_eq!(lines.line1, "éééééééé éééééééé ");
    assert_eq!(lines.line2, "");
}

#[test]
fn repeated_whitespace_is_collapsed() {
    let lines = wrap_bio("  Loves   cooking ", 20);
    assert_eq!(lines.line1, "Loves cooking ");
}
