/// Default character budget for the first bio line.
pub const DEFAULT_LINE_BUDGET: usize = 20;

/// The bio split into the two lines printed on the bio card.
///
/// Both lines keep a trailing separator space after every word they hold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BioLines {
    /// First (upper) line.
    pub line1: String,
    /// Second line; empty when everything fit on the first one.
    pub line2: String,
}

impl BioLines {
    /// Whether the second line should be rendered at all.
    pub fn has_second_line(&self) -> bool {
        !self.line2.is_empty()
    }
}

/// Split `bio` into two display lines.
///
/// Words flow onto the first line while `len(line1) + len(word) < line_budget`, measured in
/// chars before the word is appended. The first word always lands on line 1. Once one word
/// spills, it and every later word go to line 2, even if a later word would have fit.
pub fn wrap_bio(bio: &str, line_budget: usize) -> BioLines {
    let mut lines = BioLines::default();
    let mut line1_len = 0usize;
    let mut spilled = false;

    for (i, word) in bio.split_whitespace().enumerate() {
        let word_len = word.chars().count();
        if !spilled && (i == 0 || line1_len + word_len < line_budget) {
            lines.line1.push_str(word);
            lines.line1.push(' ');
            line1_len += word_len + 1;
        } else {
            spilled = true;
            lines.line2.push_str(word);
            lines.line2.push(' ');
        }
    }

    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
