//! Greedy word wrapping against a measured width budget.

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are appended to the current line while the candidate line (with
/// its trailing space) measures within the budget. A word that does not
/// fit starts a new line unless the current line is empty, so a single
/// word wider than the budget still gets a line of its own. Committed
/// lines are trimmed. Empty text yields one empty line.
pub fn wrap_words<M>(text: &str, max_width: f32, measure: M) -> Vec<String>
where
    M: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{current}{word} ");
        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(current.trim_end().to_owned());
            current = format!("{word} ");
        } else {
            current = candidate;
        }
    }
    lines.push(current.trim_end().to_owned());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_words("Tab, Enter", 40.0, chars), vec!["Tab, Enter"]);
    }

    #[test]
    fn long_text_wraps_within_budget() {
        let text = "Design for everyone, not just the average user. When we \
                    build for diversity, everyone benefits.";
        let lines = wrap_words(text, 20.0, chars);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(chars(line) <= 20.0, "{line:?}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap_words("a supercalifragilistic b", 6.0, chars);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_words("", 10.0, chars), vec![String::new()]);
        assert_eq!(wrap_words("   ", 10.0, chars), vec![String::new()]);
    }
}
