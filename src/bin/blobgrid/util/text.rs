pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Shortens `s` to at most `max_len` characters, ending in `…` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    match max_len {
        0 => String::new(),
        n => {
            let mut out: String = s.chars().take(n - 1).collect();
            out.push('…');
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap("atom set is empty", 20), vec!["atom set is empty"]);
        assert_eq!(wrap("unable to open file", 10), vec!["unable to", "open file"]);
    }

    #[test]
    fn wrap_keeps_one_line_for_empty_text() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("1.234 × 5.678", 20), "1.234 × 5.678");
        assert_eq!(truncate("Unresolved radii", 8), "Unresol…");
        assert_eq!(truncate("Å Å Å", 2), "Å…");
    }
}
