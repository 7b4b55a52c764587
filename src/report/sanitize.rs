//! Text preparation for the built-in PDF fonts.

/// Symbols with a readable stand-in. Longer sequences come first so the
/// emoji-presentation form of a symbol is replaced as a whole.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("⚠️", "[RISK]"),
    ("⚠", "[RISK]"),
    ("⛔", "[BLOCKED]"),
    ("✅", "[OK]"),
    ("🔴", "[ALERT]"),
    ("🧬", ""),
    ("📄", ""),
];

/// Map text onto Latin-1: known symbols become tags, anything else outside
/// the Latin-1 range becomes `?`.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (symbol, tag) in REPLACEMENTS {
        if cleaned.contains(symbol) {
            cleaned = cleaned.replace(symbol, tag);
        }
    }
    cleaned
        .chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Simple word-wrap helper for PDF text rendering.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Patient name made safe for use as a file name stem.
pub fn filename_stem(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        "patient".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_become_tags() {
        assert_eq!(clean_text("⛔ BLOCKED"), "[BLOCKED] BLOCKED");
        assert_eq!(clean_text("⚠️ Lead"), "[RISK] Lead");
        assert_eq!(clean_text("✅ OPTIMAL"), "[OK] OPTIMAL");
        assert_eq!(clean_text("🔴 alert"), "[ALERT] alert");
        assert_eq!(clean_text("🧬Report📄"), "Report");
    }

    #[test]
    fn latin1_kept_rest_replaced() {
        assert_eq!(clean_text("Zoë µg/g"), "Zoë µg/g");
        assert_eq!(clean_text("李 → ok"), "? ? ok");
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("one two three four five six", 10);
        assert_eq!(lines, vec!["one two", "three four", "five six"]);
    }

    #[test]
    fn wrap_empty_yields_one_line() {
        assert_eq!(wrap_text("", 20), vec![String::new()]);
    }

    #[test]
    fn wrap_keeps_long_word_whole() {
        assert_eq!(wrap_text("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }

    #[test]
    fn filename_stem_strips_separators() {
        assert_eq!(filename_stem("John Doe"), "John Doe");
        assert_eq!(filename_stem("../etc/passwd"), "_etc_passwd");
        assert_eq!(filename_stem("  "), "patient");
        assert_eq!(filename_stem("a:b*c"), "a_b_c");
    }
}
