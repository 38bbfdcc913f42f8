use regex::Regex;
use std::sync::OnceLock;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 只保留英文字母與空白
    RE.get_or_init(|| Regex::new(r"[^a-zA-Z\s]").expect("static regex is valid"))
}

/// Turns free-text input into a canonical display name.
///
/// `_` and `-` act as word separators, every other non-letter is dropped,
/// and each word is capitalised. Returns `None` when no letters remain.
pub fn normalize_name(input: &str) -> Option<String> {
    let separated = input.replace(['_', '-'], " ");
    let letters_only = disallowed_chars().replace_all(&separated, "");

    let words: Vec<String> = letters_only.split_whitespace().map(capitalize).collect();

    if words.is_empty() {
        return None;
    }

    Some(words.join(" "))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = first.to_ascii_uppercase().to_string();
            out.push_str(&chars.as_str().to_ascii_lowercase());
            out
        }
        None => String::new(),
    }
}
