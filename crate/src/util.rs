use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_INT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?x)
    \A \s*
    (?P<int> [-+]? [0-9]+ )   # an optionally signed run of digits
"#,
    )
    .expect("Could not parse leading int regex")
});

// Rule files are hand-written, so `<endlength>` is read the forgiving way:
// whatever integer the text starts with, or zero if it does not start with
// one. Negative values clamp to zero.
pub(crate) fn leading_count(text: &str) -> usize {
    let caps = match LEADING_INT_REGEX.captures(text) {
        Some(c) => c,
        None => return 0,
    };
    let digits = caps.name("int").map_or("", |m| m.as_str());
    if digits.starts_with('-') {
        return 0;
    }
    // A count too large for usize removes everything anyway.
    digits
        .trim_start_matches('+')
        .parse::<usize>()
        .unwrap_or(usize::MAX)
}

/// Removes `count` characters (not bytes) from the end of `word`.
pub(crate) fn truncate_chars(word: &str, count: usize) -> &str {
    if count == 0 {
        return word;
    }
    match word.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &word[..idx],
        None => "",
    }
}
