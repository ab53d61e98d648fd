//! Redis-compatible glob matching for key patterns
//!
//! Supports `*`, `?`, character classes (`[abc]`, `[^a]`, `[a-z]`) and
//! backslash escapes, matching what `SCAN MATCH` accepts. In-process
//! backends use this so pattern deletion behaves the same everywhere.

const GLOB_SPECIAL: [char; 5] = ['*', '?', '[', ']', '\\'];

/// Escape every glob metacharacter so `key` only matches itself
pub fn escape_pattern(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for c in key.chars() {
        if GLOB_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Check whether `key` matches the glob `pattern`
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();
    match_from(&pattern, &key)
}

fn match_from(pattern: &[char], key: &[char]) -> bool {
    match pattern.first() {
        None => key.is_empty(),
        Some('*') => {
            let rest_start = pattern.iter().take_while(|c| **c == '*').count();
            let rest = &pattern[rest_start..];
            if rest.is_empty() {
                return true;
            }
            (0..=key.len()).any(|i| match_from(rest, &key[i..]))
        }
        Some('?') => !key.is_empty() && match_from(&pattern[1..], &key[1..]),
        Some('[') => {
            let Some(&c) = key.first() else {
                return false;
            };
            match match_class(&pattern[1..], c) {
                Some((matched, consumed)) => {
                    matched && match_from(&pattern[1 + consumed..], &key[1..])
                }
                // Unterminated class: '[' is literal
                None => c == '[' && match_from(&pattern[1..], &key[1..]),
            }
        }
        Some('\\') if pattern.len() > 1 => {
            !key.is_empty() && key[0] == pattern[1] && match_from(&pattern[2..], &key[1..])
        }
        Some(&literal) => {
            !key.is_empty() && key[0] == literal && match_from(&pattern[1..], &key[1..])
        }
    }
}

/// Evaluate a character class body (after the opening `[`).
///
/// Returns whether `c` matched and how many pattern chars the class used,
/// including the closing `]`; `None` if the class never closes.
fn match_class(class: &[char], c: char) -> Option<(bool, usize)> {
    let negate = class.first() == Some(&'^');
    let mut i = usize::from(negate);
    let mut matched = false;

    while i < class.len() {
        match class[i] {
            ']' => return Some((matched != negate, i + 1)),
            '\\' if i + 1 < class.len() => {
                matched |= class[i + 1] == c;
                i += 2;
            }
            lo if i + 2 < class.len() && class[i + 1] == '-' && class[i + 2] != ']' => {
                let hi = class[i + 2];
                let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
                matched |= lo <= c && c <= hi;
                i += 3;
            }
            other => {
                matched |= other == c;
                i += 1;
            }
        }
    }

    None
}
