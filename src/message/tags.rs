//! IRCv3 message tag utilities.

use std::collections::HashMap;

/// Scan a tags body (the text between `@` and the first space) into a map.
///
/// `;` separates pairs and `=` separates key from value; `,` is an ordinary
/// value character. Empty values are preserved, bare keys (no `=`) get an
/// empty value, and a duplicate key keeps its last occurrence.
pub(crate) fn scan_tags(body: &str) -> HashMap<&str, &str> {
    let mut tags = HashMap::new();
    let bytes = body.as_bytes();
    let mut start = 0;
    let mut key: Option<&str> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'=' if key.is_none() => {
                key = Some(&body[start..i]);
                start = i + 1;
            }
            b';' => {
                emit(&mut tags, key.take(), &body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    emit(&mut tags, key, &body[start..]);

    tags
}

fn emit<'a>(tags: &mut HashMap<&'a str, &'a str>, key: Option<&'a str>, segment: &'a str) {
    match key {
        // key=value form; the key must be non-empty per the grammar
        Some(key) if !key.is_empty() => {
            tags.insert(key, segment);
        }
        Some(_) => {}
        // bare key, no `=`: accepted with an empty value
        None if !segment.is_empty() => {
            tags.insert(segment, "");
        }
        None => {}
    }
}

/// Unescape a tag value from wire format.
///
/// The parser leaves tag values raw; call this to decode the IRCv3 escape
/// sequences (`\:` → `;`, `\s` → space, `\\`, `\r`, `\n`).
pub fn unescape_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}
