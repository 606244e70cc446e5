use std::collections::HashMap;

use crate::error::LineParseError;

use super::tags::scan_tags;

/// A single IRC line split into its components.
///
/// All fields borrow from the input line; the only allocation is the tag
/// map. Produced per line by the receive pump and consumed synchronously by
/// the dispatcher.
#[derive(Clone, PartialEq, Debug)]
pub struct LineRef<'a> {
    pub tags: Option<HashMap<&'a str, &'a str>>,
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub channel: Option<&'a str>,
    pub trailing: Option<&'a str>,
}

impl<'a> LineRef<'a> {
    /// Parse one line of the form `[@tags] [:prefix] command [middle…] [:trailing]`.
    ///
    /// Single pass, index arithmetic over the byte view. A terminal CRLF is
    /// tolerated; embedded CR/LF is the caller's problem.
    pub fn parse(s: &'a str) -> Result<LineRef<'a>, LineParseError> {
        let s = s.trim_end_matches(['\r', '\n']);
        if s.is_empty() {
            return Err(LineParseError::EmptyLine);
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        let tags = if bytes[0] == b'@' {
            let space =
                find_byte(bytes, 1, b' ').ok_or(LineParseError::UnterminatedTags)?;
            let body = &s[1..space];
            pos = skip_spaces(bytes, space);
            Some(scan_tags(body))
        } else {
            None
        };

        let prefix = if pos < bytes.len() && bytes[pos] == b':' {
            let space =
                find_byte(bytes, pos + 1, b' ').ok_or(LineParseError::UnterminatedPrefix)?;
            let prefix = &s[pos + 1..space];
            pos = skip_spaces(bytes, space);
            Some(prefix)
        } else {
            None
        };

        let cmd_start = pos;
        while pos < bytes.len() && bytes[pos] != b' ' {
            pos += 1;
        }
        if pos == cmd_start {
            return Err(LineParseError::MissingCommand);
        }
        let command = &s[cmd_start..pos];
        pos = skip_spaces(bytes, pos);

        let (channel, trailing) = split_params(&s[pos..]);

        Ok(LineRef {
            tags,
            prefix,
            command,
            channel,
            trailing,
        })
    }
}

/// Split the parameter section into (middles, trailing).
///
/// The trailing parameter starts at a `:` that opens a parameter (at the
/// start of the view or right after a space). The middles keep their wire
/// form, minus the spaces that preceded the colon; they are absent when only
/// spaces precede it.
fn split_params(view: &str) -> (Option<&str>, Option<&str>) {
    if view.is_empty() {
        return (None, None);
    }
    let bytes = view.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] == b':' && (i == 0 || bytes[i - 1] == b' ') {
            let trailing = &view[i + 1..];
            let mut end = i;
            while end > 0 && bytes[end - 1] == b' ' {
                end -= 1;
            }
            let channel = if end == 0 { None } else { Some(&view[..end]) };
            return (channel, Some(trailing));
        }
    }
    (Some(view), None)
}

fn find_byte(bytes: &[u8], from: usize, byte: u8) -> Option<usize> {
    bytes[from..].iter().position(|&b| b == byte).map(|i| from + i)
}

fn skip_spaces(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos] == b' ' {
        pos += 1;
    }
    pos
}
