use std::sync::LazyLock;

use fancy_regex::Regex;

use super::*;

static LEADING_INTEGER: LazyLock<std::result::Result<Regex, String>> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").map_err(|err| err.to_string()));

/// Reads the integer at the start of `text`, ignoring leading whitespace and
/// anything after the digits, so `" 12.50"` reads as 12.
pub(crate) fn parse_leading_integer(text: &str) -> Result<i64> {
    let pattern = LEADING_INTEGER
        .as_ref()
        .map_err(|err| Error::InvalidTotal(format!("{text} ({err})")))?;
    let captures = pattern
        .captures(text)
        .map_err(|err| Error::InvalidTotal(format!("{text} ({err})")))?
        .ok_or_else(|| Error::InvalidTotal(text.to_string()))?;
    let digits = captures
        .get(1)
        .map(|matched| matched.as_str())
        .ok_or_else(|| Error::InvalidTotal(text.to_string()))?;
    digits
        .trim_start_matches('+')
        .parse::<i64>()
        .map_err(|_| Error::InvalidTotal(text.to_string()))
}

pub(crate) fn escape_html_text_for_serialization(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_html_attr_for_serialization(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    let bytes = style_attr.as_bytes();
    let mut start = 0usize;
    let mut paren_depth = 0isize;
    let mut quote: Option<u8> = None;

    for (i, &ch) in bytes.iter().enumerate() {
        match (quote, ch) {
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, b'\'') | (None, b'"') => quote = Some(ch),
            (None, b'(') => paren_depth += 1,
            (None, b')') => paren_depth = (paren_depth - 1).max(0),
            (None, b';') if paren_depth == 0 => {
                push_style_declaration(&style_attr[start..i], &mut out);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_style_declaration(&style_attr[start..], &mut out);

    out
}

fn push_style_declaration(raw_decl: &str, out: &mut Vec<(String, String)>) {
    let decl = raw_decl.trim();
    let Some((name, value)) = decl.split_once(':') else {
        return;
    };

    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    let value = value.trim().to_string();

    if let Some(pos) = out.iter().position(|(existing, _)| existing == &name) {
        out[pos].1 = value;
    } else {
        out.push((name, value));
    }
}

pub(crate) fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
