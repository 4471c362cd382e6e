//! Minimal HTML fragment parser.
//!
//! Understands start/end tags with quoted or bare attributes, self-closing
//! and void elements, text, and the `&amp; &lt; &gt; &quot; &#39;` entities.
//! Mis-nested markup is an error rather than being repaired.

use crate::document::{is_void_tag, Document};
use crate::error::ParseError;

pub fn parse_fragment(input: &str) -> Result<Document, ParseError> {
    let mut doc = Document::new();
    let mut stack = vec![doc.root()];
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];
        if !rest.starts_with('<') {
            let end = rest.find('<').map_or(input.len(), |n| i + n);
            let text = decode_entities(&input[i..end]);
            if !text.is_empty() {
                let id = doc.create_text(&text);
                doc.append_child(current(&stack, &doc), id);
            }
            i = end;
            continue;
        }

        let close = find_tag_end(input, i).ok_or(ParseError::UnterminatedTag(i))?;
        let inner = input[i + 1..close].trim();

        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim().to_ascii_lowercase();
            if stack.len() == 1 {
                return Err(ParseError::UnexpectedClose(name));
            }
            let top = current(&stack, &doc);
            let expected = doc.tag(top).unwrap_or_default().to_string();
            if expected != name {
                return Err(ParseError::MismatchedClose {
                    expected,
                    found: name,
                });
            }
            stack.pop();
        } else if !inner.starts_with('!') {
            let self_closing = inner.ends_with('/');
            let inner = inner.trim_end_matches('/').trim_end();
            let (name, attributes) = parse_tag(inner, i)?;
            let id = doc.create_element(&name, attributes);
            doc.append_child(current(&stack, &doc), id);
            if !self_closing && !is_void_tag(&name) {
                stack.push(id);
            }
        }
        i = close + 1;
    }

    if stack.len() > 1 {
        let top = current(&stack, &doc);
        return Err(ParseError::Unclosed(
            doc.tag(top).unwrap_or_default().to_string(),
        ));
    }
    Ok(doc)
}

fn current(stack: &[usize], doc: &Document) -> usize {
    stack.last().copied().unwrap_or(doc.root())
}

/// Index of the `>` closing the tag opened at `start`, skipping quoted values.
fn find_tag_end(input: &str, start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, c) in input[start + 1..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(start + 1 + offset),
            (None, _) => {}
        }
    }
    None
}

fn parse_tag(inner: &str, at: usize) -> Result<(String, Vec<(String, String)>), ParseError> {
    let name_end = inner
        .find(|c: char| c.is_whitespace())
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    if name.is_empty() {
        return Err(ParseError::EmptyTagName(at));
    }

    let mut attributes = Vec::new();
    let mut rest = inner[name_end..].trim_start();
    while !rest.is_empty() {
        let key_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let key = rest[..key_end].to_ascii_lowercase();
        rest = rest[key_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    match body.find(q) {
                        Some(end) => (&body[..end], &body[end + 1..]),
                        None => (body, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            rest = remaining.trim_start();
            decode_entities(value)
        } else {
            String::new()
        };

        if !key.is_empty() {
            attributes.push((key, value));
        }
    }
    Ok((name, attributes))
}

pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}
