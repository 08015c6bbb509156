//! Minimal HTML start tag scanner.
//!
//! Walks a document and yields opening tags with their attributes, skipping
//! comments and the raw text of `<script>` and `<style>` elements. Markup that
//! cannot be read as a tag is passed over, and an unterminated comment or raw
//! text element ends the scan.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Compiles a regex at static init; panics on invalid pattern.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Comments and raw text elements come first so leftmost-first matching
/// consumes them whole before any tag inside them is seen. Quotes only open
/// a quoted value right after `=`; anywhere else they are plain characters,
/// and an unquoted value runs to whitespace or `>`.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<!--.*?(?:-->|\z)|<script\b.*?(?:</script\s*>|\z)|<style\b.*?(?:</style\s*>|\z)|<(?P<name>[a-z][a-z0-9:-]*)(?P<attrs>(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]*)|[^>=])*)>"#,
    )
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?s)(?P<key>[^\s>/=]+)(?:\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<uq>[^\s>]+)))?"#,
    )
});

/// An opening tag found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    name: String,
    raw_attributes: &'a str,
}

impl StartTag<'_> {
    /// Lowercased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in source order as (lowercased key, decoded value).
    /// Attributes without a value yield an empty string.
    pub fn attributes(&self) -> impl Iterator<Item = (String, String)> + '_ {
        ATTRIBUTE_RE.captures_iter(self.raw_attributes).filter_map(|caps| {
            let key = caps.name("key")?.as_str().to_ascii_lowercase();
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("uq"))
                .map_or("", |m| m.as_str());
            Some((key, decode_entities(value).into_owned()))
        })
    }

    /// Value of the attribute `key`; the last occurrence wins.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value)
            .last()
    }
}

/// Iterates over the start tags of `html` in document order.
pub fn start_tags(html: &str) -> impl Iterator<Item = StartTag<'_>> {
    TOKEN_RE.captures_iter(html).filter_map(|caps| {
        let name = caps.name("name")?.as_str().to_ascii_lowercase();
        let raw_attributes = caps.name("attrs").map_or("", |m| m.as_str());
        Some(StartTag {
            name,
            raw_attributes,
        })
    })
}

/// Decodes the character references that show up in attribute values.
/// Unknown references are left untouched.
#[must_use]
pub fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match rest.find(';').and_then(|end| Some((decode_reference(&rest[1..end])?, end))) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(reference: &str) -> Option<char> {
    match reference {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let numeric = reference.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}
