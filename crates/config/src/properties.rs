//! Properties-file codec and the raw key/value layer.
//!
//! Responsibilities:
//! - Parse the conventional `key=value` properties format into `RawProperties`.
//! - Render `RawProperties` back into text the parser reads identically.
//! - Overlay layers and rewrite `local.properties` aliases to canonical keys.
//!
//! Does NOT handle:
//! - Reading files from disk (see `loader::file`).
//! - Interpreting values as integers, booleans or enums (see `loader::resolve`).
//!
//! Invariants:
//! - Parsing never fails; malformed `\uXXXX` escapes are kept literally.
//! - Later duplicates of a key replace earlier ones.
//! - Entries are kept sorted by key, so rendering is deterministic.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::constants::{
    DEFAULT_APPLICATION_ID, DEFAULT_COMPILE_SDK, DEFAULT_JVM_TARGET, DEFAULT_MIN_SDK,
    DEFAULT_SIGNING_MODE, DEFAULT_TARGET_SDK, DEFAULT_VERSION_CODE, DEFAULT_VERSION_NAME,
    KEY_ALIASES, KEY_APPLICATION_ID, KEY_COMPILE_SDK, KEY_JVM_TARGET, KEY_MIN_SDK,
    KEY_MINIFY_ENABLED, KEY_SHRINK_RESOURCES, KEY_SIGNING_MODE, KEY_TARGET_SDK,
    KEY_VERSION_CODE, KEY_VERSION_NAME,
};

/// A set of raw string properties, as read from a properties file or the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProperties {
    entries: BTreeMap<String, String>,
}

impl RawProperties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The defaults the Android build script falls back to when
    /// `local.properties` does not say otherwise.
    pub fn builtin_defaults() -> Self {
        [
            (KEY_APPLICATION_ID, DEFAULT_APPLICATION_ID.to_string()),
            (KEY_VERSION_NAME, DEFAULT_VERSION_NAME.to_string()),
            (KEY_VERSION_CODE, DEFAULT_VERSION_CODE.to_string()),
            (KEY_MIN_SDK, DEFAULT_MIN_SDK.to_string()),
            (KEY_TARGET_SDK, DEFAULT_TARGET_SDK.to_string()),
            (KEY_COMPILE_SDK, DEFAULT_COMPILE_SDK.to_string()),
            (KEY_SIGNING_MODE, DEFAULT_SIGNING_MODE.to_string()),
            (KEY_MINIFY_ENABLED, false.to_string()),
            (KEY_SHRINK_RESOURCES, false.to_string()),
            (KEY_JVM_TARGET, DEFAULT_JVM_TARGET.to_string()),
        ]
        .into_iter()
        .collect()
    }

    /// Parse properties-file text.
    pub fn parse(text: &str) -> Self {
        parse(text)
    }

    /// Render as properties-file text, one `key=value` line per entry.
    pub fn render(&self) -> String {
        render(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a property, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Return a new set where every key in `upper` replaces the same key in `self`.
    pub fn overlay(&self, upper: &RawProperties) -> RawProperties {
        let mut merged = self.clone();
        merged.extend(upper.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Rewrite `local.properties` aliases (e.g. `flutter.versionCode`) to their
    /// canonical key. When both spellings are present the canonical key wins.
    pub fn canonicalize(&self) -> RawProperties {
        let mut out = self.clone();
        for (alias, canonical) in KEY_ALIASES {
            let Some(value) = out.entries.remove(*alias) else {
                continue;
            };
            match out.entries.get(*canonical) {
                Some(existing) if existing != &value => {
                    tracing::warn!(
                        alias,
                        canonical,
                        "Both alias and canonical key are set; using the canonical value"
                    );
                }
                Some(_) => {}
                None => {
                    out.entries.insert((*canonical).to_string(), value);
                }
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = RawProperties::new();
        props.extend(iter);
        props
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for RawProperties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value.into());
        }
    }
}

impl<'a> IntoIterator for &'a RawProperties {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whitespace as the properties format defines it.
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Parse properties-file text into a property set.
pub fn parse(text: &str) -> RawProperties {
    let mut props = RawProperties::new();
    let normalized = text.replace("\r\n", "\n");
    let mut natural_lines = normalized.split(['\n', '\r']);

    while let Some(line) = natural_lines.next() {
        let line = line.trim_start_matches(is_blank);
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match natural_lines.next() {
                Some(next) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        props.insert(unescape(key), unescape(value));
    }

    props
}

/// A line continues when it ends in an odd number of backslashes.
fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = idx;
            break;
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (&line[..key_end], rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => match read_hex4(&chars) {
                Some(high @ 0xD800..=0xDBFF) => {
                    let mut rest = chars.clone();
                    rest.nth(3);
                    let low = (rest.next() == Some('\\') && rest.next() == Some('u'))
                        .then(|| read_hex4(&rest))
                        .flatten()
                        .filter(|low| (0xDC00..=0xDFFF).contains(low));
                    match low.and_then(|low| {
                        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
                    }) {
                        Some(ch) => {
                            out.push(ch);
                            chars = rest;
                            chars.nth(3);
                        }
                        None => keep_malformed_escape(&mut out, &chars),
                    }
                }
                Some(code) => match char::from_u32(code) {
                    Some(ch) => {
                        out.push(ch);
                        chars.nth(3);
                    }
                    None => keep_malformed_escape(&mut out, &chars),
                },
                None => keep_malformed_escape(&mut out, &chars),
            },
            Some(other) => out.push(other),
            // Dangling backslash at the end of the input.
            None => {}
        }
    }

    out
}

/// Read the four hex digits following `\u` without consuming them.
fn read_hex4(chars: &std::str::Chars<'_>) -> Option<u32> {
    let hex: String = chars.clone().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok()
}

/// Unpaired surrogates and bad hex digits are kept as written.
fn keep_malformed_escape(out: &mut String, chars: &std::str::Chars<'_>) {
    let hex: String = chars.clone().take(4).collect();
    tracing::warn!(escape = %hex, "Malformed \\u escape kept literally");
    out.push_str("\\u");
}

/// Render a property set as properties-file text.
pub fn render(props: &RawProperties) -> String {
    let mut out = String::new();
    for (key, value) in props {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for (idx, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || idx == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if is_key && idx == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
