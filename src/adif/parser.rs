// ADIF Parser
// Tolerant tokenizer for the data section of an ADIF file.
//
// Only the text after the first <EOH> is parsed. Tags that do not fit
// <NAME:LENGTH> (optionally <NAME:LENGTH:TYPE>) are skipped, and a trailing
// record without <EOR> is still emitted.

use std::collections::HashMap;

const EOH: &str = "<EOH>";

/// A single ADIF record (one QSO)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdifRecord {
    /// All fields as key-value pairs (uppercase keys)
    pub fields: HashMap<String, String>,
}

impl AdifRecord {
    pub fn new() -> Self {
        Self { fields: HashMap::new() }
    }

    /// Insert a field; the name is stored uppercase and later values win
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_uppercase(), value.into());
    }

    /// Get a field value (case-insensitive lookup)
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_uppercase()).map(String::as_str)
    }

    /// First present field among `keys`
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    /// Check if a field exists
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(&key.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn call(&self) -> Option<&str> { self.get("CALL") }
    pub fn band(&self) -> Option<&str> { self.get("BAND") }
    pub fn freq(&self) -> Option<&str> { self.get("FREQ") }
    pub fn mode(&self) -> Option<&str> { self.get("MODE") }
    pub fn qso_date(&self) -> Option<&str> { self.get("QSO_DATE") }
    pub fn time_on(&self) -> Option<&str> { self.get("TIME_ON") }
    pub fn gridsquare(&self) -> Option<&str> { self.get("GRIDSQUARE") }
}

/// Byte offset of the first `<EOH>`, any case
pub fn find_header_end(content: &str) -> Option<usize> {
    // ASCII uppercasing keeps byte offsets aligned with `content`
    content.to_ascii_uppercase().find(EOH)
}

/// True when the content carries a header terminator
pub fn has_header_terminator(content: &str) -> bool {
    find_header_end(content).is_some()
}

/// Parse every record in the data section. Content without `<EOH>` yields
/// no records.
pub fn parse_records(content: &str) -> Vec<AdifRecord> {
    match find_header_end(content) {
        Some(eoh_pos) => parse_data_section(&content[eoh_pos + EOH.len()..]),
        None => Vec::new(),
    }
}

/// What a `<...>` tag turned out to be
#[derive(Debug, PartialEq)]
enum Tag<'a> {
    Field { name: &'a str, length: usize },
    EndOfRecord,
    Malformed,
}

fn classify_tag(inner: &str) -> Tag<'_> {
    if inner.eq_ignore_ascii_case("EOR") {
        return Tag::EndOfRecord;
    }

    let mut parts = inner.splitn(3, ':');
    let name = parts.next().unwrap_or("");
    let length = match parts.next() {
        Some(len) if !len.is_empty() && len.bytes().all(|b| b.is_ascii_digit()) => len,
        _ => return Tag::Malformed,
    };
    // Optional data type indicator must be a bare word
    if let Some(kind) = parts.next() {
        if kind.is_empty() || kind.contains(':') {
            return Tag::Malformed;
        }
    }
    if name.is_empty() {
        return Tag::Malformed;
    }

    match length.parse::<usize>() {
        Ok(length) => Tag::Field { name, length },
        Err(_) => Tag::Malformed,
    }
}

/// True when `text` starts with a well-formed `<...>` tag
fn opens_tag(text: &str) -> bool {
    let Some(body) = text.strip_prefix('<') else {
        return false;
    };
    match body.find(|c: char| c == '>' || c == '<') {
        Some(idx) if body.as_bytes()[idx] == b'>' => classify_tag(&body[..idx]) != Tag::Malformed,
        _ => false,
    }
}

/// Split `tail` into a value of `length` chars and the text after it.
/// A `<` inside that span belongs to the value unless it opens a real tag,
/// in which case the value was shorter than declared and ends there.
fn split_value(tail: &str, length: usize) -> (&str, &str) {
    let span_end = tail
        .char_indices()
        .nth(length)
        .map(|(idx, _)| idx)
        .unwrap_or(tail.len());

    let mut from = 0;
    while let Some(pos) = tail[from..span_end].find('<') {
        let at = from + pos;
        if opens_tag(&tail[at..]) {
            return (&tail[..at], &tail[at..]);
        }
        from = at + 1;
    }

    (&tail[..span_end], &tail[span_end..])
}

/// Tokenizer position relative to the record being assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingField,
    InRecord,
}

/// Two-state tokenizer over the text following `<EOH>`
pub fn parse_data_section(data: &str) -> Vec<AdifRecord> {
    let mut records = Vec::new();
    let mut current = AdifRecord::new();
    let mut state = State::SeekingField;
    let mut rest = data;

    while let Some(open) = rest.find('<') {
        let after_open = &rest[open + 1..];

        let close = match after_open.find(|c: char| c == '>' || c == '<') {
            Some(idx) if after_open.as_bytes()[idx] == b'>' => idx,
            // Unterminated tag or a stray '<': resume at the next '<'
            Some(idx) => {
                rest = &after_open[idx..];
                continue;
            }
            None => break,
        };

        let inner = &after_open[..close];
        let tail = &after_open[close + 1..];

        match classify_tag(inner) {
            Tag::EndOfRecord => {
                if state == State::InRecord {
                    records.push(std::mem::take(&mut current));
                }
                state = State::SeekingField;
                rest = tail;
            }
            Tag::Field { name, length } => {
                let (value, after) = split_value(tail, length);
                current.insert(name, value);
                state = State::InRecord;
                rest = after;
            }
            Tag::Malformed => {
                log::debug!("Skipping malformed ADIF tag <{}>", inner);
                rest = tail;
            }
        }
    }

    // Flush a final record that was never closed by <EOR>
    if state == State::InRecord && !current.is_empty() {
        records.push(current);
    }

    records
}
