//! Tolerant record scanner for hand-authored content files.
//!
//! Content files look like JSON but are not guaranteed to be valid JSON, so
//! this module deliberately avoids a structured-data grammar. A record is the
//! block of lines between a `{` line and a `}` line; fields inside it are
//! found by substring-matching the quoted field name and taking the text
//! between the first and last quotation mark after its colon. Malformed or
//! incomplete records are skipped, never fatal: the content pipeline favors
//! loading what it can over rejecting a whole file.

use crate::logutil::escape_content;
use log::debug;

/// One raw record: the lines collected from its opening delimiter through its
/// closing delimiter. Field extraction scans the lines in order and uses the
/// first line that mentions the field.
#[derive(Debug, Default, Clone)]
pub struct RawRecord {
    lines: Vec<String>,
}

impl RawRecord {
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Extract a string field by name. Returns `None` when no line mentions
    /// the field or the extracted value is empty.
    pub fn string_field(&self, name: &str) -> Option<String> {
        self.lines
            .iter()
            .find_map(|line| field_value(line, name))
            .filter(|v| !v.is_empty())
    }

    /// Extract an integer field by name. Missing fields and values that do
    /// not parse as base-10 integers both yield 0; parse failure is
    /// swallowed, not propagated.
    pub fn int_field(&self, name: &str) -> i32 {
        self.string_field(name)
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(0)
    }
}

/// Extract the value of `name` from a single line, or `None` when the line
/// does not carry that field.
///
/// The field is detected by the quoted field name followed by a colon. The
/// value is the text between the first and last quotation mark after the
/// colon; if the remainder holds no quoted span, the raw text is used
/// instead, trimmed of whitespace and trailing record punctuation (a comma
/// or closing delimiter).
pub fn field_value(line: &str, name: &str) -> Option<String> {
    let needle = format!("\"{}\"", name);
    let at = line.find(&needle)?;
    let after_name = &line[at + needle.len()..];
    let colon = after_name.find(':')?;
    let rest = &after_name[colon + 1..];

    let first = rest.find('"');
    let last = rest.rfind('"');
    match (first, last) {
        (Some(first), Some(last)) if last > first => Some(rest[first + 1..last].to_string()),
        _ => {
            let raw = rest
                .trim()
                .trim_end_matches(|c| c == ',' || c == '}' || c == ']')
                .trim();
            Some(raw.to_string())
        }
    }
}

/// Extract a (quoted id, integer) pairing from a line, the shape recipe
/// component entries use (e.g. `[ "stick", 2 ],`). The id is the text
/// between the first and last quote on the line; the quantity is the first
/// integer after the last quote. Lines without both parts yield `None`.
pub fn quoted_int_pair(line: &str) -> Option<(String, u32)> {
    let first = line.find('"')?;
    let last = line.rfind('"')?;
    if last <= first {
        return None;
    }
    let id = &line[first + 1..last];
    if id.is_empty() {
        return None;
    }
    let quantity = first_int(&line[last + 1..])?;
    if quantity <= 0 {
        return None;
    }
    Some((id.to_string(), quantity as u32))
}

/// Parse the first run of digits in `s` as an integer.
fn first_int(s: &str) -> Option<i64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Split raw lines into delimited records. A record opens at a line
/// containing `{` and closes at a line containing `}`; both delimiter lines
/// belong to the record so compact one-line records still work. A record
/// left open at end of input never reached its terminator and is dropped.
pub fn scan_records<I>(lines: I) -> Vec<RawRecord>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut records = Vec::new();
    let mut current: Option<RawRecord> = None;

    for line in lines {
        let line = line.as_ref();
        match current.as_mut() {
            None => {
                if line.contains('{') {
                    let mut record = RawRecord::default();
                    record.push_line(line);
                    if line.contains('}') {
                        records.push(record);
                    } else {
                        current = Some(record);
                    }
                }
                // Lines outside any record are ignored
            }
            Some(record) => {
                record.push_line(line);
                if line.contains('}') {
                    records.push(current.take().unwrap_or_default());
                }
            }
        }
    }

    if let Some(dropped) = current {
        debug!(
            "dropping unterminated record: {}",
            escape_content(dropped.lines().join(" ").as_str())
        );
    }

    records
}

/// Scan the simplified item variant: no per-record delimiters. An id field
/// arms the accumulator and a name (`str`) field flushes it, so a record is
/// complete as soon as both have been seen and field order matters — a name
/// with no preceding id is skipped. Lines carrying `"str"` nested under
/// `"name"` (the delimited schema shape) flush the same way.
pub fn scan_item_fields<I>(lines: I) -> Vec<(String, String)>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut pairs = Vec::new();
    let mut pending_id: Option<String> = None;

    for line in lines {
        let line = line.as_ref();
        if let Some(id) = field_value(line, "id").filter(|v| !v.is_empty()) {
            pending_id = Some(id);
        }
        if let Some(name) = field_value(line, "str").filter(|v| !v.is_empty()) {
            match pending_id.take() {
                Some(id) => pairs.push((id, name)),
                None => {
                    debug!("skipping item name with no id: {}", escape_content(line));
                }
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_value_between_first_and_last_quote() {
        let v = field_value(r#"  "id": "gray_wolf","#, "id");
        assert_eq!(v.as_deref(), Some("gray_wolf"));

        // Quotes in the value are kept; only the outermost pair delimits
        let v = field_value(r#""str": "the "old" mill""#, "str");
        assert_eq!(v.as_deref(), Some(r#"the "old" mill"#));
    }

    #[test]
    fn unquoted_value_falls_back_to_trimmed_text() {
        let v = field_value(r#"  "hp": 12,"#, "hp");
        assert_eq!(v.as_deref(), Some("12"));

        let v = field_value("  \"hp\":   7  ", "hp");
        assert_eq!(v.as_deref(), Some("7"));
    }

    #[test]
    fn nested_name_str_extracts_inner_value() {
        let v = field_value(r#"  "name": { "str": "Gray Wolf" },"#, "str");
        assert_eq!(v.as_deref(), Some("Gray Wolf"));
    }

    #[test]
    fn melee_dice_does_not_match_melee_dice_sides() {
        let record = {
            let mut r = RawRecord::default();
            r.push_line(r#"  "melee_dice_sides": 4,"#);
            r.push_line(r#"  "melee_dice": 2,"#);
            r
        };
        assert_eq!(record.int_field("melee_dice"), 2);
        assert_eq!(record.int_field("melee_dice_sides"), 4);
    }

    #[test]
    fn int_field_defaults_to_zero_on_garbage() {
        let mut record = RawRecord::default();
        record.push_line(r#"  "hp": lots,"#);
        assert_eq!(record.int_field("hp"), 0);
        assert_eq!(record.int_field("armor"), 0); // absent entirely
    }

    #[test]
    fn records_split_on_delimiters() {
        let lines = [
            "junk before",
            "{",
            "  \"id\": \"a\",",
            "}",
            "between",
            "{",
            "  \"id\": \"b\"",
            "}",
        ];
        let records = scan_records(lines);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].string_field("id").as_deref(), Some("a"));
        assert_eq!(records[1].string_field("id").as_deref(), Some("b"));
    }

    #[test]
    fn compact_single_line_record() {
        let records = scan_records([r#"{ "id": "x", "hp": 3 }"#]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].int_field("hp"), 3);
    }

    #[test]
    fn unterminated_record_is_dropped() {
        let records = scan_records(["{", "  \"id\": \"half\""]);
        assert!(records.is_empty());
    }

    #[test]
    fn item_scan_flushes_on_name_after_id() {
        let lines = [
            r#""id": "torch""#,
            r#""str": "Torch""#,
            r#""id": "rope""#,
            r#""str": "Hemp Rope""#,
        ];
        let pairs = scan_item_fields(lines);
        assert_eq!(
            pairs,
            vec![
                ("torch".to_string(), "Torch".to_string()),
                ("rope".to_string(), "Hemp Rope".to_string()),
            ]
        );
    }

    #[test]
    fn item_name_before_id_is_skipped() {
        let lines = [r#""str": "Orphan Name""#, r#""id": "later""#];
        assert!(scan_item_fields(lines).is_empty());
    }

    #[test]
    fn item_scan_accepts_delimited_nested_shape() {
        let lines = [
            "{",
            r#"  "id": "lantern","#,
            r#"  "name": { "str": "Oil Lantern" }"#,
            "}",
        ];
        let pairs = scan_item_fields(lines);
        assert_eq!(
            pairs,
            vec![("lantern".to_string(), "Oil Lantern".to_string())]
        );
    }

    #[test]
    fn component_pair_extraction() {
        assert_eq!(
            quoted_int_pair(r#"    [ "stick", 2 ],"#),
            Some(("stick".to_string(), 2))
        );
        assert_eq!(quoted_int_pair(r#"    [ "stick" ],"#), None);
        assert_eq!(quoted_int_pair("    [ 2 ],"), None);
        assert_eq!(quoted_int_pair(r#"    [ "stick", 0 ],"#), None);
    }
}
