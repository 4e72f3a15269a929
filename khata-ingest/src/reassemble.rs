//! Reassemble wrapped statement lines into one logical record per transaction.
//!
//! PDF-extracted statement text wraps long narrations across lines and
//! intersperses page headers/footers. A record starts at a `DD-MM-YYYY `
//! prefix; everything else is either boilerplate (discarded) or a
//! continuation of the current record (space-joined).

use regex::Regex;
use std::sync::OnceLock;

/// Page header/footer lines dropped entirely during reassembly.
const BOILERPLATE_PREFIXES: [&str; 4] = [
    "Date Bank Name",
    "Account Details",
    "Consolidated Account Summary",
    "Bank Name Account",
];

fn date_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}-\d{2}-\d{4}\s").expect("invalid date prefix regex"))
}

fn ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("invalid whitespace regex"))
}

fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_PREFIXES.iter().any(|p| line.starts_with(p))
        || line.to_lowercase().contains("opening balance")
}

/// Collapse whitespace runs and trim; `None` when nothing remains.
fn normalize(block: &str) -> Option<String> {
    let collapsed = ws_re().replace_all(block.trim(), " ").into_owned();
    if collapsed.is_empty() { None } else { Some(collapsed) }
}

/// Iterator over logical record blocks. Finite, single pass over the input.
pub struct RecordBlocks<'a> {
    lines: std::str::Lines<'a>,
    current: String,
    flushed: bool,
}

/// Split raw statement text into reassembled record blocks.
pub fn record_blocks(text: &str) -> RecordBlocks<'_> {
    RecordBlocks {
        lines: text.lines(),
        current: String::new(),
        flushed: false,
    }
}

impl Iterator for RecordBlocks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for raw in self.lines.by_ref() {
            let line = raw.trim();
            if line.is_empty() || is_boilerplate(line) {
                continue;
            }
            if date_prefix_re().is_match(line) {
                let prev = std::mem::replace(&mut self.current, line.to_string());
                if let Some(block) = normalize(&prev) {
                    return Some(block);
                }
                continue;
            }
            if !self.current.is_empty() {
                self.current.push(' ');
            }
            self.current.push_str(line);
        }

        if self.flushed {
            return None;
        }
        self.flushed = true;
        normalize(&std::mem::take(&mut self.current))
    }
}
