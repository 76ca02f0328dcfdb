//! Transcript line parsing for terminal hosts
//!
//! Lines look like `user: hello` / `bot: hi there` (also `u:` / `b:`,
//! any case). Anything else is a command or unknown.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SPEAKER: Regex = Regex::new(
        r"(?i)^\s*(user|u|bot|b)\s*:\s*(.*?)\s*$"
    ).unwrap();
}

/// One parsed transcript line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine<'a> {
    User(&'a str),
    Bot(&'a str),
    Status,
    Quit,
    Empty,
    Unknown(&'a str),
}

pub fn parse_line(line: &str) -> TranscriptLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return TranscriptLine::Empty;
    }
    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        return TranscriptLine::Quit;
    }
    if trimmed.eq_ignore_ascii_case("status") {
        return TranscriptLine::Status;
    }

    match RE_SPEAKER.captures(line) {
        Some(caps) => {
            let text = caps.get(2).map_or("", |m| m.as_str());
            let speaker = caps[1].to_ascii_lowercase();
            if speaker.starts_with('u') {
                TranscriptLine::User(text)
            } else {
                TranscriptLine::Bot(text)
            }
        }
        None => TranscriptLine::Unknown(trimmed),
    }
}
