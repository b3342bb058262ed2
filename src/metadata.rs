//! Servings and duration parsing for the recipe header fields.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// `PT1H30M`, `PT45M`, `PT2H`
static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?$").expect("duration pattern is valid")
});

/// A number followed by an hour or minute word: `1 hour`, `30 min`, `2 Std.`, `10m`
static TIME_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?P<value>\d+(?:[.,]\d+)?)\s*(?:(?P<hours>hours?|hrs?|h|stunden?|std)|(?P<minutes>minutes?|minuten?|mins?|m))\b",
    )
    .expect("time part pattern is valid")
});

/// Interprets the free-text servings and time fields of a recipe header
pub trait MetadataParser: Send + Sync {
    /// Number of servings, `None` when the text carries no number
    fn parse_servings(&self, text: &str) -> Option<u32>;

    /// Servings label with the number removed: `"4 persons"` -> `"persons"`
    fn parse_servings_text(&self, text: &str) -> String;

    /// Working time in minutes, `None` when nothing could be read
    fn parse_time(&self, text: &str) -> Option<u32>;
}

/// Regex based [`MetadataParser`] for English and German headers
#[derive(Debug, Clone)]
pub struct BasicMetadataParser {
    servings_text_max_len: usize,
}

impl BasicMetadataParser {
    pub fn new(servings_text_max_len: usize) -> Self {
        Self {
            servings_text_max_len,
        }
    }
}

impl Default for BasicMetadataParser {
    fn default() -> Self {
        Self::new(32)
    }
}

impl MetadataParser for BasicMetadataParser {
    fn parse_servings(&self, text: &str) -> Option<u32> {
        NUMBER.find(text).and_then(|m| m.as_str().parse().ok())
    }

    fn parse_servings_text(&self, text: &str) -> String {
        NUMBER
            .replace_all(text, "")
            .trim()
            .chars()
            .take(self.servings_text_max_len)
            .collect()
    }

    fn parse_time(&self, text: &str) -> Option<u32> {
        let text = text.trim();

        if let Some(captures) = ISO_DURATION.captures(text) {
            let part = |name: &str| -> Option<u32> {
                match captures.name(name) {
                    Some(m) => m.as_str().parse().ok(),
                    None => Some(0),
                }
            };
            let minutes = part("hours")
                .and_then(|hours| hours.checked_mul(60))
                .zip(part("minutes"))
                .and_then(|(hours, minutes)| hours.checked_add(minutes));
            if minutes.is_none() {
                debug!("Duration {:?} is out of range", text);
            }
            return minutes;
        }

        let mut total = 0.0;
        let mut found = false;
        for captures in TIME_PART.captures_iter(text) {
            let Ok(value) = captures["value"].replace(',', ".").parse::<f64>() else {
                continue;
            };
            found = true;
            if captures.name("hours").is_some() {
                total += value * 60.0;
            } else {
                total += value;
            }
        }
        if found {
            let total = total.round();
            if total > f64::from(u32::MAX) {
                debug!("Duration {:?} is out of range", text);
                return None;
            }
            return Some(total as u32);
        }

        let minutes = self.parse_servings(text);
        if minutes.is_none() && !text.is_empty() {
            debug!("Could not read a duration from {:?}", text);
        }
        minutes
    }
}
