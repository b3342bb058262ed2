//! Ingredient tag scanning.
//!
//! Three shapes are recognised, with the command spelled `\ing`, `\Ing`,
//! `\ingredient` or `\Ingredient`:
//!
//! ```text
//! \ing[3]{l}{milk}     number, unit, food
//! \ing{3 l}{milk}      amount with unit, food
//! \ing{3 l milk}       everything in one field
//! ```
//!
//! Fields may span lines but never contain braces. No whitespace is allowed
//! between the command and its arguments.

use log::debug;
use std::ops::Range;

/// The captured parts of one ingredient tag, borrowed from the scanned text
#[derive(Debug, Clone, PartialEq)]
pub struct RawIngredientMatch<'a> {
    /// Bracketed `[number]`
    pub number: Option<&'a str>,
    /// First of two braced fields
    pub amount: Option<&'a str>,
    /// Last braced field
    pub ing: &'a str,
    /// Byte range of the whole tag in the scanned text
    pub span: Range<usize>,
    /// The whole tag, verbatim
    pub text: &'a str,
}

/// Iterator over the ingredient tags of a text, in order of appearance
#[derive(Debug, Clone)]
pub struct IngredientTags<'a> {
    text: &'a str,
    pos: usize,
}

/// Scan `text` for ingredient tags
pub fn ingredient_tags(text: &str) -> IngredientTags<'_> {
    IngredientTags { text, pos: 0 }
}

impl<'a> Iterator for IngredientTags<'a> {
    type Item = RawIngredientMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let start = self.pos + self.text[self.pos..].find('\\')?;
            if let Some(tag) = match_tag(self.text, start) {
                self.pos = tag.span.end;
                return Some(tag);
            }
            self.pos = start + 1;
        }
        None
    }
}

/// Try to read a tag whose backslash sits at `start`
fn match_tag(text: &str, start: usize) -> Option<RawIngredientMatch<'_>> {
    let name = &text[start + 1..];
    if !(name.starts_with("ing") || name.starts_with("Ing")) {
        return None;
    }
    let short_end = start + 4;

    // Prefer the long spelling, fall back to `\ing` followed by plain text
    if text[short_end..].starts_with("redient") {
        if let Some(tag) = match_arguments(text, start, short_end + "redient".len()) {
            return Some(tag);
        }
    }
    match_arguments(text, start, short_end)
}

fn match_arguments(text: &str, start: usize, args: usize) -> Option<RawIngredientMatch<'_>> {
    let mut pos = args;

    let mut number = None;
    if text[pos..].starts_with('[') {
        let close = pos + 1 + text[pos + 1..].find(']')?;
        number = Some(&text[pos + 1..close]);
        pos = close + 1;
    }

    let (first, after_first) = braced_field(text, pos)?;
    let (amount, ing, end) = match braced_field(text, after_first) {
        Some((second, after_second)) => (Some(first), second, after_second),
        None => (None, first, after_first),
    };

    Some(RawIngredientMatch {
        number,
        amount,
        ing,
        span: start..end,
        text: &text[start..end],
    })
}

/// Read `{...}` at `pos`, returning the inner text and the position after `}`
fn braced_field(text: &str, pos: usize) -> Option<(&str, usize)> {
    let rest = text.get(pos..)?;
    if !rest.starts_with('{') {
        return None;
    }
    let close = rest[1..].find(['{', '}'])? + 1;
    if !rest[close..].starts_with('}') {
        return None;
    }
    Some((&rest[1..close], pos + close + 1))
}

/// Remove every ingredient tag from `text`, keeping everything else untouched.
///
/// Cutting a tag out can join two fragments into a new tag; those are removed
/// as well, so the result never contains a tag.
pub fn strip_ingredient_tags(text: &str) -> String {
    let mut stripped = strip_once(text);
    while ingredient_tags(&stripped).next().is_some() {
        debug!("Removing ingredient tag assembled by a previous removal");
        stripped = strip_once(&stripped);
    }
    stripped
}

fn strip_once(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for tag in ingredient_tags(text) {
        result.push_str(&text[last..tag.span.start]);
        last = tag.span.end;
    }
    result.push_str(&text[last..]);
    result
}
