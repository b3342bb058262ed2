use super::quantity::{parse_quantity, split_quantity};
use super::{ParsedAmount, ParsedPhrase, PhraseParser};
use crate::error::PhraseError;
use log::trace;

/// Whitespace-token based phrase parser.
///
/// Understands `amount [unit] food[, note]` and `amount [unit] food (note)`.
/// The unit is whatever token follows the amount; no unit dictionary is consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPhraseParser;

impl BasicPhraseParser {
    pub fn new() -> Self {
        Self
    }
}

/// Leading quantity of a tokenised phrase
struct Lead<'a> {
    amount: f64,
    /// Unit glued to the number, as in `500g`
    glued_unit: &'a str,
    /// Index of the first token after the quantity
    next: usize,
}

fn leading_quantity<'a>(tokens: &[&'a str]) -> Result<Lead<'a>, PhraseError> {
    let first = *tokens.first().ok_or(PhraseError::Empty)?;
    let (mut amount, glued_unit) = split_quantity(first)?;
    let mut next = 1;

    // Mixed numbers: "2 1/2", "1 ½"
    if glued_unit.is_empty() {
        if let Some(fraction) = tokens.get(1).filter(|t| is_fraction_token(t)) {
            if let Ok(value) = parse_quantity(fraction) {
                amount += value;
                next = 2;
            }
        }
    }

    Ok(Lead {
        amount,
        glued_unit,
        next,
    })
}

/// `1/2` or a lone vulgar fraction such as `½`
fn is_fraction_token(token: &str) -> bool {
    let lone_vulgar = token.chars().count() == 1
        && !token.starts_with(|c: char| c.is_ascii_digit())
        && split_quantity(token).is_ok();
    token.contains(['/', '⁄']) || lone_vulgar
}

fn non_blank(unit: &str) -> Option<String> {
    let unit = unit.trim();
    (!unit.is_empty()).then(|| unit.to_string())
}

/// Split `"sugar, granulated"` or `"flour (sifted)"` into food and note
fn split_food_note(text: &str) -> (String, String) {
    if let Some(open) = text.find('(') {
        let after = &text[open + 1..];
        let (note, tail) = match after.find(')') {
            Some(close) => (&after[..close], &after[close + 1..]),
            None => (after, ""),
        };
        let food = format!("{} {}", text[..open].trim(), tail.trim());
        return (food.trim().to_string(), note.trim().to_string());
    }

    match text.split_once(',') {
        Some((food, note)) => (food.trim().to_string(), note.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

impl PhraseParser for BasicPhraseParser {
    fn parse_amount(&self, text: &str) -> Result<ParsedAmount, PhraseError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(PhraseError::Empty);
        }

        let lead = leading_quantity(&tokens)?;
        let (unit, rest) = if lead.glued_unit.is_empty() {
            let rest = tokens.get(lead.next + 1..).unwrap_or_default();
            (tokens.get(lead.next).copied().and_then(non_blank), rest)
        } else {
            (non_blank(lead.glued_unit), &tokens[lead.next..])
        };

        Ok(ParsedAmount {
            amount: lead.amount,
            unit,
            rest: rest.join(" "),
        })
    }

    fn parse_phrase(&self, text: &str) -> Result<ParsedPhrase, PhraseError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(PhraseError::Empty);
        }

        let Ok(lead) = leading_quantity(&tokens) else {
            trace!("No leading amount in {:?}, treating it as food", text);
            let (food, note) = split_food_note(&tokens.join(" "));
            return Ok(ParsedPhrase {
                amount: 0.0,
                unit: None,
                food,
                note,
            });
        };

        let remaining = &tokens[lead.next..];
        let (unit, food_tokens) = if !lead.glued_unit.is_empty() {
            (non_blank(lead.glued_unit), remaining)
        } else if remaining.len() >= 2 {
            (non_blank(remaining[0]), &remaining[1..])
        } else {
            (None, remaining)
        };

        let (food, note) = split_food_note(&food_tokens.join(" "));
        Ok(ParsedPhrase {
            amount: lead.amount,
            unit,
            food,
            note,
        })
    }
}
