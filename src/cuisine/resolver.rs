//! Turns a raw ingredient tag into an [`IngredientDraft`].
//!
//! Which captured field holds the quantity and which the unit depends on the
//! tag shape:
//!
//! | shape              | amount from           | unit from      |
//! |--------------------|-----------------------|----------------|
//! | `\ing[3]{l}{milk}` | `parse_amount("3")`   | `"l"` verbatim |
//! | `\ing{3 l}{milk}`  | `parse_amount("3 l")` | same parse     |
//! | `\ing{3 l milk}`   | `parse_phrase(..)`    | same parse     |
//!
//! Food and note always come from `parse_phrase` on the last braced field,
//! whatever the shape. Every field falls back to its own default when the
//! phrase parser fails.

use super::tags::RawIngredientMatch;
use crate::error::PhraseError;
use crate::model::IngredientDraft;
use crate::phrase::{ParsedPhrase, PhraseParser};
use log::{debug, trace};

/// Resolve one tag with the given phrase parser
pub fn resolve_ingredient(
    parser: &dyn PhraseParser,
    raw: &RawIngredientMatch<'_>,
) -> IngredientDraft {
    // Empty captures (`\ing[]{}{eggs}`) count as missing
    let number = raw.number.filter(|n| !n.is_empty());
    let amount_field = raw.amount.filter(|a| !a.is_empty());
    let phrase = parser.parse_phrase(raw.ing);

    let ingredient = IngredientDraft {
        amount: resolve_amount(parser, number, amount_field, &phrase),
        unit: resolve_unit(parser, number, raw.amount, amount_field, &phrase),
        food: resolve_food(&phrase),
        note: resolve_note(&phrase),
        original_text: raw.text.to_string(),
    };
    trace!("Resolved {:?} into {:?}", raw.text, ingredient);
    ingredient
}

fn resolve_amount(
    parser: &dyn PhraseParser,
    number: Option<&str>,
    amount_field: Option<&str>,
    phrase: &Result<ParsedPhrase, PhraseError>,
) -> f64 {
    let parsed = match (number, amount_field) {
        (Some(number), _) => parser.parse_amount(number).map(|p| p.amount),
        (None, Some(amount)) => parser.parse_amount(amount).map(|p| p.amount),
        (None, None) => phrase.as_ref().map(|p| p.amount).map_err(Clone::clone),
    };

    match parsed {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => amount,
        Ok(amount) => {
            debug!("Discarding out of range amount {}", amount);
            0.0
        }
        Err(e) => {
            debug!("Amount not parsed, using 0: {}", e);
            0.0
        }
    }
}

fn resolve_unit(
    parser: &dyn PhraseParser,
    number: Option<&str>,
    raw_amount: Option<&str>,
    amount_field: Option<&str>,
    phrase: &Result<ParsedPhrase, PhraseError>,
) -> Option<String> {
    let unit = match (number, amount_field) {
        // The unit has its own slot after an explicit number
        (Some(_), _) => raw_amount.map(str::to_string),
        (None, Some(amount)) => match parser.parse_amount(amount) {
            Ok(parsed) => parsed.unit,
            Err(e) => {
                debug!("Unit not parsed from {:?}: {}", amount, e);
                None
            }
        },
        (None, None) => match phrase {
            Ok(parsed) => parsed.unit.clone(),
            Err(e) => {
                debug!("Unit not parsed from phrase: {}", e);
                None
            }
        },
    };

    unit.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

fn resolve_food(phrase: &Result<ParsedPhrase, PhraseError>) -> String {
    match phrase {
        Ok(parsed) => parsed.food.clone(),
        Err(e) => {
            debug!("Food not parsed, leaving it empty: {}", e);
            String::new()
        }
    }
}

fn resolve_note(phrase: &Result<ParsedPhrase, PhraseError>) -> String {
    phrase
        .as_ref()
        .map(|parsed| parsed.note.clone())
        .unwrap_or_default()
}
