use crate::error::PhraseError;
use regex::Regex;
use std::sync::LazyLock;

/// `1/2`, `3⁄4`, optionally followed by a glued unit
static FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<num>\d+)[/⁄](?P<den>\d+)(?P<suffix>.*)$").expect("fraction pattern is valid")
});

/// `2`, `1.5`, `1,5`, `½`, `2¼`, optionally followed by a glued unit
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<whole>\d+(?:[.,]\d+)?)?(?P<vulgar>[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞⅑⅒])?(?P<suffix>.*)$")
        .expect("decimal pattern is valid")
});

fn vulgar_value(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅕' => 1.0 / 5.0,
        '⅖' => 2.0 / 5.0,
        '⅗' => 3.0 / 5.0,
        '⅘' => 4.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅐' => 1.0 / 7.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        '⅑' => 1.0 / 9.0,
        '⅒' => 1.0 / 10.0,
        _ => return None,
    };
    Some(value)
}

/// Split a token into its leading quantity and whatever is glued behind it.
///
/// `"500g"` -> `(500.0, "g")`, `"2¼"` -> `(2.25, "")`, `"1/2"` -> `(0.5, "")`.
/// Fails with [`PhraseError::NoAmount`] when the token does not start with a number.
pub fn split_quantity(token: &str) -> Result<(f64, &str), PhraseError> {
    if let Some(captures) = FRACTION.captures(token) {
        let numerator: f64 = captures["num"]
            .parse()
            .map_err(|_| PhraseError::InvalidNumber(token.to_string()))?;
        let denominator: f64 = captures["den"]
            .parse()
            .map_err(|_| PhraseError::InvalidNumber(token.to_string()))?;
        if denominator == 0.0 {
            return Err(PhraseError::DivisionByZero);
        }
        let suffix = captures.name("suffix").map_or("", |m| m.as_str());
        return Ok((numerator / denominator, suffix));
    }

    let captures = DECIMAL
        .captures(token)
        .ok_or_else(|| PhraseError::NoAmount(token.to_string()))?;
    let whole = captures.name("whole");
    let vulgar = captures.name("vulgar");
    if whole.is_none() && vulgar.is_none() {
        return Err(PhraseError::NoAmount(token.to_string()));
    }

    let mut amount = match whole {
        Some(m) => m
            .as_str()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| PhraseError::InvalidNumber(token.to_string()))?,
        None => 0.0,
    };
    if let Some(fraction) = vulgar.and_then(|m| m.as_str().chars().next()) {
        amount += vulgar_value(fraction).unwrap_or_default();
    }

    let suffix = captures.name("suffix").map_or("", |m| m.as_str());
    Ok((amount, suffix))
}

/// Parse a token that must consist of a quantity only
pub fn parse_quantity(token: &str) -> Result<f64, PhraseError> {
    let (amount, suffix) = split_quantity(token.trim())?;
    if !suffix.is_empty() {
        return Err(PhraseError::InvalidNumber(token.to_string()));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_quantity("3").unwrap(), 3.0);
        assert_eq!(parse_quantity("1.5").unwrap(), 1.5);
        assert_eq!(parse_quantity("1,5").unwrap(), 1.5);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(parse_quantity("1/2").unwrap(), 0.5);
        assert_eq!(parse_quantity("3⁄4").unwrap(), 0.75);
        assert_eq!(parse_quantity("1/0"), Err(PhraseError::DivisionByZero));
    }

    #[test]
    fn test_vulgar_fractions() {
        assert_eq!(parse_quantity("½").unwrap(), 0.5);
        assert_eq!(parse_quantity("2¼").unwrap(), 2.25);
        assert_eq!(parse_quantity("1¾").unwrap(), 1.75);
    }

    #[test]
    fn test_glued_unit() {
        assert_eq!(split_quantity("500g").unwrap(), (500.0, "g"));
        assert_eq!(split_quantity("2¼l").unwrap(), (2.25, "l"));
        assert!(parse_quantity("500g").is_err());
    }

    #[test]
    fn test_not_a_number() {
        assert!(matches!(
            split_quantity("etwas"),
            Err(PhraseError::NoAmount(_))
        ));
        assert!(split_quantity("").is_err());
    }
}
