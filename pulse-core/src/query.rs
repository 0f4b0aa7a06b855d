use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Search text is empty. Enter a city name or ZIP code.")]
    Empty,
}

/// How the user asked for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum LocationQuery {
    /// US ZIP or ZIP+4, e.g. `33101` or `33101-1234`.
    Zip(String),
    /// Free-form city text, e.g. `Miami, FL`.
    Text(String),
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Classify user search text.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        if is_zip_code(trimmed) {
            Ok(Self::Zip(trimmed.to_string()))
        } else {
            Ok(Self::Text(trimmed.to_string()))
        }
    }

    /// Retry query for a "City, State" search the provider didn't find.
    ///
    /// Pins the search to the US by appending `,US`; text already
    /// mentioning `US` is returned unchanged. Only comma-separated text
    /// queries get a retry.
    pub fn with_country_fallback(&self) -> Option<Self> {
        match self {
            Self::Text(text) if text.contains(',') => {
                if text.contains("US") {
                    Some(Self::Text(text.clone()))
                } else {
                    Some(Self::Text(format!("{text},US")))
                }
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zip(zip) => write!(f, "ZIP {zip}"),
            Self::Text(text) => f.write_str(text),
            Self::Coordinates { lat, lon } => write!(f, "{lat:.4},{lon:.4}"),
        }
    }
}

/// `^\d{5}(-\d{4})?$`
fn is_zip_code(s: &str) -> bool {
    let all_digits = |part: &str, len: usize| {
        part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
    };

    match s.split_once('-') {
        Some((base, plus4)) => all_digits(base, 5) && all_digits(plus4, 4),
        None => all_digits(s, 5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zip_and_zip_plus_four() {
        assert_eq!(
            LocationQuery::parse("33101").unwrap(),
            LocationQuery::Zip("33101".into())
        );
        assert_eq!(
            LocationQuery::parse("  33101-1234 ").unwrap(),
            LocationQuery::Zip("33101-1234".into())
        );
    }

    #[test]
    fn near_zip_shapes_are_text() {
        for input in ["3310", "331012", "33101-12", "3310a", "33101-1234-5"] {
            assert_eq!(
                LocationQuery::parse(input).unwrap(),
                LocationQuery::Text(input.into()),
                "{input}"
            );
        }
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(LocationQuery::parse("   "), Err(QueryError::Empty));
    }

    #[test]
    fn comma_text_gets_us_suffix() {
        let query = LocationQuery::parse("Miami, FL").unwrap();

        assert_eq!(
            query.with_country_fallback(),
            Some(LocationQuery::Text("Miami, FL,US".into()))
        );
    }

    #[test]
    fn text_already_mentioning_us_is_kept() {
        let query = LocationQuery::Text("Austin, TX, US".into());

        assert_eq!(query.with_country_fallback(), Some(query.clone()));
    }

    #[test]
    fn no_fallback_without_comma_or_for_zip() {
        assert_eq!(LocationQuery::Text("Miami".into()).with_country_fallback(), None);
        assert_eq!(LocationQuery::Zip("33101".into()).with_country_fallback(), None);
        assert_eq!(
            LocationQuery::Coordinates { lat: 1.0, lon: 2.0 }.with_country_fallback(),
            None
        );
    }
}
