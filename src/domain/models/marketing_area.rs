//! Marketing-area fill validation.
//!
//! The marketing area is a two-part field (`part1, part2`). How much of it
//! must be filled depends on the issue's city and the reference lists kept
//! in the spreadsheet or the local cities file.

use serde::Serialize;

/// Outcome of a marketing-area check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum AreaVerdict {
    Valid,
    Invalid(String),
}

impl AreaVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}

/// Lead-collection rule.
///
/// - city in `area_cities`: both comma-separated parts must be filled;
/// - city in `no_area_cities`: the first part must be filled;
/// - any other city is invalid.
pub fn validate_area_fill(
    city: Option<&str>,
    marketing_area: Option<&str>,
    area_cities: &[String],
    no_area_cities: &[String],
) -> AreaVerdict {
    let Some(city) = city else {
        return AreaVerdict::invalid("city is empty");
    };

    if area_cities.iter().any(|c| c == city) {
        let Some(value) = marketing_area else {
            return AreaVerdict::invalid("marketing area is empty");
        };
        if !value.contains(',') {
            return AreaVerdict::invalid(format!(
                "{city} requires two marketing-area parts, got '{value}'"
            ));
        }
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [first, second] if !first.is_empty() && !second.is_empty() => AreaVerdict::Valid,
            [_, _] => AreaVerdict::invalid(format!(
                "{city} requires both marketing-area parts to be filled, got '{value}'"
            )),
            _ => AreaVerdict::invalid(format!(
                "marketing area '{value}' has more than two parts"
            )),
        }
    } else if no_area_cities.iter().any(|c| c == city) {
        let Some(value) = marketing_area else {
            return AreaVerdict::invalid("marketing area is empty");
        };
        let first = value.split(',').next().unwrap_or_default().trim();
        if first.is_empty() {
            AreaVerdict::invalid("first marketing-area part is empty")
        } else {
            AreaVerdict::Valid
        }
    } else {
        AreaVerdict::invalid(format!("city '{city}' is not in the area reference lists"))
    }
}

/// Not-touch rule.
///
/// A marketing area naming one of the two-part cities must carry a hyphen;
/// any other filled value passes.
pub fn validate_two_part_hyphen(
    marketing_area: Option<&str>,
    two_part_cities: &[String],
) -> AreaVerdict {
    let Some(value) = marketing_area else {
        return AreaVerdict::invalid("marketing area is empty");
    };

    let names_two_part_city = two_part_cities
        .iter()
        .filter(|c| !c.is_empty())
        .any(|c| value.contains(c.as_str()));

    if names_two_part_city && !value.contains('-') {
        AreaVerdict::invalid(format!(
            "marketing area '{value}' names a two-part city but has no '-'"
        ))
    } else {
        AreaVerdict::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_area_city_requires_both_parts() {
        let area = cities(&["تهران"]);
        let none = cities(&[]);
        assert!(validate_area_fill(Some("تهران"), Some("منطقه ۱, ونک"), &area, &none).is_valid());
        assert!(!validate_area_fill(Some("تهران"), Some("منطقه ۱, "), &area, &none).is_valid());
        assert!(!validate_area_fill(Some("تهران"), Some("منطقه ۱"), &area, &none).is_valid());
        assert!(!validate_area_fill(Some("تهران"), None, &area, &none).is_valid());
    }

    #[test]
    fn test_area_city_rejects_three_parts() {
        let area = cities(&["تهران"]);
        let verdict = validate_area_fill(Some("تهران"), Some("a, b, c"), &area, &[]);
        match verdict {
            AreaVerdict::Invalid(reason) => assert!(reason.contains("more than two")),
            AreaVerdict::Valid => panic!("three parts must be invalid"),
        }
    }

    #[test]
    fn test_no_area_city_needs_first_part() {
        let no_area = cities(&["کرج"]);
        assert!(validate_area_fill(Some("کرج"), Some("مرکز"), &[], &no_area).is_valid());
        assert!(validate_area_fill(Some("کرج"), Some("مرکز, "), &[], &no_area).is_valid());
        assert!(!validate_area_fill(Some("کرج"), Some(" , غرب"), &[], &no_area).is_valid());
        assert!(!validate_area_fill(Some("کرج"), None, &[], &no_area).is_valid());
    }

    #[test]
    fn test_unknown_city_is_invalid() {
        let verdict = validate_area_fill(Some("شیراز"), Some("a, b"), &cities(&["تهران"]), &[]);
        assert!(!verdict.is_valid());
        assert!(!validate_area_fill(None, Some("a, b"), &cities(&["تهران"]), &[]).is_valid());
    }

    #[test]
    fn test_area_list_checked_before_no_area_list() {
        let both = cities(&["تهران"]);
        assert!(!validate_area_fill(Some("تهران"), Some("a"), &both, &both).is_valid());
    }

    #[test]
    fn test_two_part_city_requires_hyphen() {
        let two_part = cities(&["تهران", "مشهد"]);
        assert!(validate_two_part_hyphen(Some("تهران - ونک"), &two_part).is_valid());
        assert!(!validate_two_part_hyphen(Some("تهران ونک"), &two_part).is_valid());
    }

    #[test]
    fn test_other_city_ignores_hyphen() {
        let two_part = cities(&["تهران"]);
        assert!(validate_two_part_hyphen(Some("اصفهان"), &two_part).is_valid());
        assert!(validate_two_part_hyphen(Some("اصفهان-مرکز"), &two_part).is_valid());
    }

    #[test]
    fn test_missing_marketing_area_is_invalid() {
        assert!(!validate_two_part_hyphen(None, &cities(&["تهران"])).is_valid());
    }

    #[test]
    fn test_verdict_serializes_with_reason() {
        let json = serde_json::to_value(AreaVerdict::Invalid("x".into())).unwrap();
        assert_eq!(json["verdict"], "invalid");
        assert_eq!(json["reason"], "x");
    }
}
