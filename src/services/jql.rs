//! JQL generation for the routing searches.

use crate::domain::models::{CityGroup, IssueKey};

/// `issuekey IN (K1, K2)`
pub fn issue_key_clause(keys: &[IssueKey]) -> String {
    let joined = keys
        .iter()
        .map(IssueKey::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("issuekey IN ({joined})")
}

/// Quote a city for a `~` comparison when it contains whitespace.
fn city_term(city: &str) -> String {
    if city.chars().any(char::is_whitespace) {
        format!("'{}'", city.replace('\'', "\\'"))
    } else {
        city.to_string()
    }
}

/// City condition for one routing group.
pub fn city_clause(group: CityGroup, tehran: &str, suburbs: &[String]) -> String {
    match group {
        CityGroup::Tehran => format!("City ~ {}", city_term(tehran)),
        CityGroup::TehranSuburbs => {
            let terms = suburbs
                .iter()
                .map(|c| format!("City ~ {}", city_term(c)))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("({terms})")
        }
        CityGroup::OtherCities => {
            let terms = std::iter::once(tehran)
                .chain(suburbs.iter().map(String::as_str))
                .map(|c| format!("City !~ {}", city_term(c)))
                .collect::<Vec<_>>()
                .join(" AND ");
            format!("({terms})")
        }
    }
}

/// `status != 'LC Pool'`
pub fn status_exclusion(status: &str) -> String {
    format!("status != '{}'", status.replace('\'', "\\'"))
}

/// Full search for one routing rule.
pub fn routing_query(
    keys: &[IssueKey],
    group: CityGroup,
    tehran: &str,
    suburbs: &[String],
    exclude_status: Option<&str>,
) -> String {
    let mut clauses = vec![issue_key_clause(keys), city_clause(group, tehran, suburbs)];
    if let Some(status) = exclude_status {
        clauses.push(status_exclusion(status));
    }
    clauses.join(" AND ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<IssueKey> {
        raw.iter().map(|k| IssueKey::parse(k).unwrap()).collect()
    }

    fn suburbs() -> Vec<String> {
        vec!["ورامین".to_string(), "رباط کریم".to_string()]
    }

    #[test]
    fn test_issue_key_clause() {
        assert_eq!(
            issue_key_clause(&keys(&["NVR-1", "NVR-2"])),
            "issuekey IN (NVR-1, NVR-2)"
        );
    }

    #[test]
    fn test_tehran_clause() {
        assert_eq!(
            city_clause(CityGroup::Tehran, "تهران", &suburbs()),
            "City ~ تهران"
        );
    }

    #[test]
    fn test_suburb_clause_quotes_multi_word_cities() {
        assert_eq!(
            city_clause(CityGroup::TehranSuburbs, "تهران", &suburbs()),
            "(City ~ ورامین OR City ~ 'رباط کریم')"
        );
    }

    #[test]
    fn test_other_cities_clause_excludes_everything() {
        assert_eq!(
            city_clause(CityGroup::OtherCities, "تهران", &suburbs()),
            "(City !~ تهران AND City !~ ورامین AND City !~ 'رباط کریم')"
        );
    }

    #[test]
    fn test_routing_query_with_status_exclusion() {
        let q = routing_query(
            &keys(&["NVR-7"]),
            CityGroup::Tehran,
            "تهران",
            &suburbs(),
            Some("LC Pool"),
        );
        assert_eq!(q, "issuekey IN (NVR-7) AND City ~ تهران AND status != 'LC Pool'");
    }

    #[test]
    fn test_routing_query_without_status_exclusion() {
        let q = routing_query(&keys(&["NVR-7"]), CityGroup::Tehran, "تهران", &[], None);
        assert_eq!(q, "issuekey IN (NVR-7) AND City ~ تهران");
    }
}
