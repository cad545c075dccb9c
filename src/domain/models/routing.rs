//! City-based routing of field updates.

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::config::{FieldsConfig, GroupFields};
use super::month::AssignMonth;

/// The three routing groups an issue can fall into, by city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CityGroup {
    Tehran,
    TehranSuburbs,
    OtherCities,
}

impl CityGroup {
    pub const ALL: [Self; 3] = [Self::Tehran, Self::TehranSuburbs, Self::OtherCities];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tehran => "Tehran",
            Self::TehranSuburbs => "Tehran suburbs",
            Self::OtherCities => "Other cities",
        }
    }
}

/// Field updates for one routing group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingRule {
    pub group: CityGroup,
    /// Custom-field id to `{"value": option}` payload.
    pub fields: Map<String, Value>,
}

/// Build the per-group field updates for a run.
pub fn build_field_plan(fields: &FieldsConfig, month: &AssignMonth) -> Vec<RoutingRule> {
    CityGroup::ALL
        .into_iter()
        .map(|group| {
            let group_fields = match group {
                CityGroup::Tehran => &fields.tehran,
                CityGroup::TehranSuburbs => &fields.suburbs,
                CityGroup::OtherCities => &fields.other_cities,
            };
            RoutingRule {
                group,
                fields: rule_fields(fields, group_fields, month),
            }
        })
        .collect()
}

fn rule_fields(fields: &FieldsConfig, group: &GroupFields, month: &AssignMonth) -> Map<String, Value> {
    let mut map: Map<String, Value> = fields
        .common
        .iter()
        .map(|(id, value)| (id.clone(), option(value)))
        .collect();
    map.insert(fields.assign_month.clone(), option(&month.to_string()));
    map.insert(fields.sales_team.clone(), option(&group.sales_team));
    map.insert(fields.region.clone(), option(&group.region));
    map
}

fn option(value: &str) -> Value {
    json!({ "value": value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_has_one_rule_per_group() {
        let month = AssignMonth::parse("aban 1403").unwrap();
        let plan = build_field_plan(&FieldsConfig::default(), &month);
        let groups: Vec<CityGroup> = plan.iter().map(|r| r.group).collect();
        assert_eq!(groups, CityGroup::ALL.to_vec());
    }

    #[test]
    fn test_plan_default_values() {
        let month = AssignMonth::parse("aban 1403").unwrap();
        let plan = build_field_plan(&FieldsConfig::default(), &month);

        let tehran = &plan[0].fields;
        assert_eq!(tehran.len(), 8);
        assert_eq!(tehran["customfield_22304"], json!({"value": "آبان 1403"}));
        assert_eq!(tehran["customfield_14314"], json!({"value": "Tehran Sales"}));
        assert_eq!(tehran["customfield_11100"], json!({"value": "Tehran"}));
        assert_eq!(tehran["customfield_11003"], json!({"value": "E"}));

        let suburbs = &plan[1].fields;
        assert_eq!(suburbs["customfield_14314"], json!({"value": "Tehran Sales"}));
        assert_eq!(suburbs["customfield_11100"], json!({"value": "Other Cities"}));

        let other = &plan[2].fields;
        assert_eq!(other["customfield_14314"], json!({"value": "Other Cities Sales"}));
        assert_eq!(other["customfield_10804"], json!({"value": "Lead Collection"}));
    }
}
