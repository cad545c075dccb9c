//! Candidate validation against city reference data.
//!
//! A run reads the dashboard cell for its profile, extracts the candidate
//! keys, loads the reference cities and fetches every candidate from the
//! tracker. Each candidate ends up either valid or invalid with a reason;
//! a fetch failure only affects that candidate.

use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    extract_candidates, validate_area_fill, validate_two_part_hyphen, AreaVerdict, CellLocation,
    CellScope, Config, IssueKey,
};
use crate::domain::ports::{IssueTracker, SpreadsheetService};

/// Which dashboard and rule set a validation run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationProfile {
    LeadCollection,
    NotTouch,
}

impl ValidationProfile {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeadCollection => "lead collection",
            Self::NotTouch => "not touch",
        }
    }

    const fn scope(self) -> CellScope {
        match self {
            Self::LeadCollection => CellScope::All,
            Self::NotTouch => CellScope::First,
        }
    }
}

/// A rejected candidate and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidCandidate {
    pub key: String,
    pub reason: String,
}

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub profile: ValidationProfile,
    /// Candidates read from the dashboard cell, in cell order.
    pub candidates: Vec<String>,
    pub valid: Vec<IssueKey>,
    pub invalid: Vec<InvalidCandidate>,
}

impl ValidationReport {
    fn empty(profile: ValidationProfile) -> Self {
        Self {
            profile,
            candidates: Vec::new(),
            valid: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// No candidates were found in the dashboard cell.
    pub fn has_no_candidates(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Reference cities for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceCities {
    Areas {
        area_cities: Vec<String>,
        no_area_cities: Vec<String>,
    },
    TwoPart(Vec<String>),
}

impl ReferenceCities {
    fn judge(&self, city: Option<&str>, marketing_area: Option<&str>) -> AreaVerdict {
        match self {
            Self::Areas {
                area_cities,
                no_area_cities,
            } => validate_area_fill(city, marketing_area, area_cities, no_area_cities),
            Self::TwoPart(cities) => validate_two_part_hyphen(marketing_area, cities),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TwoPartCitiesFile {
    #[serde(default)]
    cities_with_two_parts: Vec<String>,
}

/// Load `{"cities_with_two_parts": [...]}` from disk, dropping blank names.
pub fn load_two_part_cities(path: &Path) -> DomainResult<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(format!("cannot read {}: {e}", path.display())))?;
    let file: TwoPartCitiesFile = serde_json::from_str(&raw)?;
    Ok(non_blank(file.cities_with_two_parts))
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

enum Outcome {
    Valid(IssueKey),
    Invalid(InvalidCandidate),
}

/// Validates dashboard candidates for either workflow.
pub struct ValidationService<T: IssueTracker, S: SpreadsheetService> {
    tracker: Arc<T>,
    sheets: Arc<S>,
    config: Arc<Config>,
}

impl<T: IssueTracker, S: SpreadsheetService> ValidationService<T, S> {
    pub fn new(tracker: Arc<T>, sheets: Arc<S>, config: Arc<Config>) -> Self {
        Self {
            tracker,
            sheets,
            config,
        }
    }

    fn cell(&self, profile: ValidationProfile) -> &CellLocation {
        match profile {
            ValidationProfile::LeadCollection => &self.config.sheets.lead_collection_cell,
            ValidationProfile::NotTouch => &self.config.sheets.not_touch_cell,
        }
    }

    /// Candidate strings from the dashboard cell.
    pub async fn candidates(&self, profile: ValidationProfile) -> DomainResult<Vec<String>> {
        let cell = self.cell(profile);
        let value = self
            .sheets
            .read_cell(&cell.spreadsheet_id, &cell.worksheet, cell.row, cell.column)
            .await?;
        let candidates = value
            .map(|v| extract_candidates(&v, profile.scope()))
            .unwrap_or_default();
        debug!(
            profile = profile.label(),
            row = cell.row,
            column = cell.column,
            count = candidates.len(),
            "dashboard cell read"
        );
        Ok(candidates)
    }

    /// Reference cities for `profile`.
    pub async fn reference_cities(
        &self,
        profile: ValidationProfile,
    ) -> DomainResult<ReferenceCities> {
        match profile {
            ValidationProfile::LeadCollection => {
                let sheets = &self.config.sheets;
                let area_cities = self
                    .sheets
                    .column_values(&sheets.area_spreadsheet_id, &sheets.area_worksheet, 1)
                    .await?;
                let no_area_cities = self
                    .sheets
                    .column_values(&sheets.area_spreadsheet_id, &sheets.no_area_worksheet, 1)
                    .await?;
                Ok(ReferenceCities::Areas {
                    area_cities: non_blank(area_cities),
                    no_area_cities: non_blank(no_area_cities),
                })
            }
            ValidationProfile::NotTouch => Ok(ReferenceCities::TwoPart(load_two_part_cities(
                &self.config.cities.two_part_cities_path,
            )?)),
        }
    }

    /// Validate every candidate of the profile's dashboard cell.
    pub async fn validate(&self, profile: ValidationProfile) -> DomainResult<ValidationReport> {
        let candidates = self.candidates(profile).await?;
        if candidates.is_empty() {
            warn!(profile = profile.label(), "no candidates found inside parentheses");
            return Ok(ValidationReport::empty(profile));
        }

        let reference = self.reference_cities(profile).await?;
        let fields = vec![
            self.config.fields.marketing_area.clone(),
            self.config.fields.city.clone(),
        ];
        let concurrency = self.config.jira.concurrency.max(1);

        let outcomes: Vec<Outcome> = stream::iter(candidates.iter())
            .map(|candidate| self.check(candidate, &reference, &fields))
            .buffered(concurrency)
            .collect()
            .await;

        let mut report = ValidationReport::empty(profile);
        report.candidates = candidates;
        for outcome in outcomes {
            match outcome {
                Outcome::Valid(key) => report.valid.push(key),
                Outcome::Invalid(invalid) => report.invalid.push(invalid),
            }
        }

        info!(
            profile = profile.label(),
            valid = report.valid.len(),
            invalid = report.invalid.len(),
            "validation finished"
        );
        Ok(report)
    }

    async fn check(
        &self,
        candidate: &str,
        reference: &ReferenceCities,
        fields: &[String],
    ) -> Outcome {
        let invalid = |reason: String| {
            Outcome::Invalid(InvalidCandidate {
                key: candidate.to_string(),
                reason,
            })
        };

        let key = match IssueKey::parse(candidate) {
            Ok(key) => key,
            Err(e) => return invalid(e.to_string()),
        };

        let issue = match self.tracker.get_issue(&key, fields).await {
            Ok(issue) => issue,
            Err(e) => {
                warn!(issue = %key, error = %e, "failed to fetch issue");
                return invalid(format!("error fetching issue: {e}"));
            }
        };

        let city = issue.text_field(&self.config.fields.city);
        let marketing_area = issue.text_field(&self.config.fields.marketing_area);
        match reference.judge(city.as_deref(), marketing_area.as_deref()) {
            AreaVerdict::Valid => {
                debug!(issue = %key, "marketing area filled correctly");
                Outcome::Valid(key)
            }
            AreaVerdict::Invalid(reason) => {
                debug!(issue = %key, %reason, "marketing area not filled correctly");
                invalid(reason)
            }
        }
    }
}
