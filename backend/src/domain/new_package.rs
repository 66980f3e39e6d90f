//! New package form: choices, submitted input, and validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::{Distribution, DistributionId, Error, PackageName};

/// Maximum allowed length for a package summary.
pub const SUMMARY_MAX: usize = 255;

/// Empty form as presented to a submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPackageFormView {
    /// Selectable distributions ordered by id.
    pub distribution_choices: Vec<Distribution>,
    /// Preselected distributions: every choice.
    pub default_distributions: Vec<DistributionId>,
}

impl NewPackageFormView {
    /// Build the form for the given choices.
    pub fn new(distribution_choices: Vec<Distribution>) -> Self {
        let default_distributions = distribution_choices.iter().map(|d| d.id).collect();
        Self {
            distribution_choices,
            default_distributions,
        }
    }
}

/// Raw form input as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPackageForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    /// Omitted means "use the defaults".
    #[serde(default)]
    pub distributions: Option<Vec<DistributionId>>,
}

/// Form input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNewPackageForm {
    pub name: PackageName,
    pub summary: String,
    pub description: String,
    pub distributions: Vec<DistributionId>,
}

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FormErrors> for Error {
    fn from(errors: FormErrors) -> Self {
        Error::invalid_request("new package form is invalid")
            .with_details(json!({ "fieldErrors": errors.0 }))
    }
}

impl NewPackageForm {
    /// Validate the input against the available distribution choices.
    ///
    /// # Examples
    /// ```
    /// use fresque::domain::{Distribution, DistributionId, NewPackageForm};
    ///
    /// let choices = vec![Distribution { id: DistributionId::new(1), name: "Rawhide".into() }];
    /// let form = NewPackageForm {
    ///     name: "bash".into(),
    ///     summary: "The GNU Bourne Again shell".into(),
    ///     ..NewPackageForm::default()
    /// };
    /// let valid = form.validate(&choices).expect("form is valid");
    /// assert_eq!(valid.distributions, vec![DistributionId::new(1)]);
    /// ```
    pub fn validate(&self, choices: &[Distribution]) -> Result<ValidNewPackageForm, FormErrors> {
        let mut errors = FormErrors::default();

        let name = match PackageName::new(self.name.trim()) {
            Ok(name) => Some(name),
            Err(err) => {
                errors.push("name", err.to_string());
                None
            }
        };

        let summary = self.summary.trim();
        if summary.is_empty() {
            errors.push("summary", "summary must not be empty");
        } else if summary.chars().count() > SUMMARY_MAX {
            errors.push(
                "summary",
                format!("summary must be at most {SUMMARY_MAX} characters"),
            );
        }

        let distributions = match &self.distributions {
            None => choices.iter().map(|d| d.id).collect(),
            Some(selected) => validate_distributions(selected, choices, &mut errors),
        };

        match name {
            Some(name) if errors.is_empty() => Ok(ValidNewPackageForm {
                name,
                summary: summary.to_owned(),
                description: self.description.trim().to_owned(),
                distributions,
            }),
            _ => Err(errors),
        }
    }
}

fn validate_distributions(
    selected: &[DistributionId],
    choices: &[Distribution],
    errors: &mut FormErrors,
) -> Vec<DistributionId> {
    if selected.is_empty() {
        errors.push("distributions", "select at least one distribution");
        return Vec::new();
    }
    let mut accepted: Vec<DistributionId> = Vec::with_capacity(selected.len());
    for id in selected {
        if !choices.iter().any(|choice| choice.id == *id) {
            errors.push("distributions", format!("'{}' is not a valid choice", id.get()));
        } else if !accepted.contains(id) {
            accepted.push(*id);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn choices() -> Vec<Distribution> {
        vec![
            Distribution {
                id: DistributionId::new(1),
                name: "Fedora Rawhide".to_owned(),
            },
            Distribution {
                id: DistributionId::new(2),
                name: "EPEL 7".to_owned(),
            },
        ]
    }

    fn form(name: &str, summary: &str, distributions: Option<Vec<i32>>) -> NewPackageForm {
        NewPackageForm {
            name: name.to_owned(),
            summary: summary.to_owned(),
            description: "  long text  ".to_owned(),
            distributions: distributions
                .map(|ids| ids.into_iter().map(DistributionId::new).collect()),
        }
    }

    #[rstest]
    fn missing_fields_are_reported_by_validation(choices: Vec<Distribution>) {
        let form: NewPackageForm =
            serde_json::from_value(json!({})).expect("every field has a default");

        let errors = form.validate(&choices).expect_err("empty form is invalid");
        assert!(!errors.field("name").is_empty());
        assert_eq!(errors.field("summary"), ["summary must not be empty"]);
        assert!(errors.field("distributions").is_empty());
    }

    #[rstest]
    fn form_view_defaults_to_all_choices(choices: Vec<Distribution>) {
        let view = NewPackageFormView::new(choices);
        assert_eq!(
            view.default_distributions,
            vec![DistributionId::new(1), DistributionId::new(2)]
        );
    }

    #[rstest]
    fn omitted_distributions_default_to_all_choices(choices: Vec<Distribution>) {
        let valid = form("bash", "shell", None)
            .validate(&choices)
            .expect("valid form");
        assert_eq!(
            valid.distributions,
            vec![DistributionId::new(1), DistributionId::new(2)]
        );
        assert_eq!(valid.description, "long text");
    }

    #[rstest]
    fn duplicate_selection_is_collapsed(choices: Vec<Distribution>) {
        let valid = form("bash", "shell", Some(vec![2, 2, 1]))
            .validate(&choices)
            .expect("valid form");
        assert_eq!(
            valid.distributions,
            vec![DistributionId::new(2), DistributionId::new(1)]
        );
    }

    #[rstest]
    fn unknown_distribution_is_rejected(choices: Vec<Distribution>) {
        let errors = form("bash", "shell", Some(vec![1, 9]))
            .validate(&choices)
            .expect_err("invalid choice");
        assert_eq!(errors.field("distributions"), ["'9' is not a valid choice"]);
    }

    #[rstest]
    fn empty_selection_is_rejected(choices: Vec<Distribution>) {
        let errors = form("bash", "shell", Some(vec![]))
            .validate(&choices)
            .expect_err("empty selection");
        assert_eq!(
            errors.field("distributions"),
            ["select at least one distribution"]
        );
    }

    #[rstest]
    fn reports_every_failing_field(choices: Vec<Distribution>) {
        let errors = form("bad name", "   ", None)
            .validate(&choices)
            .expect_err("invalid form");
        assert_eq!(errors.field("name").len(), 1);
        assert_eq!(errors.field("summary"), ["summary must not be empty"]);
        assert!(errors.field("distributions").is_empty());
    }

    #[rstest]
    fn overlong_summary_is_rejected(choices: Vec<Distribution>) {
        let summary = "s".repeat(SUMMARY_MAX + 1);
        let errors = form("bash", &summary, None)
            .validate(&choices)
            .expect_err("summary too long");
        assert_eq!(errors.field("summary").len(), 1);
    }

    #[rstest]
    fn form_errors_become_invalid_request_with_field_details(choices: Vec<Distribution>) {
        let errors = form("", "shell", None)
            .validate(&choices)
            .expect_err("missing name");
        let error = Error::from(errors);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert!(details["fieldErrors"]["name"].is_array());
    }
}
