//! Field constraints for item payloads and list paging.

use crate::error::{AppError, FieldError};
use crate::model::{ItemChanges, ListParams, NewItem};

pub const NAME_MIN_LENGTH: usize = 1;
pub const NAME_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const DEFAULT_SKIP: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

/// Length bounds for one string field, counted in characters.
#[derive(Clone, Copy, Debug)]
pub struct LengthRule {
    pub min: usize,
    pub max: usize,
}

const NAME_RULE: LengthRule = LengthRule {
    min: NAME_MIN_LENGTH,
    max: NAME_MAX_LENGTH,
};

const DESCRIPTION_RULE: LengthRule = LengthRule {
    min: 0,
    max: DESCRIPTION_MAX_LENGTH,
};

/// Validated offset/limit pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

pub struct RequestValidator;

impl RequestValidator {
    /// `name` required, `description` optional. Reports every failing field.
    pub fn validate_new(item: &NewItem) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_length("name", &item.name, NAME_RULE, &mut errors);
        if let Some(d) = &item.description {
            check_length("description", d, DESCRIPTION_RULE, &mut errors);
        }
        finish(errors)
    }

    /// Only supplied fields are checked.
    pub fn validate_changes(changes: &ItemChanges) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(n) = &changes.name {
            check_length("name", n, NAME_RULE, &mut errors);
        }
        if let Some(d) = &changes.description {
            check_length("description", d, DESCRIPTION_RULE, &mut errors);
        }
        finish(errors)
    }

    /// Apply defaults, then require `skip >= 0` and `1 <= limit <= 100`.
    pub fn validate_page(params: &ListParams) -> Result<Page, AppError> {
        let skip = params.skip.unwrap_or(DEFAULT_SKIP);
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        let mut errors = Vec::new();
        if skip < 0 {
            errors.push(FieldError::new("skip", "must be greater than or equal to 0"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            errors.push(FieldError::new(
                "limit",
                format!("must be between 1 and {}", MAX_LIMIT),
            ));
        }
        finish(errors)?;
        Ok(Page { skip, limit })
    }
}

fn check_length(field: &str, value: &str, rule: LengthRule, errors: &mut Vec<FieldError>) {
    let len = value.chars().count();
    if len < rule.min {
        let message = if rule.min == 1 {
            "must not be empty".to_string()
        } else {
            format!("must be at least {} characters", rule.min)
        };
        errors.push(FieldError::new(field, message));
    } else if len > rule.max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", rule.max),
        ));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str, description: Option<&str>) -> NewItem {
        NewItem {
            name: name.into(),
            description: description.map(String::from),
        }
    }

    fn failing_fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn name_length_boundaries() {
        assert!(RequestValidator::validate_new(&new_item("a", None)).is_ok());
        assert!(RequestValidator::validate_new(&new_item(&"a".repeat(255), None)).is_ok());
        let empty = RequestValidator::validate_new(&new_item("", None)).unwrap_err();
        assert_eq!(failing_fields(empty), vec!["name"]);
        match RequestValidator::validate_new(&new_item("", None)).unwrap_err() {
            AppError::Validation(errors) => assert_eq!(errors[0].message, "must not be empty"),
            other => panic!("expected validation error, got {:?}", other),
        }
        let long = RequestValidator::validate_new(&new_item(&"a".repeat(256), None)).unwrap_err();
        assert_eq!(failing_fields(long), vec!["name"]);
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let name = "é".repeat(255);
        assert!(name.len() > 255);
        assert!(RequestValidator::validate_new(&new_item(&name, None)).is_ok());
    }

    #[test]
    fn description_boundaries() {
        assert!(RequestValidator::validate_new(&new_item("n", Some(""))).is_ok());
        assert!(RequestValidator::validate_new(&new_item("n", Some(&"d".repeat(1000)))).is_ok());
        let err = RequestValidator::validate_new(&new_item("n", Some(&"d".repeat(1001)))).unwrap_err();
        assert_eq!(failing_fields(err), vec!["description"]);
    }

    #[test]
    fn reports_every_failing_field() {
        let err = RequestValidator::validate_new(&new_item("", Some(&"d".repeat(1001)))).unwrap_err();
        assert_eq!(failing_fields(err), vec!["name", "description"]);
    }

    #[test]
    fn changes_check_only_supplied_fields() {
        assert!(RequestValidator::validate_changes(&ItemChanges::default()).is_ok());
        let only_description = ItemChanges {
            name: None,
            description: Some("x".into()),
        };
        assert!(RequestValidator::validate_changes(&only_description).is_ok());
        let empty_name = ItemChanges {
            name: Some(String::new()),
            description: None,
        };
        let err = RequestValidator::validate_changes(&empty_name).unwrap_err();
        assert_eq!(failing_fields(err), vec!["name"]);
    }

    #[test]
    fn page_defaults() {
        let page = RequestValidator::validate_page(&ListParams::default()).unwrap();
        assert_eq!(page, Page { skip: 0, limit: 100 });
    }

    #[test]
    fn page_bounds() {
        let ok = |skip, limit| {
            RequestValidator::validate_page(&ListParams {
                skip: Some(skip),
                limit: Some(limit),
            })
        };
        assert!(ok(0, 1).is_ok());
        assert!(ok(5, 100).is_ok());
        assert_eq!(failing_fields(ok(0, 0).unwrap_err()), vec!["limit"]);
        assert_eq!(failing_fields(ok(0, 101).unwrap_err()), vec!["limit"]);
        assert_eq!(failing_fields(ok(-1, 10).unwrap_err()), vec!["skip"]);
    }
}
