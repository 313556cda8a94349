//! Department domain entity and related types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::sorting::sort_order;
use crate::types::{selected_id, FormBinder, ModelErrors};

/// Department domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub budget: Decimal,
    pub start_date: NaiveDate,
    /// Instructor administering the department, if any
    pub administrator_id: Option<i32>,
}

/// The department form as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct DepartmentInput {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Name must be between 3 and 50 characters"
    ))]
    #[schema(example = "Economics")]
    pub name: String,
    #[schema(example = "100000")]
    pub budget: String,
    #[schema(format = Date, example = "2007-09-01")]
    pub start_date: String,
    /// Blank for no administrator
    pub administrator_id: Option<String>,
}

impl DepartmentInput {
    pub fn bind(&self) -> Result<DepartmentForm, ModelErrors> {
        let mut binder = FormBinder::new(self);
        let budget = binder.required("budget", "Budget", &self.budget);
        let start_date = binder.required("start_date", "Start Date", &self.start_date);
        let administrator_id = binder.optional(
            "administrator_id",
            "Administrator",
            self.administrator_id.as_deref(),
        );

        let bound = match (budget, start_date, administrator_id) {
            (Some(budget), Some(start_date), Some(administrator_id)) => Some(DepartmentForm {
                name: self.name.clone(),
                budget,
                start_date,
                administrator_id,
            }),
            _ => None,
        };
        if let Some(department) = &bound {
            binder.check(department);
        }
        binder.finish(bound)
    }

    /// Administrator to preselect when the form is shown again
    pub fn selected_administrator(&self) -> Option<i32> {
        selected_id(self.administrator_id.as_deref())
    }
}

impl From<&Department> for DepartmentInput {
    fn from(department: &Department) -> Self {
        Self {
            name: department.name.clone(),
            budget: department.budget.to_string(),
            start_date: department.start_date.to_string(),
            administrator_id: department.administrator_id.map(|id| id.to_string()),
        }
    }
}

/// Department fields once bound
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DepartmentForm {
    pub name: String,
    #[validate(custom(function = "non_negative_budget"))]
    pub budget: Decimal,
    pub start_date: NaiveDate,
    pub administrator_id: Option<i32>,
}

fn non_negative_budget(budget: &Decimal) -> Result<(), ValidationError> {
    if budget.is_sign_negative() && !budget.is_zero() {
        let mut error = ValidationError::new("range");
        error.message = Some("Budget cannot be negative".into());
        return Err(error);
    }
    Ok(())
}

sort_order! {
    /// Department list order
    pub enum DepartmentSort {
        Name => "name",
        NameDesc => "name_desc",
        Budget => "budget",
        BudgetDesc => "budget_desc",
        StartDate => "date",
        StartDateDesc => "date_desc",
    }
}

/// Department with its administrator's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepartmentDetails {
    #[serde(flatten)]
    pub department: Department,
    pub administrator_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(budget: Decimal) -> DepartmentForm {
        DepartmentForm {
            name: "Engineering".to_string(),
            budget,
            start_date: NaiveDate::from_ymd_opt(2007, 9, 1).unwrap(),
            administrator_id: None,
        }
    }

    #[test]
    fn negative_budget_is_rejected() {
        let errors = form(Decimal::new(-1, 0)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("budget"));
    }

    #[test]
    fn zero_budget_is_accepted() {
        assert!(form(Decimal::ZERO).validate().is_ok());
        assert!(form(Decimal::new(350_000, 0)).validate().is_ok());
    }

    fn input(budget: &str, administrator_id: Option<&str>) -> DepartmentInput {
        DepartmentInput {
            name: "Engineering".to_string(),
            budget: budget.to_string(),
            start_date: "2007-09-01".to_string(),
            administrator_id: administrator_id.map(str::to_string),
        }
    }

    #[test]
    fn blank_administrator_binds_to_none() {
        let department = input("350000", Some("")).bind().unwrap();

        assert_eq!(department.budget, Decimal::new(350_000, 0));
        assert_eq!(department.administrator_id, None);
        assert_eq!(input("1", Some("4")).bind().unwrap().administrator_id, Some(4));
    }

    #[test]
    fn malformed_budget_and_administrator_are_field_errors() {
        let errors = input("lots", Some("Kim")).bind().unwrap_err();

        assert_eq!(
            errors.field("budget"),
            ["The value 'lots' is not valid for Budget.".to_string()]
        );
        assert_eq!(errors.field("administrator_id").len(), 1);

        let errors = input("-5", None).bind().unwrap_err();
        assert_eq!(errors.field("budget"), ["Budget cannot be negative".to_string()]);
    }
}
