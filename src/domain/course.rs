//! Course domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::sorting::sort_order;
use crate::types::{selected_id, FormBinder, ModelErrors, SelectOption};

/// Course domain entity. The id is the course number chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub credits: i32,
    pub department_id: i32,
}

/// The course form as entered. The course number is only read on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CourseInput {
    #[schema(example = "1045")]
    pub course_id: String,
    #[validate(length(
        min = 3,
        max = 50,
        message = "Title must be between 3 and 50 characters"
    ))]
    #[schema(example = "Calculus")]
    pub title: String,
    #[schema(example = "4")]
    pub credits: String,
    #[schema(example = "1")]
    pub department_id: String,
}

impl CourseInput {
    pub fn bind_create(&self) -> Result<CreateCourse, ModelErrors> {
        let mut binder = FormBinder::new(self);
        let course_id = binder.required("course_id", "Number", &self.course_id);
        let fields = self.bind_fields(&mut binder);

        let bound = course_id.zip(fields).map(|(course_id, (credits, department_id))| {
            CreateCourse {
                course_id,
                title: self.title.clone(),
                credits,
                department_id,
            }
        });
        if let Some(course) = &bound {
            binder.check(course);
        }
        binder.finish(bound)
    }

    pub fn bind_update(&self) -> Result<UpdateCourse, ModelErrors> {
        let mut binder = FormBinder::new(self);
        let bound = self
            .bind_fields(&mut binder)
            .map(|(credits, department_id)| UpdateCourse {
                title: self.title.clone(),
                credits,
                department_id,
            });
        if let Some(course) = &bound {
            binder.check(course);
        }
        binder.finish(bound)
    }

    /// Department to preselect when the form is shown again
    pub fn selected_department(&self) -> Option<i32> {
        selected_id(Some(&self.department_id))
    }

    fn bind_fields(&self, binder: &mut FormBinder) -> Option<(i32, i32)> {
        let credits = binder.required("credits", "Credits", &self.credits);
        let department_id = binder.required("department_id", "Department", &self.department_id);
        credits.zip(department_id)
    }
}

impl From<&Course> for CourseInput {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.id.to_string(),
            title: course.title.clone(),
            credits: course.credits.to_string(),
            department_id: course.department_id.to_string(),
        }
    }
}

/// A new course once bound
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateCourse {
    #[validate(range(min = 1, message = "Course number must be a positive number"))]
    pub course_id: i32,
    pub title: String,
    #[validate(range(min = 0, max = 5, message = "Credits must be between 0 and 5"))]
    pub credits: i32,
    pub department_id: i32,
}

/// Changes to an existing course once bound; the course number is fixed
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UpdateCourse {
    pub title: String,
    #[validate(range(min = 0, max = 5, message = "Credits must be between 0 and 5"))]
    pub credits: i32,
    pub department_id: i32,
}

sort_order! {
    /// Course list order
    pub enum CourseSort {
        Number => "number",
        NumberDesc => "number_desc",
        Title => "title",
        TitleDesc => "title_desc",
        Credits => "credits",
        CreditsDesc => "credits_desc",
    }
}

/// Course with its department's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub department_name: Option<String>,
}

/// Course list view, optionally narrowed to one department
#[derive(Debug, Clone, Serialize)]
pub struct CourseIndex {
    pub courses: Vec<CourseDetails>,
    pub departments: Vec<SelectOption>,
    pub selected_department: Option<i32>,
    pub current_sort: CourseSort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_course_number() {
        assert_eq!(CourseSort::parse(None), CourseSort::Number);
        assert_eq!(CourseSort::parse(Some("title_desc")), CourseSort::TitleDesc);
    }

    #[test]
    fn credits_out_of_range_fail_validation() {
        let form = UpdateCourse {
            title: "Chemistry".to_string(),
            credits: 6,
            department_id: 1,
        };
        let errors = form.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("credits"));
    }

    fn input(course_id: &str, credits: &str, department_id: &str) -> CourseInput {
        CourseInput {
            course_id: course_id.to_string(),
            title: "Calculus".to_string(),
            credits: credits.to_string(),
            department_id: department_id.to_string(),
        }
    }

    #[test]
    fn create_binds_number_credits_and_department() {
        let course = input("1045", "4", "2").bind_create().unwrap();

        assert_eq!(course.course_id, 1045);
        assert_eq!(course.credits, 4);
        assert_eq!(course.department_id, 2);
    }

    #[test]
    fn create_reports_text_and_range_problems_by_field() {
        let errors = input("abc", "4", "").bind_create().unwrap_err();
        assert_eq!(errors.field("course_id").len(), 1);
        assert_eq!(
            errors.field("department_id"),
            ["The Department field is required.".to_string()]
        );

        let errors = input("1045", "9", "2").bind_create().unwrap_err();
        assert_eq!(errors.field("credits"), ["Credits must be between 0 and 5".to_string()]);
    }

    #[test]
    fn update_ignores_the_course_number() {
        let course = input("not a number", "3", "1").bind_update().unwrap();
        assert_eq!(course.credits, 3);
        assert_eq!(input("", "3", "x").selected_department(), None);
    }
}
