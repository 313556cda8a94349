//! Student service tests against an in-memory database.

mod common;

use contoso_university::domain::{StudentInput, StudentQuery, StudentSort};
use contoso_university::errors::AppError;
use contoso_university::infra::RepositoryScope;
use contoso_university::services::ServiceContainer;
use contoso_university::types::Submission;

use common::{
    date, seed_course, seed_department, seed_enrollment, seed_student, student_input, TestContext,
};

fn list(sort: Option<&str>, search: Option<&str>, page: Option<u64>) -> StudentQuery {
    StudentQuery::resolve(sort, None, search.map(str::to_string), page)
}

// =============================================================================
// Create / Edit
// =============================================================================

#[tokio::test]
async fn test_created_student_appears_in_list() {
    let ctx = TestContext::new().await;
    let students = ctx.services.students();

    let outcome = students
        .create(student_input("Alexander", "Carson", date(2005, 9, 1)))
        .await
        .unwrap();
    assert!(matches!(outcome, Submission::Saved));

    let index = students.index(list(None, None, None)).await.unwrap();
    assert_eq!(index.students.data.len(), 1);

    let student = &index.students.data[0];
    assert_eq!(student.last_name, "Alexander");
    assert_eq!(student.first_mid_name, "Carson");
    assert_eq!(student.enrollment_date, date(2005, 9, 1));
}

#[tokio::test]
async fn test_invalid_student_is_not_saved() {
    let ctx = TestContext::new().await;
    let students = ctx.services.students();

    let outcome = students
        .create(student_input("", "Carson", date(2005, 9, 1)))
        .await
        .unwrap();

    match outcome {
        Submission::Invalid(view) => {
            assert!(!view.errors.field("last_name").is_empty());
            assert_eq!(view.values.unwrap().first_mid_name, "Carson");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(ctx.uow.students().get_all().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unparsable_date_is_redisplayed_with_field_message() {
    let ctx = TestContext::new().await;
    let input = StudentInput {
        enrollment_date: "not-a-date".to_string(),
        ..student_input("Alexander", "Carson", date(2005, 9, 1))
    };

    let outcome = ctx.services.students().create(input).await.unwrap();

    match outcome {
        Submission::Invalid(view) => {
            assert_eq!(
                view.errors.field("enrollment_date"),
                ["The value 'not-a-date' is not valid for Enrollment Date.".to_string()]
            );
            let values = view.values.unwrap();
            assert_eq!(values.enrollment_date, "not-a-date");
            assert_eq!(values.last_name, "Alexander");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(ctx.uow.students().get_all().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_with_missing_date_keeps_stored_student() {
    let ctx = TestContext::new().await;
    let id = seed_student(&ctx.uow, "Alonso", "Meredith").await;
    let input = StudentInput {
        enrollment_date: String::new(),
        ..student_input("Alonso-Reyes", "Meredith", date(2002, 9, 1))
    };

    let outcome = ctx.services.students().edit(id, input).await.unwrap();

    match outcome {
        Submission::Invalid(view) => {
            assert_eq!(view.id, Some(id));
            assert_eq!(view.errors.field("enrollment_date").len(), 1);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    let stored = ctx.uow.students().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.last_name, "Alonso");
}

#[tokio::test]
async fn test_edit_keeps_id_and_enrollments() {
    let ctx = TestContext::new().await;
    let id = seed_student(&ctx.uow, "Alonso", "Meredith").await;
    let department = seed_department(&ctx.uow, "Economics", None).await;
    let course = seed_course(&ctx.uow, 1045, "Calculus", department).await;
    seed_enrollment(&ctx.uow, id, course, Some("B")).await;

    let outcome = ctx
        .services
        .students()
        .edit(id, student_input("Alonso-Reyes", "Meredith", date(2002, 9, 1)))
        .await
        .unwrap();
    assert!(matches!(outcome, Submission::Saved));

    let details = ctx.services.students().details(id).await.unwrap();
    assert_eq!(details.student.id, id);
    assert_eq!(details.student.last_name, "Alonso-Reyes");
    assert_eq!(details.student.enrollment_date, date(2002, 9, 1));
    assert_eq!(details.enrollments.len(), 1);
    assert_eq!(details.enrollments[0].course_title, "Calculus");
}

#[tokio::test]
async fn test_edit_unknown_student_is_not_found() {
    let ctx = TestContext::new().await;

    let result = ctx
        .services
        .students()
        .edit(999, student_input("Nobody", "At All", date(2005, 9, 1)))
        .await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_removes_student_and_enrollments() {
    let ctx = TestContext::new().await;
    let id = seed_student(&ctx.uow, "Anand", "Arturo").await;
    let department = seed_department(&ctx.uow, "Engineering", None).await;
    let course = seed_course(&ctx.uow, 3141, "Trigonometry", department).await;
    seed_enrollment(&ctx.uow, id, course, None).await;

    let outcome = ctx.services.students().delete(id).await.unwrap();
    assert!(matches!(outcome, Submission::Saved));

    assert!(ctx.uow.students().get_by_id(id).await.unwrap().is_none());
    assert_eq!(ctx.uow.enrollments().get_all().count().await.unwrap(), 0);
    assert!(ctx.uow.courses().get_by_id(course).await.unwrap().is_some());
}

// =============================================================================
// List: sort, search, paging
// =============================================================================

#[tokio::test]
async fn test_default_sort_is_last_name_ascending() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Norman", "Laura").await;
    seed_student(&ctx.uow, "Barzdukas", "Gytis").await;
    seed_student(&ctx.uow, "Li", "Yan").await;

    let index = ctx.services.students().index(list(None, None, None)).await.unwrap();
    let names: Vec<_> = index.students.data.iter().map(|s| s.last_name.as_str()).collect();

    assert_eq!(names, ["Barzdukas", "Li", "Norman"]);
    assert_eq!(index.current_sort, StudentSort::LastName);
}

#[tokio::test]
async fn test_firstname_desc_sorts_by_first_name_descending() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Norman", "Laura").await;
    seed_student(&ctx.uow, "Barzdukas", "Gytis").await;
    seed_student(&ctx.uow, "Li", "Yan").await;

    let index = ctx
        .services
        .students()
        .index(list(Some("firstname_desc"), None, None))
        .await
        .unwrap();
    let names: Vec<_> = index.students.data.iter().map(|s| s.first_mid_name.as_str()).collect();

    assert_eq!(names, ["Yan", "Laura", "Gytis"]);
    assert_eq!(index.sort_links.first_name, StudentSort::FirstName);
}

#[tokio::test]
async fn test_search_matches_either_name_ignoring_case_and_resets_page() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Smith", "Anna").await;
    seed_student(&ctx.uow, "Jones", "Smithers").await;
    seed_student(&ctx.uow, "Olivetto", "Nino").await;

    let query =
        StudentQuery::resolve(None, Some("old".to_string()), Some("smith".to_string()), Some(3));
    assert_eq!(query.page, 1);

    let index = ctx.services.students().index(query).await.unwrap();
    let mut names: Vec<_> = index.students.data.iter().map(|s| s.last_name.as_str()).collect();
    names.sort();

    assert_eq!(names, ["Jones", "Smith"]);
    assert_eq!(index.students.meta.page, 1);
    assert_eq!(index.current_filter.as_deref(), Some("smith"));
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Smith", "Anna").await;

    let index = ctx.services.students().index(list(None, Some("%"), None)).await.unwrap();

    assert!(index.students.data.is_empty());
}

#[tokio::test]
async fn test_pages_hold_five_students() {
    let ctx = TestContext::new().await;
    for i in 0..7 {
        seed_student(&ctx.uow, &format!("Student{}", i), "Test").await;
    }

    let first = ctx.services.students().index(list(None, None, None)).await.unwrap();
    let second = ctx.services.students().index(list(None, None, Some(2))).await.unwrap();

    assert_eq!(first.students.data.len(), 5);
    assert!(first.students.meta.has_next_page);
    assert_eq!(second.students.data.len(), 2);
    assert!(second.students.meta.has_previous_page);
    assert!(!second.students.meta.has_next_page);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Alexander", "Carson").await;

    let index = ctx
        .services
        .students()
        .index(list(None, None, Some(4_000_000_000_000_000_000)))
        .await
        .unwrap();

    assert!(index.students.data.is_empty());
    assert_eq!(index.students.meta.total, 1);
    assert!(!index.students.meta.has_next_page);
}
