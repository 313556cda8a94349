//! Generic repository and Unit of Work tests against an in-memory database.

mod common;

use sea_orm::ConnectionTrait;

use contoso_university::domain::{CourseSort, StudentSort};
use contoso_university::errors::AppError;
use contoso_university::infra::repositories::entities::student;
use contoso_university::infra::repositories::{CourseFilter, EnrollmentFilter, StudentFilter};
use contoso_university::infra::{RepositoryScope, UnitOfWork};
use contoso_university::services::ServiceContainer;
use contoso_university::types::{PageRequest, Submission};
use contoso_university::with_transaction;

use common::{
    date, seed_course, seed_department, seed_enrollment, seed_student, student_form,
    student_input, TestContext,
};

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_add_then_get_by_id() {
    let ctx = TestContext::new().await;
    let id = seed_student(&ctx.uow, "Justice", "Peggy").await;

    let found = ctx.uow.students().get_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.last_name, "Justice");
    assert_eq!(found.enrollment_date, date(2005, 9, 1));
    assert!(ctx.uow.students().get_by_id(id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_writes_every_column() {
    let ctx = TestContext::new().await;
    let id = seed_student(&ctx.uow, "Justice", "Peggy").await;

    let mut model = ctx.uow.students().get_by_id(id).await.unwrap().unwrap();
    model.apply(&student_form("Norman", "Laura", date(2003, 9, 1)));
    ctx.uow.students().update(model).await.unwrap();

    let stored = ctx.uow.students().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.last_name, "Norman");
    assert_eq!(stored.first_mid_name, "Laura");
    assert_eq!(stored.enrollment_date, date(2003, 9, 1));
}

#[tokio::test]
async fn test_delete_cascades_to_enrollments() {
    let ctx = TestContext::new().await;
    let department = seed_department(&ctx.uow, "Economics", None).await;
    let course = seed_course(&ctx.uow, 1045, "Calculus", department).await;
    let kept = seed_student(&ctx.uow, "Li", "Yan").await;
    let removed = seed_student(&ctx.uow, "Olivetto", "Nino").await;
    seed_enrollment(&ctx.uow, kept, course, Some("A")).await;
    seed_enrollment(&ctx.uow, removed, course, None).await;

    let model = ctx.uow.students().get_by_id(removed).await.unwrap().unwrap();
    ctx.uow.students().delete(model).await.unwrap();

    let remaining = ctx
        .uow
        .enrollments()
        .get_by_search(&EnrollmentFilter::Course(course))
        .all()
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].student_id, kept);
}

// =============================================================================
// Search, sort, page
// =============================================================================

#[tokio::test]
async fn test_search_sort_and_page_compose() {
    let ctx = TestContext::new().await;
    let students = [
        ("Smith", "Zoe"),
        ("Smithson", "Adam"),
        ("Brown", "Smith"),
        ("Olivetto", "Nino"),
    ];
    for (last, first) in students {
        seed_student(&ctx.uow, last, first).await;
    }

    let page = ctx
        .uow
        .students()
        .get_by_search(&StudentFilter::NameContains("SMITH".to_string()))
        .sort(StudentSort::FirstName)
        .page(PageRequest::new(1, 2))
        .await
        .unwrap();

    let names: Vec<_> = page.data.iter().map(|s| s.first_mid_name.as_str()).collect();
    assert_eq!(names, ["Adam", "Smith"]);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 2);
}

#[tokio::test]
async fn test_course_filters() {
    let ctx = TestContext::new().await;
    let economics = seed_department(&ctx.uow, "Economics", None).await;
    let english = seed_department(&ctx.uow, "English", None).await;
    seed_course(&ctx.uow, 4041, "Macroeconomics", economics).await;
    seed_course(&ctx.uow, 4022, "Microeconomics", economics).await;
    seed_course(&ctx.uow, 2042, "Literature", english).await;

    let economics_courses = ctx
        .uow
        .courses()
        .get_by_search(&CourseFilter::Department(economics))
        .sort(CourseSort::Number)
        .all()
        .await
        .unwrap();
    let numbers: Vec<_> = economics_courses.iter().map(|c| c.id).collect();
    assert_eq!(numbers, [4022, 4041]);

    let none = ctx
        .uow
        .courses()
        .get_by_search(&CourseFilter::Ids(Default::default()))
        .all()
        .await
        .unwrap();
    assert!(none.is_empty());
}

// =============================================================================
// Transactions and failures
// =============================================================================

#[tokio::test]
async fn test_failed_transaction_rolls_back() {
    let ctx = TestContext::new().await;
    let form = student_form("Barzdukas", "Gytis", date(2005, 9, 1));

    let result = with_transaction!(ctx.uow, |tx| {
        tx.students().add(student::ActiveModel::from(&form)).await?;
        Err::<(), AppError>(AppError::bad_request("abandoned"))
    });

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(ctx.uow.students().get_all().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_committed_transaction_is_visible() {
    let ctx = TestContext::new().await;
    let form = student_form("Barzdukas", "Gytis", date(2005, 9, 1));

    let id = with_transaction!(ctx.uow, |tx| {
        let saved = tx.students().add(student::ActiveModel::from(&form)).await?;
        Ok::<i32, AppError>(saved.id)
    })
    .unwrap();

    assert!(ctx.uow.students().get_by_id(id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_write_failure_is_reported_as_save_failure() {
    let ctx = TestContext::new().await;
    for statement in ["DROP TABLE enrollment", "DROP TABLE student"] {
        ctx.connection.execute_unprepared(statement).await.unwrap();
    }

    let result = ctx
        .uow
        .students()
        .add(student::ActiveModel::from(&student_form("Li", "Yan", date(2005, 9, 1))))
        .await;
    assert!(matches!(result, Err(AppError::SaveFailed(_))));

    let outcome = ctx
        .services
        .students()
        .create(student_input("Li", "Yan", date(2005, 9, 1)))
        .await
        .unwrap();
    match outcome {
        Submission::SaveFailed(view) => {
            assert!(!view.errors.model_errors().is_empty());
            assert_eq!(view.values.unwrap().last_name, "Li");
        }
        other => panic!("expected save failure, got {:?}", other),
    }
}
