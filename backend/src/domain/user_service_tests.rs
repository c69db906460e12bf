//! Tests for the user service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{Age, ErrorCode, UserName};
use chrono::Utc;
use rstest::{fixture, rstest};

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

fn user(id: i64, email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id).expect("fixture id"),
        name: UserName::new("John Doe").expect("fixture name"),
        email: EmailAddress::new(email).expect("fixture email"),
        age: Age::new(30).expect("fixture age"),
        created_at: now,
        updated_at: now,
    }
}

#[fixture]
fn create_input() -> CreateUserInput {
    CreateUserInput {
        name: "John Doe".to_owned(),
        email: "john@example.com".to_owned(),
        age: 30,
    }
}

#[rstest]
#[tokio::test]
async fn create_inserts_when_email_is_free(create_input: CreateUserInput) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email.as_ref() == "john@example.com")
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_create()
        .times(1)
        .return_once(|new_user| Ok(user(1, new_user.email.as_ref())));

    let created = make_service(repo)
        .create_user(create_input)
        .await
        .expect("create succeeds");

    assert_eq!(created.id.get(), 1);
    assert_eq!(created.email.as_ref(), "john@example.com");
}

#[rstest]
#[tokio::test]
async fn create_rejects_known_email_before_inserting(create_input: CreateUserInput) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(user(7, "john@example.com"))));
    repo.expect_create().never();

    let err = make_service(repo)
        .create_user(create_input)
        .await
        .expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "user with email john@example.com already exists");
}

#[rstest]
#[tokio::test]
async fn create_translates_storage_uniqueness_violation(create_input: CreateUserInput) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().return_once(|_| Ok(None));
    repo.expect_create()
        .return_once(|_| Err(UserPersistenceError::duplicate_email("john@example.com")));

    let err = make_service(repo)
        .create_user(create_input)
        .await
        .expect_err("conflict from storage");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case("", "john@example.com", 30, "name is required")]
#[case("J", "john@example.com", 30, "name must be between 2 and 100 characters")]
#[case("John", "", 30, "email is required")]
#[case("John", "john-at-example", 30, "invalid email format")]
#[case("John", "john@example.com", 0, "age must be between 1 and 150")]
#[case("John", "john@example.com", 151, "age must be between 1 and 150")]
#[tokio::test]
async fn create_rejects_invalid_fields_without_touching_storage(
    #[case] name: &str,
    #[case] email: &str,
    #[case] age: i32,
    #[case] message: &str,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().never();
    repo.expect_create().never();

    let err = make_service(repo)
        .create_user(CreateUserInput {
            name: name.to_owned(),
            email: email.to_owned(),
            age,
        })
        .await
        .expect_err("validation error");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), message);
    assert!(err.details().is_some());
}

#[rstest]
#[case(0)]
#[case(-3)]
#[tokio::test]
async fn get_rejects_non_positive_ids(#[case] id: i64) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().never();

    let err = make_service(repo).get_user(id).await.expect_err("invalid id");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "invalid user ID");
}

#[rstest]
#[tokio::test]
async fn get_reports_missing_user_as_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = make_service(repo).get_user(42).await.expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");
}

#[rstest]
#[tokio::test]
async fn ids_beyond_storage_range_are_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().never();
    repo.expect_delete().never();
    let service = make_service(repo);
    let oversized = i64::from(i32::MAX) + 1;

    let err = service.get_user(oversized).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "User not found");

    let err = service.delete_user(oversized).await.expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn get_maps_query_failures_to_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Err(UserPersistenceError::query("boom")));

    let err = make_service(repo).get_user(1).await.expect_err("internal");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(None, None, 1, 10, 0)]
#[case(Some(0), Some(0), 1, 10, 0)]
#[case(Some(3), Some(20), 3, 20, 40)]
#[case(Some(2), Some(101), 2, 10, 10)]
#[tokio::test]
async fn list_normalises_paging_and_reports_total(
    #[case] page: Option<i64>,
    #[case] limit: Option<i64>,
    #[case] expected_page: i64,
    #[case] expected_limit: i64,
    #[case] expected_offset: i64,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_page()
        .withf(move |limit, offset| *limit == expected_limit && *offset == expected_offset)
        .times(1)
        .return_once(|_, _| Ok(vec![user(1, "a@example.com")]));
    repo.expect_count().times(1).return_once(|| Ok(57));

    let listed = make_service(repo)
        .list_users(page, limit)
        .await
        .expect("list succeeds");

    assert_eq!(listed.total, 57);
    assert_eq!(listed.page, expected_page);
    assert_eq!(listed.limit, expected_limit);
    assert_eq!(listed.users.len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_allows_keeping_own_email() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(|_| Ok(Some(user(5, "john@example.com"))));
    repo.expect_update()
        .withf(|id, changes| id.get() == 5 && changes.age.is_none())
        .times(1)
        .return_once(|_, _| Ok(Some(user(5, "john@example.com"))));

    let updated = make_service(repo)
        .update_user(
            5,
            UpdateUserInput {
                email: Some("john@example.com".to_owned()),
                ..UpdateUserInput::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.id.get(), 5);
}

#[rstest]
#[tokio::test]
async fn update_rejects_email_owned_by_another_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .return_once(|_| Ok(Some(user(9, "taken@example.com"))));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_user(
            5,
            UpdateUserInput {
                email: Some("taken@example.com".to_owned()),
                ..UpdateUserInput::default()
            },
        )
        .await
        .expect_err("conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_without_email_skips_uniqueness_check() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().never();
    repo.expect_update()
        .withf(|_, changes| changes.age.map(Age::get) == Some(31))
        .return_once(|_, _| Ok(None));

    let err = make_service(repo)
        .update_user(
            3,
            UpdateUserInput {
                age: Some(31),
                ..UpdateUserInput::default()
            },
        )
        .await
        .expect_err("missing row");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_validates_present_fields() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().never();

    let err = make_service(repo)
        .update_user(
            3,
            UpdateUserInput {
                age: Some(0),
                ..UpdateUserInput::default()
            },
        )
        .await
        .expect_err("invalid age");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_outcome(#[case] deleted: bool, #[case] expected: Option<ErrorCode>) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().times(1).return_once(move |_| Ok(deleted));

    let result = make_service(repo).delete_user(4).await;
    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn delete_rejects_invalid_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete().never();

    let err = make_service(repo).delete_user(0).await.expect_err("invalid");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
