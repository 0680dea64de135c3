use super::*;
use crate::domain::{User, UserId, UserProfile, UserProfileDraft};
use actix_rt::System;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

#[fixture]
fn profile() -> UserProfile {
    UserProfile::try_from(UserProfileDraft {
        firstname: Some("Emily".to_owned()),
        lastname: Some("Cameron".to_owned()),
        email: Some("emily@wild.co".to_owned()),
        city: Some("New York".to_owned()),
        language: Some("english".to_owned()),
    })
    .expect("valid profile")
}

#[rstest]
#[case(UserPersistenceError::connection("pool exhausted"), "user repository connection failed: pool exhausted")]
#[case(UserPersistenceError::query("syntax error"), "user repository query failed: syntax error")]
fn persistence_errors_render_messages(#[case] error: UserPersistenceError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn mock_repository_is_usable_as_trait_object(profile: UserProfile) {
    let mut repo = MockUserRepository::new();
    let stored = User::new(UserId::new(3), profile.clone());
    let returned = stored.clone();
    repo.expect_get_user()
        .with(eq(UserId::new(3)))
        .times(1)
        .returning(move |_| Ok(Some(returned.clone())));
    repo.expect_update_user()
        .withf(|id, _| *id == UserId::new(3))
        .times(1)
        .returning(|_, _| Ok(1));

    let repo: Box<dyn UserRepository> = Box::new(repo);
    System::new().block_on(async move {
        let fetched = repo.get_user(UserId::new(3)).await.expect("get succeeds");
        assert_eq!(fetched, Some(stored));
        let affected = repo
            .update_user(UserId::new(3), &profile)
            .await
            .expect("update succeeds");
        assert_eq!(affected, 1);
    });
}
