//! Integration tests for `DieselUserRepository` against PostgreSQL.
//!
//! Each test runs against its own temporary database on an embedded cluster.
//! Set `USERS_API_TEST_DATABASE_URL` to use an existing disposable database
//! instead; the users table is truncated before every test.

use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use users_api::domain::ports::UserRepository;
use users_api::domain::{UserId, UserProfile, UserProfileDraft};
use users_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};

mod support;

use support::{TestDatabase, handle_cluster_setup_failure, test_database};

struct TestContext {
    repository: DieselUserRepository,
    runtime: Runtime,
    _database: TestDatabase,
}

fn setup() -> Result<TestContext, String> {
    let database = test_database()?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let config = PoolConfig::new(database.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        repository: DieselUserRepository::new(pool),
        runtime,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn profile(firstname: &str, city: &str) -> UserProfile {
    UserProfile::try_from(UserProfileDraft {
        firstname: Some(firstname.to_owned()),
        lastname: Some("Martin".to_owned()),
        email: Some("x@wild.co".to_owned()),
        city: Some(city.to_owned()),
        language: Some("French".to_owned()),
    })
    .expect("valid profile")
}

#[rstest]
fn insert_then_fetch_round_trips(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let repo = &ctx.repository;

    ctx.runtime.block_on(async {
        let id = repo
            .create_user(&profile("Marie", "Paris"))
            .await
            .expect("insert");
        assert_eq!(id, UserId::new(1));

        let user = repo.get_user(id).await.expect("fetch").expect("present");
        assert_eq!(user.id(), id);
        assert_eq!(user.profile(), &profile("Marie", "Paris"));
    });
}

#[rstest]
fn list_is_ordered_by_id(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let repo = &ctx.repository;

    ctx.runtime.block_on(async {
        assert!(repo.list_users().await.expect("list").is_empty());

        let first = repo.create_user(&profile("Marie", "Paris")).await.expect("insert");
        let second = repo.create_user(&profile("Emily", "Lyon")).await.expect("insert");

        let ids: Vec<_> = repo
            .list_users()
            .await
            .expect("list")
            .iter()
            .map(|user| user.id())
            .collect();
        assert_eq!(ids, [first, second]);
    });
}

#[rstest]
fn update_reports_matched_rows(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let repo = &ctx.repository;

    ctx.runtime.block_on(async {
        let id = repo.create_user(&profile("Marie", "Paris")).await.expect("insert");

        let changed = profile("Marie", "Nice");
        assert_eq!(repo.update_user(id, &changed).await.expect("update"), 1);
        assert_eq!(repo.update_user(id, &changed).await.expect("repeat"), 1);
        assert_eq!(
            repo.update_user(UserId::new(0), &changed)
                .await
                .expect("update missing"),
            0
        );

        let user = repo.get_user(id).await.expect("fetch").expect("present");
        assert_eq!(user.profile().city(), "Nice");
        assert!(repo.get_user(UserId::new(999)).await.expect("fetch").is_none());
    });
}
