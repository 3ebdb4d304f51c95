//! Postgres repository tests.
//!
//! Requires Docker for testcontainers (Postgres). When no Docker daemon is
//! reachable the tests log a notice and return early.
//!
//! Run with: `cargo test -p panchayat-db --test repository_test`

use chrono::{DateTime, Duration, SubsecRound, Utc};
use panchayat_core::{Content, ContentQuery, ContentType, MediaItem};
use panchayat_db::{run_migrations, AdminRepository, AdminStore, ContentRepository, ContentStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use uuid::Uuid;

struct TestDb {
    pool: PgPool,
    _container: ContainerAsync<Postgres>,
}

async fn setup_db() -> Option<TestDb> {
    let container = match Postgres::default().start().await {
        Ok(container) => container,
        Err(e) => {
            eprintln!("skipping: could not start Postgres container: {}", e);
            return None;
        }
    };

    let host = container.get_host().await.expect("Failed to get Postgres host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get Postgres port");
    let connection_string = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&connection_string)
        .await
        .expect("Failed to connect to test database");
    run_migrations(&pool).await.expect("Failed to run migrations");

    Some(TestDb {
        pool,
        _container: container,
    })
}

// Postgres keeps microseconds.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn record(
    content_type: ContentType,
    is_active: bool,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    created_at: DateTime<Utc>,
) -> Content {
    Content {
        id: Uuid::new_v4(),
        content_type,
        title: format!("{} title", content_type),
        description: "Ward notice".to_string(),
        media: vec![MediaItem::image(format!("/uploads/{}.png", Uuid::new_v4()))],
        start_date: window.map(|(start, _)| start),
        end_date: window.map(|(_, end)| end),
        is_active,
        created_at,
        updated_at: created_at,
    }
}

fn ids(items: &[Content]) -> Vec<Uuid> {
    items.iter().map(|c| c.id).collect()
}

#[tokio::test]
async fn test_listing_matches_visibility_rule() {
    let Some(db) = setup_db().await else { return };
    let repo = ContentRepository::new(db.pool.clone());
    let now = now();

    let work = record(ContentType::Work, true, None, now - Duration::minutes(5));
    let hidden = record(ContentType::Achievement, false, None, now - Duration::minutes(4));
    let running = record(
        ContentType::Event,
        true,
        Some((now - Duration::days(1), now + Duration::days(1))),
        now - Duration::minutes(3),
    );
    let future = record(
        ContentType::Event,
        true,
        Some((now + Duration::days(2), now + Duration::days(3))),
        now - Duration::minutes(2),
    );
    let past = record(
        ContentType::Event,
        true,
        Some((now - Duration::days(3), now - Duration::days(2))),
        now - Duration::minutes(1),
    );
    for c in [&work, &hidden, &running, &future, &past] {
        repo.insert(c).await.expect("insert");
    }

    let public = repo.list(&ContentQuery::public(None, now)).await.unwrap();
    assert_eq!(ids(&public), vec![running.id, work.id]);

    let public_events = repo
        .list(&ContentQuery::public(Some(ContentType::Event), now))
        .await
        .unwrap();
    assert_eq!(ids(&public_events), vec![running.id]);

    let admin = repo.list(&ContentQuery::admin(None, now)).await.unwrap();
    assert_eq!(
        ids(&admin),
        vec![past.id, future.id, running.id, hidden.id, work.id]
    );

    let admin_events = repo
        .list(&ContentQuery::admin(Some(ContentType::Event), now))
        .await
        .unwrap();
    assert_eq!(ids(&admin_events), vec![past.id, future.id, running.id]);
}

#[tokio::test]
async fn test_content_round_trip_and_delete() {
    let Some(db) = setup_db().await else { return };
    let repo = ContentRepository::new(db.pool.clone());
    let now = now();

    let mut content = record(
        ContentType::Event,
        true,
        Some((now, now + Duration::days(1))),
        now,
    );
    content.media.push(MediaItem::image("/uploads/second.jpg"));
    let saved = repo.insert(&content).await.unwrap();
    assert_eq!(saved, content);
    assert_eq!(repo.get(content.id).await.unwrap(), Some(content.clone()));

    let mut edited = content.clone();
    edited.title = "Rescheduled".to_string();
    edited.media.truncate(1);
    edited.updated_at = now + Duration::seconds(1);
    let updated = repo.update(&edited).await.unwrap().expect("record exists");
    assert_eq!(updated, edited);

    let mut missing = edited.clone();
    missing.id = Uuid::new_v4();
    assert!(repo.update(&missing).await.unwrap().is_none());

    assert!(repo.delete(content.id).await.unwrap());
    assert!(!repo.delete(content.id).await.unwrap());
    assert!(repo.get(content.id).await.unwrap().is_none());
    repo.ping().await.unwrap();
}

#[tokio::test]
async fn test_schema_rejects_event_without_dates() {
    let Some(db) = setup_db().await else { return };
    let repo = ContentRepository::new(db.pool.clone());

    let undated = record(ContentType::Event, true, None, now());
    assert!(repo.insert(&undated).await.is_err());
    assert!(repo.get(undated.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_create_is_unique_by_username() {
    let Some(db) = setup_db().await else { return };
    let repo = AdminRepository::new(db.pool.clone());

    let created = repo
        .create("admin", "$argon2id$hash")
        .await
        .unwrap()
        .expect("first create succeeds");
    assert!(repo.create("admin", "$argon2id$other").await.unwrap().is_none());

    let found = repo.find_by_username("admin").await.unwrap().expect("found");
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "$argon2id$hash");
    assert_eq!(repo.get(created.id).await.unwrap().map(|a| a.username), Some("admin".to_string()));
    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}
