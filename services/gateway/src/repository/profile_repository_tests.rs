use shared::profile::UserProfile;
use shared::types::Username;

use crate::repository::memory::InMemoryProfileRepository;
use crate::repository::profile_repository::ProfileRepository;

fn test_profile(username: &str) -> UserProfile {
    UserProfile::register(
        "Test Player",
        &format!("{}@example.com", username),
        Username::try_from(username).unwrap(),
    )
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryProfileRepository::new();
    let created = repo.create("acct-1", &test_profile("player_one")).await.unwrap();
    assert_eq!(created.version, 0);

    let found = repo
        .find_by_account("acct-1")
        .await
        .unwrap()
        .expect("profile missing");
    assert_eq!(found.username.as_str(), "player_one");

    assert!(repo.find_by_account("acct-2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rejects_duplicate_account() {
    let repo = InMemoryProfileRepository::new();
    repo.create("acct-1", &test_profile("player_one")).await.unwrap();

    let err = repo
        .create("acct-1", &test_profile("player_two"))
        .await
        .unwrap_err();
    assert_eq!(err.code, "CONFLICT_DOCUMENT_EXISTS");
}

#[tokio::test]
async fn test_find_by_username() {
    let repo = InMemoryProfileRepository::new();
    repo.create("acct-1", &test_profile("player_one")).await.unwrap();
    repo.create("acct-2", &test_profile("player_two")).await.unwrap();

    let record = repo
        .find_by_username("player_two")
        .await
        .unwrap()
        .expect("record missing");
    assert_eq!(record.account_id, "acct-2");

    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_bumps_version() {
    let repo = InMemoryProfileRepository::new();
    let created = repo.create("acct-1", &test_profile("player_one")).await.unwrap();

    let mut changed = created.clone();
    changed.name = "Renamed".to_string();
    let stored = repo.update("acct-1", created.version, &changed).await.unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.name, "Renamed");

    let refetched = repo.find_by_account("acct-1").await.unwrap().unwrap();
    assert_eq!(refetched.version, 1);
}

#[tokio::test]
async fn test_update_with_stale_version_conflicts() {
    let repo = InMemoryProfileRepository::new();
    let created = repo.create("acct-1", &test_profile("player_one")).await.unwrap();

    let mut first = created.clone();
    first.name = "First".to_string();
    repo.update("acct-1", 0, &first).await.unwrap();

    // Second writer still holds version 0; the write must be refused and
    // the first writer's change preserved.
    let mut second = created.clone();
    second.name = "Second".to_string();
    let err = repo.update("acct-1", 0, &second).await.unwrap_err();
    assert!(err.is_conflict());

    let stored = repo.find_by_account("acct-1").await.unwrap().unwrap();
    assert_eq!(stored.name, "First");
}

#[tokio::test]
async fn test_update_missing_profile() {
    let repo = InMemoryProfileRepository::new();
    let err = repo
        .update("acct-404", 0, &test_profile("player_one"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_pagination() {
    let repo = InMemoryProfileRepository::new();
    for i in 0..5 {
        repo.create(&format!("acct-{}", i), &test_profile(&format!("player_{}", i)))
            .await
            .unwrap();
    }

    let page = repo.list(2, 0).await.unwrap();
    assert_eq!(page.len(), 2);

    let rest = repo.list(10, 3).await.unwrap();
    assert_eq!(rest.len(), 2);

    let all = repo.list(100, 0).await.unwrap();
    assert_eq!(all.len(), 5);
}
