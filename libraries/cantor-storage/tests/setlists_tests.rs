
use cantor_core::types::{Setlist, SetlistId, SongId};
use cantor_core::{CantorError, DocumentStore};
use chrono::NaiveDate;
use test_helpers::{song_ids, TestDb};

#[tokio::test]
async fn insert_and_get_setlist() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let setlist = db.create_setlist(&owner, &["a", "b"]).await;

    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Sunday Service");
    assert_eq!(loaded.song_ids, song_ids(&["a", "b"]));
}

#[tokio::test]
async fn setlists_are_invisible_to_non_owners() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;
    let other = db.create_member("other@example.com").await;

    let setlist = db.create_setlist(&owner, &["a"]).await;

    let loaded = db.store.get_setlist(&setlist.id, &other).await.unwrap();
    assert!(loaded.is_none());
    assert!(db.store.list_setlists(&other).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_owner_writes_are_rejected() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;
    let other = db.create_member("other@example.com").await;

    let setlist = db.create_setlist(&owner, &["a"]).await;

    let err = db
        .store
        .append_song_id(&setlist.id, &SongId::new("b"), &other)
        .await
        .unwrap_err();
    assert!(matches!(err, CantorError::PermissionDenied));

    let err = db
        .store
        .set_song_ids(&setlist.id, &[], &other)
        .await
        .unwrap_err();
    assert!(matches!(err, CantorError::PermissionDenied));
}

#[tokio::test]
async fn insert_for_someone_else_is_rejected() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;
    let other = db.create_member("other@example.com").await;

    let setlist = Setlist::new(
        owner.clone(),
        "Not Yours",
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );
    let err = db.store.insert_setlist(&setlist, &other).await.unwrap_err();
    assert!(matches!(err, CantorError::PermissionDenied));
}

#[tokio::test]
async fn list_setlists_newest_service_date_first() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    for (name, date) in [
        ("Easter", NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()),
        ("Christmas", NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()),
        ("Pentecost", NaiveDate::from_ymd_opt(2025, 6, 8).unwrap()),
    ] {
        let setlist = Setlist::new(owner.clone(), name, date);
        db.store.insert_setlist(&setlist, &owner).await.unwrap();
    }

    let names: Vec<String> = db
        .store
        .list_setlists(&owner)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Christmas", "Pentecost", "Easter"]);
}

#[tokio::test]
async fn append_is_idempotent() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let setlist = db.create_setlist(&owner, &["a"]).await;

    db.store
        .append_song_id(&setlist.id, &SongId::new("b"), &owner)
        .await
        .unwrap();
    db.store
        .append_song_id(&setlist.id, &SongId::new("b"), &owner)
        .await
        .unwrap();

    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.song_ids, song_ids(&["a", "b"]));
}

#[tokio::test]
async fn remove_strips_all_occurrences() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    // A duplicated id can only exist via direct overwrite, but removal
    // still strips every occurrence.
    let setlist = db.create_setlist(&owner, &["a", "b", "a"]).await;

    db.store
        .remove_song_id(&setlist.id, &SongId::new("a"), &owner)
        .await
        .unwrap();

    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.song_ids, song_ids(&["b"]));
}

#[tokio::test]
async fn set_song_ids_replaces_whole_sequence() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let setlist = db.create_setlist(&owner, &["a", "b", "c"]).await;

    db.store
        .set_song_ids(&setlist.id, &song_ids(&["c", "a", "b"]), &owner)
        .await
        .unwrap();

    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.song_ids, song_ids(&["c", "a", "b"]));
}

#[tokio::test]
async fn rename_and_delete() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let setlist = db.create_setlist(&owner, &[]).await;

    db.store
        .rename_setlist(&setlist.id, "Evening Service", &owner)
        .await
        .unwrap();
    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Evening Service");

    db.store.delete_setlist(&setlist.id, &owner).await.unwrap();
    assert!(db.store.get_setlist(&setlist.id, &owner).await.unwrap().is_none());
}

#[tokio::test]
async fn writes_to_missing_setlist_report_not_found() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let err = db
        .store
        .rename_setlist(&SetlistId::new("nope"), "X", &owner)
        .await
        .unwrap_err();
    assert!(matches!(err, CantorError::SetlistNotFound(_)));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = TestDb::new().await;
    db.create_member("same@example.com").await;

    let user = cantor_core::types::User::new("same@example.com", "Imposter");
    let err = db.store.create_user(&user, "hash").await.unwrap_err();
    assert!(matches!(err, CantorError::Duplicate(_)));
}

#[tokio::test]
async fn concurrent_appends_both_land() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let setlist = db.create_setlist(&owner, &["a"]).await;

    // Each append read-modify-writes the array inside its own immediate
    // transaction, so neither pre-image write can clobber the other.
    let song_b = SongId::new("b");
    let song_c = SongId::new("c");
    let (first, second) = tokio::join!(
        db.store.append_song_id(&setlist.id, &song_b, &owner),
        db.store.append_song_id(&setlist.id, &song_c, &owner),
    );
    first.unwrap();
    second.unwrap();

    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.song_ids.len(), 3);
    assert!(loaded.song_ids.contains(&SongId::new("b")));
    assert!(loaded.song_ids.contains(&SongId::new("c")));
}

#[tokio::test]
async fn corrupt_song_ids_column_is_reported() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let setlist = db.create_setlist(&owner, &["a"]).await;

    sqlx::query("UPDATE setlists SET song_ids = 'not json' WHERE id = ?")
        .bind(setlist.id.as_str())
        .execute(db.store.pool())
        .await
        .unwrap();

    let err = db.store.list_setlists(&owner).await.unwrap_err();
    assert!(err.to_string().contains("Corrupt record"));
}

#[tokio::test]
async fn song_ids_round_trip_through_json_column() {
    let db = TestDb::new().await;
    let owner = db.create_member("owner@example.com").await;

    let ids: Vec<&str> = vec!["first", "second", "third", "fourth"];
    let setlist = db.create_setlist(&owner, &ids).await;

    let loaded = db.store.get_setlist(&setlist.id, &owner).await.unwrap().unwrap();
    assert_eq!(loaded.song_ids, song_ids(&ids));
}
