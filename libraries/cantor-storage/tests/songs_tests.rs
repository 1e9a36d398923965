
use cantor_core::types::{Song, SongId, UpdateSong};
use cantor_core::{CantorError, DocumentStore};
use test_helpers::{song_ids, TestDb};

#[tokio::test]
async fn insert_and_get_song() {
    let db = TestDb::new().await;
    let admin = db.create_admin("admin@example.com").await;

    let song = Song::new("Amazing Grace", "John Newton", "Amazing grace\nHow sweet the sound");
    db.store.insert_song(&song, &admin).await.unwrap();

    let loaded = db.store.get_song(&song.id).await.unwrap().unwrap();
    assert_eq!(loaded.id, song.id);
    assert_eq!(loaded.title, "Amazing Grace");
    assert_eq!(loaded.artist, "John Newton");
    assert_eq!(loaded.lyrics, song.lyrics);
}

#[tokio::test]
async fn get_missing_song_returns_none() {
    let db = TestDb::new().await;
    let missing = db.store.get_song(&SongId::new("nope")).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn non_admin_cannot_write_library() {
    let db = TestDb::new().await;
    let member = db.create_member("member@example.com").await;

    let song = Song::new("Title", "Artist", "lyrics");
    let err = db.store.insert_song(&song, &member).await.unwrap_err();
    assert!(matches!(err, CantorError::PermissionDeniedWithContext(_)));
}

#[tokio::test]
async fn list_songs_sorted_by_title() {
    let db = TestDb::new().await;
    let admin = db.create_admin("admin@example.com").await;

    for title in ["Cornerstone", "Amazing Grace", "Be Thou My Vision"] {
        let song = Song::new(title, "Various", "la la la");
        db.store.insert_song(&song, &admin).await.unwrap();
    }

    let titles: Vec<String> = db
        .store
        .list_songs()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Amazing Grace", "Be Thou My Vision", "Cornerstone"]);
}

#[tokio::test]
async fn batch_get_skips_unknown_ids() {
    let db = TestDb::new().await;
    let admin = db.create_admin("admin@example.com").await;

    let song = Song::new("Known", "Artist", "lyrics");
    db.store.insert_song(&song, &admin).await.unwrap();

    let mut wanted = song_ids(&["ghost-1", "ghost-2"]);
    wanted.push(song.id.clone());

    let found = db.store.get_songs(&wanted).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(found.contains_key(&song.id));
}

#[tokio::test]
async fn batch_get_empty_input() {
    let db = TestDb::new().await;
    let found = db.store.get_songs(&[]).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn update_song_partial_fields() {
    let db = TestDb::new().await;
    let admin = db.create_admin("admin@example.com").await;

    let song = Song::new("Old Title", "Old Artist", "old lyrics");
    db.store.insert_song(&song, &admin).await.unwrap();

    let update = UpdateSong {
        title: Some("New Title".to_string()),
        ..UpdateSong::default()
    };
    db.store.update_song(&song.id, &update, &admin).await.unwrap();

    let loaded = db.store.get_song(&song.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "New Title");
    assert_eq!(loaded.artist, "Old Artist");
    assert_eq!(loaded.lyrics, "old lyrics");
}

#[tokio::test]
async fn delete_song_leaves_setlist_reference_dangling() {
    let db = TestDb::new().await;
    let admin = db.create_admin("admin@example.com").await;

    let song = Song::new("Doomed", "Artist", "lyrics");
    db.store.insert_song(&song, &admin).await.unwrap();

    let setlist = db.create_setlist(&admin, &[song.id.as_str()]).await;

    db.store.delete_song(&song.id, &admin).await.unwrap();

    // The setlist still carries the id; resolution filters it later.
    let loaded = db.store.get_setlist(&setlist.id, &admin).await.unwrap().unwrap();
    assert_eq!(loaded.song_ids, vec![song.id.clone()]);
    assert!(db.store.get_song(&song.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_song_errors() {
    let db = TestDb::new().await;
    let admin = db.create_admin("admin@example.com").await;

    let err = db
        .store
        .delete_song(&SongId::new("nope"), &admin)
        .await
        .unwrap_err();
    assert!(matches!(err, CantorError::SongNotFound(_)));
}
