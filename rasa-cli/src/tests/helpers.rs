//! Test helpers for writing snapshots and capturing command output.

use camino::{Utf8Path, Utf8PathBuf};
use rasa_core::{
    ActivityRecord, Bookmark, Restaurant, Review,
    test_support::{MemoryStore, write_sqlite_database},
};
use tempfile::TempDir;

/// A temporary directory holding one SQLite snapshot.
pub(super) struct SnapshotFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
    database: Utf8PathBuf,
}

impl SnapshotFiles {
    /// Write the street-food snapshot, optionally with an activity table.
    pub(super) fn new(with_activity: bool) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let database = root.join("rasa.db");
        write_sqlite_database(database.as_std_path(), &street_food(), with_activity)
            .expect("write snapshot");
        Self {
            _dir: dir,
            root,
            database,
        }
    }

    pub(super) fn database(&self) -> &Utf8Path {
        &self.database
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Five restaurants, reviews from several users and one user's activity.
///
/// User 7 reviewed restaurant 1 and bookmarked restaurant 3.
pub(super) fn street_food() -> MemoryStore {
    MemoryStore::with_restaurants([
        Restaurant::new(1, "Bakso Pak Kumis"),
        Restaurant::new(2, "Bakso Malang").with_description("Kuah enak"),
        Restaurant::new(3, "Gudeg Yu Djum"),
        Restaurant::new(4, "Es Teler"),
        Restaurant::new(5, "Es Teler Sultan"),
    ])
    .with_review(Review::new(7, 1).with_rating(5).with_comment("enak banget"))
    .with_review(Review::new(8, 1).with_rating(4))
    .with_review(Review::new(8, 3).with_rating(5))
    .with_review(Review::new(9, 4).with_rating(2))
    .with_bookmark(Bookmark::new(7, 3))
    .with_activity(ActivityRecord::view(7, 4, 1_700_000_000))
    .with_activity(ActivityRecord::search(7, "bakso", 1_700_000_100))
}

/// Decode captured output as UTF-8.
pub(super) fn output_text(buffer: &[u8]) -> String {
    String::from_utf8(buffer.to_vec()).expect("stdout utf-8")
}
