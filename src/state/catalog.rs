use rusqlite::{Connection, ErrorCode, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::data::{Artwork, Category};
use super::seed::seed_artworks;

/// Errors surfaced by the catalog store
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The database could not be opened or read. Fatal to any data
    /// operation; the UI shows this as a load failure.
    #[error("馆藏数据库不可用: {0}")]
    Unavailable(#[source] rusqlite::Error),

    /// `add` was called with an id that already exists
    #[error("录入失败：编号 {0} 已存在")]
    DuplicateKey(String),

    /// A write (update/delete/reorder/reset) failed; retrying is reasonable
    #[error("写入档案失败: {0}")]
    WriteFailed(#[source] rusqlite::Error),
}

/// The Catalog manages the SQLite database holding all artwork records.
///
/// It is constructed once at application start and owns the connection for
/// the lifetime of the app; nothing else touches the database.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Open the catalog at its default location.
    ///
    /// The database file lives in the user's data directory:
    /// - Linux: ~/.local/share/silk-gallery/silk_gallery.db
    /// - macOS: ~/Library/Application Support/silk-gallery/silk_gallery.db
    /// - Windows: %APPDATA%\silk-gallery\silk_gallery.db
    pub fn new() -> Result<Self, CatalogError> {
        let db_path = Self::default_db_path();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .expect("Failed to create application data directory");
        }

        println!("📁 Catalog database at: {}", db_path.display());
        Self::open(&db_path)
    }

    /// Open (or create) the catalog at an explicit path
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(CatalogError::Unavailable)?;
        let mut catalog = Catalog { conn };
        catalog.init_schema()?;
        Ok(catalog)
    }

    /// Open a throwaway in-memory catalog (used by tests)
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory().map_err(CatalogError::Unavailable)?;
        let mut catalog = Catalog { conn };
        catalog.init_schema()?;
        Ok(catalog)
    }

    /// Get the path where the database should be stored
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("silk-gallery");
        path.push("silk_gallery.db");
        path
    }

    /// Initialize the database schema.
    /// Creates the artworks table and its index if they don't exist.
    fn init_schema(&mut self) -> Result<(), CatalogError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS artworks (
                    id              TEXT PRIMARY KEY,
                    title           TEXT NOT NULL,
                    image_url       TEXT NOT NULL,
                    category        TEXT NOT NULL,
                    description     TEXT NOT NULL,
                    needlework      TEXT NOT NULL,
                    created_at      INTEGER NOT NULL
                )",
                [],
            )
            .map_err(CatalogError::Unavailable)?;

        // Add display_order if it doesn't exist (for databases created before
        // ordering shipped). This is safe - if the column exists, the ALTER
        // is silently ignored.
        let _ = self.conn.execute(
            "ALTER TABLE artworks ADD COLUMN display_order INTEGER NOT NULL DEFAULT 0",
            [],
        );

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_artworks_display_order
                 ON artworks(display_order)",
                [],
            )
            .map_err(CatalogError::Unavailable)?;

        Ok(())
    }

    /// Get a count of artworks in the catalog
    pub fn count(&self) -> Result<i64, CatalogError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM artworks", [], |row| row.get(0))
            .map_err(CatalogError::Unavailable)
    }

    /// Insert the canonical seed records when the catalog is empty.
    ///
    /// Returns how many records were inserted: 4 on the empty path, 0
    /// otherwise. The count is the observable seeding event; calling this
    /// twice can never duplicate records because the second call sees a
    /// non-empty table.
    pub fn seed_if_empty(&mut self) -> Result<usize, CatalogError> {
        if self.count()? > 0 {
            return Ok(0);
        }

        let seeds = seed_artworks();
        let tx = self.conn.transaction().map_err(CatalogError::WriteFailed)?;
        for artwork in &seeds {
            tx.execute(
                "INSERT INTO artworks
                    (id, title, image_url, category, description, needlework,
                     display_order, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    artwork.id,
                    artwork.title,
                    artwork.image_url,
                    artwork.category.label(),
                    artwork.description,
                    artwork.needlework,
                    artwork.display_order,
                    artwork.created_at,
                ],
            )
            .map_err(CatalogError::WriteFailed)?;
        }
        tx.commit().map_err(CatalogError::WriteFailed)?;

        println!("🌱 Seeded catalog with {} archival works", seeds.len());
        Ok(seeds.len())
    }

    /// Get all artworks, ordered by display rank ascending.
    /// Seeds the catalog first if it is empty.
    pub fn get_all(&mut self) -> Result<Vec<Artwork>, CatalogError> {
        self.seed_if_empty()?;

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, title, image_url, category, description, needlework,
                        display_order, created_at
                 FROM artworks ORDER BY display_order ASC",
            )
            .map_err(CatalogError::Unavailable)?;

        let rows = stmt
            .query_map([], row_to_artwork)
            .map_err(CatalogError::Unavailable)?;

        let mut artworks = Vec::new();
        for artwork in rows {
            artworks.push(artwork.map_err(CatalogError::Unavailable)?);
        }

        Ok(artworks)
    }

    /// Insert a new artwork. Fails with `DuplicateKey` if the id exists.
    pub fn add(&self, artwork: &Artwork) -> Result<(), CatalogError> {
        let result = self.conn.execute(
            "INSERT INTO artworks
                (id, title, image_url, category, description, needlework,
                 display_order, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                artwork.id,
                artwork.title,
                artwork.image_url,
                artwork.category.label(),
                artwork.description,
                artwork.needlework,
                artwork.display_order,
                artwork.created_at,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(CatalogError::DuplicateKey(artwork.id.clone()))
            }
            Err(e) => Err(CatalogError::WriteFailed(e)),
        }
    }

    /// Replace the artwork matching `id` wholesale.
    /// Upsert semantics: creates the record if it is absent.
    pub fn update(&self, artwork: &Artwork) -> Result<(), CatalogError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO artworks
                    (id, title, image_url, category, description, needlework,
                     display_order, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    artwork.id,
                    artwork.title,
                    artwork.image_url,
                    artwork.category.label(),
                    artwork.description,
                    artwork.needlework,
                    artwork.display_order,
                    artwork.created_at,
                ],
            )
            .map_err(CatalogError::WriteFailed)?;
        Ok(())
    }

    /// Remove the artwork with the given id. Idempotent: removing an id
    /// that does not exist is not an error.
    pub fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.conn
            .execute("DELETE FROM artworks WHERE id = ?1", [id])
            .map_err(CatalogError::WriteFailed)?;
        Ok(())
    }

    /// Persist the display rank of every artwork in the given set as one
    /// batch. The whole batch runs inside a single transaction, so the
    /// caller observes either all updates or an error with nothing applied.
    pub fn reorder(&mut self, artworks: &[Artwork]) -> Result<(), CatalogError> {
        let tx = self.conn.transaction().map_err(CatalogError::WriteFailed)?;
        for artwork in artworks {
            tx.execute(
                "UPDATE artworks SET display_order = ?1 WHERE id = ?2",
                rusqlite::params![artwork.display_order, artwork.id],
            )
            .map_err(CatalogError::WriteFailed)?;
        }
        tx.commit().map_err(CatalogError::WriteFailed)?;
        Ok(())
    }

    /// Clear the entire catalog unconditionally.
    /// The next `get_all` re-seeds the canonical records.
    pub fn reset_all(&self) -> Result<(), CatalogError> {
        self.conn
            .execute("DELETE FROM artworks", [])
            .map_err(CatalogError::WriteFailed)?;
        Ok(())
    }
}

/// Map a database row onto an Artwork.
/// A category label the enum no longer knows falls back to 其他.
fn row_to_artwork(row: &Row<'_>) -> rusqlite::Result<Artwork> {
    let label: String = row.get(3)?;
    Ok(Artwork {
        id: row.get(0)?,
        title: row.get(1)?,
        image_url: row.get(2)?,
        category: Category::from_label(&label).unwrap_or(Category::Others),
        description: row.get(4)?,
        needlework: row.get(5)?,
        display_order: row.get(6)?,
        created_at: row.get(7)?,
    })
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ordering::{move_item, MoveDirection};

    fn artwork(id: &str, rank: i64) -> Artwork {
        Artwork {
            id: id.to_string(),
            title: format!("作品 {}", id),
            image_url: "data:image/jpeg;base64,AAAA".to_string(),
            category: Category::People,
            description: "测试".to_string(),
            needlework: "平针".to_string(),
            display_order: rank,
            created_at: 1_700_000_100_000,
        }
    }

    #[test]
    fn test_empty_catalog_seeds_once() {
        let mut catalog = Catalog::open_in_memory().unwrap();

        assert_eq!(catalog.seed_if_empty().unwrap(), 4);
        assert_eq!(catalog.seed_if_empty().unwrap(), 0);
        assert_eq!(catalog.count().unwrap(), 4);
    }

    #[test]
    fn test_get_all_seeds_and_sorts() {
        let mut catalog = Catalog::open_in_memory().unwrap();

        let first = catalog.get_all().unwrap();
        let second = catalog.get_all().unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(first, second);

        let ranks: Vec<i64> = first.iter().map(|a| a.display_order).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_get_all_orders_by_rank() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog.add(&artwork("x", 3)).unwrap();
        catalog.add(&artwork("y", 1)).unwrap();
        catalog.add(&artwork("z", 2)).unwrap();

        let all = catalog.get_all().unwrap();
        let ids: Vec<&str> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_add_then_get_all_contains_fields() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog.seed_if_empty().unwrap();

        let piece = artwork("manual_abc", 5);
        catalog.add(&piece).unwrap();

        let all = catalog.get_all().unwrap();
        let found = all.iter().find(|a| a.id == "manual_abc").unwrap();
        assert_eq!(*found, piece);
    }

    #[test]
    fn test_add_duplicate_id_fails() {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.add(&artwork("dup", 1)).unwrap();

        match catalog.add(&artwork("dup", 2)) {
            Err(CatalogError::DuplicateKey(id)) => assert_eq!(id, "dup"),
            other => panic!("expected DuplicateKey, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog.add(&artwork("w", 1)).unwrap();

        let mut edited = artwork("w", 1);
        edited.title = "新标题".to_string();
        edited.category = Category::FlowersBirds;
        catalog.update(&edited).unwrap();

        let all = catalog.get_all().unwrap();
        assert_eq!(all[0].title, "新标题");
        assert_eq!(all[0].category, Category::FlowersBirds);
    }

    #[test]
    fn test_update_upserts_when_absent() {
        let catalog = Catalog::open_in_memory().unwrap();
        catalog.update(&artwork("ghost", 1)).unwrap();
        assert_eq!(catalog.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog.add(&artwork("gone", 1)).unwrap();

        catalog.delete("gone").unwrap();
        catalog.delete("gone").unwrap();
        catalog.delete("never_existed").unwrap();

        assert!(catalog.get_all().unwrap().iter().all(|a| a.id != "gone"));
    }

    #[test]
    fn test_reorder_persists_ranks() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        let mut items = catalog.get_all().unwrap();

        // ranks [1,2,3,4]; moving index 2 up swaps positions 1 and 2
        assert!(move_item(&mut items, 2, MoveDirection::Up));
        catalog.reorder(&items).unwrap();

        let reloaded = catalog.get_all().unwrap();
        let ids: Vec<&str> = reloaded.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "real_asset_tiger",
                "real_asset_holy_land",
                "real_asset_phoenix",
                "real_asset_cat",
            ]
        );
        let ranks: Vec<i64> = reloaded.iter().map(|a| a.display_order).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reset_restores_seed_state() {
        let mut catalog = Catalog::open_in_memory().unwrap();
        catalog.get_all().unwrap();
        catalog.add(&artwork("extra", 9)).unwrap();

        catalog.reset_all().unwrap();
        let all = catalog.get_all().unwrap();

        assert_eq!(all, crate::state::seed::seed_artworks());
    }
}
