//! `SQLite` implementation of [`ProfileStore`].
//!
//! The active profile lives in a single-row table seeded by the migration;
//! activation is always an `UPDATE` of that row, never an insert.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use lumen_app::ports::ProfileStore;
use lumen_domain::error::LumenError;
use lumen_domain::id::ProfileId;
use lumen_domain::profile::Profile;

use crate::error::StorageError;

struct Wrapper(Profile);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Profile> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        Ok(Self(Profile {
            id: ProfileId::from_i64(id),
            name,
        }))
    }
}

const INSERT: &str = "INSERT INTO profiles (name) VALUES (?)";
const SELECT_BY_ID: &str = "SELECT * FROM profiles WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM profiles ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM profiles WHERE id = ?";

const SELECT_ACTIVE: &str = "SELECT profile_id FROM active_profile WHERE id = 0";
const UPDATE_ACTIVE: &str = "UPDATE active_profile SET profile_id = ? WHERE id = 0";

/// `SQLite`-backed profile store.
pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProfileStore for SqliteProfileStore {
    async fn create(&self, name: &str) -> Result<Profile, LumenError> {
        let result = sqlx::query(INSERT)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Profile {
            id: ProfileId::from_i64(result.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    async fn get_by_id(&self, id: ProfileId) -> Result<Option<Profile>, LumenError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Profile>, LumenError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: ProfileId) -> Result<(), LumenError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn active_profile(&self) -> Result<Option<ProfileId>, LumenError> {
        let active: Option<i64> = sqlx::query_scalar(SELECT_ACTIVE)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(active.map(ProfileId::from_i64))
    }

    async fn set_active_profile(&self, profile: Option<ProfileId>) -> Result<(), LumenError> {
        sqlx::query(UPDATE_ACTIVE)
            .bind(profile.map(ProfileId::as_i64))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
