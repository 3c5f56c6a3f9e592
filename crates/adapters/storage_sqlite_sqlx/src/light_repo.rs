//! `SQLite` implementation of [`LightRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use lumen_app::ports::LightRepository;
use lumen_domain::credit::Credit;
use lumen_domain::error::LumenError;
use lumen_domain::id::LightId;
use lumen_domain::light::Light;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Light);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Light> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let label: String = row.try_get("label")?;
        let credits: i64 = row.try_get("credits")?;

        let credit = Credit::try_from(credits).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Light {
            id: LightId::from_i64(id),
            label,
            credit,
        }))
    }
}

const INSERT: &str = "INSERT INTO lights (label, credits) VALUES (?, 0)";
const SELECT_BY_ID: &str = "SELECT * FROM lights WHERE id = ?";
const SELECT_BY_LABEL: &str = "SELECT * FROM lights WHERE label = ?";
const SELECT_ALL: &str = "SELECT * FROM lights ORDER BY id";
const UPDATE_CREDIT: &str = "UPDATE lights SET credits = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM lights WHERE id = ?";

/// `SQLite`-backed light repository.
pub struct SqliteLightRepository {
    pool: SqlitePool,
}

impl SqliteLightRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LightRepository for SqliteLightRepository {
    async fn create(&self, label: &str) -> Result<Light, LumenError> {
        let result = sqlx::query(INSERT)
            .bind(label)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Light {
            id: LightId::from_i64(result.last_insert_rowid()),
            label: label.to_string(),
            credit: Credit::OFF,
        })
    }

    async fn get_by_id(&self, id: LightId) -> Result<Option<Light>, LumenError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_by_label(&self, label: &str) -> Result<Option<Light>, LumenError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_LABEL)
            .bind(label)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Light>, LumenError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update_credit(&self, id: LightId, credit: Credit) -> Result<(), LumenError> {
        sqlx::query(UPDATE_CREDIT)
            .bind(credit.as_i64())
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn delete(&self, id: LightId) -> Result<(), LumenError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
