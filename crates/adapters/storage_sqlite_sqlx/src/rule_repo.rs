//! `SQLite` implementation of [`RuleRepository`].
//!
//! Owns the three association relations alongside the rules themselves.
//! Candidate selection is a single `INTERSECT` query over the profile and
//! callback relations.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use lumen_app::ports::RuleRepository;
use lumen_domain::color::RuleColor;
use lumen_domain::credit::Credit;
use lumen_domain::error::LumenError;
use lumen_domain::id::{CallbackId, LightId, ProfileId, RuleId};
use lumen_domain::rule::{Rule, RuleDraft};
use lumen_domain::schedule::{TimeOfDay, TimeWindow};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Rule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Rule> {
        value.map(|w| w.0)
    }
}

fn decode_time(seconds: i64) -> Result<TimeOfDay, sqlx::Error> {
    let seconds = u32::try_from(seconds)
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
    TimeOfDay::try_from(seconds).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let start_time: i64 = row.try_get("start_time")?;
        let end_time: i64 = row.try_get("end_time")?;
        let color: String = row.try_get("color")?;
        let credits: i64 = row.try_get("credits")?;

        let credit = Credit::try_from(credits).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Rule {
            id: RuleId::from_i64(id),
            name,
            window: TimeWindow::new(decode_time(start_time)?, decode_time(end_time)?),
            color: RuleColor::parse(&color),
            credit,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO rules (name, start_time, end_time, color, credits)
    VALUES (?, ?, ?, ?, ?)
";

const INSERT_LIGHT: &str = "INSERT INTO rule_lights (rule_id, light_id) VALUES (?, ?)";
const INSERT_CALLBACK: &str = "INSERT INTO rule_callbacks (rule_id, callback_id) VALUES (?, ?)";
const INSERT_PROFILE: &str = "INSERT INTO rule_profiles (rule_id, profile_id) VALUES (?, ?)";

const SELECT_BY_ID: &str = "SELECT * FROM rules WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM rules ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM rules WHERE id = ?";

const SELECT_LIGHTS: &str = "SELECT light_id FROM rule_lights WHERE rule_id = ? ORDER BY light_id";

const SELECT_CANDIDATES: &str = r"
    SELECT rule_id FROM rule_profiles WHERE profile_id = ?
    INTERSECT
    SELECT rule_id FROM rule_callbacks WHERE callback_id = ?
    ORDER BY rule_id
";

const SELECT_FOR_PROFILE: &str = r"
    SELECT rules.* FROM rules
    JOIN rule_profiles ON rule_profiles.rule_id = rules.id
    WHERE rule_profiles.profile_id = ?
    ORDER BY rules.id
";

const SELECT_OUTSIDE_PROFILE: &str = r"
    SELECT * FROM rules
    WHERE id NOT IN (SELECT rule_id FROM rule_profiles WHERE profile_id = ?)
    ORDER BY id
";

const DELETE_PROFILE_RULES: &str = "DELETE FROM rule_profiles WHERE profile_id = ?";

/// `SQLite`-backed rule repository.
pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RuleRepository for SqliteRuleRepository {
    async fn create(
        &self,
        draft: RuleDraft,
        lights: &[LightId],
        callbacks: &[CallbackId],
    ) -> Result<Rule, LumenError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let result = sqlx::query(INSERT)
            .bind(&draft.name)
            .bind(i64::from(draft.window.start.as_seconds()))
            .bind(i64::from(draft.window.end.as_seconds()))
            .bind(draft.color.as_str())
            .bind(draft.credit.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        let id = RuleId::from_i64(result.last_insert_rowid());

        for light in lights {
            sqlx::query(INSERT_LIGHT)
                .bind(id.as_i64())
                .bind(light.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        for callback in callbacks {
            sqlx::query(INSERT_CALLBACK)
                .bind(id.as_i64())
                .bind(callback.to_string())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;

        Ok(Rule::from_draft(id, draft))
    }

    async fn get_by_id(&self, id: RuleId) -> Result<Option<Rule>, LumenError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Rule>, LumenError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn delete(&self, id: RuleId) -> Result<(), LumenError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn lights_for(&self, id: RuleId) -> Result<Vec<LightId>, LumenError> {
        let rows: Vec<(i64,)> = sqlx::query_as(SELECT_LIGHTS)
            .bind(id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|(id,)| LightId::from_i64(id)).collect())
    }

    async fn candidates(
        &self,
        profile: ProfileId,
        callback: CallbackId,
    ) -> Result<Vec<RuleId>, LumenError> {
        let rows: Vec<(i64,)> = sqlx::query_as(SELECT_CANDIDATES)
            .bind(profile.as_i64())
            .bind(callback.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|(id,)| RuleId::from_i64(id)).collect())
    }

    async fn rules_for_profile(&self, profile: ProfileId) -> Result<Vec<Rule>, LumenError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_FOR_PROFILE)
            .bind(profile.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn rules_outside_profile(&self, profile: ProfileId) -> Result<Vec<Rule>, LumenError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_OUTSIDE_PROFILE)
            .bind(profile.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn set_profile_rules(
        &self,
        profile: ProfileId,
        rules: &[RuleId],
    ) -> Result<(), LumenError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        sqlx::query(DELETE_PROFILE_RULES)
            .bind(profile.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?;

        for rule in rules {
            sqlx::query(INSERT_PROFILE)
                .bind(rule.as_i64())
                .bind(profile.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
        }

        tx.commit().await.map_err(StorageError::from)?;

        Ok(())
    }
}
