//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{LinkCounts, NewShortLink, ResolvedLink, ShortLink};
use crate::domain::error::StoreError;
use crate::domain::repositories::ShortLinkRepository;

/// Name of the primary key constraint on `short_links.code`.
const CODE_CONSTRAINT: &str = "short_links_pkey";

/// PostgreSQL repository for short links.
///
/// Every statement runs under `timeout`; an overrun is reported as
/// [`StoreError::Timeout`] and, being a single statement, commits nothing.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

#[derive(FromRow)]
struct ShortLinkRow {
    code: String,
    target: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    expired: bool,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.code,
            row.target,
            row.created_at,
            row.expires_at,
            row.expired,
        )
    }
}

#[derive(FromRow)]
struct ResolvedRow {
    target: String,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
}

#[derive(FromRow)]
struct CountsRow {
    total: i64,
    expired: i64,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool and per-statement deadline.
    pub fn new(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(map_store_error),
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

/// Classifies driver errors, surfacing a duplicate `code` as [`StoreError::UniqueViolation`].
fn map_store_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_code(&e) {
        return StoreError::UniqueViolation;
    }
    if matches!(e, sqlx::Error::PoolTimedOut) {
        return StoreError::Timeout;
    }

    StoreError::Database(e)
}

fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_CONSTRAINT) | None)
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        self.with_deadline(
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM short_links WHERE code = $1)",
            )
            .bind(code)
            .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let days = i32::try_from(new_link.days).unwrap_or(i32::MAX);

        let row = self
            .with_deadline(
                sqlx::query_as::<_, ShortLinkRow>(
                    r#"
                    INSERT INTO short_links (code, target, expires_at)
                    VALUES ($1, $2, NOW() + make_interval(days => $3))
                    RETURNING code, target, created_at, expires_at, expired
                    "#,
                )
                .bind(&new_link.code)
                .bind(&new_link.target)
                .bind(days)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn resolve(&self, code: &str) -> Result<Option<ResolvedLink>, StoreError> {
        let row = self
            .with_deadline(
                sqlx::query_as::<_, ResolvedRow>(
                    r#"
                    SELECT target, expires_at, NOW() AS now
                    FROM short_links
                    WHERE code = $1 AND expired = FALSE
                    "#,
                )
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(|r| ResolvedLink {
            target: r.target,
            expires_at: r.expires_at,
            now: r.now,
        }))
    }

    async fn mark_expired(&self, code: &str) -> Result<(), StoreError> {
        self.with_deadline(
            sqlx::query("UPDATE short_links SET expired = TRUE WHERE code = $1 AND NOW() > expires_at")
                .bind(code)
                .execute(self.pool.as_ref()),
        )
        .await?;

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        let result = self
            .with_deadline(
                sqlx::query("DELETE FROM short_links WHERE expired = TRUE OR NOW() > expires_at")
                    .execute(self.pool.as_ref()),
            )
            .await?;

        Ok(result.rows_affected())
    }

    async fn counts(&self) -> Result<LinkCounts, StoreError> {
        let row = self
            .with_deadline(
                sqlx::query_as::<_, CountsRow>(
                    r#"
                    SELECT
                        COUNT(*) AS total,
                        COUNT(*) FILTER (WHERE expired = TRUE OR NOW() > expires_at) AS expired
                    FROM short_links
                    "#,
                )
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(LinkCounts {
            total: row.total,
            active: row.total - row.expired,
            expired: row.expired,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with_deadline(sqlx::query("SELECT 1").execute(self.pool.as_ref()))
            .await?;
        Ok(())
    }
}
