// ABOUTME: sqlx-backed PostgreSQL implementation of the session ports
// ABOUTME: Pool acquire per invocation; rendered SQL runs as-is with no bind step

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};

use crate::errors::SourceError;
use crate::results::OrganisationEntry;
use crate::session::{ResultRow, Session, SessionProvider};

/// Session provider backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PgSessionProvider {
    pool: PgPool,
}

impl PgSessionProvider {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot reach the database.
    pub async fn connect(database_url: &str) -> Result<Self, SourceError> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SessionProvider for PgSessionProvider {
    type Session = PgSession;

    async fn acquire(&self) -> Result<Self::Session, SourceError> {
        let conn = self.pool.acquire().await?;
        Ok(PgSession { conn })
    }
}

/// One pooled PostgreSQL connection for the duration of an invocation.
pub struct PgSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl Session for PgSession {
    type Row = PgRow;

    async fn query_rows(&mut self, sql: &str) -> Result<Vec<PgRow>, SourceError> {
        let rows = sqlx::query(sql).fetch_all(&mut *self.conn).await?;
        Ok(rows)
    }

    async fn execute(&mut self, sql: &str) -> Result<(), SourceError> {
        sqlx::query(sql).execute(&mut *self.conn).await?;
        Ok(())
    }

    async fn release(self) -> Result<(), SourceError> {
        // Dropping the guard hands the connection back to the pool.
        drop(self.conn);
        Ok(())
    }
}

impl ResultRow for PgRow {
    fn i64_at(&self, idx: usize) -> Result<i64, SourceError> {
        Ok(self.try_get::<i64, _>(idx)?)
    }

    fn i32_at(&self, idx: usize) -> Result<i32, SourceError> {
        Ok(self.try_get::<i32, _>(idx)?)
    }

    fn f64_at(&self, idx: usize) -> Result<f64, SourceError> {
        Ok(self.try_get::<f64, _>(idx)?)
    }

    fn bool_at(&self, idx: usize) -> Result<bool, SourceError> {
        Ok(self.try_get::<bool, _>(idx)?)
    }

    fn string_at(&self, idx: usize) -> Result<String, SourceError> {
        Ok(self.try_get::<String, _>(idx)?)
    }

    fn timestamp_millis_at(&self, idx: usize) -> Result<i64, SourceError> {
        // birthday columns are DATE; everything else is TIMESTAMPTZ
        if let Ok(at) = self.try_get::<DateTime<Utc>, _>(idx) {
            return Ok(at.timestamp_millis());
        }
        let date: NaiveDate = self.try_get(idx)?;
        Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
    }

    fn string_list_at(&self, idx: usize) -> Result<Vec<String>, SourceError> {
        Ok(self.try_get::<Vec<String>, _>(idx)?)
    }

    fn id_list_at(&self, idx: usize) -> Result<Vec<i64>, SourceError> {
        Ok(self.try_get::<Vec<i64>, _>(idx)?)
    }

    fn organisations_at(&self, idx: usize) -> Result<Vec<OrganisationEntry>, SourceError> {
        let raw: Vec<String> = self.try_get(idx)?;
        raw.iter().map(|s| parse_organisation(s)).collect()
    }
}

/// Parse one `name|year|place` organisation element. Names may contain
/// commas, so the queries join the triple with pipes.
fn parse_organisation(raw: &str) -> Result<OrganisationEntry, SourceError> {
    let mut parts = raw.splitn(3, '|');
    let (name, year, place) = match (parts.next(), parts.next(), parts.next()) {
        (Some(n), Some(y), Some(p)) => (n, y, p),
        _ => return Err(format!("malformed organisation element `{raw}`").into()),
    };
    Ok(OrganisationEntry {
        name: name.to_string(),
        year: year
            .parse()
            .map_err(|_| format!("bad organisation year in `{raw}`"))?,
        place: place.to_string(),
    })
}
