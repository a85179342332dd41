// ============================================================================
// Quora Infrastructure - Row Mapping and Shared Queries
// File: crates/quora-infrastructure/src/database/postgres/rows.rs
// ============================================================================
//! Row types and queries shared by the pooled repositories and the
//! transaction scope. Each query takes any Postgres executor, so the same SQL
//! runs against the pool or inside an open transaction.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor};
use tracing::error;
use uuid::Uuid;

use quora_core::domain::{Question, Session, User, UserRole};
use quora_core::error::DomainError;

#[derive(Debug, FromRow)]
pub(crate) struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub access_token: String,
    pub login_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub logout_at: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: row.user_id,
            access_token: row.access_token,
            login_at: row.login_at,
            expires_at: row.expires_at,
            logout_at: row.logout_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            user_name: row.user_name,
            email: row.email,
            role: UserRole::from_str(&row.role).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            content: row.content,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

/// Row lock taken by a read inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowLock {
    None,
    /// Blocks concurrent writers (e.g. a logout) until the transaction ends.
    Share,
    /// Blocks concurrent writers and lockers (e.g. a second delete).
    Update,
}

impl RowLock {
    fn clause(&self) -> &'static str {
        match self {
            RowLock::None => "",
            RowLock::Share => " FOR SHARE",
            RowLock::Update => " FOR UPDATE",
        }
    }
}

pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub(crate) async fn fetch_session<'e, E>(
    executor: E,
    access_token: &str,
    lock: RowLock,
) -> Result<Option<Session>, DomainError>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        SELECT id, user_id, access_token, login_at, expires_at, logout_at
        FROM user_auth
        WHERE access_token = $1{}
        "#,
        lock.clause()
    );

    let row: Option<SessionRow> = sqlx::query_as(&sql)
        .bind(access_token)
        .fetch_optional(executor)
        .await
        .map_err(db_error("finding session by token"))?;

    Ok(row.map(|r| r.into()))
}

pub(crate) async fn fetch_user<'e, E>(executor: E, id: &Uuid) -> Result<Option<User>, DomainError>
where
    E: PgExecutor<'e>,
{
    let row: Option<UserRow> = sqlx::query_as(
        r#"
        SELECT id, user_name, email, role, created_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(executor)
    .await
    .map_err(db_error("finding user by id"))?;

    Ok(row.map(|r| r.into()))
}

pub(crate) async fn insert_question<'e, E>(executor: E, question: &Question) -> Result<Question, DomainError>
where
    E: PgExecutor<'e>,
{
    let row: QuestionRow = sqlx::query_as(
        r#"
        INSERT INTO questions (id, content, owner_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, content, owner_id, created_at
        "#
    )
    .bind(question.id)
    .bind(&question.content)
    .bind(question.owner_id)
    .bind(question.created_at)
    .fetch_one(executor)
    .await
    .map_err(db_error("inserting question"))?;

    Ok(row.into())
}

pub(crate) async fn fetch_all_questions<'e, E>(executor: E) -> Result<Vec<Question>, DomainError>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<QuestionRow> = sqlx::query_as(
        r#"
        SELECT id, content, owner_id, created_at
        FROM questions
        ORDER BY created_at, id
        "#
    )
    .fetch_all(executor)
    .await
    .map_err(db_error("listing questions"))?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub(crate) async fn fetch_question<'e, E>(
    executor: E,
    id: &Uuid,
    lock: RowLock,
) -> Result<Option<Question>, DomainError>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        r#"
        SELECT id, content, owner_id, created_at
        FROM questions
        WHERE id = $1{}
        "#,
        lock.clause()
    );

    let row: Option<QuestionRow> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(db_error("finding question by id"))?;

    Ok(row.map(|r| r.into()))
}

pub(crate) async fn remove_question<'e, E>(executor: E, id: &Uuid) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .map_err(db_error("deleting question"))?;

    Ok(())
}
