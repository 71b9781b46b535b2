//! Customer support tickets.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::support::{SupportTicket, TicketCategory, TicketPriority, TicketStatus};
use crate::uuid::new_id;

/// Support ticket errors.
#[derive(Debug, Error)]
pub enum SupportError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

const TICKET_COLUMNS: &str = "id, user_id, subject, message, priority, category, status, \
     admin_response, created_at, updated_at";

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TicketRow {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub priority: String,
    pub category: String,
    pub status: String,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TicketRow> for SupportTicket {
    fn from(row: TicketRow) -> Self {
        SupportTicket {
            id: row.id,
            user_id: row.user_id,
            subject: row.subject,
            message: row.message,
            priority: TicketPriority::from_db(&row.priority),
            category: TicketCategory::from_db(&row.category),
            status: TicketStatus::from_db(&row.status),
            admin_response: row.admin_response,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Open a new ticket for `user_id`.
pub async fn create_ticket(
    pool: &PgPool,
    user_id: &str,
    subject: &str,
    message: &str,
    priority: TicketPriority,
    category: TicketCategory,
) -> Result<SupportTicket, SupportError> {
    if subject.trim().is_empty() || message.trim().is_empty() {
        return Err(SupportError::Validation(
            "Subject and message are required".into(),
        ));
    }

    let row = sqlx::query_as::<_, TicketRow>(&format!(
        "INSERT INTO support_tickets (id, user_id, subject, message, priority, category, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {TICKET_COLUMNS}"
    ))
    .bind(new_id())
    .bind(user_id)
    .bind(subject.trim())
    .bind(message)
    .bind(priority.as_str())
    .bind(category.as_str())
    .bind(TicketStatus::Open.as_str())
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

/// A user's tickets, newest first.
pub async fn list_user_tickets(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<SupportTicket>, SupportError> {
    let rows = sqlx::query_as::<_, TicketRow>(&format!(
        "SELECT {TICKET_COLUMNS} FROM support_tickets WHERE user_id = $1 \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(SupportTicket::from).collect())
}

/// A single ticket, visible only to its owner.
pub async fn get_user_ticket(
    pool: &PgPool,
    id: &str,
    user_id: &str,
) -> Result<SupportTicket, SupportError> {
    let row = sqlx::query_as::<_, TicketRow>(&format!(
        "SELECT {TICKET_COLUMNS} FROM support_tickets WHERE id = $1 AND user_id = $2"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    row.map(SupportTicket::from)
        .ok_or_else(|| SupportError::NotFound("Ticket not found".into()))
}

/// Every ticket, newest first.
pub async fn list_all_tickets(pool: &PgPool) -> Result<Vec<SupportTicket>, SupportError> {
    let rows = sqlx::query_as::<_, TicketRow>(&format!(
        "SELECT {TICKET_COLUMNS} FROM support_tickets ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(SupportTicket::from).collect())
}

/// Record an admin response. An open ticket moves to in progress.
pub async fn respond_to_ticket(
    pool: &PgPool,
    id: &str,
    admin_response: &str,
) -> Result<SupportTicket, SupportError> {
    if admin_response.trim().is_empty() {
        return Err(SupportError::Validation("Response is required".into()));
    }

    let mut tx = pool.begin().await?;
    let status = sqlx::query_scalar::<_, String>(
        "SELECT status FROM support_tickets WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| SupportError::NotFound("Ticket not found".into()))?;

    let next = TicketStatus::from_db(&status).after_response();
    let row = sqlx::query_as::<_, TicketRow>(&format!(
        "UPDATE support_tickets SET admin_response = $2, status = $3, updated_at = now() \
         WHERE id = $1 RETURNING {TICKET_COLUMNS}"
    ))
    .bind(id)
    .bind(admin_response)
    .bind(next.as_str())
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(row.into())
}

/// Set a ticket's status directly.
pub async fn set_ticket_status(
    pool: &PgPool,
    id: &str,
    status: TicketStatus,
) -> Result<SupportTicket, SupportError> {
    let row = sqlx::query_as::<_, TicketRow>(&format!(
        "UPDATE support_tickets SET status = $2, updated_at = now() \
         WHERE id = $1 RETURNING {TICKET_COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;
    row.map(SupportTicket::from)
        .ok_or_else(|| SupportError::NotFound("Ticket not found".into()))
}
