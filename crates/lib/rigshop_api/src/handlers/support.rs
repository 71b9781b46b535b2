//! Support ticket handlers.

use axum::Json;
use axum::extract::{Path, State};
use rigshop_core::models::support::SupportTicket;
use rigshop_core::support;
use tracing::info;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    CreateTicketRequest, CreateTicketResponse, RespondTicketRequest, TicketStatusRequest,
};

/// `POST /api/support/tickets`
pub async fn create_ticket_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Json(body): Json<CreateTicketRequest>,
) -> AppResult<Json<CreateTicketResponse>> {
    let ticket = support::create_ticket(
        &state.pool,
        &user.0.sub,
        &body.subject,
        &body.message,
        body.priority,
        body.category,
    )
    .await?;
    info!(ticket_id = %ticket.id, priority = ticket.priority.as_str(), "opened support ticket");
    Ok(Json(CreateTicketResponse {
        message: "Support ticket created successfully".into(),
        ticket_id: ticket.id,
    }))
}

/// `GET /api/support/tickets` — the caller's tickets.
pub async fn list_my_tickets_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<SupportTicket>>> {
    Ok(Json(
        support::list_user_tickets(&state.pool, &user.0.sub).await?,
    ))
}

/// `GET /api/support/tickets/{id}`
pub async fn get_my_ticket_handler(
    State(state): State<AppState>,
    axum::Extension(user): axum::Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AppResult<Json<SupportTicket>> {
    Ok(Json(
        support::get_user_ticket(&state.pool, &id, &user.0.sub).await?,
    ))
}

/// `GET /api/admin/support/tickets`
pub async fn list_all_tickets_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SupportTicket>>> {
    Ok(Json(support::list_all_tickets(&state.pool).await?))
}

/// `PUT /api/admin/support/tickets/{id}/respond`
pub async fn respond_ticket_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RespondTicketRequest>,
) -> AppResult<Json<SupportTicket>> {
    let ticket = support::respond_to_ticket(&state.pool, &id, &body.admin_response).await?;
    info!(ticket_id = %ticket.id, status = ticket.status.as_str(), "responded to ticket");
    Ok(Json(ticket))
}

/// `PUT /api/admin/support/tickets/{id}/status`
pub async fn ticket_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TicketStatusRequest>,
) -> AppResult<Json<SupportTicket>> {
    Ok(Json(
        support::set_ticket_status(&state.pool, &id, body.status).await?,
    ))
}
