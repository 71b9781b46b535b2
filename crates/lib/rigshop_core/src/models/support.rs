//! Support ticket models.
//!
//! Each enum matches the text stored in `support_tickets`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "low" => TicketPriority::Low,
            "high" => TicketPriority::High,
            "urgent" => TicketPriority::Urgent,
            _ => TicketPriority::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    #[default]
    General,
    Order,
    Technical,
    Billing,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::General => "general",
            TicketCategory::Order => "order",
            TicketCategory::Technical => "technical",
            TicketCategory::Billing => "billing",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "order" => TicketCategory::Order,
            "technical" => TicketCategory::Technical,
            "billing" => TicketCategory::Billing,
            _ => TicketCategory::General,
        }
    }
}

/// Ticket lifecycle: `open` → `in_progress` → `resolved` / `closed`.
/// Admins may set any status directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "in_progress" => TicketStatus::InProgress,
            "resolved" => TicketStatus::Resolved,
            "closed" => TicketStatus::Closed,
            _ => TicketStatus::Open,
        }
    }

    /// Status after an admin responds: an open ticket is picked up,
    /// anything else keeps its status.
    pub fn after_response(self) -> Self {
        match self {
            TicketStatus::Open => TicketStatus::InProgress,
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub priority: TicketPriority,
    pub category: TicketCategory,
    pub status: TicketStatus,
    pub admin_response: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_moves_open_ticket_in_progress() {
        assert_eq!(TicketStatus::Open.after_response(), TicketStatus::InProgress);
        assert_eq!(TicketStatus::Resolved.after_response(), TicketStatus::Resolved);
        assert_eq!(TicketStatus::Closed.after_response(), TicketStatus::Closed);
    }

    #[test]
    fn stored_text_round_trips() {
        for s in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ] {
            assert_eq!(TicketStatus::from_db(s.as_str()), s);
            assert_eq!(serde_json::to_value(s).unwrap(), s.as_str());
        }
        assert_eq!(TicketPriority::from_db("bogus"), TicketPriority::Medium);
        assert_eq!(TicketCategory::from_db("billing"), TicketCategory::Billing);
    }
}
