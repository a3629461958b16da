//! Terminal views of requests: list cards, detail, and dashboard stats.
//!
//! Each view is built as plain data first and rendered separately, so the
//! content can be tested without terminal colors.

use chrono::{DateTime, Utc};
use colored::Colorize;
use rust_decimal::Decimal;

use crate::types::{Budget, RequestStatus, RequestView, Role, UserSummary};

pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;
pub const RECENT_REQUESTS: usize = 5;

/// Shortens `text` to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}

/// "From" the buyer when an artisan is looking, "To" the artisan otherwise.
fn counterpart(view: &RequestView, viewer: Role) -> (&'static str, Option<&UserSummary>) {
    match viewer {
        Role::Artisan => ("From", view.buyer.as_ref()),
        Role::Buyer | Role::Admin => ("To", view.artisan.as_ref()),
    }
}

fn user_name(user: Option<&UserSummary>) -> String {
    user.map(|u| u.name.clone())
        .unwrap_or_else(|| "(unknown user)".to_string())
}

pub fn format_budget(budget: &Budget) -> Option<String> {
    let amount = |d: Decimal| format!("${}", d.normalize());
    match (budget.min, budget.max) {
        (Some(min), Some(max)) => Some(format!("{} - {}", amount(min), amount(max))),
        (Some(min), None) => Some(format!("from {}", amount(min))),
        (None, Some(max)) => Some(format!("up to {}", amount(max))),
        (None, None) => None,
    }
}

fn date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn status_label(status: RequestStatus) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        RequestStatus::Pending | RequestStatus::Reviewing => label.yellow(),
        RequestStatus::Accepted | RequestStatus::Completed => label.green(),
        RequestStatus::Rejected | RequestStatus::Cancelled => label.red(),
    }
}

// =============================================================================
// List
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RequestCard {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub status: RequestStatus,
    pub counterpart_label: &'static str,
    pub counterpart: String,
    pub budget: Option<String>,
    pub deadline: Option<String>,
    pub created: String,
    pub preview: String,
}

impl RequestCard {
    pub fn new(view: &RequestView, viewer: Role) -> Self {
        let (counterpart_label, user) = counterpart(view, viewer);
        Self {
            id: view.id.to_string(),
            title: view.title.clone(),
            kind: view.kind.to_string(),
            status: view.status,
            counterpart_label,
            counterpart: user_name(user),
            budget: format_budget(&view.budget),
            deadline: view.deadline.map(date),
            created: date(view.created_at),
            preview: truncate(&view.description, DESCRIPTION_PREVIEW_CHARS),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{} [{}] {}\n  {}\n  {}: {}",
            self.title.bold(),
            self.kind.cyan(),
            status_label(self.status),
            self.preview,
            self.counterpart_label,
            self.counterpart
        );
        if let Some(budget) = &self.budget {
            out.push_str(&format!("\n  Budget: {}", budget));
        }
        if let Some(deadline) = &self.deadline {
            out.push_str(&format!("\n  Deadline: {}", deadline));
        }
        out.push_str(&format!("\n  {}  {}", self.created.dimmed(), self.id.dimmed()));
        out
    }
}

pub fn render_list(views: &[RequestView], viewer: Role) -> String {
    if views.is_empty() {
        return match viewer {
            Role::Artisan => "No requests yet. Commission requests from buyers will show up here.",
            _ => "No requests yet. Find an artisan and send them a request.",
        }
        .to_string();
    }
    views
        .iter()
        .map(|v| RequestCard::new(v, viewer).render())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// =============================================================================
// Detail
// =============================================================================

pub fn render_detail(view: &RequestView, viewer: Role) -> String {
    let mut lines = vec![
        view.title.bold().to_string(),
        format!("Type: {}", view.kind),
        format!("Status: {}", status_label(view.status)),
    ];

    let person = |label: &str, user: Option<&UserSummary>| match user {
        Some(u) => format!("{}: {} ({})", label, u.name, u.email),
        None => format!("{}: (unknown user)", label),
    };
    match viewer {
        Role::Artisan => lines.push(person("From", view.buyer.as_ref())),
        Role::Buyer => lines.push(person("To", view.artisan.as_ref())),
        Role::Admin => {
            lines.push(person("From", view.buyer.as_ref()));
            lines.push(person("To", view.artisan.as_ref()));
        }
    }
    lines.push(format!("Created: {}", date_time(view.created_at)));

    lines.push(String::new());
    lines.push(view.description.clone());

    if let Some(budget) = format_budget(&view.budget) {
        lines.push(format!("Budget: {} {}", budget, view.budget.currency));
    }
    if let Some(deadline) = view.deadline {
        lines.push(format!("Deadline: {}", date(deadline)));
    }
    if let Some(product) = &view.product {
        lines.push(format!(
            "Product: {} ({}, ${} {})",
            product.name,
            product.category,
            product.price.amount.normalize(),
            product.price.currency
        ));
    }
    if let Some(quotation) = &view.quotation {
        let mut line = format!(
            "Quotation: ${} {}",
            quotation.amount.normalize(),
            quotation.currency.as_deref().unwrap_or("USD")
        );
        if let Some(valid_until) = quotation.valid_until {
            line.push_str(&format!(", valid until {}", date(valid_until)));
        }
        lines.push(line);
        if let Some(details) = &quotation.details {
            lines.push(format!("  {}", details));
        }
    }
    for attachment in &view.attachments {
        lines.push(format!("Attachment: {} <{}>", attachment.filename, attachment.url));
    }

    if !view.messages.is_empty() {
        lines.push(String::new());
        lines.push("Messages".bold().to_string());
        for message in &view.messages {
            let sender = if view.buyer.as_ref().map(|u| u.id) == Some(message.sender) {
                user_name(view.buyer.as_ref())
            } else if view.artisan.as_ref().map(|u| u.id) == Some(message.sender) {
                user_name(view.artisan.as_ref())
            } else {
                message.sender.to_string()
            };
            lines.push(format!(
                "  [{}] {}: {}",
                date_time(message.timestamp).dimmed(),
                sender,
                message.message
            ));
        }
    }

    lines.join("\n")
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub completed: usize,
    pub recent: Vec<RequestView>,
}

impl DashboardStats {
    /// `views` are expected newest first, as the API returns them.
    pub fn from_requests(views: &[RequestView]) -> Self {
        let count = |status: RequestStatus| views.iter().filter(|v| v.status == status).count();
        Self {
            total: views.len(),
            pending: count(RequestStatus::Pending),
            accepted: count(RequestStatus::Accepted),
            completed: count(RequestStatus::Completed),
            recent: views.iter().take(RECENT_REQUESTS).cloned().collect(),
        }
    }

    pub fn render(&self, viewer: Role) -> String {
        let mut lines = vec![
            format!("Total requests: {}", self.total.to_string().bold()),
            format!("Pending:   {}", self.pending),
            format!("Accepted:  {}", self.accepted),
            format!("Completed: {}", self.completed),
        ];
        if !self.recent.is_empty() {
            lines.push(String::new());
            lines.push("Recent".bold().to_string());
            for view in &self.recent {
                let card = RequestCard::new(view, viewer);
                lines.push(format!(
                    "  {}  {}  {}  {}",
                    card.created, card.title, card.counterpart, card.status
                ));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RequestKind;
    use uuid::Uuid;

    fn user(name: &str, role: Role) -> UserSummary {
        UserSummary {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            location: None,
            skills: vec![],
            role,
        }
    }

    fn view(status: RequestStatus, description: &str) -> RequestView {
        let now = Utc::now();
        RequestView {
            id: Uuid::new_v4(),
            buyer: Some(user("Bea", Role::Buyer)),
            artisan: Some(user("Ari", Role::Artisan)),
            product: None,
            kind: RequestKind::Commission,
            title: "Serving platter".to_string(),
            description: description.to_string(),
            budget: Budget {
                min: Some(Decimal::new(80, 0)),
                max: Some(Decimal::new(150, 0)),
                currency: "USD".to_string(),
            },
            deadline: None,
            status,
            attachments: vec![],
            messages: vec![],
            quotation: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_truncate_only_marks_long_text() {
        assert_eq!(truncate("short", 150), "short");
        let long = "é".repeat(200);
        let cut = truncate(&long, 150);
        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_card_counterpart_follows_viewer() {
        let v = view(RequestStatus::Pending, "A platter");
        let as_artisan = RequestCard::new(&v, Role::Artisan);
        assert_eq!(as_artisan.counterpart_label, "From");
        assert_eq!(as_artisan.counterpart, "Bea");

        let as_buyer = RequestCard::new(&v, Role::Buyer);
        assert_eq!(as_buyer.counterpart_label, "To");
        assert_eq!(as_buyer.counterpart, "Ari");
    }

    #[test]
    fn test_card_preview_is_truncated() {
        let v = view(RequestStatus::Pending, &"x".repeat(400));
        let card = RequestCard::new(&v, Role::Buyer);
        assert_eq!(card.preview.len(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert_eq!(card.budget.as_deref(), Some("$80 - $150"));
    }

    #[test]
    fn test_budget_formats() {
        let only_max = Budget {
            min: None,
            max: Some(Decimal::new(5000, 2)),
            currency: "USD".to_string(),
        };
        assert_eq!(format_budget(&only_max).as_deref(), Some("up to $50"));
        assert_eq!(format_budget(&Budget::default()), None);
    }

    #[test]
    fn test_detail_shows_full_description_and_thread() {
        colored::control::set_override(false);
        let description = "y".repeat(300);
        let mut v = view(RequestStatus::Reviewing, &description);
        let buyer_id = v.buyer.as_ref().unwrap().id;
        v.messages.push(crate::types::Message {
            sender: buyer_id,
            message: "Any glaze options?".to_string(),
            timestamp: Utc::now(),
        });

        let out = render_detail(&v, Role::Artisan);
        assert!(out.contains(&description));
        assert!(out.contains("From: Bea (bea@example.com)"));
        assert!(out.contains("Bea: Any glaze options?"));
        assert!(out.contains("Budget: $80 - $150 USD"));
    }

    #[test]
    fn test_dashboard_counts_and_recent() {
        let views: Vec<_> = [
            RequestStatus::Pending,
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Completed,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
            RequestStatus::Reviewing,
        ]
        .into_iter()
        .map(|s| view(s, "d"))
        .collect();

        let stats = DashboardStats::from_requests(&views);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.recent.len(), RECENT_REQUESTS);
        assert_eq!(stats.recent[0].id, views[0].id);
    }

    #[test]
    fn test_empty_list_message_depends_on_role() {
        assert!(render_list(&[], Role::Artisan).contains("from buyers"));
        assert!(render_list(&[], Role::Buyer).contains("Find an artisan"));
    }
}
