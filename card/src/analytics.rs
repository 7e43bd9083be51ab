//! Click and page-view reporting.
//!
//! Sinks are best effort: [`AnalyticsSink::emit`] has no error channel, so a
//! failing collector can never change what the visitor sees.

use std::{fmt, str::FromStr, sync::Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    PageView,
    ClickEmail,
    ClickPhone,
    ClickWhatsapp,
    ClickSocial,
    ClickSaveContact,
    ClickSchedule,
}

impl ActionId {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionId::PageView => "page_view",
            ActionId::ClickEmail => "click_email",
            ActionId::ClickPhone => "click_phone",
            ActionId::ClickWhatsapp => "click_whatsapp",
            ActionId::ClickSocial => "click_social",
            ActionId::ClickSaveContact => "click_save_contact",
            ActionId::ClickSchedule => "click_schedule",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown analytics action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for ActionId {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "page_view" => Ok(ActionId::PageView),
            "click_email" => Ok(ActionId::ClickEmail),
            "click_phone" => Ok(ActionId::ClickPhone),
            "click_whatsapp" => Ok(ActionId::ClickWhatsapp),
            "click_social" => Ok(ActionId::ClickSocial),
            "click_save_contact" => Ok(ActionId::ClickSaveContact),
            "click_schedule" => Ok(ActionId::ClickSchedule),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub action: ActionId,
    pub subject: String,
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(action: ActionId, subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            subject: subject.into(),
            occurred_at: Utc::now(),
        }
    }
}

pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: AnalyticsEvent);
}

/// Report `action` for `subject` (the employee's display name).
pub fn track(sink: &dyn AnalyticsSink, action: ActionId, subject: &str) {
    sink.emit(AnalyticsEvent::new(action, subject));
}

/// Keeps events in memory so callers can inspect what was reported.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AnalyticsSink for MemorySink {
    fn emit(&self, event: AnalyticsEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
