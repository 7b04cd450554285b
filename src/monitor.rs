//! Component registry and bounded event log
//!
//! Each runtime context (the background coordinator, every page's content
//! agent) owns its own `Monitor`; nothing is shared across contexts, so no
//! locking is involved. The monitor tracks named components (status,
//! last-active instant, error history, message count) and keeps a
//! newest-first event log capped at [`MAX_LOG_SIZE`] entries.

use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Maximum number of retained event log entries
pub const MAX_LOG_SIZE: usize = 100;

/// A component is considered inactive (and its errors stale) after this long
const INACTIVE_THRESHOLD: Duration = Duration::from_secs(5 * 60);

/// Lifecycle status a component reports about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentStatus {
    Active,
    Inactive,
    Error,
}

impl ComponentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentStatus::Active => "active",
            ComponentStatus::Inactive => "inactive",
            ComponentStatus::Error => "error",
        }
    }
}

/// Derived health verdict from [`Monitor::check_component_health`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentHealth {
    /// Name was never registered
    Unknown,
    /// No activity within the threshold window
    Inactive,
    /// At least one error within the threshold window
    Error,
    Healthy,
}

impl ComponentHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentHealth::Unknown => "unknown",
            ComponentHealth::Inactive => "inactive",
            ComponentHealth::Error => "error",
            ComponentHealth::Healthy => "healthy",
        }
    }
}

/// One recorded component error
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub at: Instant,
    pub message: String,
}

/// Per-component bookkeeping, created on first registration and kept for the
/// lifetime of the owning context
#[derive(Debug, Clone)]
pub struct ComponentRecord {
    pub status: ComponentStatus,
    pub last_active: Instant,
    pub errors: Vec<ErrorEntry>,
    pub message_count: u64,
}

/// One immutable event log entry
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub at: Instant,
    pub category: String,
    pub payload: Value,
}

/// Where a logged message originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderContext {
    /// The privileged background context
    Background,
    /// A page context, identified by an opaque page id
    Page(u64),
}

impl SenderContext {
    /// Registry name of the component that owns this context, if any.
    /// Page agents register themselves under this name.
    pub fn component_name(&self) -> Option<String> {
        match self {
            SenderContext::Background => None,
            SenderContext::Page(id) => Some(format!("content_agent_{}", id)),
        }
    }

    fn describe(&self) -> String {
        match self {
            SenderContext::Background => "background".to_string(),
            SenderContext::Page(id) => format!("page {}", id),
        }
    }
}

/// Registry of named components plus the bounded event log
#[derive(Debug, Default)]
pub struct Monitor {
    components: HashMap<String, ComponentRecord>,
    // Newest entries at the front; eviction truncates the back.
    log: VecDeque<EventLogEntry>,
}

impl Monitor {
    pub fn new() -> Self {
        Monitor {
            components: HashMap::new(),
            log: VecDeque::with_capacity(MAX_LOG_SIZE),
        }
    }

    /// Register (or re-register) a component as active.
    ///
    /// Re-registering resets status and the last-active instant but preserves
    /// the accumulated error history and message count.
    pub fn register_component(&mut self, name: &str) {
        self.register_component_with_status(name, ComponentStatus::Active);
    }

    /// Register with an explicit initial status
    pub fn register_component_with_status(&mut self, name: &str, status: ComponentStatus) {
        let now = Instant::now();
        self.components
            .entry(name.to_string())
            .and_modify(|record| {
                record.status = status;
                record.last_active = now;
            })
            .or_insert_with(|| ComponentRecord {
                status,
                last_active: now,
                errors: Vec::new(),
                message_count: 0,
            });
        self.log_event("component", format!("Component registered: {}", name));
    }

    /// Update a component's status and touch its last-active instant.
    /// Silently does nothing for unknown names.
    pub fn update_component_status(&mut self, name: &str, status: ComponentStatus) {
        let Some(record) = self.components.get_mut(name) else {
            return;
        };
        record.status = status;
        record.last_active = Instant::now();
        self.log_event(
            "status",
            format!("Component {} status updated to {}", name, status.as_str()),
        );
    }

    /// Append an event log entry, evicting the oldest entry once the log
    /// exceeds [`MAX_LOG_SIZE`]. Never fails.
    pub fn log_event(&mut self, category: &str, payload: impl Into<Value>) {
        self.log.push_front(EventLogEntry {
            at: Instant::now(),
            category: category.to_string(),
            payload: payload.into(),
        });
        self.log.truncate(MAX_LOG_SIZE);
    }

    /// Record an error against a component and mirror it into the event log
    /// under the "error" category. Silently does nothing for unknown names.
    pub fn log_error(&mut self, name: &str, error: impl std::fmt::Display) {
        let Some(record) = self.components.get_mut(name) else {
            return;
        };
        let message = error.to_string();
        record.errors.push(ErrorEntry {
            at: Instant::now(),
            message: message.clone(),
        });
        self.log_event("error", format!("Error in {}: {}", name, message));
    }

    /// Log an inbound cross-context message with sender attribution. If the
    /// sender is a page whose agent is registered, its message count is
    /// incremented.
    pub fn log_message(&mut self, kind: &str, message: Value, sender: SenderContext) {
        self.log_event(kind, json!({ "message": message, "sender": sender.describe() }));
        if let Some(name) = sender.component_name()
            && let Some(record) = self.components.get_mut(&name)
        {
            record.message_count += 1;
        }
    }

    /// Forwarding point for persisted-setting change notifications
    pub fn log_setting_change(&mut self, key: &str, old: Option<&str>, new: Option<&str>) {
        self.log_event("storage", json!({ "key": key, "old": old, "new": new }));
    }

    /// Forwarding point for page-navigation-state updates
    pub fn log_navigation(&mut self, page: u64, change: &str) {
        self.log_event("navigation", json!({ "page": page, "change": change }));
    }

    pub fn get_component_status(&self, name: &str) -> Option<&ComponentRecord> {
        self.components.get(name)
    }

    pub fn all_components(&self) -> impl Iterator<Item = (&str, &ComponentRecord)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Most recent `count` log entries, newest first
    pub fn recent_logs(&self, count: usize) -> impl Iterator<Item = &EventLogEntry> {
        self.log.iter().take(count)
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// Error history for a component, oldest first. Empty for unknown names.
    pub fn component_errors(&self, name: &str) -> &[ErrorEntry] {
        self.components
            .get(name)
            .map(|record| record.errors.as_slice())
            .unwrap_or(&[])
    }

    /// Reset the event log. The reset itself is recorded.
    pub fn clear_logs(&mut self) {
        self.log.clear();
        self.log_event("system", "Logs cleared");
    }

    /// Health verdict for a component as of now
    pub fn check_component_health(&self, name: &str) -> ComponentHealth {
        self.health_at(name, Instant::now())
    }

    /// Deterministic variant of [`Self::check_component_health`]: evaluates
    /// the health policy against a caller-supplied instant. Inactivity takes
    /// precedence over recent errors.
    pub fn health_at(&self, name: &str, now: Instant) -> ComponentHealth {
        let Some(record) = self.components.get(name) else {
            return ComponentHealth::Unknown;
        };
        if now.saturating_duration_since(record.last_active) >= INACTIVE_THRESHOLD {
            return ComponentHealth::Inactive;
        }
        let has_recent_error = record
            .errors
            .iter()
            .any(|entry| now.saturating_duration_since(entry.at) < INACTIVE_THRESHOLD);
        if has_recent_error {
            return ComponentHealth::Error;
        }
        ComponentHealth::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_read_back_is_active_and_fresh() {
        let mut monitor = Monitor::new();
        let before = Instant::now();
        monitor.register_component("background");
        let record = monitor.get_component_status("background").unwrap();
        assert_eq!(record.status, ComponentStatus::Active);
        assert!(record.last_active >= before);
        assert!(record.last_active.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn log_never_exceeds_capacity_and_evicts_oldest() {
        let mut monitor = Monitor::new();
        for i in 0..MAX_LOG_SIZE {
            monitor.log_event("test", format!("entry {}", i));
        }
        assert_eq!(monitor.log_len(), MAX_LOG_SIZE);

        monitor.log_event("test", "one past capacity");
        assert_eq!(monitor.log_len(), MAX_LOG_SIZE);

        // "entry 0" was evicted; "entry 1" is now the oldest survivor.
        let payloads: Vec<String> = monitor
            .recent_logs(MAX_LOG_SIZE)
            .map(|e| e.payload.as_str().unwrap().to_string())
            .collect();
        assert_eq!(payloads.first().unwrap(), "one past capacity");
        assert_eq!(payloads.last().unwrap(), "entry 1");
        assert!(!payloads.iter().any(|p| p == "entry 0"));
    }

    #[test]
    fn recent_logs_are_newest_first() {
        let mut monitor = Monitor::new();
        monitor.log_event("test", "first");
        monitor.log_event("test", "second");
        let categories: Vec<&str> = monitor
            .recent_logs(10)
            .map(|e| e.payload.as_str().unwrap())
            .collect();
        assert_eq!(categories, vec!["second", "first"]);
    }

    #[test]
    fn health_unknown_for_unregistered() {
        let monitor = Monitor::new();
        assert_eq!(
            monitor.check_component_health("nope"),
            ComponentHealth::Unknown
        );
    }

    #[test]
    fn health_healthy_right_after_registration() {
        let mut monitor = Monitor::new();
        monitor.register_component("agent");
        assert_eq!(
            monitor.check_component_health("agent"),
            ComponentHealth::Healthy
        );
    }

    #[test]
    fn health_inactive_after_threshold() {
        let mut monitor = Monitor::new();
        monitor.register_component("agent");
        let later = Instant::now() + Duration::from_secs(6 * 60);
        assert_eq!(monitor.health_at("agent", later), ComponentHealth::Inactive);
    }

    #[test]
    fn health_error_with_recent_error_but_still_active() {
        let mut monitor = Monitor::new();
        monitor.register_component("agent");
        monitor.log_error("agent", "boom");
        assert_eq!(
            monitor.check_component_health("agent"),
            ComponentHealth::Error
        );
    }

    #[test]
    fn inactivity_takes_precedence_over_errors() {
        let mut monitor = Monitor::new();
        monitor.register_component("agent");
        monitor.log_error("agent", "boom");
        let later = Instant::now() + Duration::from_secs(6 * 60);
        assert_eq!(monitor.health_at("agent", later), ComponentHealth::Inactive);
    }

    #[test]
    fn reregister_preserves_errors_and_message_count() {
        let mut monitor = Monitor::new();
        monitor.register_component("agent");
        monitor.log_error("agent", "boom");
        monitor.log_message("request", json!("hello"), SenderContext::Page(7));
        // Page 7's agent is not this one; register it and count a message.
        monitor.register_component("content_agent_7");
        monitor.log_message("request", json!("hello"), SenderContext::Page(7));

        monitor.register_component_with_status("agent", ComponentStatus::Inactive);
        let record = monitor.get_component_status("agent").unwrap();
        assert_eq!(record.status, ComponentStatus::Inactive);
        assert_eq!(record.errors.len(), 1);

        monitor.register_component("content_agent_7");
        let page = monitor.get_component_status("content_agent_7").unwrap();
        assert_eq!(page.message_count, 1);
    }

    #[test]
    fn update_status_on_unknown_is_noop() {
        let mut monitor = Monitor::new();
        monitor.update_component_status("ghost", ComponentStatus::Error);
        assert!(monitor.get_component_status("ghost").is_none());
        // Nothing was logged either.
        assert_eq!(monitor.log_len(), 0);
    }

    #[test]
    fn log_error_on_unknown_is_noop() {
        let mut monitor = Monitor::new();
        monitor.log_error("ghost", "boom");
        assert_eq!(monitor.log_len(), 0);
        assert!(monitor.component_errors("ghost").is_empty());
    }

    #[test]
    fn log_message_attributes_page_sender() {
        let mut monitor = Monitor::new();
        monitor.register_component("content_agent_3");
        monitor.log_message("request", json!({"text": "hi"}), SenderContext::Page(3));
        monitor.log_message("request", json!({"text": "hi"}), SenderContext::Background);
        let record = monitor.get_component_status("content_agent_3").unwrap();
        assert_eq!(record.message_count, 1);

        let entry = monitor.recent_logs(1).next().unwrap();
        assert_eq!(entry.category, "request");
        assert_eq!(entry.payload["sender"], "background");
    }

    #[test]
    fn clear_logs_resets_and_records_the_reset() {
        let mut monitor = Monitor::new();
        monitor.log_event("test", "before");
        monitor.clear_logs();
        assert_eq!(monitor.log_len(), 1);
        let entry = monitor.recent_logs(1).next().unwrap();
        assert_eq!(entry.category, "system");
    }

    #[test]
    fn setting_change_and_navigation_are_structured() {
        let mut monitor = Monitor::new();
        monitor.log_setting_change("translationEngine", Some("google"), Some("gemini"));
        monitor.log_navigation(12, "loading");
        let entries: Vec<&EventLogEntry> = monitor.recent_logs(2).collect();
        assert_eq!(entries[0].category, "navigation");
        assert_eq!(entries[0].payload["page"], 12);
        assert_eq!(entries[1].category, "storage");
        assert_eq!(entries[1].payload["new"], "gemini");
    }
}
