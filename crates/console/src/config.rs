//! Console settings.

use std::time::Duration;

/// Settings shared by the console pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Name sent as the actor of approve/reject/delete calls.
    pub actor: String,
    /// Rows shown before the first "load more".
    pub initial_page_size: usize,
    /// Rows added by each "load more".
    pub page_step: usize,
    /// How long a flash message stays visible.
    pub flash_ttl: Duration,
    /// Duration of the KPI count-up animation.
    pub count_up: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            actor: "admin".to_string(),
            initial_page_size: 30,
            page_step: 25,
            flash_ttl: Duration::from_secs(5),
            count_up: Duration::from_millis(800),
        }
    }
}

impl ConsoleConfig {
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        let actor = actor.into();
        if !actor.trim().is_empty() {
            self.actor = actor.trim().to_string();
        }
        self
    }
}
