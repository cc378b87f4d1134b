//! Role-aware dashboard: KPIs, charts, paginated table, actions and gate scans.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, TimeZone};

use gatepass_client::{GatePassApi, ScanImage, ScanKind};
use gatepass_core::{
    DomainError, GatePass, GatePassCreate, GatePassStatus, PassNumber, StatusHistoryItem, replace_by_id,
};

use crate::config::ConsoleConfig;
use crate::error::PageError;
use crate::flash::{FlashKind, FlashSlot};
use crate::load::LoadState;
use crate::modal::{ConfirmAction, ConfirmModal};
use crate::pager::Pager;
use crate::stats::{DistributionSlice, Stats};
use crate::trend::{TrendPoint, daily_trend};

pub const NO_HISTORY: &str = "No history available";

/// Which desk the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Admin,
    Hr,
    Gate,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Hr, Role::Gate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Gate => "gate",
        }
    }

    /// The gate desk always sees every pass.
    fn list_filter(&self, status: Option<GatePassStatus>) -> Option<GatePassStatus> {
        match self {
            Role::Admin | Role::Hr => status,
            Role::Gate => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "hr" => Ok(Role::Hr),
            "gate" => Ok(Role::Gate),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Dashboard state.
pub struct Dashboard<A> {
    api: A,
    config: ConsoleConfig,
    role: Role,
    status: Option<GatePassStatus>,
    passes: LoadState<Vec<GatePass>>,
    pager: Pager,
    confirm: ConfirmModal<(ConfirmAction, GatePass)>,
    selected: Option<GatePass>,
    history: Option<GatePass>,
    error: Option<String>,
    flash: FlashSlot,
}

impl<A: GatePassApi> Dashboard<A> {
    pub fn new(api: A, config: ConsoleConfig) -> Self {
        let pager = Pager::new(config.initial_page_size, config.page_step);
        let flash = FlashSlot::new(config.flash_ttl);
        Self {
            api,
            config,
            role: Role::default(),
            status: None,
            passes: LoadState::Idle,
            pager,
            confirm: ConfirmModal::default(),
            selected: None,
            history: None,
            error: None,
            flash,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> Option<GatePassStatus> {
        self.status
    }

    pub fn state(&self) -> &LoadState<Vec<GatePass>> {
        &self.passes
    }

    pub fn flash(&self) -> &FlashSlot {
        &self.flash
    }

    /// Error banner text, until dismissed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Pass picked by the last gate lookup or scan.
    pub fn selected(&self) -> Option<&GatePass> {
        self.selected.as_ref()
    }

    pub fn modal(&self) -> Option<&(ConfirmAction, GatePass)> {
        self.confirm.payload()
    }

    pub async fn set_role(&mut self, role: Role) -> Result<usize, PageError> {
        self.role = role;
        self.selected = None;
        self.load().await
    }

    pub async fn set_status(&mut self, status: Option<GatePassStatus>) -> Result<usize, PageError> {
        self.status = status;
        self.load().await
    }

    /// Switch role and status together with a single reload.
    pub async fn select(&mut self, role: Role, status: Option<GatePassStatus>) -> Result<usize, PageError> {
        self.role = role;
        self.status = status;
        self.selected = None;
        self.load().await
    }

    /// (Re)load the list for the current role and status; resets paging.
    pub async fn load(&mut self) -> Result<usize, PageError> {
        let filter = self.role.list_filter(self.status);
        self.pager.reset();
        self.passes = LoadState::Loading;
        self.error = None;

        match self.api.list(filter).await {
            Ok(passes) => {
                tracing::info!(role = %self.role, count = passes.len(), "dashboard loaded");
                let count = passes.len();
                self.passes = LoadState::Loaded(passes);
                Ok(count)
            }
            Err(e) => {
                let err = PageError::from(e);
                let message = err.user_message();
                tracing::error!(role = %self.role, error = %err, "dashboard load failed");
                self.passes = LoadState::Failed(message.clone());
                self.error = Some(message);
                Err(err)
            }
        }
    }

    /// Every loaded pass, unfiltered.
    pub fn passes(&self) -> &[GatePass] {
        self.passes.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    /// Loaded passes matching the status selector.
    pub fn filtered(&self) -> Vec<&GatePass> {
        self.passes()
            .iter()
            .filter(|p| self.status.is_none_or(|s| p.status == s))
            .collect()
    }

    /// The current page of [`Dashboard::filtered`].
    pub fn visible(&self) -> Vec<&GatePass> {
        let filtered = self.filtered();
        let shown = self.pager.visible(filtered.len());
        filtered.into_iter().take(shown).collect()
    }

    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }

    pub fn remaining(&self) -> usize {
        self.pager.remaining(self.filtered().len())
    }

    pub fn next_batch(&self) -> usize {
        self.pager.next_batch(self.filtered().len())
    }

    pub fn load_more(&mut self) -> usize {
        let total = self.filtered().len();
        self.pager.load_more(total)
    }

    /// Visible passes that have been scanned out (gate desk table).
    pub fn recent_scans(&self) -> Vec<&GatePass> {
        self.visible().into_iter().filter(|p| p.exit_time.is_some()).collect()
    }

    /// KPI counts over the whole loaded list.
    pub fn stats(&self) -> Stats {
        Stats::from_passes(self.passes())
    }

    pub fn distribution(&self) -> Vec<DistributionSlice> {
        self.stats().distribution()
    }

    pub fn trend<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> Vec<TrendPoint> {
        daily_trend(self.passes(), today, tz)
    }

    /// Open the confirm modal for an action on a loaded pass.
    pub fn request_action(&mut self, action: ConfirmAction, number: &PassNumber) -> Result<String, PageError> {
        let pass = self
            .passes()
            .iter()
            .find(|p| &p.number == number)
            .cloned()
            .ok_or_else(|| PageError::NotLoaded(number.clone()))?;
        let prompt = action.prompt(&pass);
        self.confirm.open((action, pass));
        Ok(prompt)
    }

    pub fn cancel(&mut self) {
        self.confirm.cancel();
    }

    /// Run the confirmed action and swap the server's copy into the list.
    ///
    /// On failure the modal stays open on the same action so it can be retried.
    pub async fn confirm(&mut self) -> Result<GatePass, PageError> {
        let (action, pass) = self.confirm.confirm().ok_or(PageError::NothingToConfirm)?;
        let actor = Some(self.config.actor.as_str());

        let result = match action {
            ConfirmAction::Approve => self.api.approve(&pass.number, actor).await,
            ConfirmAction::Reject => self.api.reject(&pass.number, actor).await,
            ConfirmAction::Delete => self.api.delete(&pass.number, actor).await,
        };

        match result {
            Ok(updated) => {
                tracing::info!(number = %updated.number, action = action.verb(), "dashboard action applied");
                self.replace(updated.clone());
                self.flash.set(
                    FlashKind::Success,
                    format!("Gatepass {} {} successfully!", updated.number, action.past_tense()),
                );
                Ok(updated)
            }
            Err(e) => {
                self.confirm.open((action, pass));
                Err(self.report(e.into()))
            }
        }
    }

    /// Gate desk lookup by typed or scanned number.
    pub async fn scan_lookup(&mut self, input: &str) -> Result<GatePass, PageError> {
        let number = input.trim();
        if number.is_empty() {
            self.error = Some("Please enter a gate pass number".to_string());
            return Err(PageError::Domain(DomainError::invalid_id("gate pass number cannot be empty")));
        }
        let number = PassNumber::parse(number)?;

        match self.api.by_number(&number).await {
            Ok(pass) => {
                self.error = None;
                self.selected = Some(pass.clone());
                Ok(pass)
            }
            Err(e) => {
                self.selected = None;
                Err(self.report(e.into()))
            }
        }
    }

    /// Create a pass and put it at the top of the list.
    pub async fn create(&mut self, form: &GatePassCreate) -> Result<GatePass, PageError> {
        match self.api.create(form).await {
            Ok(pass) => {
                tracing::info!(number = %pass.number, "gatepass created");
                if let Some(passes) = self.passes.loaded_mut() {
                    passes.insert(0, pass.clone());
                } else {
                    self.passes = LoadState::Loaded(vec![pass.clone()]);
                }
                self.flash
                    .set(FlashKind::Success, format!("Gatepass {} created successfully!", pass.number));
                Ok(pass)
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Submit an exit or return scan with its photo.
    pub async fn scan(&mut self, kind: ScanKind, number: &PassNumber, image: ScanImage) -> Result<GatePass, PageError> {
        match self.api.scan(kind, number, image).await {
            Ok(pass) => {
                tracing::info!(number = %pass.number, kind = kind.as_str(), "gate scan recorded");
                self.replace(pass.clone());
                self.selected = Some(pass.clone());
                self.flash.set(
                    FlashKind::Success,
                    format!("{} scan recorded for {}", kind_label(kind), pass.number),
                );
                Ok(pass)
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Open the status history modal for a loaded pass.
    pub fn show_history(&mut self, number: &PassNumber) -> Result<(), PageError> {
        let pass = self
            .passes()
            .iter()
            .find(|p| &p.number == number)
            .cloned()
            .ok_or_else(|| PageError::NotLoaded(number.clone()))?;
        self.history = Some(pass);
        Ok(())
    }

    pub fn close_history(&mut self) {
        self.history = None;
    }

    /// Entries of the open history modal; `Err` carries the empty-state text.
    pub fn history(&self) -> Option<Result<&[StatusHistoryItem], &'static str>> {
        self.history.as_ref().map(|pass| {
            if pass.status_history.is_empty() {
                Err(NO_HISTORY)
            } else {
                Ok(pass.status_history.as_slice())
            }
        })
    }

    fn replace(&mut self, updated: GatePass) {
        if let Some(passes) = self.passes.loaded_mut() {
            if !replace_by_id(passes, updated) {
                tracing::debug!("updated gatepass is not in the loaded list");
            }
        }
    }

    fn report(&mut self, err: PageError) -> PageError {
        let message = err.user_message();
        tracing::error!(error = %err, "dashboard action failed");
        self.flash.set(FlashKind::Error, message.clone());
        self.error = Some(message);
        err
    }
}

fn kind_label(kind: ScanKind) -> &'static str {
    match kind {
        ScanKind::Exit => "Exit",
        ScanKind::Return => "Return",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, created_on, pass_with_status};
    use chrono::Utc;

    fn n(s: &str) -> PassNumber {
        PassNumber::parse(s).unwrap()
    }

    fn dashboard(passes: Vec<GatePass>) -> Dashboard<FakeApi> {
        Dashboard::new(FakeApi::with_passes(passes), ConsoleConfig::default())
    }

    fn many(count: usize) -> Vec<GatePass> {
        (0..count)
            .map(|i| pass_with_status(&format!("GP-{i}"), GatePassStatus::Pending))
            .collect()
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(" HR ".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("gate".parse::<Role>().unwrap(), Role::Gate);
        assert!("guard".parse::<Role>().is_err());
    }

    #[tokio::test]
    async fn gate_role_ignores_status_filter() {
        let mut dash = dashboard(many(3));
        dash.set_status(Some(GatePassStatus::Approved)).await.unwrap();
        dash.set_role(Role::Gate).await.unwrap();

        assert_eq!(
            dash.api.calls(),
            vec![Call::List(Some(GatePassStatus::Approved)), Call::List(None)]
        );
        assert!(dash.filtered().is_empty());
        assert_eq!(dash.stats().total, 3);
    }

    #[tokio::test]
    async fn pagination_grows_and_resets_on_filter_change() {
        let mut dash = dashboard(many(70));
        dash.load().await.unwrap();

        assert_eq!(dash.visible().len(), 30);
        assert_eq!(dash.remaining(), 40);
        assert_eq!(dash.next_batch(), 25);
        assert_eq!(dash.load_more(), 55);
        assert_eq!(dash.load_more(), 70);
        assert!(!dash.has_more());

        dash.set_status(None).await.unwrap();
        assert_eq!(dash.visible().len(), 30);
    }

    #[tokio::test]
    async fn approve_replaces_only_that_record() {
        let mut dash = dashboard(vec![
            pass_with_status("GP-1", GatePassStatus::Pending),
            pass_with_status("GP-2", GatePassStatus::Pending),
        ]);
        dash.load().await.unwrap();
        let before = dash.passes()[1].clone();

        let prompt = dash.request_action(ConfirmAction::Approve, &n("GP-1")).unwrap();
        assert!(prompt.contains("GP-1"));
        dash.confirm().await.unwrap();

        assert_eq!(dash.passes()[0].status, GatePassStatus::Approved);
        assert_eq!(dash.passes()[0].status_history.last().unwrap().changed_by, "admin");
        assert_eq!(dash.passes()[1], before);
        assert_eq!(dash.flash().last().unwrap().text, "Gatepass GP-1 approved successfully!");
        assert_eq!(dash.api.calls()[1], Call::Approve("GP-1".to_string(), Some("admin".to_string())));
    }

    #[tokio::test]
    async fn failed_action_keeps_modal_open_for_retry() {
        let mut dash = dashboard(vec![pass_with_status("GP-1", GatePassStatus::Pending)]);
        dash.load().await.unwrap();
        dash.request_action(ConfirmAction::Reject, &n("GP-1")).unwrap();
        dash.api.fail_next(502, "Bad gateway");

        assert!(dash.confirm().await.is_err());
        let (action, pass) = dash.modal().unwrap();
        assert_eq!(*action, ConfirmAction::Reject);
        assert_eq!(pass.number, n("GP-1"));
        assert_eq!(dash.error(), Some("Bad gateway"));
        assert_eq!(dash.passes()[0].status, GatePassStatus::Pending);

        let updated = dash.confirm().await.unwrap();
        assert_eq!(updated.status, GatePassStatus::Rejected);
        assert!(dash.modal().is_none());
        assert_eq!(dash.passes()[0].status, GatePassStatus::Rejected);
    }

    #[tokio::test]
    async fn failed_load_clears_list_and_shows_banner() {
        let mut dash = dashboard(many(2));
        dash.load().await.unwrap();
        dash.api.fail_next(500, "Failed to fetch gate passes");

        assert!(dash.load().await.is_err());
        assert!(dash.passes().is_empty());
        assert_eq!(dash.error(), Some("Failed to fetch gate passes"));
        dash.dismiss_error();
        assert_eq!(dash.error(), None);
    }

    #[tokio::test]
    async fn blank_lookup_is_rejected_locally() {
        let mut dash = dashboard(many(1));
        assert!(dash.scan_lookup("   ").await.is_err());
        assert_eq!(dash.error(), Some("Please enter a gate pass number"));
        assert!(dash.api.calls().is_empty());

        let pass = dash.scan_lookup(" GP-0 ").await.unwrap();
        assert_eq!(pass.number, n("GP-0"));
        assert_eq!(dash.selected().unwrap().number, n("GP-0"));
        assert_eq!(dash.error(), None);
    }

    #[tokio::test]
    async fn create_prepends() {
        let mut dash = dashboard(many(2));
        dash.load().await.unwrap();

        let form = GatePassCreate::new("Meera Iyer", "Projector", true);
        let created = dash.create(&form).await.unwrap();

        assert_eq!(dash.passes().len(), 3);
        assert_eq!(dash.passes()[0].id, created.id);
        assert!(dash.passes()[0].is_returnable);
    }

    #[tokio::test]
    async fn exit_scan_replaces_record_and_shows_in_recent_scans() {
        let mut returnable = pass_with_status("GP-5", GatePassStatus::Approved);
        returnable.is_returnable = true;
        let mut dash = dashboard(vec![returnable, pass_with_status("GP-6", GatePassStatus::Approved)]);
        dash.set_role(Role::Gate).await.unwrap();
        assert!(dash.recent_scans().is_empty());

        let image = ScanImage::new("exit.jpg", vec![0xFF, 0xD8, 0xFF]);
        let pass = dash.scan(ScanKind::Exit, &n("GP-5"), image).await.unwrap();

        assert_eq!(pass.status, GatePassStatus::PendingReturn);
        let scans = dash.recent_scans();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].number, n("GP-5"));
        assert_eq!(dash.api.calls()[1], Call::Scan(ScanKind::Exit, "GP-5".to_string(), 3));
    }

    #[tokio::test]
    async fn history_modal_reports_empty_history() {
        let mut empty = pass_with_status("GP-8", GatePassStatus::Pending);
        empty.status_history.clear();
        let mut dash = dashboard(vec![empty, pass_with_status("GP-9", GatePassStatus::Pending)]);
        dash.load().await.unwrap();

        dash.show_history(&n("GP-8")).unwrap();
        assert_eq!(dash.history(), Some(Err(NO_HISTORY)));

        dash.show_history(&n("GP-9")).unwrap();
        assert_eq!(dash.history().unwrap().unwrap().len(), 1);

        dash.close_history();
        assert!(dash.history().is_none());
    }

    #[tokio::test]
    async fn trend_and_distribution_use_whole_list() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut dash = dashboard(vec![
            created_on("GP-1", crate::testing::at(2025, 3, 14, 9)),
            created_on("GP-2", crate::testing::at(2025, 3, 1, 9)),
            created_on("GP-3", crate::testing::at(2025, 2, 1, 9)),
        ]);
        dash.load().await.unwrap();

        let trend = dash.trend(today, &Utc);
        assert_eq!(trend.len(), 14);
        assert_eq!(trend.iter().map(|p| p.count).sum::<usize>(), 2);
        assert_eq!(trend[13].label, "Mar 14");

        let pending = dash.distribution().into_iter().find(|s| s.name == "Pending").unwrap();
        assert_eq!(pending.value, 3);
    }
}
