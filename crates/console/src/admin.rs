//! Admin portal page: review, filter, approve/reject and print passes.

use gatepass_client::{Download, GatePassApi, PrintScope};
use gatepass_core::{GatePass, GatePassStatus, PassNumber};

use crate::config::ConsoleConfig;
use crate::error::PageError;
use crate::flash::{FlashKind, FlashSlot};
use crate::load::LoadState;
use crate::modal::{ConfirmAction, ConfirmModal};

/// Status choices offered by the admin filter (blank means all).
pub const ADMIN_STATUS_FILTERS: [GatePassStatus; 5] = [
    GatePassStatus::Pending,
    GatePassStatus::Approved,
    GatePassStatus::Rejected,
    GatePassStatus::Returned,
    GatePassStatus::Completed,
];

/// How the loaded list was produced; an action refreshes it the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ListSource {
    Status(Option<GatePassStatus>),
    Number(PassNumber),
}

/// A confirmed action that the server accepted.
#[derive(Debug)]
pub struct ActionOutcome {
    /// The server's copy after the action.
    pub pass: GatePass,
    /// Set when the list could not be refreshed afterwards.
    pub reload_error: Option<PageError>,
}

/// State of the admin portal.
pub struct AdminPage<A> {
    api: A,
    config: ConsoleConfig,
    passes: LoadState<Vec<GatePass>>,
    source: Option<ListSource>,
    status_filter: Option<GatePassStatus>,
    number_filter: String,
    confirm: ConfirmModal<(ConfirmAction, GatePass)>,
    flash: FlashSlot,
}

impl<A: GatePassApi> AdminPage<A> {
    pub fn new(api: A, config: ConsoleConfig) -> Self {
        let flash = FlashSlot::new(config.flash_ttl);
        Self {
            api,
            config,
            passes: LoadState::Idle,
            source: None,
            status_filter: None,
            number_filter: String::new(),
            confirm: ConfirmModal::default(),
            flash,
        }
    }

    pub fn passes(&self) -> &LoadState<Vec<GatePass>> {
        &self.passes
    }

    pub fn flash(&self) -> &FlashSlot {
        &self.flash
    }

    pub fn modal(&self) -> Option<&(ConfirmAction, GatePass)> {
        self.confirm.payload()
    }

    pub fn status_filter(&self) -> Option<GatePassStatus> {
        self.status_filter
    }

    pub fn number_filter(&self) -> &str {
        &self.number_filter
    }

    /// Only statuses from [`ADMIN_STATUS_FILTERS`] are accepted; anything else
    /// means "all".
    pub fn set_status_filter(&mut self, status: Option<GatePassStatus>) {
        self.status_filter = status.filter(|s| ADMIN_STATUS_FILTERS.contains(s));
    }

    pub fn set_number_filter(&mut self, number: impl Into<String>) {
        self.number_filter = number.into();
    }

    /// "View all": every pass, ignoring the filters.
    pub async fn view_all(&mut self) -> Result<usize, PageError> {
        self.fetch_list(None, true).await
    }

    /// Number filter wins when set; otherwise list with the status filter.
    pub async fn apply_filters(&mut self) -> Result<usize, PageError> {
        if self.number_filter.trim().is_empty() {
            self.fetch_list(self.status_filter, true).await
        } else {
            let number = self.number_filter.clone();
            self.fetch_by_number(&number).await.map(|_| 1)
        }
    }

    pub fn clear_filters(&mut self) {
        self.status_filter = None;
        self.number_filter.clear();
        self.passes = LoadState::Idle;
        self.source = None;
    }

    pub async fn fetch_by_number(&mut self, input: &str) -> Result<GatePass, PageError> {
        let number = match PassNumber::parse(input) {
            Ok(number) => number,
            Err(e) => return Err(self.fail(e.into(), false)),
        };

        self.passes = LoadState::Loading;
        match self.api.detail(&number).await {
            Ok(pass) => {
                self.flash
                    .set(FlashKind::Success, format!("Found gatepass: {}", pass.number));
                self.passes = LoadState::Loaded(vec![pass.clone()]);
                self.source = Some(ListSource::Number(number));
                Ok(pass)
            }
            Err(e) => Err(self.fail(e.into(), true)),
        }
    }

    async fn fetch_list(&mut self, status: Option<GatePassStatus>, announce: bool) -> Result<usize, PageError> {
        self.passes = LoadState::Loading;
        match self.api.list(status).await {
            Ok(passes) => {
                let count = passes.len();
                tracing::info!(count, status = ?status, "gatepasses loaded");
                if announce {
                    self.flash
                        .set(FlashKind::Success, format!("Loaded {count} gatepass(es)"));
                }
                self.passes = LoadState::Loaded(passes);
                self.source = Some(ListSource::Status(status));
                Ok(count)
            }
            Err(e) => Err(self.fail(e.into(), true)),
        }
    }

    pub fn request_approve(&mut self, number: &PassNumber) -> Result<String, PageError> {
        self.request(ConfirmAction::Approve, number)
    }

    pub fn request_reject(&mut self, number: &PassNumber) -> Result<String, PageError> {
        self.request(ConfirmAction::Reject, number)
    }

    /// Open the confirmation modal for an action on a loaded pass.
    /// Approve and reject require the pass to be pending.
    pub fn request(&mut self, action: ConfirmAction, number: &PassNumber) -> Result<String, PageError> {
        let pass = self
            .passes
            .loaded()
            .and_then(|passes| passes.iter().find(|p| &p.number == number))
            .cloned()
            .ok_or_else(|| PageError::NotLoaded(number.clone()))?;
        if matches!(action, ConfirmAction::Approve | ConfirmAction::Reject) && !pass.is_pending() {
            return Err(PageError::NotPending(number.clone()));
        }

        let prompt = action.prompt(&pass);
        self.confirm.open((action, pass));
        Ok(prompt)
    }

    pub fn cancel(&mut self) {
        self.confirm.cancel();
    }

    /// Run the confirmed action, then refresh the list the way it was loaded.
    ///
    /// A failed refresh does not undo the action: the success message stays
    /// and the refresh error is handed back in the outcome.
    pub async fn confirm(&mut self) -> Result<ActionOutcome, PageError> {
        let (action, pass) = self.confirm.confirm().ok_or(PageError::NothingToConfirm)?;
        let actor = Some(self.config.actor.as_str());

        let progress = match action {
            ConfirmAction::Approve => "Approving gatepass...",
            ConfirmAction::Reject => "Rejecting gatepass...",
            ConfirmAction::Delete => "Deleting gatepass...",
        };
        self.flash.set(FlashKind::Info, progress);

        let result = match action {
            ConfirmAction::Approve => self.api.approve(&pass.number, actor).await,
            ConfirmAction::Reject => self.api.reject(&pass.number, actor).await,
            ConfirmAction::Delete => self.api.delete(&pass.number, actor).await,
        };

        let updated = match result {
            Ok(updated) => updated,
            Err(e) => return Err(self.fail(e.into(), false)),
        };

        tracing::info!(number = %updated.number, action = action.verb(), "gatepass action confirmed");
        self.flash.set(
            FlashKind::Success,
            format!("Gatepass {} {} successfully!", updated.number, action.past_tense()),
        );

        let reload_error = self.reload().await.err();
        Ok(ActionOutcome {
            pass: updated,
            reload_error,
        })
    }

    /// Re-run the request that produced the current list, without a flash.
    async fn reload(&mut self) -> Result<(), PageError> {
        let result = match self.source.clone() {
            None => return Ok(()),
            Some(ListSource::Status(status)) => self.api.list(status).await,
            Some(ListSource::Number(number)) => self.api.detail(&number).await.map(|pass| vec![pass]),
        };

        match result {
            Ok(passes) => {
                self.passes = LoadState::Loaded(passes);
                Ok(())
            }
            Err(e) => {
                let err = PageError::from(e);
                tracing::warn!(error = %err, "list refresh after action failed");
                self.passes = LoadState::Failed(err.user_message());
                Err(err)
            }
        }
    }

    /// Download the printable pass, named `{number}.pdf`.
    pub async fn print(&mut self, number: &PassNumber) -> Result<Download, PageError> {
        self.flash.set(FlashKind::Info, "Preparing download...");
        match self.api.print(number, PrintScope::Admin).await {
            Ok(mut download) => {
                download.file_name = format!("{number}.pdf");
                self.flash
                    .set(FlashKind::Success, format!("Downloaded {}", download.file_name));
                Ok(download)
            }
            Err(e) => Err(self.fail(e.into(), false)),
        }
    }

    /// Report a failure; `fatal` drops the list into the failed state.
    fn fail(&mut self, err: PageError, fatal: bool) -> PageError {
        let message = err.user_message();
        tracing::error!(error = %err, "admin page action failed");
        if fatal {
            self.passes = LoadState::Failed(message.clone());
        }
        self.flash.set(FlashKind::Error, message);
        err
    }
}
