//! The async seam between console pages and the remote API.

use async_trait::async_trait;

use gatepass_core::{GatePass, GatePassCreate, GatePassStatus, PassNumber, PhotoId};

use crate::download::{Download, PrintScope, ScanImage, ScanKind};
use crate::error::ApiError;

/// Everything the console needs from the gate pass API.
///
/// [`crate::ApiClient`] is the HTTP implementation; page logic is written
/// against this trait so it can be driven by an in-memory fake.
#[async_trait]
pub trait GatePassApi: Send + Sync {
    /// Passes waiting for an admin decision.
    async fn pending(&self) -> Result<Vec<GatePass>, ApiError>;

    /// Every pass, optionally restricted to one status.
    async fn list(&self, status: Option<GatePassStatus>) -> Result<Vec<GatePass>, ApiError>;

    /// One pass via the admin detail endpoint.
    async fn detail(&self, number: &PassNumber) -> Result<GatePass, ApiError>;

    /// One pass via the gate lookup endpoint (what a QR scan resolves to).
    async fn by_number(&self, number: &PassNumber) -> Result<GatePass, ApiError>;

    async fn approve(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError>;

    async fn reject(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError>;

    async fn delete(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError>;

    async fn create(&self, body: &GatePassCreate) -> Result<GatePass, ApiError>;

    /// Printable artifact (PDF) for a pass.
    async fn print(&self, number: &PassNumber, scope: PrintScope) -> Result<Download, ApiError>;

    /// Stored exit/return photo.
    async fn photo(&self, photo_id: &PhotoId) -> Result<Download, ApiError>;

    /// Record an exit or return at the gate, with the captured photo.
    async fn scan(&self, kind: ScanKind, number: &PassNumber, image: ScanImage) -> Result<GatePass, ApiError>;

    async fn scan_exit(&self, number: &PassNumber, image: ScanImage) -> Result<GatePass, ApiError> {
        self.scan(ScanKind::Exit, number, image).await
    }

    async fn scan_return(&self, number: &PassNumber, image: ScanImage) -> Result<GatePass, ApiError> {
        self.scan(ScanKind::Return, number, image).await
    }
}
