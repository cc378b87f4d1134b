//! Photo preview with explicitly revoked object URLs.
//!
//! A fetched photo is turned into a transient [`ObjectUrl`]. The URL is
//! revoked when the preview closes, when it switches to another photo, and
//! when the preview is dropped.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use gatepass_client::{ApiError, Download, GatePassApi, Url};
use gatepass_core::PhotoId;

/// Handle to locally held binary data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues and revokes object URLs.
pub trait ObjectUrlStore {
    fn create(&mut self, bytes: &[u8], content_type: Option<&str>) -> io::Result<ObjectUrl>;

    /// Release a URL. Revoking an unknown URL is a no-op.
    fn revoke(&mut self, url: &ObjectUrl);
}

/// Object URLs backed by files in a private temp directory.
///
/// The directory and anything still in it is removed when the store drops.
#[derive(Debug)]
pub struct TempDirStore {
    dir: tempfile::TempDir,
    files: HashMap<ObjectUrl, PathBuf>,
}

impl TempDirStore {
    pub fn new() -> io::Result<Self> {
        Self::from_dir(tempfile::Builder::new().prefix("gatepass-preview-").tempdir()?)
    }

    /// Like [`TempDirStore::new`], but under `parent` instead of the system
    /// temp directory.
    pub fn new_in(parent: impl AsRef<Path>) -> io::Result<Self> {
        Self::from_dir(
            tempfile::Builder::new()
                .prefix("gatepass-preview-")
                .tempdir_in(parent)?,
        )
    }

    fn from_dir(dir: tempfile::TempDir) -> io::Result<Self> {
        Ok(Self {
            dir,
            files: HashMap::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_of(&self, url: &ObjectUrl) -> Option<&Path> {
        self.files.get(url).map(PathBuf::as_path)
    }

    /// Number of URLs not yet revoked.
    pub fn live(&self) -> usize {
        self.files.len()
    }
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();
    match essence.as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

impl ObjectUrlStore for TempDirStore {
    fn create(&mut self, bytes: &[u8], content_type: Option<&str>) -> io::Result<ObjectUrl> {
        let path = self
            .dir
            .path()
            .join(format!("{}.{}", Uuid::now_v7(), extension_for(content_type)));
        let href = Url::from_file_path(&path).map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("preview path is not absolute: {}", path.display()),
            )
        })?;
        std::fs::write(&path, bytes)?;

        let url = ObjectUrl::new(href);
        tracing::debug!(%url, size = bytes.len(), "object url created");
        self.files.insert(url.clone(), path);
        Ok(url)
    }

    fn revoke(&mut self, url: &ObjectUrl) {
        let Some(path) = self.files.remove(url) else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(%url, "object url revoked"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(%url, error = %e, "failed to remove preview file"),
        }
    }
}

/// Proof that a fetch was started for the current target.
#[must_use]
#[derive(Debug)]
pub struct PreviewTicket {
    generation: u64,
}

/// What the preview shows right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState<'a> {
    Closed,
    Loading(&'a PhotoId),
    Ready(&'a PhotoId, &'a ObjectUrl),
    /// The fetch failed; the modal shows an "Image not available" fallback.
    Unavailable(&'a PhotoId),
}

pub struct PhotoPreview<S: ObjectUrlStore> {
    store: S,
    target: Option<PhotoId>,
    generation: u64,
    url: Option<ObjectUrl>,
    settled: bool,
}

impl<S: ObjectUrlStore> PhotoPreview<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            target: None,
            generation: 0,
            url: None,
            settled: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Point the preview at `photo`; any previous URL is revoked first.
    pub fn open(&mut self, photo: PhotoId) -> PreviewTicket {
        self.release();
        self.generation += 1;
        self.target = Some(photo);
        self.settled = false;
        PreviewTicket {
            generation: self.generation,
        }
    }

    /// Deliver a fetch result.
    ///
    /// Results for a target that is no longer current are discarded without
    /// creating a URL.
    pub fn fulfil(&mut self, ticket: PreviewTicket, result: Result<Download, ApiError>) -> PreviewState<'_> {
        if ticket.generation != self.generation || self.target.is_none() {
            tracing::debug!("discarding photo for a stale preview");
            return self.state();
        }

        match result {
            Ok(download) => match self.store.create(&download.bytes, download.content_type.as_deref()) {
                Ok(url) => self.url = Some(url),
                Err(e) => tracing::warn!(error = %e, "failed to stage photo"),
            },
            Err(e) => tracing::error!(error = %e, "failed to load image"),
        }
        self.settled = true;
        self.state()
    }

    /// Fetch and show `photo`.
    pub async fn show<A>(&mut self, api: &A, photo: PhotoId) -> PreviewState<'_>
    where
        A: GatePassApi + ?Sized,
    {
        let ticket = self.open(photo.clone());
        let result = api.photo(&photo).await;
        self.fulfil(ticket, result)
    }

    pub fn close(&mut self) {
        self.release();
        self.generation += 1;
        self.target = None;
        self.settled = false;
    }

    pub fn state(&self) -> PreviewState<'_> {
        match (&self.target, &self.url) {
            (None, _) => PreviewState::Closed,
            (Some(photo), Some(url)) => PreviewState::Ready(photo, url),
            (Some(photo), None) if self.settled => PreviewState::Unavailable(photo),
            (Some(photo), None) => PreviewState::Loading(photo),
        }
    }

    fn release(&mut self) {
        if let Some(url) = self.url.take() {
            self.store.revoke(&url);
        }
    }
}

impl<S: ObjectUrlStore> Drop for PhotoPreview<S> {
    fn drop(&mut self) {
        self.release();
    }
}
