//! Fixtures and an in-memory API shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use gatepass_client::{ApiError, Download, GatePassApi, PrintScope, ScanImage, ScanKind};
use gatepass_core::{
    GatePass, GatePassCreate, GatePassId, GatePassStatus, PassNumber, PhotoId, StatusHistoryItem,
};

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn pass_with_status(number: &str, status: GatePassStatus) -> GatePass {
    GatePass {
        id: GatePassId::parse(format!("id-{number}")).unwrap(),
        number: PassNumber::parse(number).unwrap(),
        person_name: format!("Person {number}"),
        description: "Tools".to_string(),
        created_by: "hr.desk".to_string(),
        is_returnable: false,
        status,
        status_history: vec![StatusHistoryItem {
            status: status.as_str().to_string(),
            changed_at: at(2025, 3, 1, 8),
            changed_by: "hr.desk".to_string(),
        }],
        created_at: at(2025, 3, 1, 8),
        approved_at: None,
        exit_photo_id: None,
        return_photo_id: None,
        exit_time: None,
        return_time: None,
        qr_code_url: None,
    }
}

pub fn created_on(number: &str, created_at: DateTime<Utc>) -> GatePass {
    GatePass {
        created_at,
        ..pass_with_status(number, GatePassStatus::Pending)
    }
}

/// Recorded call against [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Pending,
    List(Option<GatePassStatus>),
    Detail(String),
    ByNumber(String),
    Approve(String, Option<String>),
    Reject(String, Option<String>),
    Delete(String, Option<String>),
    Create(GatePassCreate),
    Print(String, PrintScope),
    Photo(String),
    Scan(ScanKind, String, usize),
}

/// In-memory stand-in for the remote API.
///
/// Holds a list of passes and applies actions to it the way the real server
/// would (approximately). Queued outcomes apply to the next calls in order:
/// `None` lets a call through, `Some` fails it.
#[derive(Default)]
pub struct FakeApi {
    pub passes: Mutex<Vec<GatePass>>,
    pub calls: Mutex<Vec<Call>>,
    pub failures: Mutex<VecDeque<Option<ApiError>>>,
}

impl FakeApi {
    pub fn with_passes(passes: Vec<GatePass>) -> Self {
        Self {
            passes: Mutex::new(passes),
            ..Self::default()
        }
    }

    pub fn fail_next(&self, status: u16, message: &str) {
        self.failures.lock().unwrap().push_back(Some(ApiError::Api {
            status,
            message: message.to_string(),
        }));
    }

    /// Let the next call through before any queued failure.
    pub fn succeed_next(&self) {
        self.failures.lock().unwrap().push_back(None);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front().flatten() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn find(&self, number: &PassNumber) -> Result<GatePass, ApiError> {
        self.passes
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.number == number)
            .cloned()
            .ok_or(ApiError::Api {
                status: 404,
                message: "Gatepass not found".to_string(),
            })
    }

    fn transition(
        &self,
        number: &PassNumber,
        status: GatePassStatus,
        actor: Option<&str>,
    ) -> Result<GatePass, ApiError> {
        let mut passes = self.passes.lock().unwrap();
        let pass = passes
            .iter_mut()
            .find(|p| &p.number == number)
            .ok_or(ApiError::Api {
                status: 404,
                message: "Gatepass not found".to_string(),
            })?;
        pass.status = status;
        pass.status_history.push(StatusHistoryItem {
            status: status.as_str().to_string(),
            changed_at: at(2025, 3, 2, 9),
            changed_by: actor.unwrap_or("system").to_string(),
        });
        Ok(pass.clone())
    }
}

#[async_trait]
impl GatePassApi for FakeApi {
    async fn pending(&self) -> Result<Vec<GatePass>, ApiError> {
        self.record(Call::Pending)?;
        self.list_inner(Some(GatePassStatus::Pending))
    }

    async fn list(&self, status: Option<GatePassStatus>) -> Result<Vec<GatePass>, ApiError> {
        self.record(Call::List(status))?;
        self.list_inner(status)
    }

    async fn detail(&self, number: &PassNumber) -> Result<GatePass, ApiError> {
        self.record(Call::Detail(number.to_string()))?;
        self.find(number)
    }

    async fn by_number(&self, number: &PassNumber) -> Result<GatePass, ApiError> {
        self.record(Call::ByNumber(number.to_string()))?;
        self.find(number)
    }

    async fn approve(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError> {
        self.record(Call::Approve(number.to_string(), actor.map(str::to_string)))?;
        self.transition(number, GatePassStatus::Approved, actor)
    }

    async fn reject(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError> {
        self.record(Call::Reject(number.to_string(), actor.map(str::to_string)))?;
        self.transition(number, GatePassStatus::Rejected, actor)
    }

    async fn delete(&self, number: &PassNumber, actor: Option<&str>) -> Result<GatePass, ApiError> {
        self.record(Call::Delete(number.to_string(), actor.map(str::to_string)))?;
        self.transition(number, GatePassStatus::Completed, actor)
    }

    async fn create(&self, body: &GatePassCreate) -> Result<GatePass, ApiError> {
        self.record(Call::Create(body.clone()))?;
        let mut passes = self.passes.lock().unwrap();
        let number = format!("GP-NEW-{}", passes.len() + 1);
        let pass = GatePass {
            person_name: body.person_name.clone(),
            description: body.description.clone(),
            is_returnable: body.is_returnable,
            ..pass_with_status(&number, GatePassStatus::Pending)
        };
        passes.push(pass.clone());
        Ok(pass)
    }

    async fn print(&self, number: &PassNumber, scope: PrintScope) -> Result<Download, ApiError> {
        self.record(Call::Print(number.to_string(), scope))?;
        self.find(number)?;
        Ok(Download {
            bytes: b"%PDF-1.4".to_vec(),
            content_type: Some("application/pdf".to_string()),
            file_name: "server-name.pdf".to_string(),
        })
    }

    async fn photo(&self, photo_id: &PhotoId) -> Result<Download, ApiError> {
        self.record(Call::Photo(photo_id.to_string()))?;
        Ok(Download {
            bytes: photo_id.as_str().as_bytes().to_vec(),
            content_type: Some("image/jpeg".to_string()),
            file_name: photo_id.to_string(),
        })
    }

    async fn scan(&self, kind: ScanKind, number: &PassNumber, image: ScanImage) -> Result<GatePass, ApiError> {
        self.record(Call::Scan(kind, number.to_string(), image.bytes.len()))?;
        let mut passes = self.passes.lock().unwrap();
        let pass = passes
            .iter_mut()
            .find(|p| &p.number == number)
            .ok_or(ApiError::Api {
                status: 404,
                message: "Gatepass not found".to_string(),
            })?;
        let photo = PhotoId::parse(format!("{}-{}", kind.as_str(), image.file_name)).unwrap();
        match kind {
            ScanKind::Exit => {
                pass.exit_photo_id = Some(photo);
                pass.exit_time = Some(at(2025, 3, 2, 10));
                pass.status = if pass.is_returnable {
                    GatePassStatus::PendingReturn
                } else {
                    GatePassStatus::Completed
                };
            }
            ScanKind::Return => {
                pass.return_photo_id = Some(photo);
                pass.return_time = Some(at(2025, 3, 2, 17));
                pass.status = GatePassStatus::Returned;
            }
        }
        Ok(pass.clone())
    }
}

impl FakeApi {
    fn list_inner(&self, status: Option<GatePassStatus>) -> Result<Vec<GatePass>, ApiError> {
        Ok(self
            .passes
            .lock()
            .unwrap()
            .iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .cloned()
            .collect())
    }
}
