use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::domain::{DeleteResult, NewPal, Pal, PalInput, PalPatch, SeatInfo};
use super::repository::PalRepository;
use super::username::{parse_username, UsernameError};
use crate::errors::ServiceError;
use crate::response::ApiResponse;

/// Roster service configuration
#[derive(Clone, Debug)]
pub struct PalServiceConfig {
    /// Inserts are refused once the roster holds this many records.
    pub capacity: u64,
}

impl Default for PalServiceConfig {
    fn default() -> Self { Self { capacity: 200 } }
}

impl From<&configs::RosterConfig> for PalServiceConfig {
    fn from(c: &configs::RosterConfig) -> Self { Self { capacity: c.capacity } }
}

/// Roster business service independent of web framework and storage.
pub struct PalService<R: PalRepository + ?Sized> {
    repo: Arc<R>,
    cfg: PalServiceConfig,
    // seat check -> write must not interleave between inserts and renames
    write_lock: Mutex<()>,
}

impl<R: PalRepository + ?Sized> PalService<R> {
    pub fn new(repo: Arc<R>, cfg: PalServiceConfig) -> Self {
        Self { repo, cfg, write_lock: Mutex::new(()) }
    }

    /// Every record in the roster. The caller turns an error into a 500 envelope.
    pub async fn list_all(&self) -> Result<Vec<Pal>, ServiceError> {
        self.repo.find_all().await
    }

    /// Decode `name` and make sure its seat number is free.
    ///
    /// # Examples
    /// ```
    /// use service::pal::{repository::mock::MockPalRepository, service::{PalService, PalServiceConfig}};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockPalRepository::default());
    /// repo.seed("tkuim0001", 1);
    /// let svc = PalService::new(repo, PalServiceConfig::default());
    /// let info = tokio_test::block_on(svc.validate_username("tkubm1760")).unwrap();
    /// assert_eq!(info.seat_number, "1760");
    /// assert!(tokio_test::block_on(svc.validate_username("tkubm0001")).is_err());
    /// ```
    pub async fn validate_username(&self, name: &str) -> Result<SeatInfo, ServiceError> {
        let info = parse_username(name)?;
        if self.seat_number_taken(&info.seat_number, None).await? {
            return Err(UsernameError::SeatNumberTaken.into());
        }
        Ok(info)
    }

    /// Whether a stored record other than `except` decodes to `seat_number`.
    async fn seat_number_taken(&self, seat_number: &str, except: Option<&str>) -> Result<bool, ServiceError> {
        let pals = self.repo.find_all().await?;
        for pal in pals.iter().filter(|p| Some(p.name.as_str()) != except) {
            match parse_username(&pal.name) {
                Ok(info) if info.seat_number == seat_number => return Ok(true),
                Ok(_) => {}
                Err(e) => warn!(name = %pal.name, error = %e, "stored name does not decode; skipped"),
            }
        }
        Ok(false)
    }

    /// Validate, check capacity, assign the next seat id and store.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn insert_one(&self, input: PalInput) -> ApiResponse<Pal> {
        let _guard = self.write_lock.lock().await;
        match self.try_insert(input).await {
            Ok(pal) => {
                info!(id = %pal.id, sid = %pal.sid, "pal_inserted");
                ApiResponse::ok("insert success", pal)
            }
            Err(e) => e.into(),
        }
    }

    async fn try_insert(&self, input: PalInput) -> Result<Pal, ServiceError> {
        let info = self.validate_username(&input.name).await?;
        debug!(department = %info.department, seat = %info.seat_number, "username accepted");

        let count = self.repo.count().await?;
        if count >= self.cfg.capacity {
            return Err(ServiceError::Validation("student list is full".into()));
        }

        let sid = next_sid(self.repo.max_sid().await?)?;
        self.repo
            .insert(NewPal {
                name: input.name,
                sid,
                attribute: input.attribute,
                work_compatibility: input.work_compatibility,
                image: input.image,
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_name(&self, name: &str) -> ApiResponse<DeleteResult> {
        match self.try_delete(name).await {
            Ok(res) => {
                info!(deleted = res.deleted_count, "pal_deleted");
                ApiResponse::ok("success", res)
            }
            Err(e) => e.into(),
        }
    }

    async fn try_delete(&self, name: &str) -> Result<DeleteResult, ServiceError> {
        if self.repo.find_by_name(name).await?.is_none() {
            return Err(ServiceError::not_found("user"));
        }
        self.repo.delete_by_name(name).await
    }

    /// Replace the provided fields of the record named `name`.
    /// A new name has to decode and must not reuse another record's seat number.
    #[instrument(skip(self, patch))]
    pub async fn update_by_name(&self, name: &str, patch: PalPatch) -> ApiResponse<Pal> {
        match self.try_update(name, patch).await {
            Ok(pal) => {
                info!(id = %pal.id, "pal_updated");
                ApiResponse::ok("update success", pal)
            }
            Err(e) => e.into(),
        }
    }

    async fn try_update(&self, name: &str, patch: PalPatch) -> Result<Pal, ServiceError> {
        let existing = self
            .repo
            .find_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))?;
        if patch.is_empty() {
            return Ok(existing);
        }

        // a rename claims a seat number, so it serializes with inserts
        let _guard = match patch.name.as_deref().filter(|n| *n != name) {
            Some(new_name) => {
                let info = parse_username(new_name)?;
                let guard = self.write_lock.lock().await;
                if self.seat_number_taken(&info.seat_number, Some(name)).await? {
                    return Err(UsernameError::SeatNumberTaken.into());
                }
                Some(guard)
            }
            None => None,
        };

        self.repo
            .update_by_name(name, patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ApiResponse<Pal> {
        match self.repo.find_by_name(name).await {
            Ok(Some(pal)) => ApiResponse::ok("find success", pal),
            Ok(None) => ServiceError::not_found("user").into(),
            Err(e) => e.into(),
        }
    }
}

/// One past the highest seat id, or 1 for an empty roster.
pub fn next_sid(max: Option<i64>) -> Result<i64, ServiceError> {
    match max {
        None => Ok(1),
        Some(m) => m
            .checked_add(1)
            .ok_or_else(|| ServiceError::Validation("seat id space is exhausted".into())),
    }
}
