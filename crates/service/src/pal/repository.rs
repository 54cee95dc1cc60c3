use async_trait::async_trait;

use super::domain::{DeleteResult, NewPal, Pal, PalPatch};
use crate::errors::ServiceError;

/// Persistence operations the roster service relies on.
#[async_trait]
pub trait PalRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Pal>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Pal>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    /// Highest numeric seat id, `None` when the roster is empty.
    async fn max_sid(&self) -> Result<Option<i64>, ServiceError>;
    async fn insert(&self, pal: NewPal) -> Result<Pal, ServiceError>;
    async fn delete_by_name(&self, name: &str) -> Result<DeleteResult, ServiceError>;
    /// Apply `patch` to the record named `name`; `None` when there is no such record.
    async fn update_by_name(&self, name: &str, patch: PalPatch) -> Result<Option<Pal>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockPalRepository {
        rows: Mutex<Vec<Pal>>,
        failing: AtomicBool,
    }

    impl MockPalRepository {
        /// Store a record directly, bypassing validation.
        pub fn seed(&self, name: &str, sid: i64) -> Pal {
            let pal = Pal {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                sid: sid.to_string(),
                attribute: String::new(),
                work_compatibility: String::new(),
                image: String::new(),
            };
            self.rows.lock().unwrap().push(pal.clone());
            pal
        }

        /// Make every subsequent call fail as if the database were down.
        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("mock repository unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PalRepository for MockPalRepository {
        async fn find_all(&self) -> Result<Vec<Pal>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Pal>, ServiceError> {
            self.check()?;
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|p| p.name == name).cloned())
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().len() as u64)
        }

        async fn max_sid(&self) -> Result<Option<i64>, ServiceError> {
            self.check()?;
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter_map(|p| p.sid.parse::<i64>().ok()).max())
        }

        async fn insert(&self, pal: NewPal) -> Result<Pal, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|p| p.name == pal.name || p.sid == pal.sid.to_string()) {
                return Err(ServiceError::Db("duplicate key value violates unique constraint".into()));
            }
            let stored = Pal {
                id: Uuid::new_v4().to_string(),
                name: pal.name,
                sid: pal.sid.to_string(),
                attribute: pal.attribute,
                work_compatibility: pal.work_compatibility,
                image: pal.image,
            };
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn delete_by_name(&self, name: &str) -> Result<DeleteResult, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|p| p.name != name);
            Ok(DeleteResult { acknowledged: true, deleted_count: (before - rows.len()) as u64 })
        }

        async fn update_by_name(&self, name: &str, patch: PalPatch) -> Result<Option<Pal>, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.iter_mut().find(|p| p.name == name).map(|p| {
                patch.apply_to(p);
                p.clone()
            }))
        }
    }
}
