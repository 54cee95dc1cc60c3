use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::errors::ServiceError;
use crate::pal::domain::{DeleteResult, NewPal, Pal, PalPatch};
use crate::pal::repository::PalRepository;

pub struct SeaOrmPalRepository {
    pub db: DatabaseConnection,
}

impl From<models::pal::Model> for Pal {
    fn from(m: models::pal::Model) -> Self {
        Pal {
            id: m.id.to_string(),
            name: m.name,
            sid: m.sid.to_string(),
            attribute: m.attribute,
            work_compatibility: m.work_compatibility,
            image: m.image,
        }
    }
}

#[async_trait::async_trait]
impl PalRepository for SeaOrmPalRepository {
    async fn find_all(&self) -> Result<Vec<Pal>, ServiceError> {
        let rows = models::pal::list(&self.db).await?;
        Ok(rows.into_iter().map(Pal::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Pal>, ServiceError> {
        Ok(models::pal::find_by_name(&self.db, name).await?.map(Pal::from))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(models::pal::count(&self.db).await?)
    }

    async fn max_sid(&self) -> Result<Option<i64>, ServiceError> {
        Ok(models::pal::max_sid(&self.db).await?)
    }

    async fn insert(&self, pal: NewPal) -> Result<Pal, ServiceError> {
        let row = models::pal::NewRow {
            name: pal.name,
            sid: pal.sid,
            attribute: pal.attribute,
            work_compatibility: pal.work_compatibility,
            image: pal.image,
        };
        Ok(models::pal::create(&self.db, row).await?.into())
    }

    async fn delete_by_name(&self, name: &str) -> Result<DeleteResult, ServiceError> {
        let deleted_count = models::pal::delete_by_name(&self.db, name).await?;
        Ok(DeleteResult { acknowledged: true, deleted_count })
    }

    async fn update_by_name(&self, name: &str, patch: PalPatch) -> Result<Option<Pal>, ServiceError> {
        let Some(found) = models::pal::find_by_name(&self.db, name).await? else {
            return Ok(None);
        };
        let mut am: models::pal::ActiveModel = found.into();
        if let Some(v) = patch.name { am.name = Set(v); }
        if let Some(v) = patch.attribute { am.attribute = Set(v); }
        if let Some(v) = patch.work_compatibility { am.work_compatibility = Set(v); }
        if let Some(v) = patch.image { am.image = Set(v); }
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(Some(updated.into()))
    }
}
