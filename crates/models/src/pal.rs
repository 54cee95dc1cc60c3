use sea_orm::{entity::prelude::*, DatabaseConnection, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pal")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub sid: i64,
    pub attribute: String,
    pub work_compatibility: String,
    pub image: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values supplied by the caller when a row is created.
#[derive(Clone, Debug, Default)]
pub struct NewRow {
    pub name: String,
    pub sid: i64,
    pub attribute: String,
    pub work_compatibility: String,
    pub image: String,
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_sid(sid: i64) -> Result<(), errors::ModelError> {
    if sid < 1 {
        return Err(errors::ModelError::Validation("sid must be >= 1".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, row: NewRow) -> Result<Model, errors::ModelError> {
    validate_name(&row.name)?;
    validate_sid(row.sid)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(row.name),
        sid: Set(row.sid),
        attribute: Set(row.attribute),
        work_compatibility: Set(row.work_compatibility),
        image: Set(row.image),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// All rows in seat-id order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Sid).all(db).await?)
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    Ok(Entity::find().count(db).await?)
}

/// Highest `sid` in the table, selecting only that column.
pub async fn max_sid(db: &DatabaseConnection) -> Result<Option<i64>, errors::ModelError> {
    let sid = Entity::find()
        .select_only()
        .column(Column::Sid)
        .order_by_desc(Column::Sid)
        .into_tuple::<i64>()
        .one(db)
        .await?;
    Ok(sid)
}

/// Delete every row carrying `name`; returns the number of rows removed.
pub async fn delete_by_name(db: &DatabaseConnection, name: &str) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many().filter(Column::Name.eq(name)).exec(db).await?;
    Ok(res.rows_affected)
}
