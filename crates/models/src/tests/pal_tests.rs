use anyhow::Result;
use uuid::Uuid;

use super::{db_tests_enabled, setup_test_db};
use crate::pal::{self, NewRow};

fn unique_row() -> NewRow {
    let n = (Uuid::new_v4().as_u128() % 1_000_000) as i64;
    NewRow {
        name: format!("tkumt{:06}", n),
        sid: 10_000_000 + n,
        attribute: "fire".into(),
        work_compatibility: "kindling".into(),
        image: String::new(),
    }
}

#[test]
fn blank_name_is_rejected() {
    assert!(pal::validate_name("   ").is_err());
    assert!(pal::validate_name("tkubm1760").is_ok());
}

#[test]
fn sid_must_be_positive() {
    assert!(pal::validate_sid(0).is_err());
    assert!(pal::validate_sid(1).is_ok());
}

#[tokio::test]
async fn test_pal_row_crud() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let row = unique_row();
    let created = pal::create(&db, row.clone()).await?;
    assert_eq!(created.name, row.name);
    assert_eq!(created.sid, row.sid);

    let found = pal::find_by_name(&db, &row.name).await?;
    assert_eq!(found.map(|m| m.id), Some(created.id));

    let max = pal::max_sid(&db).await?;
    assert!(max.unwrap_or_default() >= row.sid);
    assert!(pal::count(&db).await? >= 1);

    let removed = pal::delete_by_name(&db, &row.name).await?;
    assert_eq!(removed, 1);
    assert!(pal::find_by_name(&db, &row.name).await?.is_none());
    Ok(())
}
