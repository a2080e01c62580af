//! Resolves engineer ids held by assignments and reports into display records.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::entities::engineer::{self, Entity as Engineer};
use crate::error::AppError;

/// Looks up every distinct id in one query. Ids that no longer resolve are
/// simply absent from the returned map.
pub async fn engineers_by_id<C, I>(db: &C, ids: I) -> Result<HashMap<Uuid, engineer::Model>, AppError>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = Uuid>,
{
    let ids: BTreeSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let engineers = Engineer::find()
        .filter(engineer::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(engineers
        .into_iter()
        .map(|engineer| (engineer.id, engineer))
        .collect())
}
