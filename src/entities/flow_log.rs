use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One immutable row of the event log.
///
/// `variables` holds the encoded argument envelope; see [`crate::codec::arguments`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "flow_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub actor_id: i64,
    pub subject_id: i64,
    pub category: String,
    pub message: String,
    pub variables: String,
    pub severity: i16,
    pub link: String,
    pub location: String,
    pub referer: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
