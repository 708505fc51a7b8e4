use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub description: String,

    /// CDN asset reference. Immutable after creation.
    pub public_id: String,

    // Byte counts kept as decimal strings; consumers parse them numerically.
    pub original_size: String,
    pub compressed_size: String,

    /// Seconds, as reported by the CDN at upload time.
    pub duration: f64,

    /// Owning principal (identity-provider subject). Immutable.
    pub user_id: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
