use std::str::FromStr;

use avafr_entities::fitness_data;
use avafr_types::DataType;
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::DatabaseHandler;

/// A stored health payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessRecord {
    pub id: Uuid,
    pub user_id: String,
    pub data_type: DataType,
    pub data: serde_json::Value,
    pub created_at: NaiveDateTime,
}

#[derive(Default, Debug)]
pub struct SearchFitnessData {
    pub user_id: Option<String>,
    pub data_type: Option<DataType>,
    pub limit: Option<u64>,
}

impl SearchFitnessData {
    pub(crate) fn conditions(self) -> Condition {
        Condition::all()
            .add_option(self.user_id.map(|id| fitness_data::Column::UserId.eq(id)))
            .add_option(
                self.data_type
                    .map(|kind| fitness_data::Column::DataType.eq(kind.to_string())),
            )
    }
}

impl DatabaseHandler {
    pub async fn create_fitness_data(
        &self,
        user_id: &str,
        data_type: DataType,
        data: serde_json::Value,
    ) -> anyhow::Result<FitnessRecord> {
        let model = fitness_data::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id.to_string()),
            data_type: Set(data_type.to_string()),
            data: Set(data),
            created_at: Set(Utc::now().naive_utc()),
        };

        let model = model.insert(&self.db).await?;
        debug!("stored {} payload {} for {}", data_type, model.id, user_id);
        map_fitness_data(model)
    }

    /// Newest first.
    pub async fn search_fitness_data(
        &self,
        options: SearchFitnessData,
    ) -> anyhow::Result<Vec<FitnessRecord>> {
        let limit = options.limit;
        fitness_data::Entity::find()
            .filter(options.conditions())
            .order_by_desc(fitness_data::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(map_fitness_data)
            .collect()
    }
}

fn map_fitness_data(model: fitness_data::Model) -> anyhow::Result<FitnessRecord> {
    Ok(FitnessRecord {
        id: model.id,
        user_id: model.user_id,
        data_type: DataType::from_str(&model.data_type)?,
        data: model.data,
        created_at: model.created_at,
    })
}
