//! Health payload ingestion, independent of any transport.
//!
//! Callers pass the identity their transport authenticated, if any. Whether
//! an anonymous caller is rejected or acts as a fallback user is decided by
//! [`AuthPolicy`].

use avafr_db::{DatabaseHandler, FitnessRecord, SearchFitnessData};
use avafr_types::DataType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPolicy {
    pub require_auth: bool,
    pub fallback_user: String,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            require_auth: true,
            fallback_user: String::from("demo"),
        }
    }
}

impl AuthPolicy {
    /// The user a request acts as, and whether that user was authenticated.
    pub fn resolve(&self, identity: Option<&str>) -> Result<Caller, IngestError> {
        match identity.map(str::trim) {
            Some("") => Err(IngestError::Unauthorized),
            Some(user) => Ok(Caller {
                user: user.to_string(),
                authenticated: true,
            }),
            None if self.require_auth => Err(IngestError::Unauthorized),
            None => Ok(Caller {
                user: self.fallback_user.clone(),
                authenticated: false,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user: String,
    pub authenticated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("authentication required")]
    Unauthorized,
    #[error("`{caller}` may not upload data for `{target}`")]
    Forbidden { caller: String, target: String },
    #[error("user id must not be empty")]
    EmptyUser,
    #[error("payload must be a non-empty JSON object")]
    InvalidPayload,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestRequest {
    /// Defaults to the caller.
    #[serde(default)]
    pub user_id: Option<String>,
    pub data_type: DataType,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub id: String,
    pub user_id: String,
    pub data_type: DataType,
    pub received_at: NaiveDateTime,
}

impl From<FitnessRecord> for IngestResponse {
    fn from(record: FitnessRecord) -> Self {
        Self {
            message: String::from("Data ingested successfully"),
            id: record.id.to_string(),
            user_id: record.user_id,
            data_type: record.data_type,
            received_at: record.created_at,
        }
    }
}

pub struct IngestService<'a> {
    db: &'a DatabaseHandler,
    policy: AuthPolicy,
}

impl<'a> IngestService<'a> {
    pub fn new(db: &'a DatabaseHandler, policy: AuthPolicy) -> Self {
        Self { db, policy }
    }

    pub fn policy(&self) -> &AuthPolicy {
        &self.policy
    }

    pub async fn ingest(
        &self,
        identity: Option<&str>,
        request: IngestRequest,
    ) -> Result<IngestResponse, IngestError> {
        let target = self.target(identity, request.user_id)?;
        if !request.data.as_object().is_some_and(|data| !data.is_empty()) {
            return Err(IngestError::InvalidPayload);
        }

        let record = self
            .db
            .create_fitness_data(&target, request.data_type, request.data)
            .await?;
        info!(
            "Ingested {} data for {} ({})",
            record.data_type, record.user_id, record.id
        );

        Ok(record.into())
    }

    /// Stored payloads of one user, newest first. Same access rules as
    /// [`ingest`](Self::ingest).
    pub async fn records(
        &self,
        identity: Option<&str>,
        user_id: Option<String>,
        data_type: Option<DataType>,
        limit: Option<u64>,
    ) -> Result<Vec<FitnessRecord>, IngestError> {
        let target = self.target(identity, user_id)?;
        let records = self
            .db
            .search_fitness_data(SearchFitnessData {
                user_id: Some(target),
                data_type,
                limit,
            })
            .await?;
        Ok(records)
    }

    /// The user a request reads or writes, defaulting to the caller.
    fn target(&self, identity: Option<&str>, user_id: Option<String>) -> Result<String, IngestError> {
        let caller = self.policy.resolve(identity)?;

        let target = match user_id {
            Some(user) => user.trim().to_string(),
            None => caller.user.clone(),
        };
        if target.is_empty() {
            return Err(IngestError::EmptyUser);
        }
        if caller.authenticated && caller.user != target {
            return Err(IngestError::Forbidden {
                caller: caller.user,
                target,
            });
        }
        Ok(target)
    }
}
