use super::client::{EngineClient, build_http_client};
use super::error::EngineError;
use super::protocol::{index_mapping, render_search, render_word_delete};
use crate::config::Config;
use crate::search::query::BoolQuery;
use crate::search::types::Hit;

use serde_json::{Value, json};
use uuid::Uuid;

pub const PRIMARY_LABEL: &str = "cluster1";
pub const REPLICA_LABEL: &str = "cluster2";

/// Front for one primary cluster and an optional replica.
///
/// Writes go to both clusters in parallel and wait for both. Any failed leg fails
/// the whole call; the leg that succeeded is not rolled back.
pub struct Engine {
    primary: EngineClient,
    replica: Option<EngineClient>,
}

impl Engine {
    pub fn new(primary: EngineClient, replica: Option<EngineClient>) -> Self {
        Self { primary, replica }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = build_http_client(config)?;
        let primary = EngineClient::new(
            http.clone(),
            &config.primary_url,
            &config.index_name,
            config.refresh,
        )?;
        let replica = config
            .replica_url
            .as_deref()
            .map(|url| EngineClient::new(http.clone(), url, &config.index_name, config.refresh))
            .transpose()?;
        Ok(Self::new(primary, replica))
    }

    pub fn is_replicated(&self) -> bool {
        self.replica.is_some()
    }

    pub async fn health(&self) -> Result<Value, EngineError> {
        match &self.replica {
            None => self.primary.cluster_health().await,
            Some(replica) => {
                let (first, second) =
                    tokio::join!(self.primary.cluster_health(), replica.cluster_health());
                let (first, second) = settle(first, second)?;
                Ok(json!({ PRIMARY_LABEL: first, REPLICA_LABEL: second }))
            }
        }
    }

    /// Returns the primary's answer. With a replica, both copies share a generated id.
    pub async fn create(&self, body: &Value) -> Result<Value, EngineError> {
        match &self.replica {
            None => self.primary.create_document(None, body).await,
            Some(replica) => {
                let id = Uuid::new_v4().to_string();
                let (first, second) = tokio::join!(
                    self.primary.create_document(Some(&id), body),
                    replica.create_document(Some(&id), body)
                );
                let (first, _) = settle(first, second)?;
                Ok(first)
            }
        }
    }

    pub async fn replace(&self, id: &str, body: &Value) -> Result<Value, EngineError> {
        match &self.replica {
            None => self.primary.replace_document(id, body).await,
            Some(replica) => {
                let (first, second) = tokio::join!(
                    self.primary.replace_document(id, body),
                    replica.replace_document(id, body)
                );
                let (first, _) = settle(first, second)?;
                Ok(first)
            }
        }
    }

    /// Primary first, replica when the primary errors or lacks the document.
    pub async fn get(&self, id: &str) -> Result<Option<Value>, EngineError> {
        let primary = self.primary.get_document(id).await;
        let Some(replica) = &self.replica else {
            return primary;
        };

        match primary {
            Ok(Some(document)) => Ok(Some(document)),
            primary => {
                if let Err(e) = &primary {
                    tracing::warn!(
                        "GET: {} failed, falling back to {}: {}",
                        PRIMARY_LABEL,
                        REPLICA_LABEL,
                        e
                    );
                }
                match replica.get_document(id).await {
                    Ok(found) => Ok(found),
                    Err(e) => {
                        tracing::warn!("GET: {} failed: {}", REPLICA_LABEL, e);
                        primary
                    }
                }
            }
        }
    }

    /// Single call against the primary cluster; no retry.
    pub async fn search(&self, query: &BoolQuery) -> Result<Vec<Hit>, EngineError> {
        let body = render_search(query);
        tracing::debug!("Search body: {}", body);
        Ok(self.primary.search(&body).await?.into_hits())
    }

    pub async fn delete_by_word(&self, word: &str) -> Result<Value, EngineError> {
        let body = render_word_delete(word);
        match &self.replica {
            None => self.primary.delete_by_query(&body).await,
            Some(replica) => {
                let (first, second) = tokio::join!(
                    self.primary.delete_by_query(&body),
                    replica.delete_by_query(&body)
                );
                let (first, _) = settle(first, second)?;
                Ok(first)
            }
        }
    }

    /// Creates the index with the nested word mapping on every cluster where it is missing.
    pub async fn ensure_index(&self) -> Result<(), EngineError> {
        let mapping = index_mapping();
        let primary = self.primary.ensure_index(&mapping).await;
        log_ensure(PRIMARY_LABEL, &primary);
        match &self.replica {
            None => primary.map(|_| ()),
            Some(replica) => {
                let second = replica.ensure_index(&mapping).await;
                log_ensure(REPLICA_LABEL, &second);
                settle(primary, second).map(|_| ())
            }
        }
    }
}

/// Folds the two legs of a fan-out into one result.
pub fn settle<T>(
    primary: Result<T, EngineError>,
    replica: Result<T, EngineError>,
) -> Result<(T, T), EngineError> {
    match (primary, replica) {
        (Ok(first), Ok(second)) => Ok((first, second)),
        (Err(e), Ok(_)) => {
            tracing::error!(
                "{} failed while {} succeeded, no rollback: {}",
                PRIMARY_LABEL,
                REPLICA_LABEL,
                e
            );
            Err(EngineError::replica(PRIMARY_LABEL, e))
        }
        (Ok(_), Err(e)) => {
            tracing::error!(
                "{} failed while {} succeeded, no rollback: {}",
                REPLICA_LABEL,
                PRIMARY_LABEL,
                e
            );
            Err(EngineError::replica(REPLICA_LABEL, e))
        }
        (Err(e), Err(other)) => {
            tracing::error!("Both clusters failed: {} / {}", e, other);
            Err(EngineError::replica(PRIMARY_LABEL, e))
        }
    }
}

fn log_ensure(cluster: &str, result: &Result<bool, EngineError>) {
    match result {
        Ok(true) => tracing::info!("Created index on {}", cluster),
        Ok(false) => tracing::info!("Index already present on {}", cluster),
        Err(e) => tracing::warn!("Could not ensure index on {}: {}", cluster, e),
    }
}
