//! Async grid flows: loading datasets and sending mutations.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail: transport errors, rejections and malformed bodies are
//! logged and degrade to an empty result. Writes never propagate either;
//! their outcome becomes a [`Notice`] for the user.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::api::{ApiError, RecordClient, Transport};
use crate::endpoint::Endpoint;
use crate::notice::Notice;
use crate::record::Record;
use crate::schema::Schema;
use crate::session::{GridConfig, GridSession, Mutation};

// =============================================================================
// LOADERS
// =============================================================================

/// Field names of the first record served at `url`, or empty.
pub async fn load_keys<T: Transport>(client: &RecordClient<T>, url: &str) -> Vec<String> {
    match client.fetch_records(url).await {
        Ok(records) => match records.first() {
            Some(first) => {
                let keys: Vec<String> = first.keys().cloned().collect();
                log::debug!("keys available at {url}: {keys:?}");
                keys
            }
            None => {
                log::debug!("no records available at {url}");
                Vec::new()
            }
        },
        Err(e) => {
            log::warn!("failed to fetch keys from {url}: {e}");
            Vec::new()
        }
    }
}

/// Columns inferred from the first record served at `url`, or an empty schema.
pub async fn load_schema<T: Transport>(client: &RecordClient<T>, url: &str) -> Schema {
    let records = load_records(client, url).await;
    Schema::from_records(&records)
}

/// Every record served at `url`, or empty.
pub async fn load_records<T: Transport>(client: &RecordClient<T>, url: &str) -> Vec<Record> {
    match client.fetch_records(url).await {
        Ok(records) => {
            if records.is_empty() {
                log::debug!("no records available at {url}");
            } else {
                log::debug!("fetched {} records from {url}", records.len());
            }
            records
        }
        Err(e) => {
            log::warn!("failed to fetch records from {url}: {e}");
            Vec::new()
        }
    }
}

/// Keys and records from a single fetch of `url`, so both describe the same batch.
pub async fn load_dataset<T: Transport>(client: &RecordClient<T>, url: &str) -> (Vec<String>, Vec<Record>) {
    let records = load_records(client, url).await;
    let keys = records.first().map(|r| r.keys().cloned().collect()).unwrap_or_default();
    (keys, records)
}

/// Send `mutation` under `api_base`.
///
/// # Errors
///
/// Returns the [`ApiError`] of the failed call; callers turn it into a notice.
pub async fn send_mutation<T: Transport>(
    client: &RecordClient<T>,
    api_base: &str,
    mutation: &Mutation,
) -> Result<(), ApiError> {
    let request = mutation.request(api_base);
    log::debug!("{} {}", request.method, request.url);
    client.execute(request).await
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// A [`GridSession`] driven by a [`RecordClient`].
pub struct GridController<T> {
    client: RecordClient<T>,
    session: GridSession,
}

impl<T: Transport> GridController<T> {
    #[must_use]
    pub fn new(transport: T, config: GridConfig) -> Self {
        Self { client: RecordClient::new(transport), session: GridSession::new(config) }
    }

    #[must_use]
    pub fn client(&self) -> &RecordClient<T> {
        &self.client
    }

    #[must_use]
    pub fn session(&self) -> &GridSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GridSession {
        &mut self.session
    }

    /// Load the collection at `url`, rebuild the table and make its last path
    /// segment the active resource.
    ///
    /// Returns `false` (and changes nothing) when `url` names no resource.
    pub async fn switch_dataset(&mut self, url: &str) -> bool {
        let Some(endpoint) = Endpoint::from_url(url) else {
            log::warn!("cannot derive a resource from {url}");
            return false;
        };
        let (keys, records) = load_dataset(&self.client, url).await;
        self.session.apply_dataset(endpoint, &keys, records);
        true
    }

    /// Reload the active resource from `{api_base}/{resource}`.
    pub async fn reload(&mut self) {
        let Some((endpoint, url)) = self.session.reload_target() else {
            return;
        };
        let (keys, records) = load_dataset(&self.client, &url).await;
        self.session.apply_reload(&endpoint, &keys, records);
    }

    /// Submit the open dialog. Returns `None` when no form was open.
    pub async fn submit(&mut self) -> Option<Notice> {
        let mutation = self.session.begin_submit()?;
        Some(self.complete(mutation).await)
    }

    /// Delete the record awaiting confirmation. Returns `None` when nothing was pending.
    pub async fn confirm_delete(&mut self) -> Option<Notice> {
        let mutation = self.session.confirm_delete()?;
        Some(self.complete(mutation).await)
    }

    async fn complete(&mut self, mutation: Mutation) -> Notice {
        let result = send_mutation(&self.client, &self.session.config().api_base, &mutation).await;
        let notice = self.session.finish(&mutation, &result);
        if result.is_ok() {
            self.reload().await;
        }
        notice
    }
}
