//! REST reads and writes against the tracking backend. All decoding
//! happens here, at the fetch boundary; callers only ever see typed
//! values or a classified error.

use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{DailyEntry, EntryId, HormoneSeries},
    error::BackendDetail,
    protocol::{CreatedEntry, EntryListEnvelope, SymptomPayload},
};
use tracing::debug;

use crate::error::{FetchError, SubmitError};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /daily-entries/`: the full entries list. The backend does
    /// not paginate this read; it returns a bare array.
    pub async fn list_entries(&self) -> Result<Vec<DailyEntry>, FetchError> {
        let response = self
            .http
            .get(format!("{}/daily-entries/", self.base_url))
            .send()
            .await?;
        decode_read(response).await
    }

    /// `GET /daily-entries/?date=...`: filtered singleton list, wrapped
    /// in a `results` envelope by the backend's pagination layer.
    pub async fn entry_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<DailyEntry>, FetchError> {
        let response = self
            .http
            .get(format!("{}/daily-entries/", self.base_url))
            .query(&[("date", date.to_string())])
            .send()
            .await?;
        let envelope: EntryListEnvelope = decode_read(response).await?;
        Ok(envelope.results.into_iter().next())
    }

    /// `GET /dashboard/`: the hormone series for the active cycle.
    pub async fn hormone_series(&self) -> Result<HormoneSeries, FetchError> {
        let response = self
            .http
            .get(format!("{}/dashboard/", self.base_url))
            .send()
            .await?;
        decode_read(response).await
    }

    /// `POST /daily-entries/`: creates the day's entry and returns the
    /// assigned id.
    pub async fn create_entry(
        &self,
        payload: &SymptomPayload,
    ) -> Result<CreatedEntry, SubmitError> {
        debug!(date = %payload.date, "creating daily entry");
        let response = self
            .http
            .post(format!("{}/daily-entries/", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(submit_transport)?;
        if !response.status().is_success() {
            return Err(submit_failure(response).await);
        }
        response.json().await.map_err(submit_transport)
    }

    /// `PATCH /daily-entries/<id>/`: replaces the observations of an
    /// existing entry. The entry id never changes on update.
    pub async fn update_entry(
        &self,
        id: EntryId,
        payload: &SymptomPayload,
    ) -> Result<(), SubmitError> {
        debug!(entry_id = id.0, date = %payload.date, "updating daily entry");
        let response = self
            .http
            .patch(format!("{}/daily-entries/{}/", self.base_url, id.0))
            .json(payload)
            .send()
            .await
            .map_err(submit_transport)?;
        if !response.status().is_success() {
            return Err(submit_failure(response).await);
        }
        Ok(())
    }
}

async fn decode_read<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status });
    }
    response.json().await.map_err(FetchError::Decode)
}

fn submit_transport(err: reqwest::Error) -> SubmitError {
    SubmitError {
        status: err.status(),
        detail: err.to_string(),
    }
}

async fn submit_failure(response: Response) -> SubmitError {
    let status = response.status();
    let detail = response
        .json::<BackendDetail>()
        .await
        .ok()
        .and_then(|body| body.detail)
        .unwrap_or_else(|| format!("server returned {status}"));
    SubmitError {
        status: Some(status),
        detail,
    }
}
