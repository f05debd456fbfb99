//! Reqwest adapter for the Practicum homework-review API.
//!
//! Implements the `hwbot-core` ReviewApi port: a timestamped GET with an
//! `Authorization: OAuth <token>` header, followed by shape validation of the
//! JSON body.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use hwbot_core::{
    domain::{Homework, StatusPage},
    errors::Error,
    ports::ReviewApi,
    Result,
};

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<StatusPage> {
        debug!(url = %self.endpoint, from_date, "requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| Error::Network {
                url: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| Error::Network {
            url: self.endpoint.clone(),
            reason: e.to_string(),
        })?;

        parse_status_page(&body)
    }
}

/// Wire shape of one homework entry. Extra fields the API sends
/// (`reviewer_comment`, `lesson_name`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct HomeworkWire {
    homework_name: String,
    status: String,
    #[serde(default)]
    date_updated: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StatusPageWire {
    homeworks: Vec<HomeworkWire>,
    current_date: i64,
}

/// Validate the raw body against the expected response shape.
///
/// A missing or ill-typed `homeworks` / `current_date` field (or a body that
/// is not JSON at all) is an [`Error::UnexpectedResponse`].
pub fn parse_status_page(body: &str) -> Result<StatusPage> {
    let wire: StatusPageWire =
        serde_json::from_str(body).map_err(|e| Error::UnexpectedResponse(e.to_string()))?;

    Ok(StatusPage {
        homeworks: wire
            .homeworks
            .into_iter()
            .map(|h| Homework {
                name: h.homework_name,
                status: h.status,
                date_updated: h.date_updated,
            })
            .collect(),
        current_date: wire.current_date,
    })
}
