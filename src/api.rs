use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::db::Database;
use crate::models::{Opening, ResumeRecord};

pub const DEFAULT_API_URL: &str = "https://xpo-ats.onrender.com/api/extension";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const OPENING_ID_KEYS: [&str; 4] = ["openingId", "opening_id", "id", "_id"];
const OPENING_TITLE_KEYS: [&str; 3] = ["title", "name", "jobTitle"];

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Screening service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response from screening service: {0}")]
    Malformed(String),

    #[error("Screening service did not return a report link")]
    MissingLink,

    #[error("No openings available")]
    NoOpenings,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("No opening selected; pass --opening <id> (see `resdex openings`)")]
    NoOpeningSelected,

    #[error("No extracted resume stored; run `resdex extract <file>` first")]
    NoStoredRecord,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ReportRequest<'a> {
    pub opening_id: &'a str,
    pub candidate: &'a ResumeRecord,
    #[serde(rename = "cleanedResumeHtml", skip_serializing_if = "Option::is_none")]
    pub cleaned_resume_html: Option<&'a str>,
}

pub trait ScreeningApi {
    fn fetch_openings(&self) -> Result<Vec<Opening>, ApiError>;
    fn generate_report(&self, request: &ReportRequest) -> Result<String, ApiError>;
}

pub struct HttpScreeningApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpScreeningApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn read_body(response: reqwest::blocking::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().map_err(transport_error)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "screening service responded");
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(REQUEST_TIMEOUT)
    } else {
        ApiError::Transport(e.to_string())
    }
}

impl ScreeningApi for HttpScreeningApi {
    fn fetch_openings(&self) -> Result<Vec<Opening>, ApiError> {
        let url = self.endpoint("fetchOpenings");
        tracing::info!(%url, "fetching openings");
        let response = self.client.get(&url).send().map_err(transport_error)?;
        parse_openings(&Self::read_body(response)?)
    }

    fn generate_report(&self, request: &ReportRequest) -> Result<String, ApiError> {
        let url = self.endpoint("generateScreeningReport");
        tracing::info!(%url, opening = request.opening_id, "requesting screening report");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(transport_error)?;
        parse_report_link(&Self::read_body(response)?)
    }
}

fn string_field(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match item.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub fn parse_openings(body: &str) -> Result<Vec<Opening>, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    let items = value
        .as_array()
        .or_else(|| value.get("openings").and_then(Value::as_array))
        .or_else(|| value.get("data").and_then(Value::as_array))
        .ok_or_else(|| ApiError::Malformed("expected a list of openings".to_string()))?;

    let openings: Vec<Opening> = items
        .iter()
        .filter_map(|item| {
            Some(Opening {
                opening_id: string_field(item, &OPENING_ID_KEYS)?,
                title: string_field(item, &OPENING_TITLE_KEYS)
                    .unwrap_or_else(|| "Untitled opening".to_string()),
            })
        })
        .collect();

    if openings.is_empty() {
        return Err(ApiError::NoOpenings);
    }
    Ok(openings)
}

pub fn parse_report_link(body: &str) -> Result<String, ApiError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;
    value
        .get("webViewLink")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingLink)
}

pub fn selected_opening(opening_id: Option<&str>) -> Result<&str, ReportError> {
    opening_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ReportError::NoOpeningSelected)
}

pub fn request_report(
    api: &dyn ScreeningApi,
    db: &Database,
    opening_id: Option<&str>,
    cleaned_html: Option<&str>,
) -> Result<String, ReportError> {
    let opening_id = selected_opening(opening_id)?;
    let record = db.latest_record()?.ok_or(ReportError::NoStoredRecord)?;

    let stored_html = match cleaned_html {
        Some(_) => None,
        None => db.source_html()?,
    };
    let request = ReportRequest {
        opening_id,
        candidate: &record,
        cleaned_resume_html: cleaned_html.or(stored_html.as_deref()),
    };
    let link = api.generate_report(&request)?;
    tracing::info!(opening = opening_id, "screening report ready");
    Ok(link)
}
