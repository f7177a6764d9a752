//! Hosted data API backend
//!
//! The service exposes a GraphQL endpoint generated from the `SoftwareRelease`
//! schema. Requests are authorized with an `x-api-key` header. Request bodies
//! and response decoding are plain functions so they can be tested without a
//! network.

use super::{ReleaseStore, StoreError, StoreErrorCode};
use crate::release::{RemoteRelease, SoftwareRelease, ingest};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const RELEASE_FIELDS: &str = "id mainVersion goLiveDate frameworkVersion released";

const LIST_QUERY: &str = "query ListSoftwareReleases($nextToken: String) {
  listSoftwareReleases(nextToken: $nextToken) { items { id mainVersion goLiveDate frameworkVersion released } nextToken }
}";

// Upper bound on list pages; guards against a server that never stops returning a token.
const MAX_PAGES: usize = 1000;

// Requests wait as long as the service takes; reqwest's blocking default is 30s.
const REQUEST_TIMEOUT: Option<Duration> = None;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
  pub query: String,
  pub variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
  #[serde(default)]
  data: Option<Value>,
  #[serde(default)]
  errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlError {
  message: String,
  #[serde(default)]
  error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
  #[serde(default)]
  pub items: Vec<Option<RemoteRelease>>,
  #[serde(default)]
  pub next_token: Option<String>,
}

pub fn list_request(next_token: Option<&str>) -> GraphqlRequest {
  GraphqlRequest {
    query: LIST_QUERY.to_string(),
    variables: json!({ "nextToken": next_token }),
  }
}

fn mutation(name: &str, input_type: &str, fields: &str, input: Value) -> GraphqlRequest {
  let op = format!("{}{}", name[..1].to_uppercase(), &name[1..]);
  GraphqlRequest {
    query: format!(
      "mutation {op}($input: {input_type}!) {{\n  {name}(input: $input) {{ {fields} }}\n}}"
    ),
    variables: json!({ "input": input }),
  }
}

fn release_input(release: &SoftwareRelease) -> Value {
  json!({
    "id": release.id,
    "mainVersion": release.main_version,
    "goLiveDate": release.go_live_date,
    "frameworkVersion": release.framework_version,
    "released": release.released,
  })
}

pub fn create_request(release: &SoftwareRelease) -> GraphqlRequest {
  mutation(
    "createSoftwareRelease",
    "CreateSoftwareReleaseInput",
    RELEASE_FIELDS,
    release_input(release),
  )
}

pub fn update_request(release: &SoftwareRelease) -> GraphqlRequest {
  mutation(
    "updateSoftwareRelease",
    "UpdateSoftwareReleaseInput",
    RELEASE_FIELDS,
    release_input(release),
  )
}

pub fn delete_request(id: &str) -> GraphqlRequest {
  mutation("deleteSoftwareRelease", "DeleteSoftwareReleaseInput", "id", json!({ "id": id }))
}

/// Map an HTTP status to an error before looking at the body
pub fn check_status(status: u16, body: &str) -> Result<(), StoreError> {
  match status {
    200..=299 => Ok(()),
    401 | 403 => Err(StoreError::new(
      StoreErrorCode::Unauthorized,
      format!("HTTP {}: API key rejected", status),
    )),
    // GraphQL servers often report request errors with a 4xx and an `errors` body.
    _ if body.contains("\"errors\"") => Ok(()),
    _ => Err(StoreError::new(
      StoreErrorCode::Remote,
      format!("HTTP {}: {}", status, body.chars().take(200).collect::<String>()),
    )),
  }
}

/// Decode `data.<field>` from a GraphQL response body
pub fn decode_response<T: DeserializeOwned>(body: &str, field: &str) -> Result<T, StoreError> {
  let response: GraphqlResponse = serde_json::from_str(body)
    .map_err(|e| StoreError::new(StoreErrorCode::Decode, format!("invalid GraphQL response: {}", e)))?;

  if let Some(errors) = response.errors.filter(|errs| !errs.is_empty()) {
    let code = errors
      .iter()
      .find_map(|e| e.error_type.as_deref().map(classify_error_type))
      .unwrap_or(StoreErrorCode::Remote);
    let message = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
    return Err(StoreError::new(code, message));
  }

  let value = response
    .data
    .and_then(|mut data| data.get_mut(field).map(Value::take))
    .filter(|v| !v.is_null())
    .ok_or_else(|| StoreError::new(StoreErrorCode::NotFound, format!("response has no data for '{}'", field)))?;

  serde_json::from_value(value)
    .map_err(|e| StoreError::new(StoreErrorCode::Decode, format!("unexpected '{}' payload: {}", field, e)))
}

fn classify_error_type(error_type: &str) -> StoreErrorCode {
  if error_type.contains("Unauthorized") {
    StoreErrorCode::Unauthorized
  } else if error_type.contains("ConditionalCheckFailed") {
    StoreErrorCode::NotFound
  } else {
    StoreErrorCode::Remote
  }
}

#[derive(Clone)]
pub struct RemoteStore {
  endpoint: String,
  api_key: String,
  client: Client,
}

impl RemoteStore {
  pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      endpoint: endpoint.into(),
      api_key: api_key.into(),
      client: Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new()),
    }
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  fn execute<T: DeserializeOwned>(&self, request: &GraphqlRequest, field: &str) -> Result<T, StoreError> {
    debug!(endpoint = %self.endpoint, field, "sending GraphQL request");
    let resp = self
      .client
      .post(&self.endpoint)
      .header("x-api-key", &self.api_key)
      .json(request)
      .send()
      .map_err(|e| StoreError::new(StoreErrorCode::Network, e.to_string()))?;

    let status = resp.status().as_u16();
    let body = resp
      .text()
      .map_err(|e| StoreError::new(StoreErrorCode::Network, e.to_string()))?;

    check_status(status, &body)?;
    decode_response(&body, field)
  }
}

impl ReleaseStore for RemoteStore {
  fn name(&self) -> &'static str {
    "remote"
  }

  fn list(&self) -> Result<Vec<SoftwareRelease>, StoreError> {
    let mut releases = Vec::new();
    let mut next_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
      let page: ListPage = self.execute(&list_request(next_token.as_deref()), "listSoftwareReleases")?;
      releases.extend(page.items.into_iter().flatten().map(ingest));
      match page.next_token {
        Some(token) if !token.is_empty() => next_token = Some(token),
        _ => return Ok(releases),
      }
    }

    Err(StoreError::new(
      StoreErrorCode::Remote,
      format!("list did not finish after {} pages", MAX_PAGES),
    ))
  }

  fn create(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    let created: RemoteRelease = self.execute(&create_request(release), "createSoftwareRelease")?;
    Ok(ingest(created))
  }

  fn update(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    let updated: RemoteRelease = self.execute(&update_request(release), "updateSoftwareRelease")?;
    Ok(ingest(updated))
  }

  fn delete(&mut self, id: &str) -> Result<(), StoreError> {
    let _: Value = self.execute(&delete_request(id), "deleteSoftwareRelease")?;
    Ok(())
  }
}
