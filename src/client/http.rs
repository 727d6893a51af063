use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::api::FieldErrors;
use crate::client::ClientError;
use crate::services::Resource;

pub const DEFAULT_SERVER: &str = "http://localhost:7040";

/// Talks to one Store Manager server. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base)?;
        // Url::join drops the last segment unless the path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R::Dto>, ClientError> {
        let response = self.send(Method::GET, &collection::<R>(), None::<&()>).await?;
        decode(response).await
    }

    pub async fn get<R: Resource>(&self, id: i64) -> Result<R::Dto, ClientError> {
        let response = self.send(Method::GET, &record::<R>(id), None::<&()>).await?;
        decode(response).await
    }

    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<R::Dto, ClientError> {
        let response = self.send(Method::POST, &collection::<R>(), Some(payload)).await?;
        decode(response).await
    }

    /// PUT to `id`; the payload is expected to carry the same id
    pub async fn update<R: Resource>(
        &self,
        id: i64,
        payload: &R::Payload,
    ) -> Result<R::Dto, ClientError> {
        let response = self.send(Method::PUT, &record::<R>(id), Some(payload)).await?;
        decode(response).await
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ClientError> {
        self.send(Method::DELETE, &record::<R>(id), None::<&()>).await?;
        Ok(())
    }

    /// GET /health. A 503 still carries a body, so it is returned rather than raised.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let url = self.base.join("health")?;
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return decode(response).await;
        }
        decode(check(response).await?).await
    }

    /// GET /api
    pub async fn info(&self) -> Result<Value, ClientError> {
        let response = self.send(Method::GET, "api", None::<&()>).await?;
        decode(response).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError> {
        let url = self.base.join(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        check(request.send().await?).await
    }
}

fn collection<R: Resource>() -> String {
    format!("api/{}", R::NAME)
}

fn record<R: Resource>(id: i64) -> String {
    format!("api/{}/{}", R::NAME, id)
}

/// Turn a non-2xx response into `ClientError::Status`, taking the message
/// and field errors from the JSON body when there is one
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Option<Value> = response.json().await.ok();
    let message = body
        .as_ref()
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    let field_errors = body
        .as_ref()
        .and_then(|b| b.get("field_errors"))
        .and_then(|f| serde_json::from_value::<FieldErrors>(f.clone()).ok())
        .unwrap_or_default();

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
        field_errors,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
