//! Cliente HTTP del portal
//!
//! Cliente tipado sobre la API REST, el mismo conjunto de operaciones que
//! usa el formulario web: cadastrar, listar, consultar, aprobar, reprobar,
//! actualizar y descargar documentos.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::dto::company_dto::{ApiResponse, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest};
use crate::models::document::DocumentKind;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Documento descargado
#[derive(Debug, Clone)]
pub struct DownloadedDocument {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Cliente HTTP para la API del portal
pub struct PortalClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Token de rol enviado como `Authorization: Bearer`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn create(
        &self,
        request: &CreateCompanyRequest,
        internal: bool,
    ) -> Result<ApiResponse<CompanyResponse>, ClientError> {
        let url = format!("{}/companies", self.base_url);
        let builder = self
            .http
            .post(url)
            .query(&[("internal", internal)])
            .json(request);
        self.send_json(builder).await
    }

    pub async fn list(&self) -> Result<Vec<CompanyResponse>, ClientError> {
        let url = format!("{}/companies", self.base_url);
        self.send_json(self.http.get(url)).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CompanyResponse, ClientError> {
        let url = format!("{}/companies/{}", self.base_url, id);
        self.send_json(self.http.get(url)).await
    }

    pub async fn approve(&self, id: Uuid) -> Result<ApiResponse<CompanyResponse>, ClientError> {
        let url = format!("{}/companies/{}/approve", self.base_url, id);
        self.send_json(self.http.patch(url)).await
    }

    pub async fn reject(&self, id: Uuid, reason: &str) -> Result<ApiResponse<CompanyResponse>, ClientError> {
        let url = format!("{}/companies/{}/reject", self.base_url, id);
        self.send_json(self.http.patch(url).json(&json!({ "motivo": reason })))
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateCompanyRequest,
    ) -> Result<ApiResponse<CompanyResponse>, ClientError> {
        let url = format!("{}/companies/{}", self.base_url, id);
        self.send_json(self.http.patch(url).json(request)).await
    }

    pub async fn download_document(
        &self,
        id: Uuid,
        kind: DocumentKind,
    ) -> Result<DownloadedDocument, ClientError> {
        let url = format!("{}/companies/{}/documents/{}", self.base_url, id, kind.as_path());
        let response = self.send(self.http.get(url)).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedDocument { content_type, bytes })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body: ErrorBody = response.json().await.unwrap_or(ErrorBody {
            code: String::new(),
            message: format!("Error HTTP: {}", status),
        });
        Err(ClientError::Api {
            status,
            code: body.code,
            message: body.message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }
}
