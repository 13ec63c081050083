//! HTTP client for the ETL service.
//!
//! One async method per endpoint. Every failure is mapped to
//! [`ApiError`]: transport problems become `Network`, non-2xx answers become
//! `Server` carrying the service's `detail`, and bodies that do not match the
//! expected model become `Decode`.

use std::rc::Rc;
use std::time::Duration;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::error::ApiError;
use common::jobs::poller::{JobStatusSource, Sleeper};
use common::jobs::{ImportJob, SubmitResponse};
use common::model::arquivo::Arquivo;
use common::model::config::{ConfigKey, ConfigUpdate, ConfiguracaoDetalhe, Configuracoes};
use common::model::documento::Documento;
use common::model::log::EtlLog;
use common::model::page::Paginated;
use common::model::restore::{RestoreRequest, RestoreResponse};
use common::model::stats::Stats;
use common::model::verify::{VerifyRequest, VerifyResponse};
use common::model::ErrorBody;
use common::requests::{ArquivoQuery, DocumentoQuery, LogQuery};

use crate::config;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: Rc<str>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(config::api_base_url())
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn stats(&self) -> Result<Stats, ApiError> {
        read(Request::get(&self.url("/stats")).send().await).await
    }

    pub async fn documentos(&self, query: &DocumentoQuery) -> Result<Paginated<Documento>, ApiError> {
        let request = Request::get(&self.url("/documentos")).query(query.to_pairs());
        read(request.send().await).await
    }

    pub async fn documento(&self, id: i64) -> Result<Documento, ApiError> {
        read(Request::get(&self.url(&format!("/documentos/{}", id))).send().await).await
    }

    pub async fn arquivos(&self, query: &ArquivoQuery) -> Result<Paginated<Arquivo>, ApiError> {
        let request = Request::get(&self.url("/arquivos")).query(query.to_pairs());
        read(request.send().await).await
    }

    pub async fn arquivo(&self, id: i64) -> Result<Arquivo, ApiError> {
        read(Request::get(&self.url(&format!("/arquivos/{}", id))).send().await).await
    }

    pub async fn logs(&self, query: &LogQuery) -> Result<Vec<EtlLog>, ApiError> {
        let request = Request::get(&self.url("/logs")).query(query.to_pairs());
        read(request.send().await).await
    }

    pub async fn restore(&self, body: &RestoreRequest) -> Result<RestoreResponse, ApiError> {
        self.post_json("/restore", body).await
    }

    pub async fn verify(&self, body: &VerifyRequest) -> Result<VerifyResponse, ApiError> {
        self.post_json("/verify", body).await
    }

    pub async fn configuracoes(&self) -> Result<Configuracoes, ApiError> {
        read(Request::get(&self.url("/configuracoes")).send().await).await
    }

    pub async fn todas_configuracoes(&self) -> Result<Vec<ConfiguracaoDetalhe>, ApiError> {
        read(Request::get(&self.url("/configuracoes/todas")).send().await).await
    }

    pub async fn atualizar_configuracao(
        &self,
        key: ConfigKey,
        valor: String,
    ) -> Result<ConfiguracaoDetalhe, ApiError> {
        let request = Request::put(&self.url(&format!("/configuracoes/{}", key.as_str())))
            .json(&ConfigUpdate { valor })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        read(request.send().await).await
    }

    /// Uploads a batch file. With `async_mode` the service answers with a job
    /// id right away instead of importing inline.
    pub async fn submit_import(
        &self,
        file: &web_sys::File,
        async_mode: bool,
    ) -> Result<SubmitResponse, ApiError> {
        let form = web_sys::FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", file, &file.name())
            .map_err(js_error)?;
        form.append_with_str("async", if async_mode { "true" } else { "false" })
            .map_err(js_error)?;

        let request = Request::post(&self.url("/import"))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read(request.send().await).await
    }

    pub async fn import_status(&self, job_id: &str) -> Result<ImportJob, ApiError> {
        read(Request::get(&self.url(&format!("/import/status/{}", job_id))).send().await).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let request = Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        read(request.send().await).await
    }
}

impl JobStatusSource for ApiClient {
    async fn job_status(&self, job_id: &str) -> Result<ImportJob, ApiError> {
        self.import_status(job_id).await
    }
}

/// Browser timer for the job poller.
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

async fn read<T: DeserializeOwned>(
    response: Result<Response, gloo_net::Error>,
) -> Result<T, ApiError> {
    let response = response.map_err(|e| ApiError::Network(e.to_string()))?;
    if !response.ok() {
        let status = response.status();
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message());
        return Err(ApiError::Server { status, detail });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn js_error(value: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
