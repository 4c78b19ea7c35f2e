//! Tutor backend client
//!
//! [`TutorApi`] is the seam the controllers are written against. Futures are
//! `?Send` because browser fetch futures are bound to the page's event loop.

use super::types::{settle_reply, ApiError, ApiResult, ChatRequest, PlanRequest, UploadFile};
use crate::config::EndpointConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::rc::Rc;
use tracing::debug;

/// Backend operations used by the page controllers
#[async_trait(?Send)]
pub trait TutorApi {
    /// `POST /chat`, yielding the assistant reply
    async fn chat(&self, request: &ChatRequest) -> ApiResult<String>;

    /// `POST /generate-plan`, yielding the plan as an HTML fragment
    async fn generate_plan(&self, request: &PlanRequest) -> ApiResult<String>;

    /// `POST /upload`, yielding the server path of the transcribed MIDI file
    async fn upload(&self, file: UploadFile) -> ApiResult<String>;
}

/// One client shared by every controller on the page
#[async_trait(?Send)]
impl<T: TutorApi + ?Sized> TutorApi for Rc<T> {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<String> {
        (**self).chat(request).await
    }

    async fn generate_plan(&self, request: &PlanRequest) -> ApiResult<String> {
        (**self).generate_plan(request).await
    }

    async fn upload(&self, file: UploadFile) -> ApiResult<String> {
        (**self).upload(file).await
    }
}

/// `reqwest`-backed [`TutorApi`]
#[derive(Clone)]
pub struct HttpTutorApi {
    client: Client,
    chat_url: String,
    plan_url: String,
    upload_url: String,
}

impl HttpTutorApi {
    /// Resolve every endpoint path in `endpoints` against `base_url`
    pub fn new(base_url: &str, endpoints: &EndpointConfig) -> Self {
        Self {
            client: Client::new(),
            chat_url: EndpointConfig::resolve(base_url, &endpoints.chat),
            plan_url: EndpointConfig::resolve(base_url, &endpoints.generate_plan),
            upload_url: EndpointConfig::resolve(base_url, &endpoints.upload),
        }
    }

    async fn read_reply(response: Response, field: &str) -> ApiResult<String> {
        debug!("Response status: {}", response.status());
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        settle_reply(&body, field)
    }
}

#[async_trait(?Send)]
impl TutorApi for HttpTutorApi {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<String> {
        debug!(use_rag = request.use_rag, "Sending request to {}", self.chat_url);
        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::read_reply(response, "response").await
    }

    async fn generate_plan(&self, request: &PlanRequest) -> ApiResult<String> {
        debug!("Sending request to {}", self.plan_url);
        let response = self
            .client
            .post(&self.plan_url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::read_reply(response, "plan").await
    }

    async fn upload(&self, file: UploadFile) -> ApiResult<String> {
        debug!(
            file = %file.name,
            bytes = file.bytes.len(),
            "Sending request to {}",
            self.upload_url
        );
        let part = Part::bytes(file.bytes).file_name(file.name);
        let part = match file.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            Some(content_type) => part
                .mime_str(content_type)
                .map_err(|e| ApiError::Transport(e.to_string()))?,
            None => part,
        };
        let form = Form::new().part(UploadFile::FIELD, part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::read_reply(response, "midi_path").await
    }
}
