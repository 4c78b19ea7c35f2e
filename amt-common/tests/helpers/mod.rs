//! Test Helper Utilities
//!
//! In-memory page surfaces and a scripted backend for exercising the
//! controllers without a browser.

#![allow(dead_code)]

pub mod log_capture;

use amt_common::api::{ApiError, ApiResult, ChatRequest, PlanRequest, TutorApi, UploadFile};
use amt_common::chat::{ChatSurface, TranscriptEntry};
use amt_common::plan::{PlanForm, ResultPanel};
use amt_common::upload::UploadSurface;
use amt_common::visualizer::{SliderPanel, VisualizerConfig, VisualizerWidget};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use tokio::sync::oneshot;

pub use log_capture::LogCapture;

// ========================================
// Backend
// ========================================

/// Backend double replaying queued results and recording every request
#[derive(Default)]
pub struct ScriptedApi {
    replies: RefCell<VecDeque<ApiResult<String>>>,
    gated: RefCell<VecDeque<oneshot::Receiver<ApiResult<String>>>>,
    pub chat_requests: RefCell<Vec<ChatRequest>>,
    pub plan_requests: RefCell<Vec<PlanRequest>>,
    pub uploads: RefCell<Vec<UploadFile>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an immediate result for the next request
    pub fn reply(self, result: ApiResult<String>) -> Self {
        self.replies.borrow_mut().push_back(result);
        self
    }

    /// Queue a result the test releases later through the returned sender
    pub fn gate(&self) -> oneshot::Sender<ApiResult<String>> {
        let (tx, rx) = oneshot::channel();
        self.gated.borrow_mut().push_back(rx);
        tx
    }

    pub fn request_count(&self) -> usize {
        self.chat_requests.borrow().len()
            + self.plan_requests.borrow().len()
            + self.uploads.borrow().len()
    }

    async fn next(&self) -> ApiResult<String> {
        let gate = self.gated.borrow_mut().pop_front();
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".to_string())));
        }
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
    }
}

#[async_trait(?Send)]
impl TutorApi for ScriptedApi {
    async fn chat(&self, request: &ChatRequest) -> ApiResult<String> {
        self.chat_requests.borrow_mut().push(request.clone());
        self.next().await
    }

    async fn generate_plan(&self, request: &PlanRequest) -> ApiResult<String> {
        self.plan_requests.borrow_mut().push(request.clone());
        self.next().await
    }

    async fn upload(&self, file: UploadFile) -> ApiResult<String> {
        self.uploads.borrow_mut().push(file);
        self.next().await
    }
}

// ========================================
// Chat
// ========================================

/// One node of the in-memory transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptNode {
    Entry(TranscriptEntry),
    Loading,
}

/// Chat form and transcript held in memory
pub struct MemoryChat {
    pub input: RefCell<String>,
    pub rag: Option<Cell<bool>>,
    pub nodes: RefCell<Vec<TranscriptNode>>,
    pub max_loading_seen: Cell<usize>,
    pub mutations: Cell<usize>,
    pub scrolls: Cell<usize>,
}

impl MemoryChat {
    pub fn new(input: &str, rag: Option<bool>) -> Self {
        Self {
            input: RefCell::new(input.to_string()),
            rag: rag.map(Cell::new),
            nodes: RefCell::new(Vec::new()),
            max_loading_seen: Cell::new(0),
            mutations: Cell::new(0),
            scrolls: Cell::new(0),
        }
    }

    pub fn type_message(&self, text: &str) {
        *self.input.borrow_mut() = text.to_string();
    }

    pub fn entries(&self) -> Vec<TranscriptEntry> {
        self.nodes
            .borrow()
            .iter()
            .filter_map(|node| match node {
                TranscriptNode::Entry(entry) => Some(entry.clone()),
                TranscriptNode::Loading => None,
            })
            .collect()
    }

    pub fn loading_count(&self) -> usize {
        self.nodes
            .borrow()
            .iter()
            .filter(|node| **node == TranscriptNode::Loading)
            .count()
    }

    fn touched(&self) {
        self.mutations.set(self.mutations.get() + 1);
        let loading = self.loading_count();
        if loading > self.max_loading_seen.get() {
            self.max_loading_seen.set(loading);
        }
    }
}

impl ChatSurface for MemoryChat {
    fn message(&self) -> String {
        self.input.borrow().clone()
    }

    fn clear_message(&self) {
        self.input.borrow_mut().clear();
        self.touched();
    }

    fn rag_toggle(&self) -> Option<bool> {
        self.rag.as_ref().map(Cell::get)
    }

    fn append_entry(&self, entry: &TranscriptEntry) {
        self.nodes
            .borrow_mut()
            .push(TranscriptNode::Entry(entry.clone()));
        self.touched();
    }

    fn show_loading(&self) {
        if self.loading_count() == 0 {
            self.nodes.borrow_mut().push(TranscriptNode::Loading);
        }
        self.touched();
    }

    fn remove_loading(&self) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(index) = nodes.iter().position(|node| *node == TranscriptNode::Loading) {
            nodes.remove(index);
        }
        drop(nodes);
        self.touched();
    }

    fn scroll_to_end(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

// ========================================
// Learning plan
// ========================================

/// Learning-plan form contents
pub struct MemoryPlanForm {
    pub entries: Vec<(String, String)>,
    pub goals: Vec<String>,
}

impl MemoryPlanForm {
    pub fn new(entries: &[(&str, &str)], goals: &[&str]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            goals: goals.iter().map(|g| g.to_string()).collect(),
        }
    }
}

impl PlanForm for MemoryPlanForm {
    fn entries(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }

    fn checked_goals(&self) -> Vec<String> {
        self.goals.clone()
    }
}

/// Result panel recording every markup replacement
#[derive(Default)]
pub struct MemoryPanel {
    pub history: RefCell<Vec<String>>,
}

impl MemoryPanel {
    pub fn current(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_default()
    }
}

impl ResultPanel for MemoryPanel {
    fn set_markup(&self, html: &str) {
        self.history.borrow_mut().push(html.to_string());
    }
}

// ========================================
// Upload
// ========================================

/// Stand-in for a browser `File`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Upload form, result section, and media elements
#[derive(Default)]
pub struct MemoryUpload {
    pub file: Option<MemoryFile>,
    pub unreadable: bool,
    pub alerts: RefCell<Vec<String>>,
    pub revealed: Cell<bool>,
    pub audio_src: RefCell<Option<String>>,
    pub midi_src: RefCell<Option<String>>,
}

impl MemoryUpload {
    pub fn with_file(name: &str, bytes: &[u8]) -> Self {
        Self {
            file: Some(MemoryFile {
                name: name.to_string(),
                bytes: bytes.to_vec(),
            }),
            ..Self::default()
        }
    }
}

#[async_trait(?Send)]
impl UploadSurface for MemoryUpload {
    type File = MemoryFile;

    fn selected_file(&self) -> Option<MemoryFile> {
        self.file.clone()
    }

    async fn read_file(&self, file: &MemoryFile) -> ApiResult<UploadFile> {
        if self.unreadable {
            return Err(ApiError::Transport("file could not be read".to_string()));
        }
        Ok(UploadFile {
            name: file.name.clone(),
            content_type: Some("audio/mpeg".to_string()),
            bytes: file.bytes.clone(),
        })
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn reveal_results(&self) {
        self.revealed.set(true);
    }

    fn bind_original_audio(&self, file: &MemoryFile) {
        *self.audio_src.borrow_mut() = Some(format!("blob:local/{}", file.name));
    }

    fn bind_midi(&self, midi_path: &str) {
        *self.midi_src.borrow_mut() = Some(midi_path.to_string());
    }
}

// ========================================
// Visualizer
// ========================================

/// Visualizer element recording property writes
#[derive(Default)]
pub struct MemoryWidget {
    pub kind: RefCell<Option<String>>,
    pub configs: RefCell<Vec<VisualizerConfig>>,
}

impl MemoryWidget {
    pub fn config_json(&self) -> serde_json::Value {
        let configs = self.configs.borrow();
        let last = configs.last().expect("no config assigned");
        serde_json::to_value(last).unwrap()
    }
}

impl VisualizerWidget for MemoryWidget {
    fn set_type(&self, value: &str) {
        *self.kind.borrow_mut() = Some(value.to_string());
    }

    fn set_config(&self, config: &VisualizerConfig) {
        self.configs.borrow_mut().push(*config);
    }
}

/// Radio group and range sliders
pub struct MemorySliders {
    pub selected: RefCell<Option<String>>,
    pub note_height: RefCell<String>,
    pub note_speed: RefCell<String>,
    pub note_height_label: RefCell<String>,
    pub note_speed_label: RefCell<String>,
}

impl MemorySliders {
    pub fn new(selected: Option<&str>, note_height: &str, note_speed: &str) -> Self {
        Self {
            selected: RefCell::new(selected.map(str::to_string)),
            note_height: RefCell::new(note_height.to_string()),
            note_speed: RefCell::new(note_speed.to_string()),
            note_height_label: RefCell::new(String::new()),
            note_speed_label: RefCell::new(String::new()),
        }
    }
}

impl SliderPanel for MemorySliders {
    fn selected_type(&self) -> Option<String> {
        self.selected.borrow().clone()
    }

    fn note_height(&self) -> String {
        self.note_height.borrow().clone()
    }

    fn note_speed(&self) -> String {
        self.note_speed.borrow().clone()
    }

    fn show_note_height(&self, value: &str) {
        *self.note_height_label.borrow_mut() = value.to_string();
    }

    fn show_note_speed(&self, value: &str) {
        *self.note_speed_label.borrow_mut() = value.to_string();
    }
}
