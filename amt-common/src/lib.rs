//! # AMT Common Library
//!
//! Browser-independent core of the AI Music Teacher front end:
//! - Backend wire types and the `reqwest` client
//! - Page configuration (endpoints, element ids, logging)
//! - Chat, learning-plan, upload, and visualizer controllers, each generic
//!   over the DOM nodes it touches
//! - HTML fragments rendered into the page

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod markup;
pub mod plan;
pub mod upload;
pub mod visualizer;

pub use api::{ApiError, ApiResult, HttpTutorApi, TutorApi};
pub use chat::{ChatController, ChatOutcome, ChatRole, ChatSurface, TranscriptEntry};
pub use config::{ElementIds, EndpointConfig, LoggingConfig, UiConfig};
pub use error::{require, Error, Result};
pub use plan::{PlanController, PlanForm, PlanOutcome, ResultPanel};
pub use upload::{UploadController, UploadOutcome, UploadSurface};
pub use visualizer::{
    SliderPanel, SliderValues, VisualizationType, VisualizerConfig, VisualizerController,
    VisualizerWidget,
};
