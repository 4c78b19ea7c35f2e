//! Tutor backend API: wire types, the uniform result type, and the HTTP client

pub mod client;
pub mod types;

pub use client::{HttpTutorApi, TutorApi};
pub use types::{settle_reply, ApiError, ApiResult, ChatRequest, PlanRequest, UploadFile};
