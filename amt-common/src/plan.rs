//! Learning-plan controller

use crate::api::{ApiError, PlanRequest, TutorApi};
use crate::markup;
use tracing::{debug, warn};

/// Banner text when the plan request fails or the reply is malformed
pub const PLAN_FAILURE_MESSAGE: &str = "Sorry, there was an error generating your learning plan.";

/// The learning-plan form
pub trait PlanForm {
    /// Named form entries in document order, as the browser would submit them
    fn entries(&self) -> Vec<(String, String)>;

    /// Values of the checked goal checkboxes in document order
    fn checked_goals(&self) -> Vec<String>;
}

/// The panel the plan (or an error) is rendered into
pub trait ResultPanel {
    /// Replace the panel's entire contents
    fn set_markup(&self, html: &str);
}

/// How a plan submission settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Rendered,
    ServerError(String),
    Failed(String),
}

/// Learning-plan controller
pub struct PlanController<F, P, A> {
    form: F,
    panel: P,
    api: A,
}

impl<F: PlanForm, P: ResultPanel, A: TutorApi> PlanController<F, P, A> {
    pub fn new(form: F, panel: P, api: A) -> Self {
        Self { form, panel, api }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Collect the form into a request payload
    pub fn collect(&self) -> PlanRequest {
        let entries = self.form.entries();
        for (name, value) in &entries {
            debug!("Form data: {} = {}", name, value);
        }
        let goals = self.form.checked_goals();
        debug!("Selected goals: {:?}", goals);
        PlanRequest::from_form(entries, goals)
    }

    /// Handle one form submission
    ///
    /// The loading markup is in place before the request is issued.
    pub async fn submit(&self) -> PlanOutcome {
        let request = self.collect();
        self.panel.set_markup(&markup::plan_loading());

        match self.api.generate_plan(&request).await {
            Ok(plan) => {
                self.panel.set_markup(&markup::plan_card(&plan));
                PlanOutcome::Rendered
            }
            Err(ApiError::Server(error)) => {
                self.panel.set_markup(&markup::error_banner(&error));
                PlanOutcome::ServerError(error)
            }
            Err(e) => {
                warn!("Learning plan request failed: {}", e);
                self.panel.set_markup(&markup::error_banner(PLAN_FAILURE_MESSAGE));
                PlanOutcome::Failed(e.to_string())
            }
        }
    }
}
