//! Learning-plan form bound to the page

use crate::dom;
use amt_common::plan::{PlanController, PlanForm, ResultPanel};
use amt_common::{ElementIds, Result, TutorApi};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlElement, HtmlFormElement, HtmlInputElement};

const CONTROLLER: &str = "learning plan";

/// The plan form plus the document-wide goal checkboxes
pub struct WebPlanForm {
    document: Document,
    form: HtmlFormElement,
    goals_name: String,
}

impl PlanForm for WebPlanForm {
    fn entries(&self) -> Vec<(String, String)> {
        let form_data = match FormData::new_with_form(&self.form) {
            Ok(form_data) => form_data,
            Err(e) => {
                warn!("Failed to read learning plan form: {}", dom::js_error(e));
                return Vec::new();
            }
        };
        let entries = match js_sys::try_iter(&form_data) {
            Ok(Some(entries)) => entries,
            _ => return Vec::new(),
        };

        // Each entry is a [name, value] pair; file values are skipped.
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let pair = entry.dyn_into::<js_sys::Array>().ok()?;
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn checked_goals(&self) -> Vec<String> {
        match dom::query_all(&self.document, &dom::checked_selector(&self.goals_name)) {
            Ok(elements) => elements
                .into_iter()
                .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .collect(),
            Err(e) => {
                warn!("Failed to read selected goals: {}", e);
                Vec::new()
            }
        }
    }
}

/// Container the plan card or error banner is rendered into
pub struct WebResultPanel {
    element: HtmlElement,
}

impl ResultPanel for WebResultPanel {
    fn set_markup(&self, html: &str) {
        self.element.set_inner_html(html);
    }
}

/// Bind the learning-plan form; fails with `NotMounted` when it is absent
pub fn mount<A>(document: &Document, ids: &ElementIds, api: A) -> Result<()>
where
    A: TutorApi + 'static,
{
    let form: HtmlFormElement = dom::element(document, &ids.plan_form, CONTROLLER)?;
    let panel = WebResultPanel {
        element: dom::element(document, &ids.plan_result, CONTROLLER)?,
    };
    let plan_form = WebPlanForm {
        document: document.clone(),
        form: form.clone(),
        goals_name: ids.goals_name.clone(),
    };
    let controller = Rc::new(PlanController::new(plan_form, panel, api));

    dom::on_submit(&form, move || {
        let controller = Rc::clone(&controller);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.submit().await;
            debug!(?outcome, "Learning plan submission settled");
        });
    })
}
