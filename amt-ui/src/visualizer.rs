//! Visualizer element, type radios, and range sliders

use crate::dom;
use amt_common::visualizer::{SliderPanel, VisualizerConfig, VisualizerController, VisualizerWidget};
use amt_common::{ElementIds, Result};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

const CONTROLLER: &str = "visualizer";

/// The `midi-visualizer` custom element
pub struct WebVisualizer {
    element: Element,
}

impl WebVisualizer {
    fn assign_config(&self, config: &VisualizerConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        let value = js_sys::JSON::parse(&json).map_err(dom::js_error)?;
        dom::set_property(&self.element, "config", &value)
    }
}

impl VisualizerWidget for WebVisualizer {
    fn set_type(&self, value: &str) {
        if let Err(e) = dom::set_property(&self.element, "type", &JsValue::from_str(value)) {
            warn!("Failed to set visualizer type: {}", e);
        }
    }

    fn set_config(&self, config: &VisualizerConfig) {
        if let Err(e) = self.assign_config(config) {
            warn!("Failed to set visualizer config: {}", e);
        }
    }
}

/// Range sliders with their value labels, and the type radio group
pub struct WebSliders {
    document: Document,
    type_name: String,
    note_height: Option<HtmlInputElement>,
    note_height_value: Option<HtmlElement>,
    note_speed: Option<HtmlInputElement>,
    note_speed_value: Option<HtmlElement>,
}

impl SliderPanel for WebSliders {
    fn selected_type(&self) -> Option<String> {
        self.document
            .query_selector(&dom::checked_selector(&self.type_name))
            .ok()
            .flatten()
            .map(|radio| dom::string_property(&radio, "value"))
    }

    fn note_height(&self) -> String {
        self.note_height.as_ref().map(HtmlInputElement::value).unwrap_or_default()
    }

    fn note_speed(&self) -> String {
        self.note_speed.as_ref().map(HtmlInputElement::value).unwrap_or_default()
    }

    fn show_note_height(&self, value: &str) {
        if let Some(label) = &self.note_height_value {
            label.set_text_content(Some(value));
        }
    }

    fn show_note_speed(&self, value: &str) {
        if let Some(label) = &self.note_speed_value {
            label.set_text_content(Some(value));
        }
    }
}

/// Bind radios and sliders to the visualizer; fails with `NotMounted` when
/// the visualizer element is absent
pub fn mount(document: &Document, ids: &ElementIds) -> Result<()> {
    let widget = WebVisualizer {
        element: dom::element(document, &ids.visualizer, CONTROLLER)?,
    };
    let sliders = WebSliders {
        document: document.clone(),
        type_name: ids.visualization_type_name.clone(),
        note_height: dom::optional(document, &ids.note_height),
        note_height_value: dom::optional(document, &ids.note_height_value),
        note_speed: dom::optional(document, &ids.note_speed),
        note_speed_value: dom::optional(document, &ids.note_speed_value),
    };
    // A slider is live only when its value label exists too.
    let live_sliders: Vec<HtmlInputElement> = [
        (&sliders.note_height, sliders.note_height_value.is_some()),
        (&sliders.note_speed, sliders.note_speed_value.is_some()),
    ]
    .into_iter()
    .filter_map(|(slider, labelled)| slider.clone().filter(|_| labelled))
    .collect();

    let controller = Rc::new(VisualizerController::new(widget, sliders));

    let radios = dom::query_all(document, &dom::named_selector(&ids.visualization_type_name))?;
    debug!(radios = radios.len(), sliders = live_sliders.len(), "Binding visualizer controls");
    for radio in radios {
        let controller = Rc::clone(&controller);
        let source = radio.clone();
        dom::listen(&radio, "change", move |_| {
            controller.select_type(&dom::string_property(&source, "value"));
        })?;
    }

    for slider in live_sliders {
        let controller = Rc::clone(&controller);
        dom::listen(&slider, "input", move |_| {
            controller.slider_moved();
        })?;
    }

    Ok(())
}
