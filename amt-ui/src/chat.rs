//! Chat transcript bound to the page

use crate::dom;
use amt_common::chat::{ChatController, ChatSurface, TranscriptEntry, LOADING_ENTRY_ID};
use amt_common::{markup, ElementIds, Result, TutorApi};
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement};

const CONTROLLER: &str = "chat";

/// Message input, RAG toggle, and transcript container
pub struct WebChat {
    document: Document,
    input: Element,
    history: HtmlElement,
    use_rag: Option<HtmlInputElement>,
}

impl WebChat {
    pub fn locate(document: &Document, ids: &ElementIds) -> Result<Self> {
        Ok(Self {
            document: document.clone(),
            input: dom::element(document, &ids.chat_input, CONTROLLER)?,
            history: dom::element(document, &ids.chat_history, CONTROLLER)?,
            use_rag: dom::optional(document, &ids.chat_use_rag),
        })
    }

    fn entry_element(&self, class: &str, html: &str) -> Option<Element> {
        match self.document.create_element("div") {
            Ok(element) => {
                element.set_class_name(class);
                element.set_inner_html(html);
                Some(element)
            }
            Err(e) => {
                warn!("Failed to create transcript entry: {}", dom::js_error(e));
                None
            }
        }
    }
}

impl ChatSurface for WebChat {
    fn message(&self) -> String {
        dom::string_property(&self.input, "value")
    }

    fn clear_message(&self) {
        if let Err(e) = dom::set_property(&self.input, "value", &JsValue::from_str("")) {
            warn!("Failed to clear message input: {}", e);
        }
    }

    fn rag_toggle(&self) -> Option<bool> {
        self.use_rag.as_ref().map(HtmlInputElement::checked)
    }

    fn append_entry(&self, entry: &TranscriptEntry) {
        if let Some(element) = self.entry_element(entry.role.css_class(), &entry.markup()) {
            if let Err(e) = self.history.append_child(&element) {
                warn!("Failed to append transcript entry: {}", dom::js_error(e));
            }
        }
    }

    fn show_loading(&self) {
        if self.document.get_element_by_id(LOADING_ENTRY_ID).is_some() {
            return;
        }
        let class = amt_common::ChatRole::Assistant.css_class();
        if let Some(element) = self.entry_element(class, &markup::chat_loading()) {
            element.set_id(LOADING_ENTRY_ID);
            if let Err(e) = self.history.append_child(&element) {
                warn!("Failed to show loading placeholder: {}", dom::js_error(e));
            }
        }
    }

    fn remove_loading(&self) {
        if let Some(element) = self.document.get_element_by_id(LOADING_ENTRY_ID) {
            element.remove();
        }
    }

    fn scroll_to_end(&self) {
        self.history.set_scroll_top(self.history.scroll_height());
    }
}

/// Bind the chat form; fails with `NotMounted` when the form is absent
pub fn mount<A>(document: &Document, ids: &ElementIds, api: A) -> Result<()>
where
    A: TutorApi + 'static,
{
    let form: HtmlFormElement = dom::element(document, &ids.chat_form, CONTROLLER)?;
    debug!(
        rag_toggle = dom::optional::<HtmlInputElement>(document, &ids.chat_use_rag).is_some(),
        "Chat form found"
    );
    let controller = Rc::new(ChatController::new(WebChat::locate(document, ids)?, api));

    dom::on_submit(&form, move || {
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let outcome = controller.submit().await;
            debug!(?outcome, "Chat submission settled");
        });
    })
}
