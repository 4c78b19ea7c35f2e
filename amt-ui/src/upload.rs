//! Audio upload form bound to the page

use crate::dom;
use amt_common::api::{ApiError, ApiResult, UploadFile};
use amt_common::upload::{UploadController, UploadSurface};
use amt_common::{ElementIds, Result, TutorApi};
use async_trait::async_trait;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, File, HtmlFormElement, HtmlInputElement, HtmlMediaElement, Url, Window};

const CONTROLLER: &str = "upload";

/// File input, result section, and the two media elements
pub struct WebUpload {
    window: Window,
    file_input: HtmlInputElement,
    result_section: Element,
    original_audio: HtmlMediaElement,
    midi_player: Element,
}

impl WebUpload {
    pub fn locate(window: &Window, document: &Document, ids: &ElementIds) -> Result<Self> {
        Ok(Self {
            window: window.clone(),
            file_input: dom::element(document, &ids.upload_file, CONTROLLER)?,
            result_section: dom::element(document, &ids.result_section, CONTROLLER)?,
            original_audio: dom::element(document, &ids.original_audio, CONTROLLER)?,
            midi_player: dom::element(document, &ids.midi_player, CONTROLLER)?,
        })
    }
}

#[async_trait(?Send)]
impl UploadSurface for WebUpload {
    type File = File;

    fn selected_file(&self) -> Option<File> {
        self.file_input.files().and_then(|files| files.get(0))
    }

    async fn read_file(&self, file: &File) -> ApiResult<UploadFile> {
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|e| ApiError::Transport(dom::js_error(e).to_string()))?;
        let content_type = file.type_();
        Ok(UploadFile {
            name: file.name(),
            content_type: (!content_type.is_empty()).then_some(content_type),
            bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
        })
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            warn!("Failed to show alert '{}': {}", message, dom::js_error(e));
        }
    }

    fn reveal_results(&self) {
        if let Err(e) = self.result_section.class_list().remove_1("d-none") {
            warn!("Failed to reveal result section: {}", dom::js_error(e));
        }
    }

    fn bind_original_audio(&self, file: &File) {
        // Object URLs are not revoked; they live as long as the page.
        match Url::create_object_url_with_blob(file) {
            Ok(url) => self.original_audio.set_src(&url),
            Err(e) => warn!("Failed to create object URL: {}", dom::js_error(e)),
        }
    }

    fn bind_midi(&self, midi_path: &str) {
        if let Err(e) = dom::set_property(&self.midi_player, "src", &JsValue::from_str(midi_path)) {
            warn!("Failed to set MIDI player source: {}", e);
        }
    }
}

/// Bind the upload form; fails with `NotMounted` when it is absent
pub fn mount<A>(window: &Window, document: &Document, ids: &ElementIds, api: A) -> Result<()>
where
    A: TutorApi + 'static,
{
    let form: HtmlFormElement = dom::element(document, &ids.upload_form, CONTROLLER)?;
    let controller = Rc::new(UploadController::new(
        WebUpload::locate(window, document, ids)?,
        api,
    ));

    dom::on_submit(&form, move || {
        let controller = Rc::clone(&controller);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = controller.submit().await;
            debug!(?outcome, "Upload settled");
        });
    })
}
