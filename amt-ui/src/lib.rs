//! # AMT UI
//!
//! Browser entry point of the AI Music Teacher front end. On load it reads the
//! page configuration, installs console logging, and mounts each controller
//! whose root element exists:
//! - chat (`#chatForm`)
//! - learning plan (`#learningPlanForm`)
//! - upload (`#uploadForm`)
//! - visualizer (`#midiVisualizer`)
//!
//! A missing root element is logged and leaves the other controllers alone.
//!
//! Only meaningful on `wasm32`; on other targets this crate is empty.

#[cfg(target_arch = "wasm32")]
mod chat;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod plan;
#[cfg(target_arch = "wasm32")]
mod upload;
#[cfg(target_arch = "wasm32")]
mod visualizer;

/// Element id of the optional embedded TOML configuration block
pub const CONFIG_ELEMENT_ID: &str = "amt-config";

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::{chat, dom, logging, plan, upload, visualizer, CONFIG_ELEMENT_ID};
    use amt_common::{Error, HttpTutorApi, UiConfig};
    use anyhow::{anyhow, Context, Result};
    use std::rc::Rc;
    use tracing::{error, info, warn};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Window};

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        if let Err(e) = boot() {
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "AMT front end failed to start: {e:#}"
            )));
        }
    }

    fn boot() -> Result<()> {
        let window = web_sys::window().context("window is unavailable")?;
        let document = window.document().context("document is unavailable")?;

        if document.ready_state() == "loading" {
            let deferred = document.clone();
            dom::listen(&document, "DOMContentLoaded", move |_| {
                if let Err(e) = mount_all(&window, &deferred) {
                    error!("AMT front end failed to mount: {:#}", e);
                }
            })?;
            Ok(())
        } else {
            mount_all(&window, &document)
        }
    }

    fn mount_all(window: &Window, document: &Document) -> Result<()> {
        let (config, config_error) = match load_config(document) {
            Ok(config) => (config, None),
            Err(e) => (UiConfig::default(), Some(e)),
        };

        logging::init(&config.logging.level);
        info!("Starting AMT front end v{}", env!("CARGO_PKG_VERSION"));
        if let Some(e) = config_error {
            warn!("Ignoring embedded configuration: {}", e);
        }

        let base_url = match &config.endpoints.base_url {
            Some(base_url) => base_url.clone(),
            None => window
                .location()
                .origin()
                .map_err(|e| anyhow!("page origin is unavailable: {}", dom::js_error(e)))?,
        };
        info!("Backend: {}", base_url);
        let api = Rc::new(HttpTutorApi::new(&base_url, &config.endpoints));
        let ids = &config.elements;

        report("chat", chat::mount(document, ids, Rc::clone(&api)));
        report("learning plan", plan::mount(document, ids, Rc::clone(&api)));
        report("upload", upload::mount(window, document, ids, api));
        report("visualizer", visualizer::mount(document, ids));
        Ok(())
    }

    /// Parse the embedded TOML block, or defaults when the page has none
    fn load_config(document: &Document) -> amt_common::Result<UiConfig> {
        match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(block) => UiConfig::from_toml_str(&block.text_content().unwrap_or_default()),
            None => Ok(UiConfig::default()),
        }
    }

    fn report(controller: &str, result: amt_common::Result<()>) {
        match result {
            Ok(()) => info!("✓ {} controller mounted", controller),
            Err(e @ Error::NotMounted { .. }) => info!("{}", e),
            Err(e) => error!("Failed to mount {} controller: {}", controller, e),
        }
    }
}
