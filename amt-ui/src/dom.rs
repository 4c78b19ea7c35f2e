//! Element lookup and event wiring shared by the page surfaces

use amt_common::{require, Error, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget};

/// Convert a rejected DOM call into [`Error::Dom`]
pub fn js_error(value: JsValue) -> Error {
    Error::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Required element of type `T`; absence means `controller` is not mounted
pub fn element<T: JsCast>(document: &Document, id: &str, controller: &'static str) -> Result<T> {
    require(document.get_element_by_id(id), controller, id)?
        .dyn_into::<T>()
        .map_err(|_| Error::Dom(format!("element '{id}' has an unexpected type")))
}

/// Optional element of type `T`
pub fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// Selector matching checked inputs with the given `name`
pub fn checked_selector(name: &str) -> String {
    format!("input[name=\"{name}\"]:checked")
}

/// Selector matching every input with the given `name`
pub fn named_selector(name: &str) -> String {
    format!("input[name=\"{name}\"]")
}

/// Elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document.query_selector_all(selector).map_err(js_error)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Read a JS property as a string (`""` when absent or not a string)
pub fn string_property(target: &JsValue, name: &str) -> String {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

/// Assign a JS property, as `target[name] = value` would
pub fn set_property(target: &JsValue, name: &str, value: &JsValue) -> Result<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(name), value)
        .map_err(js_error)
        .map(|_| ())
}

/// Attach `handler` for `event` for the lifetime of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // Listeners live as long as the page, so the closure is never reclaimed.
    closure.forget();
    Ok(())
}

/// Attach a submit handler that suppresses the browser's own submission
pub fn on_submit<F>(form: &EventTarget, mut handler: F) -> Result<()>
where
    F: FnMut() + 'static,
{
    listen(form, "submit", move |event| {
        event.prevent_default();
        handler();
    })
}
