//! Browser-mediated "save as" for exported PNG bytes.

use sigpad_editor::Export;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Wrap the PNG in a `Blob`, click a temporary `<a download>` pointing at
/// it, and revoke the object URL afterwards.
pub fn trigger_download(export: &Export) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let bytes = js_sys::Uint8Array::from(export.png.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&export.file_name);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Url::revoke_object_url(&url)?;

    log::debug!("download of {} triggered", export.file_name);
    Ok(())
}
