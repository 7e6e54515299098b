//! Client-side file download and the busy cursor toggle.

use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Offer a byte buffer to the user as a file download.
///
/// Builds an object URL over an in-memory blob, clicks a detached anchor
/// at it, and revokes the URL again.
///
/// # Errors
///
/// Fails when the DOM refuses any of the intermediate objects, which only
/// happens outside a browsing context.
pub fn save_bytes(bytes: &[u8], filename: &str, mime: &str) -> anyhow::Result<()> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| anyhow!("create blob: {err:?}"))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|err| anyhow!("create object url: {err:?}"))?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("no document"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|err| anyhow!("create anchor: {err:?}"))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = Url::revoke_object_url(&url);
    Ok(())
}

/// Switch the whole page between the wait cursor and the default one.
pub fn set_busy_cursor(busy: bool) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let cursor = if busy { "wait" } else { "auto" };
    let _ = body.style().set_property("cursor", cursor);
}
