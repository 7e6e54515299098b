//! Fetching rendered Code 128 barcodes for label sheets.
//!
//! The render service is external and best-effort: a code whose fetch
//! fails simply has no image on its label, so the batch helper settles
//! every request and drops the failures.

use std::collections::HashMap;

use futures::future::join_all;
use gloo_net::http::Request;

use crate::core::gateway::{self, ApiError};

/// PNG bytes of the rendered barcode for one registry code.
///
/// # Errors
///
/// [`ApiError::Network`] when the fetch or the body read fails, and
/// [`ApiError::Http`] when the render service rejects the code.
pub async fn fetch_png(registre: &str) -> Result<Vec<u8>, ApiError> {
    let response = Request::get(&gateway::barcode_url(registre))
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(ApiError::Http {
            status: response.status(),
            message: gateway::server_message(response.status(), &response.status_text(), ""),
        });
    }
    response
        .binary()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))
}

/// Fetch barcodes for a whole batch concurrently, keyed by registry code.
/// Codes whose fetch failed are absent from the map.
pub async fn fetch_batch(codes: &[String]) -> HashMap<String, Vec<u8>> {
    let fetches = codes.iter().map(|code| async move {
        let png = fetch_png(code).await.ok();
        (code.clone(), png)
    });
    join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(code, png)| png.map(|bytes| (code, bytes)))
        .collect()
}
