use std::future::Future;

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::WebError;
use crate::assets::AssetSource;
use crate::error::EngineResult;

/// Reads assets with `fetch`, relative to a base URL
#[derive(Debug, Clone)]
pub struct FetchSource {
    base: String,
}

impl FetchSource {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url_for(&self, uri: &str) -> String {
        let base = self.base.trim_end_matches('/');
        if base.is_empty() || base == "." {
            uri.to_string()
        } else {
            format!("{}/{}", base, uri)
        }
    }
}

async fn fetch_bytes(url: String) -> Result<Vec<u8>, WebError> {
    let fetch_error = |reason: String| WebError::Fetch {
        url: url.clone(),
        reason,
    };

    let window = web_sys::window().ok_or(WebError::JsError("No window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| fetch_error(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| fetch_error("invalid response".into()))?;

    if !response.ok() {
        return Err(fetch_error(format!("HTTP {}", response.status())));
    }

    let buffer_promise = response
        .array_buffer()
        .map_err(|e| fetch_error(format!("{:?}", e)))?;
    let array_buffer = JsFuture::from(buffer_promise)
        .await
        .map_err(|e| fetch_error(format!("{:?}", e)))?;

    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}

impl AssetSource for FetchSource {
    fn read(&self, uri: &str) -> impl Future<Output = EngineResult<Vec<u8>>> {
        let url = self.url_for(uri);
        async move {
            log::debug!("[web::FetchSource] GET {}", url);
            Ok(fetch_bytes(url).await?)
        }
    }
}
