use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::document::ExportFile;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error("no document available")]
    NoDocument,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        DownloadError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Offer `file` as JSON download.
pub fn download(file: &ExportFile) -> Result<(), DownloadError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(DownloadError::NoDocument)?;
    let body = document.body().ok_or(DownloadError::NoDocument)?;

    with_object_url(&json_blob(&file.content)?, |url| {
        let anchor = document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| DownloadError::Js("failed to create anchor".to_string()))?;
        anchor.set_href(url);
        anchor.set_download(&file.name);
        body.append_child(&anchor)?;
        anchor.click();
        anchor.remove();
        Ok(())
    })?;

    debug!("downloaded {}", file.name);
    Ok(())
}

fn json_blob(content: &str) -> Result<Blob, DownloadError> {
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    Ok(Blob::new_with_str_sequence_and_options(
        &js_sys::Array::of1(&JsValue::from_str(content)),
        &options,
    )?)
}

/// Run `f` with an object URL for `blob`. The URL is revoked afterwards, also if `f` fails.
fn with_object_url(
    blob: &Blob,
    f: impl FnOnce(&str) -> Result<(), DownloadError>,
) -> Result<(), DownloadError> {
    let url = Url::create_object_url_with_blob(blob)?;
    let result = f(&url);
    Url::revoke_object_url(&url)?;
    result
}
