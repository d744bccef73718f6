use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const TOKEN_KEY: &str = "notes_access_token";
pub(crate) const BOOKMARKS_KEY: &str = "notes_bookmarks";

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("localStorage call failed: {0}")]
    Js(String),
    #[error("stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Js(format!("{e:?}"))
}

pub(crate) fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

pub(crate) fn load_token_from_storage() -> Option<String> {
    local_storage()
        .ok()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.trim().is_empty())
}

pub(crate) fn try_load_json<T: for<'de> Deserialize<'de>>(
    key: &str,
) -> Result<Option<T>, StorageError> {
    let storage = local_storage()?;
    match storage.get_item(key).map_err(js_error)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub(crate) fn try_save_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    local_storage()?.set_item(key, &json).map_err(js_error)
}
