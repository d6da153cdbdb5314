//! Error types shared by the core and the browser adapter.

use thiserror::Error;

/// Result type for backdrop operations.
pub type FxResult<T> = Result<T, FxError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("browser global not available: {0}")]
    MissingGlobal(&'static str),

    #[error("2d context not available on #{0}")]
    NoContext(String),

    #[error("invalid value {value:?} for attribute {name}")]
    InvalidAttribute { name: &'static str, value: String },

    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    #[error("JS exception: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FxError> for wasm_bindgen::JsValue {
    fn from(err: FxError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
