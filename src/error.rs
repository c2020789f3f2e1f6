/// Error type shared by every fallible operation in Veil
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("Popup blocked. Please allow popups for Cloaking to work.")]
    PopupBlocked,

    #[error("proxy configuration is not available yet")]
    ProxyUnavailable,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("frame navigation failed: {0}")]
    Navigation(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// Wrap a JS exception raised by a DOM call.
    pub fn dom(context: &str, err: JsValue) -> Self {
        AppError::Dom(format!("{}: {:?}", context, err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
