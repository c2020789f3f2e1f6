/// Binding to the external proxy rewriting engine
///
/// The engine is loaded by the host page and publishes `__uv$config` with a
/// `prefix` and an `encodeUrl` function. Everything here treats it as opaque.
use crate::error::{AppError, AppResult};
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/bridge.js")]
extern "C" {
    fn proxyConfigReady() -> bool;

    #[wasm_bindgen(catch)]
    fn proxyPrefix() -> Result<String, JsValue>;

    #[wasm_bindgen(catch)]
    fn proxyEncodeUrl(url: &str) -> Result<String, JsValue>;
}

pub trait ProxyService {
    fn prefix(&self) -> AppResult<String>;

    fn encode_url(&self, url: &str) -> AppResult<String>;

    /// URL the frame should load to show `target` through the proxy
    fn frame_src(&self, target: &str) -> AppResult<String> {
        Ok(format!("{}{}", self.prefix()?, self.encode_url(target)?))
    }
}

/// The page's `__uv$config`, once it has been defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvProxy(());

impl UvProxy {
    /// Returns the proxy if its configuration has been published.
    pub fn detect() -> Option<UvProxy> {
        if proxyConfigReady() {
            Some(UvProxy(()))
        } else {
            None
        }
    }
}

impl ProxyService for UvProxy {
    fn prefix(&self) -> AppResult<String> {
        proxyPrefix().map_err(|e| AppError::Navigation(format!("proxy prefix: {:?}", e)))
    }

    fn encode_url(&self, url: &str) -> AppResult<String> {
        proxyEncodeUrl(url).map_err(|e| AppError::Navigation(format!("encodeUrl: {:?}", e)))
    }
}
