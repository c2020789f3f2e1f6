/// Stealth mode: reopen the page inside a disguised popup
///
/// The popup shows a fake title and icon with a full-bleed frame pointing at
/// the current page, and the original window is sent somewhere unremarkable.
/// This is cosmetic only.
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq)]
pub struct Disguise {
    pub title: String,
    pub icon: String,
    pub redirect: String,
}

impl Disguise {
    pub fn from_config(config: &AppConfig) -> Self {
        Disguise {
            title: config.disguise_title.clone(),
            icon: config.disguise_icon.clone(),
            redirect: config.disguise_redirect.clone(),
        }
    }

    /// Markup written into the popup, framing `src`
    pub fn markup(&self, src: &str) -> String {
        format!(
            r#"<html>
  <head>
    <title>{title}</title>
    <link rel="icon" href="{icon}">
    <style>
      html, body {{
        margin: 0;
        padding: 0;
        height: 100%;
        overflow: hidden;
      }}
      iframe {{
        width: 100%;
        height: 100%;
        border: none;
      }}
    </style>
  </head>
  <body>
    <iframe src="{src}"></iframe>
  </body>
</html>
"#,
            title = escape_html(&self.title),
            icon = escape_html(&self.icon),
            src = escape_html(src),
        )
    }
}

fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// Browser operations stealth mode needs
pub trait PopupHost {
    type Popup;

    fn current_href(&self) -> AppResult<String>;

    /// Open a blank popup; `None` when the browser blocked it
    fn open_blank(&self) -> AppResult<Option<Self::Popup>>;

    fn is_closed(&self, popup: &Self::Popup) -> bool;

    /// Replace the popup document with `markup`
    fn write(&self, popup: &Self::Popup, markup: &str) -> AppResult<()>;

    fn redirect(&self, url: &str) -> AppResult<()>;

    fn alert(&self, message: &str) -> AppResult<()>;
}

/// The current browser window
pub struct BrowserHost {
    window: web_sys::Window,
}

impl BrowserHost {
    pub fn current() -> AppResult<Self> {
        let window = web_sys::window().ok_or_else(|| AppError::Dom("window is unavailable".to_string()))?;
        Ok(BrowserHost { window })
    }
}

impl PopupHost for BrowserHost {
    type Popup = web_sys::Window;

    fn current_href(&self) -> AppResult<String> {
        self.window
            .location()
            .href()
            .map_err(|e| AppError::dom("location.href", e))
    }

    fn open_blank(&self) -> AppResult<Option<web_sys::Window>> {
        self.window
            .open_with_url_and_target("about:blank", "_blank")
            .map_err(|e| AppError::dom("window.open", e))
    }

    fn is_closed(&self, popup: &web_sys::Window) -> bool {
        popup.closed().unwrap_or(true)
    }

    fn write(&self, popup: &web_sys::Window, markup: &str) -> AppResult<()> {
        let document = popup
            .document()
            .ok_or_else(|| AppError::Dom("popup has no document".to_string()))?
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| AppError::Dom("popup document is not an HTML document".to_string()))?;

        let chunks = js_sys::Array::of1(&markup.into());
        document
            .write(&chunks)
            .map_err(|e| AppError::dom("document.write", e))?;
        document
            .close()
            .map_err(|e| AppError::dom("document.close", e))
    }

    fn redirect(&self, url: &str) -> AppResult<()> {
        self.window
            .location()
            .set_href(url)
            .map_err(|e| AppError::dom("location.href", e))
    }

    fn alert(&self, message: &str) -> AppResult<()> {
        self.window
            .alert_with_message(message)
            .map_err(|e| AppError::dom("alert", e))
    }
}

/// Open the disguised popup and navigate this window away.
///
/// Fails with `PopupBlocked` when the browser refuses the popup; nothing else
/// happens in that case.
pub fn launch<H: PopupHost>(host: &H, disguise: &Disguise) -> AppResult<()> {
    let src = host.current_href()?;

    let popup = host.open_blank()?.ok_or(AppError::PopupBlocked)?;
    if host.is_closed(&popup) {
        return Err(AppError::PopupBlocked);
    }

    host.write(&popup, &disguise.markup(&src))?;

    log::info!("Stealth popup opened, leaving for {}", disguise.redirect);
    host.redirect(&disguise.redirect)
}

/// Launch stealth mode, alerting the user when the popup is blocked.
pub fn launch_or_alert<H: PopupHost>(host: &H, disguise: &Disguise) {
    match launch(host, disguise) {
        Ok(()) => {}
        Err(AppError::PopupBlocked) => {
            log::warn!("Stealth popup blocked");
            if let Err(e) = host.alert(&AppError::PopupBlocked.to_string()) {
                log::warn!("Could not show popup warning: {}", e);
            }
        }
        Err(e) => log::warn!("Stealth mode failed: {}", e),
    }
}

/// Stealth mode in the current browser window
pub fn launch_in_browser(disguise: &Disguise) {
    match BrowserHost::current() {
        Ok(host) => launch_or_alert(&host, disguise),
        Err(e) => log::warn!("Stealth mode failed: {}", e),
    }
}
