/// Native navigation inside a tab's embedded frame
use crate::error::{AppError, AppResult};
use crate::session::NavStep;
use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;

fn frame(frame_id: &str) -> AppResult<HtmlIFrameElement> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(frame_id))
        .ok_or_else(|| AppError::Navigation(format!("no frame #{}", frame_id)))?
        .dyn_into::<HtmlIFrameElement>()
        .map_err(|_| AppError::Navigation(format!("#{} is not a frame", frame_id)))
}

fn frame_window(frame_id: &str) -> AppResult<web_sys::Window> {
    frame(frame_id)?
        .content_window()
        .ok_or_else(|| AppError::Navigation(format!("#{} has no window", frame_id)))
}

fn try_step(frame_id: &str, step: NavStep) -> AppResult<()> {
    let history = frame_window(frame_id)?
        .history()
        .map_err(|e| AppError::Navigation(format!("{:?}", e)))?;

    match step {
        NavStep::Back => history.back(),
        NavStep::Forward => history.forward(),
    }
    .map_err(|e| AppError::Navigation(format!("{:?}", e)))
}

/// Ask the frame to go back/forward. Failures are logged and swallowed; the
/// session cursor has already moved.
pub fn step(frame_id: &str, step: NavStep) {
    if let Err(e) = try_step(frame_id, step) {
        log::warn!("{:?} in #{}: {}", step, frame_id, e);
    }
}

pub fn reload(frame_id: &str) {
    let result = frame_window(frame_id).and_then(|w| {
        w.location()
            .reload()
            .map_err(|e| AppError::Navigation(format!("{:?}", e)))
    });
    if let Err(e) = result {
        log::warn!("Reload of #{} failed: {}", frame_id, e);
    }
}

/// Document title of the frame's current page, if it is readable
pub fn document_title(frame_id: &str) -> Option<String> {
    frame(frame_id)
        .ok()?
        .content_document()
        .map(|d| d.title())
        .filter(|t| !t.trim().is_empty())
}
