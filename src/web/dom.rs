use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use winit::window::Window;

use super::WebError;
use crate::renderer::StartRequest;
use crate::ui::{HudSink, HudState};

const CANVAS_CONTAINER_ID: &str = "canvas-container";
const START_BUTTON_ID: &str = "start-game-btn";
const HIDDEN_CLASS: &str = "hidden";

fn document() -> Result<Document, WebError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(WebError::JsError("No document".into()))
}

fn element(document: &Document, id: &str) -> Result<Element, WebError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::MissingElement(format!("#{}", id)))
}

fn html_element(document: &Document, id: &str) -> Result<HtmlElement, WebError> {
    element(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::JsError(format!("#{} is not an HTML element", id)))
}

fn js_error(e: JsValue) -> WebError {
    WebError::JsError(format!("{:?}", e))
}

/// Put the window's canvas into the page's container, or the body if the
/// page has none
pub fn attach_canvas(window: &Window) -> Result<(), WebError> {
    use winit::platform::web::WindowExtWebSys;

    let canvas = window
        .canvas()
        .ok_or(WebError::JsError("Window has no canvas".into()))?;
    let document = document()?;
    let parent: Element = match document.get_element_by_id(CANVAS_CONTAINER_ID) {
        Some(container) => container,
        None => {
            log::warn!("[web::attach_canvas] #{} not found, using body", CANVAS_CONTAINER_ID);
            document
                .body()
                .ok_or_else(|| WebError::MissingElement("body".into()))?
                .into()
        }
    };
    parent.append_child(&canvas).map_err(js_error)?;
    Ok(())
}

/// Clicking the start button raises the shared start flag
pub fn bind_start_button(start_request: StartRequest) -> Result<(), WebError> {
    let button = element(&document()?, START_BUTTON_ID)?;
    let on_click = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_event| {
        start_request.set(true);
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // The listener lives as long as the page
    on_click.forget();
    Ok(())
}

/// Writes the HUD into the page's countdown panel and result banner
pub struct DomHud {
    game_ui: HtmlElement,
    game_result: HtmlElement,
    result_message: HtmlElement,
    time_display: HtmlElement,
    progress: HtmlElement,
}

impl DomHud {
    pub fn from_document() -> Result<Self, WebError> {
        let document = document()?;
        let result_message = document
            .query_selector(".result-message")
            .map_err(js_error)?
            .ok_or_else(|| WebError::MissingElement(".result-message".into()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::JsError(".result-message is not an HTML element".into()))?;

        Ok(Self {
            game_ui: html_element(&document, "game-ui")?,
            game_result: html_element(&document, "game-result")?,
            result_message,
            time_display: html_element(&document, "time-display")?,
            progress: html_element(&document, "countdown-progress")?,
        })
    }

    fn set_hidden(element: &HtmlElement, hidden: bool) -> Result<(), JsValue> {
        element.class_list().toggle_with_force(HIDDEN_CLASS, hidden)?;
        Ok(())
    }

    fn write(&self, hud: &HudState) -> Result<(), JsValue> {
        Self::set_hidden(&self.game_ui, !hud.countdown_visible)?;

        if hud.countdown_visible {
            self.time_display.set_text_content(Some(&hud.seconds.to_string()));
            let style = self.progress.style();
            style.set_property("width", &format!("{}%", hud.progress_percent))?;
            style.set_property("background", hud.band.css_gradient())?;
        }

        let classes = self.result_message.class_list();
        classes.remove_2("clear", "failed")?;
        match (hud.result_text(), hud.result_class()) {
            (Some(text), Some(class)) => {
                classes.add_1(class)?;
                self.result_message.set_text_content(Some(text));
                Self::set_hidden(&self.game_result, false)?;
            }
            _ => Self::set_hidden(&self.game_result, true)?,
        }
        Ok(())
    }
}

impl HudSink for DomHud {
    fn present(&mut self, hud: &HudState) {
        if let Err(e) = self.write(hud) {
            log::warn!("[web::DomHud] Failed to update HUD: {:?}", e);
        }
    }
}
