use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use docchat_core::{Message, Surface, ThinkingId};

use crate::dom;

pub const CHAT_HISTORY_ID: &str = "chat-history";
pub const ERROR_MESSAGE_ID: &str = "error-message";
pub const LOADING_ID: &str = "loading";
pub const USER_INPUT_ID: &str = "user-input";
pub const CHAT_FORM_ID: &str = "chat-form";

const THINKING_CLASS: &str = "message bot thinking-indicator";
const THINKING_MARKUP: &str =
    r#"<span class="thinking-dots"><span></span><span></span><span></span></span>"#;

/// Renders the controller's output into the page
pub struct DomSurface {
    document: Document,
    history: Element,
    error: Element,
    loading: HtmlElement,
    input: HtmlInputElement,
    chat_button: Option<HtmlButtonElement>,
    thinking: HashMap<ThinkingId, Element>,
}

impl DomSurface {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        let chat_form = dom::get_element_by_id(document, CHAT_FORM_ID)?;
        let chat_button = dom::find_button(&chat_form)?;
        if chat_button.is_none() {
            log::warn!("#{} has no submit button", CHAT_FORM_ID);
        }

        Ok(Self {
            document: document.clone(),
            history: dom::get_element_by_id(document, CHAT_HISTORY_ID)?,
            error: dom::get_element_by_id(document, ERROR_MESSAGE_ID)?,
            loading: dom::get_html_element_by_id(document, LOADING_ID)?,
            input: dom::get_input_by_id(document, USER_INPUT_ID)?,
            chat_button,
            thinking: HashMap::new(),
        })
    }

    fn append(&self, element: &Element) {
        if let Err(e) = self.history.append_child(element) {
            log::error!("Failed to append transcript line: {:?}", e);
            return;
        }
        dom::scroll_to_bottom(&self.history);
    }
}

impl Surface for DomSurface {
    fn render_message(&mut self, message: &Message) {
        match dom::create_element_with_class(&self.document, "div", message.sender().css_class()) {
            Ok(div) => {
                div.set_text_content(Some(message.text()));
                self.append(&div);
            }
            Err(e) => log::error!("Failed to create message element: {:?}", e),
        }
    }

    fn render_thinking(&mut self, id: ThinkingId) {
        match dom::create_element_with_class(&self.document, "div", THINKING_CLASS) {
            Ok(div) => {
                div.set_inner_html(THINKING_MARKUP);
                self.append(&div);
                self.thinking.insert(id, div);
            }
            Err(e) => log::error!("Failed to create thinking indicator: {:?}", e),
        }
    }

    fn remove_thinking(&mut self, id: ThinkingId) {
        if let Some(element) = self.thinking.remove(&id) {
            element.remove();
        }
    }

    fn clear_transcript(&mut self) {
        dom::clear_element(&self.history);
        self.thinking.clear();
    }

    fn set_error(&mut self, text: &str) {
        self.error.set_text_content(Some(text));
    }

    fn set_busy(&mut self, label: Option<&str>) {
        match label {
            Some(label) => {
                self.loading.set_text_content(Some(label));
                dom::show_element(&self.loading);
            }
            None => dom::hide_element(&self.loading),
        }
    }

    fn set_chat_enabled(&mut self, enabled: bool) {
        if let Some(button) = &self.chat_button {
            button.set_disabled(!enabled);
        }
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn focus_input(&mut self) {
        let _ = self.input.focus();
    }
}
