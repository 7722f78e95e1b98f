use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, File, PageTransitionEvent};

use docchat_core::{ClientConfig, Controller};

use crate::dom;
use crate::http;
use crate::surface::{DomSurface, CHAT_FORM_ID, USER_INPUT_ID};

const UPLOAD_FORM_ID: &str = "upload-form";
const FILE_INPUT_ID: &str = "file-input";
const MODEL_SELECT_ID: &str = "model-select";

/// `None` once the page is being torn down; late completions are dropped
type SharedController = Rc<RefCell<Option<Controller<DomSurface>>>>;

pub struct DocChatApp {
    document: Document,
    controller: SharedController,
}

impl DocChatApp {
    pub fn new(config: ClientConfig) -> Result<Self, JsValue> {
        let document = crate::document()?;
        let surface = DomSurface::from_document(&document)?;

        Ok(Self {
            document,
            controller: Rc::new(RefCell::new(Some(Controller::new(config, surface)))),
        })
    }

    pub fn start(self) -> Result<(), JsValue> {
        self.setup_upload_form()?;
        self.setup_chat_form()?;
        self.setup_teardown()?;
        Ok(())
    }

    fn setup_upload_form(&self) -> Result<(), JsValue> {
        let form = dom::get_element_by_id(&self.document, UPLOAD_FORM_ID)?;
        let document = self.document.clone();
        let controller = self.controller.clone();

        dom::add_event_listener(&form, "submit", move |event: Event| {
            event.prevent_default();
            if let Err(e) = upload_handler(&document, &controller) {
                log::error!("Failed to submit upload: {:?}", e);
            }
        })
    }

    fn setup_chat_form(&self) -> Result<(), JsValue> {
        let form = dom::get_element_by_id(&self.document, CHAT_FORM_ID)?;
        let document = self.document.clone();
        let controller = self.controller.clone();

        dom::add_event_listener(&form, "submit", move |event: Event| {
            event.prevent_default();
            if let Err(e) = chat_handler(&document, &controller) {
                log::error!("Failed to submit question: {:?}", e);
            }
        })
    }

    fn setup_teardown(&self) -> Result<(), JsValue> {
        let window = crate::window()?;
        let controller = self.controller.clone();

        dom::add_event_listener(&window, "pagehide", move |event: Event| {
            if teardown_on_pagehide(&controller, &event) {
                log::info!("Page hidden; document chat torn down");
            }
        })
    }
}

/// A page kept in the back/forward cache can be shown again with its
/// listeners still bound, so its controller stays alive
fn teardown_on_pagehide(controller: &SharedController, event: &Event) -> bool {
    let persisted = event
        .dyn_ref::<PageTransitionEvent>()
        .map(PageTransitionEvent::persisted)
        .unwrap_or(false);
    if persisted {
        log::debug!("Page entering back/forward cache; keeping document chat");
        return false;
    }
    controller.borrow_mut().take().is_some()
}

fn upload_handler(document: &Document, controller: &SharedController) -> Result<(), JsValue> {
    let file: Option<File> = dom::get_input_by_id(document, FILE_INPUT_ID)?
        .files()
        .and_then(|files| files.get(0));
    let model = dom::get_select_by_id(document, MODEL_SELECT_ID)?.value();

    let request = {
        let mut guard = controller.borrow_mut();
        let Some(active) = guard.as_mut() else {
            return Ok(());
        };
        match active.begin_upload(file, Some(model)) {
            Ok(request) => request,
            Err(rejection) => {
                log::debug!("Upload not sent: {}", rejection);
                return Ok(());
            }
        }
    };

    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = http::upload(request).await;
        if let Some(active) = controller.borrow_mut().as_mut() {
            active.finish_upload(outcome);
        }
    });

    Ok(())
}

fn chat_handler(document: &Document, controller: &SharedController) -> Result<(), JsValue> {
    let input = dom::get_input_by_id(document, USER_INPUT_ID)?.value();

    let (pending, timeout) = {
        let mut guard = controller.borrow_mut();
        let Some(active) = guard.as_mut() else {
            return Ok(());
        };
        match active.begin_chat(&input) {
            Ok(pending) => (pending, active.config().chat_timeout),
            Err(rejection) => {
                log::debug!("Question not sent: {}", rejection);
                return Ok(());
            }
        }
    };

    // The UI stays live while this is outstanding, so several may overlap
    let controller = controller.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = http::chat(pending.request(), timeout).await;
        if let Some(active) = controller.borrow_mut().as_mut() {
            active.finish_chat(pending, outcome);
        }
    });

    Ok(())
}
