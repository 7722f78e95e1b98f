use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, File, FormData};

use docchat_core::{ChatReply, ChatRequest, Outcome, UploadReply, UploadRequest};

const UPLOAD_URL: &str = "/upload";
const CHAT_URL: &str = "/chat";

/// POST the selected file and model as multipart form data
pub async fn upload(request: UploadRequest<File>) -> Outcome<UploadReply> {
    let form = match build_form(&request) {
        Ok(form) => form,
        Err(e) => return Outcome::TransportError(js_message(&e)),
    };

    log::debug!("POST {} ({})", UPLOAD_URL, request.file.name());
    let sent = match Request::post(UPLOAD_URL).body(form) {
        Ok(req) => req.send().await,
        Err(e) => return transport_failure(e),
    };
    decode(sent).await
}

/// POST a question, aborting the fetch once `timeout` elapses
pub async fn chat(request: &ChatRequest, timeout: Option<Duration>) -> Outcome<ChatReply> {
    post_chat(CHAT_URL, request, timeout).await
}

async fn post_chat(
    url: &str,
    request: &ChatRequest,
    timeout: Option<Duration>,
) -> Outcome<ChatReply> {
    let abort = match AbortController::new() {
        Ok(abort) => abort,
        Err(e) => return Outcome::TransportError(js_message(&e)),
    };

    let timed_out = Rc::new(Cell::new(false));
    // Dropping the timer cancels it, so it must outlive the request
    let _timer = timeout.map(|limit| {
        let abort = abort.clone();
        let timed_out = timed_out.clone();
        Timeout::new(timeout_millis(limit), move || {
            log::warn!("Chat request aborted after {:?}", limit);
            timed_out.set(true);
            abort.abort();
        })
    });

    log::debug!("POST {}", url);
    let signal = abort.signal();
    let sent = match Request::post(url).abort_signal(Some(&signal)).json(request) {
        Ok(req) => req.send().await,
        Err(e) => return transport_failure(e),
    };

    let outcome = decode(sent).await;
    if timed_out.get() && !matches!(outcome, Outcome::Success(_)) {
        return Outcome::Timeout;
    }
    outcome
}

fn build_form(request: &UploadRequest<File>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob("file", &request.file)?;
    if let Some(model) = &request.model {
        form.append_with_str("model", model)?;
    }
    Ok(form)
}

/// Decode the JSON body whatever the status code
async fn decode<T: DeserializeOwned>(sent: Result<Response, gloo_net::Error>) -> Outcome<T> {
    let response = match sent {
        Ok(response) => response,
        Err(e) => return transport_failure(e),
    };

    if !response.ok() {
        log::debug!("Server answered {}", response.status());
    }

    match response.json::<T>().await {
        Ok(body) => Outcome::Success(body),
        Err(e) => transport_failure(e),
    }
}

fn transport_failure<T>(error: gloo_net::Error) -> Outcome<T> {
    let message = match error {
        gloo_net::Error::JsError(e) => e.message,
        other => other.to_string(),
    };
    log::warn!("Request failed: {}", message);
    Outcome::TransportError(message)
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Browser timers take a u32 millisecond count
fn timeout_millis(limit: Duration) -> u32 {
    u32::try_from(limit.as_millis()).unwrap_or(u32::MAX)
}
