//! Email subscription form
//!
//! Validates the address locally, then fires one JSON POST at the
//! configured endpoint. The page only tracks a three-way outcome; the
//! physics scene never hears about any of it.

use serde::Serialize;
use thiserror::Error;

/// Longest address accepted (RFC 5321 path limit)
pub const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("could not reach the server: {0}")]
    Network(String),
    #[error("subscription was rejected (HTTP {0})")]
    Rejected(u16),
}

/// Where the form is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending,
    Success,
    Failure(String),
}

impl SubmitState {
    /// Inline status text
    pub fn message(&self) -> &str {
        match self {
            SubmitState::Idle => "",
            SubmitState::Pending => "Subscribing...",
            SubmitState::Success => "Thanks! You're on the list.",
            SubmitState::Failure(msg) => msg,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmitState::Pending)
    }

    /// Fold a finished submission into the next state
    pub fn finish(result: Result<(), SubscribeError>) -> Self {
        match result {
            Ok(()) => SubmitState::Success,
            Err(e) => SubmitState::Failure(e.to_string()),
        }
    }
}

/// Request body
#[derive(Debug, Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

/// Trim and check basic syntactic well-formedness.
///
/// One `@`, non-empty local part, a dotted domain with no empty labels, no
/// whitespace, at most [`MAX_EMAIL_LEN`] characters.
pub fn validate_email(input: &str) -> Result<&str, SubscribeError> {
    let email = input.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return Err(SubscribeError::InvalidEmail);
    }

    let (local, domain) = email.split_once('@').ok_or(SubscribeError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(SubscribeError::InvalidEmail);
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(SubscribeError::InvalidEmail);
    }

    Ok(email)
}

/// JSON body for an already-validated address
pub fn request_body(email: &str) -> String {
    // A struct of one &str cannot fail to serialize
    serde_json::to_string(&SubscribeRequest { email }).unwrap_or_default()
}

/// Map an HTTP status to the submission outcome
pub fn status_outcome(status: u16) -> Result<(), SubscribeError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SubscribeError::Rejected(status))
    }
}

/// POST the address to `endpoint` (WASM only)
#[cfg(target_arch = "wasm32")]
pub async fn submit(endpoint: &str, email: &str) -> Result<(), SubscribeError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let email = validate_email(email)?;
    let network = |e: wasm_bindgen::JsValue| SubscribeError::Network(format!("{e:?}"));

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::SameOrigin);
    init.set_body(&wasm_bindgen::JsValue::from_str(&request_body(email)));

    let request = Request::new_with_str_and_init(endpoint, &init).map_err(network)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(network)?;

    let window = web_sys::window().ok_or_else(|| SubscribeError::Network("no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;

    log::info!("Subscription request finished with HTTP {}", response.status());
    status_outcome(response.status())
}
