//! API utilities for frontend-backend communication
//!
//! Every request carries the stored session token. Failed responses are
//! turned into a readable message; a `401` ends the session.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::config::config;
use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Uses the configured URL when set. Otherwise the URL is built from the
/// current window location with the configured fallback port, e.g.
/// "http://localhost:8000".
pub fn api_base() -> String {
    let api = &config().api;
    if !api.base_url.is_empty() {
        return api.base_url.clone();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "localhost".to_string());
    format!("{}//{}:{}", protocol, hostname, api.fallback_port)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Message shown for a failed response.
///
/// Looks at the error body in order: `message`, `detail`, a bare JSON
/// string. Falls back to the status text.
pub fn extract_error_message(status_text: &str, body: Option<&Value>) -> String {
    let from_body = body.and_then(|body| {
        ["message", "detail"]
            .iter()
            .find_map(|field| body.get(field).and_then(describe))
            .or_else(|| body.as_str().map(str::to_string))
    });
    from_body.unwrap_or_else(|| format!("API Error: {}", status_text))
}

fn describe(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Session expired or revoked: drop it and go back to the login screen
fn end_session() {
    log::warn!("request unauthorized, clearing session");
    storage::clear_session();
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    if response.status() == 401 {
        end_session();
    }
    let status_text = response.status_text();
    let body = response.json::<Value>().await.ok();
    let message = extract_error_message(&status_text, body.as_ref());
    log::error!("{} {}: {}", response.status(), response.url(), message);
    Err(message)
}

async fn send(builder: RequestBuilder) -> Result<Response, String> {
    let response = authorized(builder)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    check(response).await
}

async fn send_with_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, String> {
    let response = authorized(builder)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    check(response).await
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET a JSON document
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    parse(send(Request::get(&api_url(path))).await?).await
}

/// POST a JSON body and parse the JSON answer
pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    parse(send_with_body(Request::post(&api_url(path)), body).await?).await
}

/// POST a JSON body, ignoring the answer
pub async fn post<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    send_with_body(Request::post(&api_url(path)), body).await?;
    Ok(())
}

/// PATCH a JSON body and parse the JSON answer
pub async fn patch_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    parse(send_with_body(Request::patch(&api_url(path)), body).await?).await
}

/// PATCH a JSON body, ignoring the answer
pub async fn patch<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    send_with_body(Request::patch(&api_url(path)), body).await?;
    Ok(())
}

/// PUT a JSON body, ignoring the answer
pub async fn put<B: Serialize>(path: &str, body: &B) -> Result<(), String> {
    send_with_body(Request::put(&api_url(path)), body).await?;
    Ok(())
}

pub async fn delete(path: &str) -> Result<(), String> {
    send(Request::delete(&api_url(path))).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = json!({"message": "Compra no encontrada", "detail": "otra cosa"});
        assert_eq!(
            extract_error_message("Not Found", Some(&body)),
            "Compra no encontrada"
        );
    }

    #[test]
    fn test_error_message_uses_detail() {
        let body = json!({"detail": "Token inválido"});
        assert_eq!(extract_error_message("Forbidden", Some(&body)), "Token inválido");
    }

    #[test]
    fn test_error_message_bare_string_body() {
        let body = json!("Fecha inválida");
        assert_eq!(extract_error_message("Bad Request", Some(&body)), "Fecha inválida");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        let body = json!({"errors": []});
        assert_eq!(
            extract_error_message("Internal Server Error", Some(&body)),
            "API Error: Internal Server Error"
        );
        assert_eq!(
            extract_error_message("Bad Gateway", None),
            "API Error: Bad Gateway"
        );
    }

    #[test]
    fn test_error_message_null_detail_is_skipped() {
        let body = json!({"message": null, "detail": "sin permiso"});
        assert_eq!(extract_error_message("Forbidden", Some(&body)), "sin permiso");
    }
}
