//! API client for the events REST API.
//!
//! One method per resource operation. Every method resolves to either the
//! parsed payload or a classified [`ApiError`]; nothing is retried.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::models::{Attendee, Event, NewEvent, Page, PageResponse, Registration};

use super::ApiError;

/// API client bound to one base URL.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// `timeout` of `None` leaves requests unbounded; transport failures
    /// still surface as network errors.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the status and body of a 2xx response.
    async fn send(request: RequestBuilder, url: &str) -> Result<(StatusCode, String), ApiError> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                let err = ApiError::from_transport(&e);
                warn!(url = url, error = %e, "Request failed before a response");
                err
            })?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await.map_err(|e| ApiError::from_transport(&e))?;
            debug!(url = url, status = status.as_u16(), "Request succeeded");
            Ok((status, body))
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(url = url, status = status.as_u16(), "Request rejected by server");
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let (status, body) = Self::send(self.client.get(url), url).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::from_decode(status, &e, &body))
    }

    /// POST a JSON body. Response bodies are not inspected beyond the status.
    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        Self::send(self.client.post(url).json(body), url).await?;
        Ok(())
    }

    // ===== Resource operations =====

    /// `GET /events`
    pub async fn fetch_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get(&self.url("/events")).await
    }

    /// `POST /events`. The created event in the response is ignored.
    pub async fn create_event(&self, event: &NewEvent) -> Result<(), ApiError> {
        self.post(&self.url("/events"), event).await
    }

    /// `GET /events/{event_id}/attendees?page={page}`
    pub async fn fetch_attendees(&self, event_id: i64, page: u32) -> Result<Page<Attendee>, ApiError> {
        let url = self.url(&format!("/events/{}/attendees?page={}", event_id, page));
        let response: PageResponse<Attendee> = self.get(&url).await?;
        Ok(response.into())
    }

    /// `POST /events/{event_id}/register`
    pub async fn register_attendee(&self, event_id: i64, registration: &Registration) -> Result<(), ApiError> {
        let url = self.url(&format!("/events/{}/register", event_id));
        self.post(&url, registration).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{BAD_REQUEST_MESSAGE, NOT_FOUND_MESSAGE, NO_RESPONSE_MESSAGE};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP response on a loopback port.
    /// Returns the base URL and a receiver for the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower.strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.expect("write");
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&raw).to_string());
        });

        (format!("http://{}/api", addr), rx)
    }

    /// Client that never routes loopback traffic through an env proxy.
    fn local_client(base_url: &str) -> ApiClient {
        ApiClient {
            client: Client::builder().no_proxy().build().expect("client"),
            base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url", None).is_err());
        assert!(ApiClient::new("", None).is_err());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let api = ApiClient::new("http://localhost:8000/api/", None).expect("client");
        assert_eq!(api.base_url(), "http://localhost:8000/api");
        assert_eq!(api.url("/events"), "http://localhost:8000/api/events");
    }

    #[tokio::test]
    async fn test_fetch_attendees_builds_paged_request() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"data":[{"id":1,"name":"Ann","email":"a@x.com"}],"current_page":1,"last_page":3}"#,
        )
        .await;
        let api = local_client(&base);

        let page = api.fetch_attendees(12, 1).await.expect("page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.last_page, 3);

        let raw = request.await.expect("request captured");
        assert!(raw.starts_with("GET /api/events/12/attendees?page=1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_events_empty_list() {
        let (base, _request) = serve_once("200 OK", "[]").await;
        let api = local_client(&base);
        let events = api.fetch_events().await.expect("events");
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_register_sends_json_body() {
        let (base, request) = serve_once("201 Created", "").await;
        let api = local_client(&base);
        let registration = Registration {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        };

        api.register_attendee(12, &registration).await.expect("registered");

        let raw = request.await.expect("request captured");
        assert!(raw.starts_with("POST /api/events/12/register HTTP/1.1"));
        assert!(raw.contains(r#"{"name":"Ann","email":"a@x.com"}"#));
    }

    #[tokio::test]
    async fn test_register_not_found() {
        let (base, _request) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;
        let api = local_client(&base);
        let registration = Registration {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        };

        let err = api.register_attendee(99, &registration).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.user_message(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_create_event_bad_request() {
        let (base, _request) = serve_once("400 Bad Request", r#"{"errors":{"name":["required"]}}"#).await;
        let api = local_client(&base);
        let event = NewEvent {
            name: String::new(),
            location: "Hall".to_string(),
            start_time: "2025-06-01T18:30".to_string(),
            end_time: "2025-06-01T20:00".to_string(),
            max_capacity: 10,
        };

        let err = api.create_event(&event).await.unwrap_err();
        assert_eq!(err.user_message(), BAD_REQUEST_MESSAGE);
    }

    #[tokio::test]
    async fn test_server_error_message_is_surfaced() {
        let (base, _request) = serve_once(
            "422 Unprocessable Entity",
            r#"{"message":"Event is at capacity."}"#,
        )
        .await;
        let api = local_client(&base);
        let err = api.fetch_attendees(1, 1).await.unwrap_err();
        assert_eq!(err.user_message(), "Event is at capacity.");
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let (base, _request) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let api = local_client(&base);
        let err = api.fetch_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 200, .. }));
        assert!(err.user_message().starts_with("Invalid response from server"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_no_response() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let api = local_client(&format!("http://{}", addr));
        let err = api.fetch_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.user_message(), NO_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_unbuildable_request_is_construction_error() {
        let api = ApiClient {
            client: Client::new(),
            base_url: "not a url".to_string(),
        };
        let err = api.fetch_events().await.unwrap_err();
        assert!(matches!(err, ApiError::Construction(_)));
        assert!(err.user_message().starts_with("Error: "));
    }
}
