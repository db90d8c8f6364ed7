#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;

use super::request::{HttpRequest, HttpResponse};
use super::transport::Transport;
use crate::ClientError;

type Scripted = Result<HttpResponse, ClientError>;

struct Route {
    method: Method,
    path: String,
    responses: VecDeque<Scripted>,
}

/// Scripted [`Transport`] that records every request it receives.
///
/// Responses are queued per route (method plus URL path suffix) and served
/// first in, first out. A request matching no queued route gets a
/// [`ClientError::Network`].
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<Vec<Route>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.push(method, path, Ok(HttpResponse::new(status, body.to_string())))
    }

    /// Queues a response with a raw body.
    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Ok(HttpResponse::new(status, body)))
    }

    /// Queues a transport failure.
    pub fn fail_network(&self, method: Method, path: &str) -> &Self {
        self.push(
            method,
            path,
            Err(ClientError::Network("connection refused".to_owned())),
        )
    }

    fn push(&self, method: Method, path: &str, response: Scripted) -> &Self {
        let mut routes = self.routes.lock().unwrap();
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.responses.push_back(response),
            None => routes.push(Route {
                method,
                path: path.to_owned(),
                responses: VecDeque::from([response]),
            }),
        }
        drop(routes);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let scripted = {
            let mut routes = self.routes.lock().unwrap();
            routes
                .iter_mut()
                .filter(|r| r.method == request.method && !r.responses.is_empty())
                .filter(|r| request.url.ends_with(&r.path))
                .max_by_key(|r| r.path.len())
                .and_then(|r| r.responses.pop_front())
        };

        let method = request.method.clone();
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        scripted.unwrap_or_else(|| {
            Err(ClientError::Network(format!(
                "no scripted response for {method} {url}"
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderMap;
    use serde_json::json;

    use super::*;
    use crate::RequestBody;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: Method::GET,
            url: url.to_owned(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    #[tokio::test]
    async fn test_serves_queued_responses_in_order() {
        let transport = MockTransport::new();
        transport
            .respond(Method::GET, "/products", 200, json!([]))
            .respond(Method::GET, "/products", 500, json!({ "detail": "boom" }));

        let first = transport.send(get("http://api/products")).await.unwrap();
        let second = transport.send(get("http://api/products")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 500);
        assert!(transport.send(get("http://api/products")).await.is_err());
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_longest_suffix_wins() {
        let transport = MockTransport::new();
        transport
            .respond(Method::GET, "/orders", 200, json!([]))
            .respond(Method::GET, "/orders/admin/all", 200, json!([{ "id": 1 }]));

        let response = transport.send(get("http://api/orders/admin/all")).await.unwrap();
        assert_eq!(response.body, json!([{ "id": 1 }]).to_string().into_bytes());
    }
}
