//! In-process mock coordinator for integration tests.
//!
//! Serves a canned submission response on `POST /v1/statement` and canned
//! pages on their paths. `{host}` in a canned body is replaced with the
//! server's `host:port` so `nextUri` values point back at the mock.

#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use presto_link::{ConnectionContext, PrestoLinkClient};

/// Path of the first page in every canned query
pub const FIRST_PAGE: &str = "/v1/query/abcd/1";
pub const SECOND_PAGE: &str = "/v1/query/abcd/2";

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn ok(body: JsonValue) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// A statement submission as the mock received it
#[derive(Debug, Clone, Default)]
pub struct RecordedSubmission {
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    host: Mutex<String>,
    submit: Mutex<Option<CannedResponse>>,
    pages: Mutex<HashMap<String, CannedResponse>>,
    page_hits: AtomicUsize,
    submissions: Mutex<Vec<RecordedSubmission>>,
}

impl MockState {
    fn render(&self, canned: &CannedResponse) -> HttpResponse {
        let host = self.host.lock().unwrap().clone();
        let status = actix_web::http::StatusCode::from_u16(canned.status)
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status)
            .content_type("application/json")
            .body(canned.body.replace("{host}", &host))
    }
}

pub struct MockCoordinator {
    host: String,
    state: Arc<MockState>,
    handle: ServerHandle,
}

impl MockCoordinator {
    /// Start a mock on a random local port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind mock coordinator");
        let bind_addr = listener.local_addr().expect("mock coordinator address");
        let host = bind_addr.to_string();

        let state = Arc::new(MockState::default());
        *state.host.lock().unwrap() = host.clone();

        let data = web::Data::from(state.clone());
        let server = HttpServer::new(move || {
            App::new().app_data(data.clone()).default_service(web::to(handle_request))
        })
        .listen(listener)
        .expect("listen mock coordinator")
        .workers(1)
        .run();

        let handle = server.handle();
        tokio::spawn(server);

        Self {
            host,
            state,
            handle,
        }
    }

    /// Data source string pointing at this mock
    pub fn data_source(&self) -> String {
        format!("presto://tester@{}/tpch/tiny", self.host)
    }

    pub fn context(&self) -> ConnectionContext {
        ConnectionContext::new(self.host.clone(), "tpch", "tiny", "tester")
    }

    pub fn client(&self) -> PrestoLinkClient {
        PrestoLinkClient::builder()
            .data_source(self.data_source())
            .build()
            .expect("build client")
    }

    /// Absolute URL of a path on this mock
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.host, path)
    }

    pub fn on_submit(&self, response: CannedResponse) -> &Self {
        *self.state.submit.lock().unwrap() = Some(response);
        self
    }

    /// Submission that hands out [`FIRST_PAGE`] as the first continuation
    pub fn on_submit_first_page(&self) -> &Self {
        self.on_submit(CannedResponse::ok(queued_response(Some(FIRST_PAGE))))
    }

    pub fn on_page(&self, path: &str, response: CannedResponse) -> &Self {
        self.state.pages.lock().unwrap().insert(path.to_string(), response);
        self
    }

    /// Number of GET requests served so far, unknown paths included
    pub fn page_hits(&self) -> usize {
        self.state.page_hits.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.state.submissions.lock().unwrap().clone()
    }

    pub async fn shutdown(self) {
        self.handle.stop(true).await;
    }
}

async fn handle_request(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    if req.method() == actix_web::http::Method::POST && req.path() == "/v1/statement" {
        let headers = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        state.submissions.lock().unwrap().push(RecordedSubmission {
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        });

        let canned = state.submit.lock().unwrap().clone();
        return match canned {
            Some(canned) => state.render(&canned),
            None => HttpResponse::NotFound().finish(),
        };
    }

    state.page_hits.fetch_add(1, Ordering::SeqCst);
    let canned = state.pages.lock().unwrap().get(req.path()).cloned();
    match canned {
        Some(canned) => state.render(&canned),
        None => HttpResponse::NotFound().finish(),
    }
}

// ==================== Canned bodies ====================

/// Submission response in the `QUEUED` state
pub fn queued_response(next_path: Option<&str>) -> JsonValue {
    let mut body = json!({
        "id": "abcd",
        "infoUri": "http://{host}/v1/query/abcd",
        "stats": { "state": "QUEUED" }
    });
    if let Some(path) = next_path {
        body["nextUri"] = json!(format!("http://{{host}}{}", path));
    }
    body
}

pub fn varchar_column(name: &str) -> JsonValue {
    json!({
        "name": name,
        "type": "varchar",
        "typeSignature": { "rawType": "varchar", "typeArguments": [], "literalArguments": [] }
    })
}

/// A data page; `next_path` chains to another canned page
pub fn data_page(columns: JsonValue, data: JsonValue, next_path: Option<&str>) -> JsonValue {
    let state = if next_path.is_some() { "RUNNING" } else { "FINISHED" };
    let mut body = json!({
        "id": "abcd",
        "infoUri": "http://{host}/v1/query/abcd",
        "partialCancelUri": "http://{host}/v1/query/abcd.0",
        "columns": columns,
        "data": data,
        "stats": { "state": state }
    });
    if let Some(path) = next_path {
        body["nextUri"] = json!(format!("http://{{host}}{}", path));
    }
    body
}

pub fn failed_page(error: Option<JsonValue>) -> JsonValue {
    let mut body = json!({
        "id": "abcd",
        "infoUri": "http://{host}/v1/query/abcd",
        "partialCancelUri": "http://{host}/v1/query/abcd.0",
        "stats": { "state": "FAILED" }
    });
    if let Some(error) = error {
        body["error"] = error;
    }
    body
}
