//! In-process HTTP stub standing in for the movie-info and review services.
//!
//! Each path is scripted with a queue of responses. Once a queue holds a
//! single entry that entry is replayed for every further request, so a stub
//! scripted with one `500` keeps failing. Unscripted paths answer `404`.

use std::collections::{HashMap, VecDeque};
use std::net::{SocketAddr, TcpListener};
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use url::Url;

/// One canned upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubResponse {
    status: u16,
    body: String,
}

impl StubResponse {
    /// Response with the given status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with a JSON body.
    pub fn json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Empty response with the given status.
    pub fn status(status: u16) -> Self {
        Self::new(status, "")
    }
}

#[derive(Default)]
struct StubState {
    scripts: Mutex<HashMap<String, VecDeque<StubResponse>>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl StubState {
    fn next_response(&self, path: &str) -> StubResponse {
        match self.hits.lock() {
            Ok(mut hits) => *hits.entry(path.to_owned()).or_default() += 1,
            Err(_) => panic!("stub hits mutex"),
        }
        let mut scripts = match self.scripts.lock() {
            Ok(scripts) => scripts,
            Err(_) => panic!("stub scripts mutex"),
        };
        match scripts.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| StubResponse::status(404)),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| StubResponse::status(404)),
            None => StubResponse::status(404),
        }
    }
}

async fn serve(request: HttpRequest, state: web::Data<StubState>) -> HttpResponse {
    let response = state.next_response(request.path());
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status)
        .content_type("application/json")
        .body(response.body)
}

/// Running upstream stub bound to an ephemeral local port.
pub struct UpstreamStub {
    addr: SocketAddr,
    state: web::Data<StubState>,
    handle: ServerHandle,
}

impl UpstreamStub {
    /// Bind and start the stub on the current actix system.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot be bound.
    pub fn start() -> std::io::Result<Self> {
        let state = web::Data::new(StubState::default());
        let listener = TcpListener::bind(("127.0.0.1", 0))?;
        let addr = listener.local_addr()?;
        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .default_service(web::to(serve))
        })
        .workers(1)
        .listen(listener)?
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Queue `responses` for `path`, replacing any previous script.
    pub fn script(&self, path: &str, responses: impl IntoIterator<Item = StubResponse>) {
        match self.state.scripts.lock() {
            Ok(mut scripts) => {
                scripts.insert(path.to_owned(), responses.into_iter().collect());
            }
            Err(_) => panic!("stub scripts mutex"),
        }
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        match self.state.hits.lock() {
            Ok(hits) => hits.get(path).copied().unwrap_or_default(),
            Err(_) => panic!("stub hits mutex"),
        }
    }

    /// Absolute URL of `path` on this stub.
    pub fn url(&self, path: &str) -> Url {
        match Url::parse(&format!("http://{}{path}", self.addr)) {
            Ok(url) => url,
            Err(error) => panic!("stub url for {path}: {error}"),
        }
    }

    /// Stop accepting connections and wait for the server to shut down.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
