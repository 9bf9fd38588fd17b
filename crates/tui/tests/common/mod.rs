#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use api_types::{
    Ack, Amount,
    auth::{Login, Profile, SessionCreated},
    budget::BudgetPlan,
    expense::Expense,
    message::Message,
    note::Note,
    summary::Summary,
};
use axum::{
    Json, Router,
    extract::State,
    http::{
        HeaderMap, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    response::{IntoResponse, Response},
    routing::{get, post},
};
use cashflow_tui::client::Client;
use serde_json::{Value, json};

pub const EMAIL: &str = "asha@campus.edu";
pub const PASSWORD: &str = "secret";
const SESSION_COOKIE: &str = "session";

/// In-memory stand-in for the planner backend. Sessions live in a cookie, as
/// they do on the real server.
#[derive(Debug, Default)]
pub struct Backend {
    pub sessions: HashSet<String>,
    issued: u64,
    pub hits: HashMap<String, usize>,
    pub content_types: Vec<Option<String>>,
    /// Every accepted POST body, keyed by path.
    pub posted: Vec<(String, Value)>,
    pub budgets: Vec<BudgetPlan>,
    pub expenses: Vec<Expense>,
    pub notes: Vec<Note>,
    pub messages: Vec<Message>,
    pub fail_notes: bool,
}

impl Backend {
    fn seeded() -> Self {
        Self {
            budgets: vec![BudgetPlan {
                id: 1,
                category: "Food".to_string(),
                amount: Amount::new(500_000),
                period: "Monthly".to_string(),
                created_at: None,
            }],
            notes: vec![Note {
                id: 3,
                title: "Rent".to_string(),
                content: "Due on the 5th".to_string(),
                created_at: None,
            }],
            messages: vec![Message {
                id: 9,
                username: "Ravi".to_string(),
                text: "Anyone selling a cycle?".to_string(),
                created_at: None,
            }],
            ..Self::default()
        }
    }
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct Stub {
    pub addr: SocketAddr,
    pub backend: Shared,
}

impl Stub {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.backend
            .lock()
            .unwrap()
            .hits
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub fn posted(&self, path: &str) -> Vec<Value> {
        self.backend
            .lock()
            .unwrap()
            .posted
            .iter()
            .filter(|(posted_to, _)| posted_to == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn add_budget(&self, category: &str, period: &str) {
        let mut backend = self.backend.lock().unwrap();
        let id = backend.budgets.len() as i64 + 1;
        backend.budgets.push(BudgetPlan {
            id,
            category: category.to_string(),
            amount: Amount::new(10_000),
            period: period.to_string(),
            created_at: None,
        });
    }
}

pub async fn spawn_stub() -> Stub {
    let backend: Shared = Arc::new(Mutex::new(Backend::seeded()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = router(backend.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Stub { addr, backend }
}

/// A client that has logged in against the stub and holds its session cookie.
pub async fn signed_in(stub: &Stub) -> Client {
    let client = Client::new(&stub.base_url()).unwrap();
    client
        .login(&Login {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    client
}

/// An address with nothing listening on it.
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// An address that accepts connections and never answers.
pub async fn hanging_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/me", get(me))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/summary", get(summary))
        .route("/api/budgets", get(budgets).post(create_budget))
        .route("/api/expenses", get(expenses).post(create_expense))
        .route("/api/notes", get(notes).post(create_note))
        .route("/api/messages", get(messages).post(send_message))
        .route("/api/broken", get(broken))
        .with_state(backend)
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.to_string())
}

/// Counts the hit and reports whether the request carries a live session.
fn record(backend: &Shared, path: &str, headers: &HeaderMap) -> bool {
    let mut backend = backend.lock().unwrap();
    *backend.hits.entry(path.to_string()).or_default() += 1;
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    backend.content_types.push(content_type);
    session_token(headers).is_some_and(|token| backend.sessions.contains(&token))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Please login first." })),
    )
        .into_response()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn created(backend: &Shared, path: &str, body: Value, message: &str) -> Response {
    backend
        .lock()
        .unwrap()
        .posted
        .push((path.to_string(), body));
    (
        StatusCode::CREATED,
        Json(Ack {
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

fn text<'a>(body: &'a Value, field: &str) -> &'a str {
    body[field].as_str().unwrap_or_default().trim()
}

async fn me(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&backend, "/api/me", &headers) {
        return unauthorized();
    }
    Json(Profile {
        id: 1,
        name: "Asha".to_string(),
        email: EMAIL.to_string(),
        bio: Some(String::new()),
    })
    .into_response()
}

async fn login(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&backend, "/api/login", &headers);
    if text(&body, "email") != EMAIL || text(&body, "password") != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
            .into_response();
    }

    let token = {
        let mut backend = backend.lock().unwrap();
        backend.issued += 1;
        let token = format!("stub-{}", backend.issued);
        backend.sessions.insert(token.clone());
        token
    };
    (
        [(SET_COOKIE, format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly"))],
        Json(SessionCreated {
            message: Some("Login successful.".to_string()),
            name: Some("Asha".to_string()),
        }),
    )
        .into_response()
}

async fn logout(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "/api/logout", &headers);
    if let Some(token) = session_token(&headers) {
        backend.lock().unwrap().sessions.remove(&token);
    }
    Json(Ack {
        message: Some("Logged out.".to_string()),
    })
    .into_response()
}

async fn summary(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&backend, "/api/summary", &headers) {
        return unauthorized();
    }
    let backend = backend.lock().unwrap();
    let planned: i64 = backend.budgets.iter().map(|b| b.amount.minor()).sum();
    let spent: i64 = backend.expenses.iter().map(|e| e.amount.minor()).sum();
    Json(Summary {
        username: "Asha".to_string(),
        budget_total: Amount::new(planned),
        expense_total: Amount::new(spent),
        remaining: Amount::new(planned - spent),
        transaction_count: backend.expenses.len() as u64,
    })
    .into_response()
}

async fn budgets(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&backend, "/api/budgets", &headers) {
        return unauthorized();
    }
    Json(backend.lock().unwrap().budgets.clone()).into_response()
}

async fn create_budget(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&backend, "/api/budgets:post", &headers) {
        return unauthorized();
    }
    let amount = text(&body, "amount").parse::<Amount>();
    let (category, Ok(amount)) = (text(&body, "category"), amount) else {
        return bad_request("Budget needs a category and amount.");
    };
    if category.is_empty() {
        return bad_request("Budget needs a category and amount.");
    }

    {
        let mut backend = backend.lock().unwrap();
        let id = backend.budgets.len() as i64 + 1;
        backend.budgets.push(BudgetPlan {
            id,
            category: category.to_string(),
            amount,
            period: text(&body, "period").to_string(),
            created_at: None,
        });
    }
    created(&backend, "/api/budgets", body, "Budget plan saved.")
}

async fn expenses(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&backend, "/api/expenses", &headers) {
        return unauthorized();
    }
    Json(backend.lock().unwrap().expenses.clone()).into_response()
}

async fn create_expense(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&backend, "/api/expenses:post", &headers) {
        return unauthorized();
    }
    let title = text(&body, "title");
    let Ok(amount) = text(&body, "amount").parse::<Amount>() else {
        return bad_request("Expense needs title and amount.");
    };
    if title.is_empty() {
        return bad_request("Expense needs title and amount.");
    }

    {
        let mut backend = backend.lock().unwrap();
        let id = backend.expenses.len() as i64 + 1;
        backend.expenses.push(Expense {
            id,
            title: title.to_string(),
            category: text(&body, "category").to_string(),
            amount,
            spent_on: text(&body, "spent_on").to_string(),
            image_url: Some(text(&body, "image_url").to_string()),
            note: Some(text(&body, "note").to_string()),
            created_at: None,
        });
    }
    created(&backend, "/api/expenses", body, "Expense saved.")
}

async fn notes(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&backend, "/api/notes", &headers) {
        return unauthorized();
    }
    let backend = backend.lock().unwrap();
    if backend.fail_notes {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "notes table is locked" })),
        )
            .into_response();
    }
    Json(backend.notes.clone()).into_response()
}

async fn create_note(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&backend, "/api/notes:post", &headers) {
        return unauthorized();
    }
    let (title, content) = (text(&body, "title"), text(&body, "content"));
    if title.is_empty() || content.is_empty() {
        return bad_request("Note needs title and content.");
    }

    {
        let mut backend = backend.lock().unwrap();
        let id = backend.notes.len() as i64 + 1;
        backend.notes.push(Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: None,
        });
    }
    created(&backend, "/api/notes", body, "Note saved.")
}

async fn messages(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&backend, "/api/messages", &headers) {
        return unauthorized();
    }
    Json(backend.lock().unwrap().messages.clone()).into_response()
}

async fn send_message(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&backend, "/api/messages:post", &headers) {
        return unauthorized();
    }
    let message = text(&body, "text");
    if message.is_empty() {
        return bad_request("Message cannot be empty.");
    }

    {
        let mut backend = backend.lock().unwrap();
        let id = backend.messages.len() as i64 + 1;
        backend.messages.push(Message {
            id,
            username: "Asha".to_string(),
            text: message.to_string(),
            created_at: None,
        });
    }
    created(&backend, "/api/messages", body, "Message sent.")
}

async fn broken(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record(&backend, "/api/broken", &headers);
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
}
