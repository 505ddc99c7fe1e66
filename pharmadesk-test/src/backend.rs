use std::collections::{BTreeMap, HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;

/// One request as received by the [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    /// Parsed JSON body, if the body was JSON.
    pub json: Option<Value>,
    /// Decoded `application/x-www-form-urlencoded` pairs.
    pub form: Vec<(String, String)>,
    pub authorization: Option<String>,
}

const RESOURCES: &[&str] = &["clients", "suppliers", "reports", "roles", "users", "alerts"];

/// Field that must be unique per resource; a duplicate answers 409.
fn unique_field(resource: &str) -> Option<&'static str> {
    match resource {
        "clients" | "suppliers" | "roles" => Some("name"),
        "users" => Some("email"),
        _ => None,
    }
}

#[derive(Default)]
struct BackendState {
    tables: HashMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failures: VecDeque<(StatusCode, Value)>,
    require_auth: bool,
    /// Issued token -> user id.
    tokens: HashMap<String, i64>,
}

type Shared = Arc<Mutex<BackendState>>;

/// In-process HTTP backend with in-memory tables, for integration tests.
///
/// Listens on an ephemeral port of `127.0.0.1` and shuts down when dropped.
///
/// ```ignore
/// let backend = MockBackend::start().await;
/// backend.seed("roles", json!({"name": "Admin"}));
/// let api = ApiClient::from_config(&ApiConfig::new(backend.url()))?;
/// ```
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    shutdown: CancellationToken,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            next_id: 1,
            ..BackendState::default()
        }));
        let router = Router::new()
            .route("/{resource}", any(collection))
            .route("/{resource}/{id}", any(member))
            .route("/{resource}/{id}/{action}", any(action))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(signal.cancelled_owned())
                .await
                .unwrap();
        });
        tracing::debug!(%addr, "mock backend listening");

        Self {
            addr,
            state,
            shutdown,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Reject requests without a token issued by `POST /token`.
    pub fn require_auth(&self, required: bool) -> &Self {
        self.state.lock().unwrap().require_auth = required;
        self
    }

    /// Insert a raw row and return its id.
    pub fn seed(&self, resource: &str, row: Value) -> i64 {
        let mut state = self.state.lock().unwrap();
        insert(&mut state, resource, row)
    }

    /// Insert a user able to log in.
    pub fn add_user(&self, email: &str, password: &str, name: &str, role_id: i64) -> i64 {
        self.seed(
            "users",
            json!({"email": email, "password": password, "name": name, "role_id": role_id}),
        )
    }

    /// Answer the next request with `status` and `body`, whatever it is.
    pub fn fail_next(&self, status: u16, body: Value) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.state.lock().unwrap().failures.push_back((status, body));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    /// Stored rows of `resource`, without projections.
    pub fn rows(&self, resource: &str) -> Vec<Value> {
        let state = self.state.lock().unwrap();
        state
            .tables
            .get(resource)
            .map(|t| t.values().cloned().collect())
            .unwrap_or_default()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// ── Handlers ───────────────────────────────────────────────

async fn collection(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    let segments = [resource.as_str()];
    let request = record(&mut state, &method, &segments, query, &headers, &body);
    if let Some((status, body)) = state.failures.pop_front() {
        return (status, Json(body)).into_response();
    }

    if resource == "token" && method == Method::POST {
        return login(&mut state, &request.form);
    }
    let registering = resource == "users" && method == Method::POST;
    if !registering {
        if let Err(denied) = authorize(&state, &request) {
            return denied;
        }
    }
    if !RESOURCES.contains(&resource.as_str()) {
        return not_found();
    }

    match method {
        Method::GET => {
            let active_only = request
                .query
                .as_deref()
                .is_some_and(|q| q.contains("active_only=true"));
            let rows: Vec<Value> = table(&state, &resource)
                .into_iter()
                .filter(|row| !active_only || row["is_active"] == json!(true))
                .map(|row| project(&state, &resource, row))
                .collect();
            Json(rows).into_response()
        }
        Method::POST => {
            let Some(Value::Object(fields)) = request.json else {
                return unprocessable("body", "expected a JSON object");
            };
            if let Some(conflict) = duplicate(&state, &resource, &fields, None) {
                return conflict;
            }
            let id = insert(&mut state, &resource, Value::Object(fields));
            let row = state.tables[&resource][&id].clone();
            (StatusCode::CREATED, Json(project(&state, &resource, row))).into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn member(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    let segments = [resource.as_str(), id.as_str()];
    let request = record(&mut state, &method, &segments, query, &headers, &body);
    if let Some((status, body)) = state.failures.pop_front() {
        return (status, Json(body)).into_response();
    }
    if let Err(denied) = authorize(&state, &request) {
        return denied;
    }

    match (resource.as_str(), id.as_str(), &method) {
        ("users", "me", &Method::GET) => {
            let user_id = bearer(&request).and_then(|t| state.tokens.get(t)).copied();
            return match user_id.and_then(|uid| row(&state, "users", uid)) {
                Some(user) => Json(project(&state, "users", user)).into_response(),
                None => unauthorized("Not authenticated"),
            };
        }
        ("alerts", "check", &Method::POST) => {
            return Json(json!({"message": "Alert check completed"})).into_response();
        }
        ("financial-reports", stat, &Method::GET) => {
            return dashboard(stat, request.query.as_deref());
        }
        _ => {}
    }

    if !RESOURCES.contains(&resource.as_str()) {
        return not_found();
    }
    let Ok(id) = id.parse::<i64>() else {
        return unprocessable("id", "value is not a valid integer");
    };
    let Some(existing) = row(&state, &resource, id) else {
        return not_found();
    };

    match method {
        Method::GET => Json(project(&state, &resource, existing)).into_response(),
        Method::PATCH | Method::PUT => {
            let Some(Value::Object(changes)) = request.json else {
                return unprocessable("body", "expected a JSON object");
            };
            if let Some(conflict) = duplicate(&state, &resource, &changes, Some(id)) {
                return conflict;
            }
            let mut merged = existing;
            if let Value::Object(fields) = &mut merged {
                fields.extend(changes);
            }
            put_row(&mut state, &resource, id, merged.clone());
            Json(project(&state, &resource, merged)).into_response()
        }
        Method::DELETE => {
            if let Some(t) = state.tables.get_mut(&resource) {
                t.remove(&id);
            }
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn action(
    State(state): State<Shared>,
    Path((resource, id, verb)): Path<(String, String, String)>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut state = state.lock().unwrap();
    let segments = [resource.as_str(), id.as_str(), verb.as_str()];
    let request = record(&mut state, &method, &segments, query, &headers, &body);
    if let Some((status, body)) = state.failures.pop_front() {
        return (status, Json(body)).into_response();
    }
    if let Err(denied) = authorize(&state, &request) {
        return denied;
    }
    if resource != "alerts" || verb != "resolve" || method != Method::POST {
        return not_found();
    }
    let Ok(id) = id.parse::<i64>() else {
        return unprocessable("alert_id", "value is not a valid integer");
    };
    let Some(mut alert) = row(&state, "alerts", id) else {
        return not_found();
    };
    alert["is_active"] = json!(false);
    alert["resolved_at"] = json!(now());
    put_row(&mut state, "alerts", id, alert.clone());
    Json(project(&state, "alerts", alert)).into_response()
}

// ── Helpers ────────────────────────────────────────────────

fn record(
    state: &mut BackendState,
    method: &Method,
    segments: &[&str],
    query: Option<String>,
    headers: &HeaderMap,
    body: &Bytes,
) -> RecordedRequest {
    let form = match headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
            form_urlencoded::parse(body).into_owned().collect()
        }
        _ => Vec::new(),
    };
    let request = RecordedRequest {
        method: method.to_string(),
        path: format!("/{}", segments.join("/")),
        query,
        json: serde_json::from_slice(body).ok(),
        form,
        authorization: headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    state.requests.push(request.clone());
    request
}

fn bearer(request: &RecordedRequest) -> Option<&str> {
    request.authorization.as_deref()?.strip_prefix("Bearer ")
}

fn authorize(state: &BackendState, request: &RecordedRequest) -> Result<(), Response> {
    if !state.require_auth {
        return Ok(());
    }
    match bearer(request) {
        Some(token) if state.tokens.contains_key(token) => Ok(()),
        _ => Err(unauthorized("Not authenticated")),
    }
}

fn login(state: &mut BackendState, form: &[(String, String)]) -> Response {
    let field = |name: &str| {
        form.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    let (Some(username), Some(password)) = (field("username"), field("password")) else {
        return unprocessable("username", "field required");
    };
    let user_id = table(state, "users")
        .into_iter()
        .find(|u| u["email"] == json!(username) && u["password"] == json!(password))
        .and_then(|u| u["id"].as_i64());
    let Some(user_id) = user_id else {
        return unauthorized("Incorrect username or password");
    };
    let token = format!("token-{}-{}", user_id, state.tokens.len() + 1);
    state.tokens.insert(token.clone(), user_id);
    Json(json!({"access_token": token, "token_type": "bearer"})).into_response()
}

fn insert(state: &mut BackendState, resource: &str, row: Value) -> i64 {
    let id = state.next_id;
    state.next_id += 1;
    let mut fields = match row {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };
    fields.insert("id".into(), json!(id));
    if resource == "alerts" {
        fields.entry("is_active").or_insert(json!(true));
        fields.entry("created_at").or_insert(json!(now()));
    }
    put_row(state, resource, id, Value::Object(fields));
    id
}

fn put_row(state: &mut BackendState, resource: &str, id: i64, row: Value) {
    state
        .tables
        .entry(resource.to_string())
        .or_default()
        .insert(id, row);
}

fn row(state: &BackendState, resource: &str, id: i64) -> Option<Value> {
    state.tables.get(resource)?.get(&id).cloned()
}

fn table(state: &BackendState, resource: &str) -> Vec<Value> {
    state
        .tables
        .get(resource)
        .map(|t| t.values().cloned().collect())
        .unwrap_or_default()
}

fn duplicate(
    state: &BackendState,
    resource: &str,
    fields: &Map<String, Value>,
    own_id: Option<i64>,
) -> Option<Response> {
    let field = unique_field(resource)?;
    let candidate = fields.get(field)?;
    let clash = table(state, resource)
        .iter()
        .any(|row| &row[field] == candidate && row["id"].as_i64() != own_id);
    clash.then(|| {
        let body = json!({"detail": format!("{field} already exists"), "field": field});
        (StatusCode::CONFLICT, Json(body)).into_response()
    })
}

/// Add the read-only projections the real backend computes.
fn project(state: &BackendState, resource: &str, row: Value) -> Value {
    let Value::Object(mut fields) = row else {
        return row;
    };
    match resource {
        "users" => {
            fields.remove("password");
            let role_id = fields.remove("role_id").and_then(|v| v.as_i64()).unwrap_or(0);
            let name = lookup_name(state, "roles", role_id);
            fields.insert("role".into(), json!({"id": role_id, "name": name}));
        }
        "roles" => {
            let id = fields.get("id").and_then(Value::as_i64);
            let count = table(state, "users")
                .iter()
                .filter(|u| u["role_id"].as_i64() == id)
                .count();
            fields.insert("usersCount".into(), json!(count));
        }
        "reports" => {
            let author = fields.get("generated_by").and_then(Value::as_i64).unwrap_or(0);
            let name = lookup_name(state, "users", author);
            fields.insert("user".into(), json!({"id": author, "name": name}));
        }
        _ => {}
    }
    Value::Object(fields)
}

fn lookup_name(state: &BackendState, resource: &str, id: i64) -> String {
    row(state, resource, id)
        .and_then(|r| r["name"].as_str().map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn dashboard(stat: &str, query: Option<&str>) -> Response {
    let param = |name: &str| {
        query.and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        })
    };
    match stat {
        "dashboard-comparison" => {
            let timeframe = param("timeframe").unwrap_or_else(|| "7d".to_string());
            Json(json!({
                "timeframe": timeframe,
                "current": {"sales": 1500.0, "expenses": 500.0, "profit": 1000.0},
                "previous": {"sales": 1200.0, "expenses": 400.0, "profit": 800.0},
                "variations": {"sales": 25.0, "expenses": 25.0, "profit": 25.0}
            }))
            .into_response()
        }
        "fulfillment-stats" => Json(json!({
            "pending_delivery": 3,
            "shipped_but_not_delivered": 1,
            "pending_payment": 2,
            "expiring_soon": 4
        }))
        .into_response(),
        "top-selling" => {
            let limit = param("limit")
                .and_then(|l| l.parse::<usize>().ok())
                .unwrap_or(10);
            let products: Vec<Value> = (1..=12)
                .map(|i| {
                    json!({
                        "id": i,
                        "name": format!("Product {i}"),
                        "total_sold": (13 - i) * 10,
                        "total_revenue": (13 - i) as f64 * 125.5,
                        "sale_price": 12.55
                    })
                })
                .take(limit)
                .collect();
            Json(products).into_response()
        }
        _ => not_found(),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))).into_response()
}

fn unauthorized(detail: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": detail}))).into_response()
}

fn unprocessable(field: &str, message: &str) -> Response {
    let body = json!({"detail": [{"loc": ["body", field], "msg": message, "type": "value_error"}]});
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}
