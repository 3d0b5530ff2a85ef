//! Fake Search Engine
//!
//! Speaks the subset of the engine's HTTP dialect the gateway uses: cluster health,
//! index creation, document CRUD, boolean search with nested clauses and inner hits,
//! and delete-by-query. Documents live in memory in insertion order.

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct FakeState {
    pub name: String,
    docs: Mutex<Vec<(String, Value)>>,
    indices: Mutex<Vec<String>>,
    next_id: AtomicU64,
    /// Every request as `METHOD /path?query`.
    requests: Mutex<Vec<String>>,
    /// Bodies received on `_search`.
    searches: Mutex<Vec<Value>>,
    /// When set, every request is answered with this status.
    fail_with: Mutex<Option<u16>>,
}

impl FakeState {
    pub fn doc_count(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn doc(&self, id: &str) -> Option<Value> {
        let docs = self.docs.lock().unwrap();
        docs.iter().find(|(d, _)| d == id).map(|(_, v)| v.clone())
    }

    pub fn ids(&self) -> Vec<String> {
        self.docs.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }

    pub fn last_search(&self) -> Option<Value> {
        self.searches.lock().unwrap().last().cloned()
    }

    pub fn fail(&self, status: Option<u16>) {
        *self.fail_with.lock().unwrap() = status;
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct FakeEngine {
    pub base_url: String,
    pub state: Arc<FakeState>,
}

pub async fn spawn(name: &str) -> FakeEngine {
    let state = Arc::new(FakeState {
        name: name.to_string(),
        ..Default::default()
    });

    let app = Router::new()
        .route("/_cluster/health", get(health))
        .route("/:index", put(create_index))
        .route("/:index/_doc", post(post_doc))
        .route("/:index/_doc/:id", get(get_doc).put(put_doc))
        .route("/:index/_create/:id", put(create_doc))
        .route("/:index/_search", post(search))
        .route("/:index/_delete_by_query", post(delete_by_query))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeEngine {
        base_url: format!("http://{}", addr),
        state,
    }
}

async fn record(State(state): State<Arc<FakeState>>, request: Request, next: Next) -> Response {
    let line = match request.uri().query() {
        Some(query) => format!("{} {}?{}", request.method(), request.uri().path(), query),
        None => format!("{} {}", request.method(), request.uri().path()),
    };
    state.requests.lock().unwrap().push(line);

    let injected = *state.fail_with.lock().unwrap();
    if let Some(status) = injected {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (
            status,
            Json(json!({ "error": { "type": "injected_failure", "reason": state.name } })),
        )
            .into_response();
    }
    next.run(request).await
}

async fn health(State(state): State<Arc<FakeState>>) -> Json<Value> {
    Json(json!({ "cluster_name": state.name, "status": "green" }))
}

async fn create_index(
    State(state): State<Arc<FakeState>>,
    Path(index): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut indices = state.indices.lock().unwrap();
    if indices.contains(&index) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "type": "resource_already_exists_exception" }, "status": 400 })),
        );
    }
    indices.push(index.clone());
    (
        StatusCode::OK,
        Json(json!({ "acknowledged": true, "index": index })),
    )
}

async fn post_doc(
    State(state): State<Arc<FakeState>>,
    Path(_index): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let id = format!("doc-{}", state.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    state.docs.lock().unwrap().push((id.clone(), body));
    (
        StatusCode::CREATED,
        Json(json!({ "_id": id, "result": "created" })),
    )
}

async fn create_doc(
    State(state): State<Arc<FakeState>>,
    Path((_index, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut docs = state.docs.lock().unwrap();
    if docs.iter().any(|(d, _)| d == &id) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": { "type": "version_conflict_engine_exception" } })),
        );
    }
    docs.push((id.clone(), body));
    (
        StatusCode::CREATED,
        Json(json!({ "_id": id, "result": "created" })),
    )
}

async fn put_doc(
    State(state): State<Arc<FakeState>>,
    Path((_index, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut docs = state.docs.lock().unwrap();
    if let Some(entry) = docs.iter_mut().find(|(d, _)| d == &id) {
        entry.1 = body;
        return (
            StatusCode::OK,
            Json(json!({ "_id": id, "result": "updated" })),
        );
    }
    docs.push((id.clone(), body));
    (
        StatusCode::CREATED,
        Json(json!({ "_id": id, "result": "created" })),
    )
}

async fn get_doc(
    State(state): State<Arc<FakeState>>,
    Path((index, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    match state.doc(&id) {
        Some(source) => (
            StatusCode::OK,
            Json(json!({ "_index": index, "_id": id, "found": true, "_source": source })),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "_index": index, "_id": id, "found": false })),
        ),
    }
}

async fn search(
    State(state): State<Arc<FakeState>>,
    Path(_index): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.searches.lock().unwrap().push(body.clone());
    let query = body.get("query").cloned().unwrap_or(json!({ "match_all": {} }));

    let docs = state.docs.lock().unwrap();
    let hits: Vec<Value> = docs
        .iter()
        .filter_map(|(id, source)| {
            let mut inner = HashMap::new();
            if !eval(&query, source, &mut inner) {
                return None;
            }
            let mut hit = json!({ "_id": id, "_source": source });
            if !inner.is_empty() {
                let slices: Map<String, Value> = inner
                    .into_iter()
                    .map(|(name, elements)| {
                        let inner_hits: Vec<Value> = elements
                            .into_iter()
                            .map(|element| json!({ "_source": element }))
                            .collect();
                        (name, json!({ "hits": { "hits": inner_hits } }))
                    })
                    .collect();
                hit["inner_hits"] = Value::Object(slices);
            }
            Some(hit)
        })
        .collect();

    Json(json!({ "hits": { "total": { "value": hits.len() }, "hits": hits } }))
}

async fn delete_by_query(
    State(state): State<Arc<FakeState>>,
    Path(_index): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let query = body.get("query").cloned().unwrap_or(Value::Null);
    let mut docs = state.docs.lock().unwrap();
    let before = docs.len();
    docs.retain(|(_, source)| !eval(&query, source, &mut HashMap::new()));
    Json(json!({ "deleted": before - docs.len(), "failures": [] }))
}

// --- Query Evaluation ---

fn eval(query: &Value, doc: &Value, inner: &mut HashMap<String, Vec<Value>>) -> bool {
    let Some((kind, body)) = query.as_object().and_then(|o| o.iter().next()) else {
        return false;
    };

    match kind.as_str() {
        "match_all" => true,
        "term" => field_test(body, doc, |value, expected| value == expected),
        "prefix" => field_test(body, doc, |value, expected| value.starts_with(expected)),
        "match" => field_test(body, doc, |value, expected| {
            let value = value.to_lowercase();
            expected
                .to_lowercase()
                .split_whitespace()
                .any(|token| value.split_whitespace().any(|word| word == token))
        }),
        "nested" => {
            let path = body["path"].as_str().unwrap_or_default();
            let elements = doc[path].as_array().cloned().unwrap_or_default();
            let matched: Vec<Value> = elements
                .into_iter()
                .filter(|element| {
                    let scoped = json!({ path: element });
                    eval(&body["query"], &scoped, &mut HashMap::new())
                })
                .collect();
            if matched.is_empty() {
                return false;
            }
            if let Some(name) = body["inner_hits"]["name"].as_str() {
                inner.insert(name.to_string(), matched);
            }
            true
        }
        "bool" => {
            let clauses = |group: &str| body[group].as_array().cloned().unwrap_or_default();
            let must_ok = clauses("must")
                .iter()
                .chain(clauses("filter").iter())
                .all(|clause| eval(clause, doc, inner));
            if !must_ok {
                return false;
            }
            let should = clauses("should");
            let required = body["minimum_should_match"].as_u64().unwrap_or(0) as usize;
            let matched = should
                .iter()
                .filter(|clause| eval(clause, doc, inner))
                .count();
            matched >= required
        }
        _ => false,
    }
}

fn field_test<F>(body: &Value, doc: &Value, test: F) -> bool
where
    F: Fn(&str, &str) -> bool,
{
    let Some((field, expected)) = body.as_object().and_then(|o| o.iter().next()) else {
        return false;
    };
    let Some(expected) = expected.as_str() else {
        return false;
    };
    field_values(doc, field)
        .iter()
        .any(|value| test(value.as_str(), expected))
}

fn field_values(doc: &Value, field: &str) -> Vec<String> {
    let mut current = vec![doc.clone()];
    for part in field.split('.') {
        current = current
            .into_iter()
            .flat_map(|value| match &value[part] {
                Value::Array(items) => items.clone(),
                Value::Null => Vec::new(),
                other => vec![other.clone()],
            })
            .collect();
    }
    current
        .into_iter()
        .filter_map(|value| value.as_str().map(str::to_string))
        .collect()
}
