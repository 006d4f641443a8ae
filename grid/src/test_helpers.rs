//! In-memory record backend for controller and client tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::api::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::record::{Record, RecordId};

#[derive(Default)]
struct Inner {
    collections: BTreeMap<String, Vec<Record>>,
    next_id: i64,
    offline: bool,
    rejection: Option<ApiResponse>,
    log: Vec<ApiRequest>,
}

/// REST backend over `/api/{resource}[/{id}]` that keeps records in memory.
///
/// Clones share state so a test can keep a handle after moving one into a client.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.inner.borrow_mut().next_id = 1;
        backend
    }

    /// Register `resource` with `rows`; ids continue after the largest seeded id.
    pub fn seed(&self, resource: &str, rows: Vec<Value>) {
        let mut inner = self.inner.borrow_mut();
        let records: Vec<Record> = rows.into_iter().filter_map(|v| v.as_object().cloned()).collect();
        let max_id = records.iter().filter_map(|r| r.get("id").and_then(Value::as_i64)).max().unwrap_or(0);
        inner.next_id = inner.next_id.max(max_id + 1);
        inner.collections.insert(resource.to_owned(), records);
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    /// Answer the next request with `status` and `body` instead of handling it.
    pub fn reject_next(&self, status: u16, body: &str) {
        self.inner.borrow_mut().rejection = Some(ApiResponse::new(status, body));
    }

    pub fn records(&self, resource: &str) -> Vec<Record> {
        self.inner.borrow().collections.get(resource).cloned().unwrap_or_default()
    }

    pub fn ids(&self, resource: &str) -> Vec<String> {
        self.records(resource).iter().filter_map(RecordId::of).map(|id| id.to_string()).collect()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.borrow().log.clone()
    }

    fn handle(inner: &mut Inner, request: &ApiRequest) -> ApiResponse {
        let path = request.url.strip_prefix("/api/").unwrap_or(&request.url);
        let mut segments = path.split('/');
        let resource = segments.next().unwrap_or_default().to_owned();
        let id = segments.next().map(str::to_owned);

        if !inner.collections.contains_key(&resource) {
            return ApiResponse::new(400, json!({ "error": "Invalid model" }).to_string());
        }

        match (request.method, id) {
            (Method::Get, None) => {
                let data = Value::Array(inner.collections[&resource].iter().cloned().map(Value::Object).collect());
                ApiResponse::new(200, json!({ "data": data }).to_string())
            }
            (Method::Post, None) => {
                let Some(Value::Object(fields)) = request.body.clone() else {
                    return ApiResponse::new(400, json!({ "error": "Expected JSON object" }).to_string());
                };
                let id = inner.next_id;
                inner.next_id += 1;
                let mut record = Record::new();
                record.insert("id".to_owned(), json!(id));
                record.extend(fields.into_iter().filter(|(key, _)| key != "id"));
                inner.collections.entry(resource).or_default().push(record);
                ApiResponse::new(201, json!({ "mensaje": "created" }).to_string())
            }
            (Method::Put, Some(id)) => {
                let rows = inner.collections.entry(resource).or_default();
                let Some(row) = rows.iter_mut().find(|r| RecordId::of(r).is_some_and(|r| r.as_str() == id)) else {
                    return ApiResponse::new(404, json!({ "error": "Not found" }).to_string());
                };
                if let Some(Value::Object(fields)) = &request.body {
                    for (key, value) in fields {
                        if row.contains_key(key) {
                            row.insert(key.clone(), value.clone());
                        }
                    }
                }
                ApiResponse::new(200, json!({ "mensaje": "updated" }).to_string())
            }
            (Method::Delete, Some(id)) => {
                let rows = inner.collections.entry(resource).or_default();
                let before = rows.len();
                rows.retain(|r| RecordId::of(r).is_none_or(|r| r.as_str() != id));
                if rows.len() == before {
                    return ApiResponse::new(404, json!({ "error": "Not found" }).to_string());
                }
                ApiResponse::new(200, json!({ "mensaje": "deleted" }).to_string())
            }
            _ => ApiResponse::new(405, String::new()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut inner = self.inner.borrow_mut();
        inner.log.push(request.clone());
        if inner.offline {
            return Err(TransportError("connection refused".to_owned()));
        }
        if let Some(rejection) = inner.rejection.take() {
            return Ok(rejection);
        }
        Ok(Self::handle(&mut inner, &request))
    }
}

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record literal must be an object")
}
