use std::cell::RefCell;
use std::rc::Rc;

use grid::{ApiRequest, ApiResponse, GridConfig, Method, TransportError};
use serde_json::{Value, json};

use super::*;

/// Single-collection backend at `/api/datos`.
#[derive(Clone, Default)]
struct FakeBackend {
    state: Rc<RefCell<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    rows: Vec<Value>,
    next_id: i64,
    /// Answer for the next write instead of applying it.
    reply: Option<(u16, String)>,
    writes: Vec<ApiRequest>,
}

impl FakeBackend {
    fn with_rows(rows: Vec<Value>) -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.borrow_mut();
            state.next_id = i64::try_from(rows.len()).unwrap() + 1;
            state.rows = rows;
        }
        backend
    }

    fn reply_next(&self, status: u16, body: &str) {
        self.state.borrow_mut().reply = Some((status, body.to_owned()));
    }

    fn writes(&self) -> Vec<ApiRequest> {
        self.state.borrow().writes.clone()
    }

    fn rows(&self) -> Vec<Value> {
        self.state.borrow().rows.clone()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.borrow_mut();
        if request.method != Method::Get {
            state.writes.push(request.clone());
            if let Some((status, body)) = state.reply.take() {
                return Ok(ApiResponse::new(status, body));
            }
        }
        let id = request.url.strip_prefix("/api/datos/").map(str::to_owned);
        match (request.method, id) {
            (Method::Get, None) => Ok(ApiResponse::new(200, json!({ "data": state.rows }).to_string())),
            (Method::Post, None) => {
                let mut row = json!({ "id": state.next_id });
                state.next_id += 1;
                if let (Some(target), Some(Value::Object(fields))) = (row.as_object_mut(), request.body) {
                    target.extend(fields);
                }
                state.rows.push(row);
                Ok(ApiResponse::new(201, "{}"))
            }
            (Method::Put, Some(id)) => {
                let row = state.rows.iter_mut().find(|r| r["id"].to_string() == id);
                match (row, request.body) {
                    (Some(row), Some(body)) => {
                        *row = body;
                        Ok(ApiResponse::new(200, "{}"))
                    }
                    _ => Ok(ApiResponse::new(404, r#"{"error":"Not found"}"#)),
                }
            }
            (Method::Delete, Some(id)) => {
                state.rows.retain(|r| r["id"].to_string() != id);
                Ok(ApiResponse::new(200, "{}"))
            }
            _ => Ok(ApiResponse::new(405, "")),
        }
    }
}

fn seeded() -> (FakeBackend, GridController<FakeBackend>) {
    let backend = FakeBackend::with_rows(vec![
        json!({ "id": 1, "nombre": "Carla", "edad": 41 }),
        json!({ "id": 2, "nombre": "Ana", "edad": 29 }),
        json!({ "id": 3, "nombre": "Beto", "edad": 35 }),
    ]);
    let controller = GridController::new(backend.clone(), GridConfig::default());
    (backend, controller)
}

fn set(field: &str, value: &str) -> (String, String) {
    (field.to_owned(), value.to_owned())
}

#[tokio::test]
async fn keys_lists_columns_id_first() {
    let (_, mut controller) = seeded();
    let out = keys(&mut controller, "datos").await.unwrap();
    let names: Vec<&str> = out.lines().map(|l| l.split_whitespace().next().unwrap()).collect();
    assert_eq!(names, vec!["id", "nombre", "edad"]);
}

#[tokio::test]
async fn list_sorts_descending_by_field() {
    let (_, mut controller) = seeded();
    let options = ListOptions { sort: Some("nombre".to_owned()), descending: true, page: 1, ..ListOptions::default() };
    let out = list(&mut controller, "datos", &options).await.unwrap();
    let names: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with('│'))
        .skip(1)
        .map(|l| l.split('│').nth(2).unwrap().trim())
        .collect();
    assert_eq!(names, vec!["Carla", "Beto", "Ana"]);
}

#[tokio::test]
async fn list_search_reports_filtered_total() {
    let (_, mut controller) = seeded();
    let options = ListOptions { search: Some("an".to_owned()), page: 1, ..ListOptions::default() };
    let out = list(&mut controller, "datos", &options).await.unwrap();
    assert!(out.ends_with("Showing 1 to 1 of 1 entries (filtered from 3 total entries)\n"));
}

#[tokio::test]
async fn list_rejects_unknown_sort_field() {
    let (_, mut controller) = seeded();
    let options = ListOptions { sort: Some("salario".to_owned()), page: 1, ..ListOptions::default() };
    let err = list(&mut controller, "datos", &options).await.unwrap_err();
    assert!(matches!(err, CliError::UnknownField(field) if field == "salario"));
}

#[tokio::test]
async fn create_posts_assigned_fields() {
    let (backend, mut controller) = seeded();
    let out = create(&mut controller, "datos", &[set("nombre", "Diego"), set("edad", "50")]).await.unwrap();
    assert_eq!(out, "Record created successfully");
    let post = &backend.writes()[0];
    assert_eq!(post.url, "/api/datos");
    assert_eq!(post.body, Some(json!({ "nombre": "Diego", "edad": 50 })));
    assert_eq!(controller.session().table().records().len(), 4);
}

#[tokio::test]
async fn update_keeps_unassigned_fields() {
    let (backend, mut controller) = seeded();
    let out = update(&mut controller, "datos", "2", &[set("edad", "30")]).await.unwrap();
    assert_eq!(out, "Record updated successfully");
    assert_eq!(backend.rows()[1], json!({ "id": 2, "nombre": "Ana", "edad": 30 }));
}

#[tokio::test]
async fn update_surfaces_backend_error() {
    let (backend, mut controller) = seeded();
    backend.reply_next(400, r#"{"error":"Invalid field"}"#);
    let err = update(&mut controller, "datos", "1", &[set("edad", "abc")]).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid field");
    assert_eq!(backend.rows()[0], json!({ "id": 1, "nombre": "Carla", "edad": 41 }));
}

#[tokio::test]
async fn rejected_create_is_generic() {
    let (backend, mut controller) = seeded();
    backend.reply_next(400, r#"{"error":"'nombre'"}"#);
    let err = create(&mut controller, "datos", &[set("edad", "5")]).await.unwrap_err();
    assert_eq!(err.to_string(), "Error creating record");
}

#[tokio::test]
async fn update_of_missing_record_sends_nothing() {
    let (backend, mut controller) = seeded();
    let err = update(&mut controller, "datos", "99", &[set("edad", "1")]).await.unwrap_err();
    assert!(matches!(err, CliError::RecordNotFound(id) if id == "99"));
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn update_cannot_assign_id() {
    let (backend, mut controller) = seeded();
    let err = update(&mut controller, "datos", "1", &[set("id", "7")]).await.unwrap_err();
    assert!(matches!(err, CliError::UnknownField(field) if field == "id"));
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let (backend, mut controller) = seeded();
    let out = delete(&mut controller, "datos", "3", |_| Ok(false)).await.unwrap();
    assert_eq!(out, "Cancelled");
    assert!(backend.writes().is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_record() {
    let (backend, mut controller) = seeded();
    let mut asked = String::new();
    let out = delete(&mut controller, "datos", "3", |question| {
        asked = question.to_owned();
        Ok(true)
    })
    .await
    .unwrap();
    assert_eq!(out, "Record deleted successfully");
    assert_eq!(asked, "Are you sure you want to delete this record?");
    assert_eq!(backend.writes()[0].url, "/api/datos/3");
    assert_eq!(backend.rows().len(), 2);
}
