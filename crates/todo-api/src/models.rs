use serde::{Deserialize, Serialize};
use todo_domain::Todo;

/// `POST /api/todos` request body.
///
/// `value` is optional here so that a missing field produces the API's own
/// 400 response instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub value: Option<String>,
}

/// `PATCH /api/todos/{todo_id}` request body.
/// All fields are optional and applied independently.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub order: Option<i64>,
    pub done: Option<bool>,
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub todo: Todo,
}

#[derive(Debug, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}
