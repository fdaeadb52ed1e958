use domain::{Todo, TodoPatch};
use serde::{Deserialize, Serialize};

/// Maps `Some("")` to `None`: clients send empty strings for cleared fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
    pub todo_time: Option<String>,
    pub todo_keyword: Option<String>,
}

impl CreateTodoRequest {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title,
            todo_time: non_empty(self.todo_time),
            todo_keyword: non_empty(self.todo_keyword),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub todo_time: Option<String>,
}

impl UpdateTodoRequest {
    pub fn into_patch(self) -> TodoPatch {
        TodoPatch {
            title: self.title,
            completed: self.completed,
            todo_time: non_empty(self.todo_time),
        }
    }
}

/// `GET /api/todos` wraps the items in a `list` field.
#[derive(Debug, Serialize)]
pub struct ListEnvelope {
    pub list: Vec<Todo>,
}

/// Single-item operations wrap the item in a `todo` field.
#[derive(Debug, Serialize)]
pub struct TodoEnvelope {
    pub todo: Todo,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}
