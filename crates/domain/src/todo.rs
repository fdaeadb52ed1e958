use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::schedule;

const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Millisecond timestamp embedded in the id, if it parses as a ULID.
    pub fn timestamp_ms(&self) -> Option<u64> {
        ulid::Ulid::from_string(&self.0)
            .ok()
            .map(|ulid| ulid.timestamp_ms())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One todo item as stored in the list document and returned on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo_time: Option<String>,
    /// Always present in the document, empty when the item has no keyword.
    #[serde(default)]
    pub todo_keyword: String,
}

impl Todo {
    /// Builds a new item with a fresh id. `todo_time` is normalized to
    /// `YYYY-MM-DD HH:MM` when it parses, otherwise it falls back to
    /// today's date.
    pub fn new(
        title: String,
        todo_time: Option<String>,
        todo_keyword: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_title(&title)?;

        Ok(Self {
            id: TodoId::new(),
            title,
            completed: false,
            updated_at: now,
            todo_time: Some(schedule::normalize_or_today(todo_time.as_deref(), now)),
            todo_keyword: todo_keyword.unwrap_or_default(),
        })
    }
}

/// Partial update applied by PUT. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub todo_time: Option<String>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.todo_time.is_none()
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("Title cannot be empty".to_string()));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(DomainError::Validation(format!(
            "Title too long (max {MAX_TITLE_LEN} characters)"
        )));
    }
    Ok(())
}

/// One user's whole todo list. This is the unit of persistence: the document
/// is read, mutated in memory, and rewritten wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList(Vec<Todo>);

impl TodoList {
    pub fn new(items: Vec<Todo>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[Todo] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.0.iter().find(|todo| todo.id.as_str() == id)
    }

    /// Appends an item. Ids are generated server-side, so a collision within
    /// one list is not expected; it is still rejected to keep ids unique.
    pub fn insert(&mut self, todo: Todo) -> DomainResult<()> {
        if self.find(todo.id.as_str()).is_some() {
            return Err(DomainError::Validation(format!(
                "Duplicate todo id: {}",
                todo.id
            )));
        }
        self.0.push(todo);
        Ok(())
    }

    /// Applies a patch in place and returns the updated item. An unknown id
    /// is reported before the patch itself is inspected.
    pub fn update(&mut self, id: &str, patch: TodoPatch) -> DomainResult<Todo> {
        let index = self
            .0
            .iter()
            .position(|todo| todo.id.as_str() == id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;

        if patch.is_empty() {
            return Err(DomainError::Validation(
                "At least one of 'title', 'completed' or 'todoTime' is required".to_string(),
            ));
        }

        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }
        let todo_time = match patch.todo_time.as_deref() {
            Some(raw) => Some(schedule::normalize(raw).ok_or_else(|| {
                DomainError::Validation(format!("Invalid todoTime: {raw}"))
            })?),
            None => None,
        };

        let todo = &mut self.0[index];

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        if let Some(time) = todo_time {
            todo.todo_time = Some(time);
        }

        Ok(todo.clone())
    }

    /// Removes an item and returns it.
    pub fn remove(&mut self, id: &str) -> DomainResult<Todo> {
        let index = self
            .0
            .iter()
            .position(|todo| todo.id.as_str() == id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        Ok(self.0.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-05-01T10:30:00Z".parse().unwrap()
    }

    #[test]
    fn new_todo_generates_ulid_id() {
        let todo = Todo::new("Buy milk".to_string(), None, None, now()).unwrap();
        assert_eq!(todo.id.as_str().len(), 26);
        assert!(todo.id.timestamp_ms().is_some());
        assert!(!todo.completed);
    }

    #[test]
    fn new_todo_defaults_time_to_today() {
        let todo = Todo::new("Buy milk".to_string(), None, None, now()).unwrap();
        assert_eq!(todo.todo_time.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn new_todo_normalizes_given_time_to_minutes() {
        let todo = Todo::new(
            "Buy milk".to_string(),
            Some("2024-06-02T08:15:00Z".to_string()),
            None,
            now(),
        )
        .unwrap();
        assert_eq!(todo.todo_time.as_deref(), Some("2024-06-02 08:15"));
    }

    #[test]
    fn new_todo_rejects_blank_title() {
        let err = Todo::new("   ".to_string(), None, None, now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut list = TodoList::default();
        let todo = Todo::new("A".to_string(), None, None, now()).unwrap();
        list.insert(todo.clone()).unwrap();
        assert!(list.insert(todo).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn update_applies_only_named_fields() {
        let mut list = TodoList::default();
        let todo = Todo::new("A".to_string(), None, None, now()).unwrap();
        let id = todo.id.as_str().to_string();
        list.insert(todo).unwrap();

        let patch = TodoPatch {
            completed: Some(true),
            ..Default::default()
        };
        let updated = list.update(&id, patch).unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "A");
        // The stored timestamp is not rewritten on update.
        assert_eq!(updated.updated_at, now());
    }

    #[test]
    fn update_rejects_empty_patch() {
        let mut list = TodoList::default();
        let todo = Todo::new("A".to_string(), None, None, now()).unwrap();
        let id = todo.id.as_str().to_string();
        list.insert(todo).unwrap();

        let err = list.update(&id, TodoPatch::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut list = TodoList::default();
        let patch = TodoPatch {
            completed: Some(true),
            ..Default::default()
        };
        let err = list.update("missing", patch).unwrap_err();
        assert_eq!(err, DomainError::NotFound("missing".to_string()));
    }

    #[test]
    fn unknown_id_wins_over_an_invalid_patch() {
        let mut list = TodoList::default();
        let patch = TodoPatch {
            todo_time: Some("not a date".to_string()),
            ..Default::default()
        };
        let err = list.update("missing", patch).unwrap_err();
        assert_eq!(err, DomainError::NotFound("missing".to_string()));

        let err = list.update("missing", TodoPatch::default()).unwrap_err();
        assert_eq!(err, DomainError::NotFound("missing".to_string()));
    }

    #[test]
    fn update_rejects_unparseable_todo_time() {
        let mut list = TodoList::default();
        let todo = Todo::new("A".to_string(), None, None, now()).unwrap();
        let id = todo.id.as_str().to_string();
        list.insert(todo).unwrap();

        let patch = TodoPatch {
            todo_time: Some("not a date".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            list.update(&id, patch).unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn remove_returns_the_removed_item() {
        let mut list = TodoList::default();
        let todo = Todo::new("A".to_string(), None, None, now()).unwrap();
        let id = todo.id.as_str().to_string();
        list.insert(todo).unwrap();

        let removed = list.remove(&id).unwrap();
        assert_eq!(removed.title, "A");
        assert!(list.is_empty());
        assert!(list.remove(&id).is_err());
    }

    #[test]
    fn list_document_roundtrips_with_camel_case_fields() {
        let todo = Todo::new(
            "A".to_string(),
            Some("2024-06-02 08:15".to_string()),
            Some("errand".to_string()),
            now(),
        )
        .unwrap();
        let mut list = TodoList::default();
        list.insert(todo).unwrap();

        let json = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        let first = &json[0];
        assert!(first.get("updatedAt").is_some());
        assert_eq!(first["todoTime"], "2024-06-02 08:15");
        assert_eq!(first["todoKeyword"], "errand");

        let back: TodoList = serde_json::from_value(json).unwrap();
        assert_eq!(back, list);
    }

    #[test]
    fn keyword_serializes_as_empty_string_when_absent() {
        let todo = Todo::new("A".to_string(), None, None, now()).unwrap();
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["todoKeyword"], "");

        // Documents written before the field existed still load.
        let mut json = json;
        json.as_object_mut().unwrap().remove("todoKeyword");
        let back: Todo = serde_json::from_value(json).unwrap();
        assert_eq!(back.todo_keyword, "");
    }
}
