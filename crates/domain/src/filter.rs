use serde::Deserialize;

use crate::schedule;
use crate::todo::Todo;

/// Optional list filters carried as query parameters. Empty strings are
/// treated the same as absent parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoQuery {
    pub todo_time: Option<String>,
    pub todo_keyword: Option<String>,
}

impl TodoQuery {
    pub fn normalized(mut self) -> Self {
        if self.todo_time.as_deref().is_some_and(str::is_empty) {
            self.todo_time = None;
        }
        if self.todo_keyword.as_deref().is_some_and(str::is_empty) {
            self.todo_keyword = None;
        }
        self
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.matches_keyword(todo) && self.matches_time(todo)
    }

    fn matches_keyword(&self, todo: &Todo) -> bool {
        let Some(keyword) = self.todo_keyword.as_deref() else {
            return true;
        };
        todo.todo_keyword.contains(keyword) || todo.title.contains(keyword)
    }

    fn matches_time(&self, todo: &Todo) -> bool {
        let (Some(query_time), Some(todo_time)) =
            (self.todo_time.as_deref(), todo.todo_time.as_deref())
        else {
            // No filter, or an unscheduled item: always passes.
            return true;
        };
        if schedule::parse(query_time).is_none() {
            return true;
        }
        schedule::dates_equal(query_time, todo_time, schedule::has_minutes(query_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::Todo;
    use chrono::{DateTime, Utc};

    fn todo(title: &str, time: Option<&str>, keyword: Option<&str>) -> Todo {
        let now: DateTime<Utc> = "2024-05-01T10:30:00Z".parse().unwrap();
        let mut todo = Todo::new(title.to_string(), None, keyword.map(String::from), now).unwrap();
        todo.todo_time = time.map(String::from);
        todo
    }

    #[test]
    fn keyword_matches_keyword_or_title() {
        let query = TodoQuery {
            todo_keyword: Some("milk".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&todo("Buy milk", None, None)));
        assert!(query.matches(&todo("Shopping", None, Some("milk run"))));
        assert!(!query.matches(&todo("Walk the dog", None, Some("pets"))));
    }

    #[test]
    fn day_precision_filter_ignores_clock_time() {
        let query = TodoQuery {
            todo_time: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&todo("A", Some("2024-05-01 08:15"), None)));
        assert!(!query.matches(&todo("B", Some("2024-05-02 08:15"), None)));
    }

    #[test]
    fn minute_precision_filter_compares_clock_time() {
        let query = TodoQuery {
            todo_time: Some("2024-05-01 08:15".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&todo("A", Some("2024-05-01 08:15"), None)));
        assert!(!query.matches(&todo("B", Some("2024-05-01 09:00"), None)));
    }

    #[test]
    fn unscheduled_items_pass_the_time_filter() {
        let query = TodoQuery {
            todo_time: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&todo("A", None, None)));
    }

    #[test]
    fn unparseable_query_time_matches_everything() {
        let query = TodoQuery {
            todo_time: Some("whenever".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&todo("A", Some("2024-05-01"), None)));
    }

    #[test]
    fn empty_strings_normalize_to_no_filter() {
        let query = TodoQuery {
            todo_time: Some(String::new()),
            todo_keyword: Some(String::new()),
        }
        .normalized();
        assert!(query.todo_time.is_none());
        assert!(query.todo_keyword.is_none());
    }
}
