use todo_client::Todo;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render(todo: &Todo) -> String {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    let mut out = format!("{check} #{:<4} {}\n", todo.id, todo.title);
    if let Some(description) = todo.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("           {description}\n"));
    }
    out.push_str(&format!("           created {}", todo.created_at.format(TIME_FORMAT)));
    if todo.was_edited() {
        out.push_str(&format!(" | updated {}", todo.updated_at.format(TIME_FORMAT)));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use todo_client::TodoId;

    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn renders_open_todo_without_update_time() {
        let todo = Todo {
            id: TodoId(3),
            title: "Buy milk".into(),
            description: None,
            completed: false,
            created_at: at("2024-05-01T09:30:00"),
            updated_at: at("2024-05-01T09:30:00"),
        };
        let out = render(&todo);
        assert!(out.starts_with("[ ] #3    Buy milk\n"));
        assert!(out.contains("created 2024-05-01 09:30"));
        assert!(!out.contains("updated"));
    }

    #[test]
    fn renders_completed_todo_with_description_and_update_time() {
        let todo = Todo {
            id: TodoId(4),
            title: "Walk dog".into(),
            description: Some("around the park".into()),
            completed: true,
            created_at: at("2024-05-01T09:30:00"),
            updated_at: at("2024-05-02T18:05:00"),
        };
        let out = render(&todo);
        assert!(out.starts_with("[x] #4"));
        assert!(out.contains("around the park"));
        assert!(out.contains("updated 2024-05-02 18:05"));
    }
}
