use todo_client::{Filter, Todo};

use super::item;

pub fn render(todos: &[&Todo], filter: Filter) -> String {
    if todos.is_empty() {
        return match filter {
            Filter::All => "No todos yet. Add one with `add <title>`.\n".to_string(),
            Filter::Active => "Nothing left to do.\n".to_string(),
            Filter::Completed => "No completed todos.\n".to_string(),
        };
    }
    todos.iter().map(|t| item::render(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_placeholder_depends_on_filter() {
        assert!(render(&[], Filter::All).contains("No todos yet"));
        assert!(render(&[], Filter::Completed).contains("No completed todos"));
    }
}
