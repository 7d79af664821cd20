//! Filter bar, statistics line and bulk actions.

use todo_client::{Filter, Stats};

pub struct TodoFilter;

impl TodoFilter {
    pub fn can_clear_completed(stats: &Stats, is_loading: bool) -> bool {
        stats.completed > 0 && !is_loading
    }

    pub fn can_clear_all(stats: &Stats, is_loading: bool) -> bool {
        stats.total > 0 && !is_loading
    }

    pub fn label(filter: Filter) -> &'static str {
        match filter {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn render(current: Filter, stats: &Stats, is_loading: bool) -> String {
        let tabs: Vec<String> = Filter::ALL
            .iter()
            .map(|&f| {
                let tab = format!("{} ({})", Self::label(f), stats.count(f));
                if f == current {
                    format!("[{tab}]")
                } else {
                    format!(" {tab} ")
                }
            })
            .collect();

        let action = |name: &str, enabled: bool| {
            if enabled {
                name.to_string()
            } else {
                format!("{name} (disabled)")
            }
        };

        format!(
            "{}\nTotal: {} | Completed: {} | Active: {}\nActions: {}, {}\n",
            tabs.join(" "),
            stats.total,
            stats.completed,
            stats.active,
            action("clear-completed", Self::can_clear_completed(stats, is_loading)),
            action("clear-all", Self::can_clear_all(stats, is_loading)),
        )
    }
}
