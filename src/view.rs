// Text rendering of a store snapshot

use crate::config::Config;
use crate::filter::Filter;
use crate::store::TodoStore;
use crate::task::Task;
use colored::{ColoredString, Colorize};

const TITLE: &str = "My Todo List";

/// Renders the store as plain or colored text
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    time_format: String,
}

impl Renderer {
    pub fn new(color: bool, time_format: impl Into<String>) -> Self {
        Self {
            color,
            time_format: time_format.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.color, config.time_format.clone())
    }

    /// Full screen: header, filter bar, visible tasks and footer
    pub fn render(&self, store: &TodoStore, filter: Filter) -> String {
        let stats = store.stats();
        let summary = if stats.total == 0 {
            "No tasks yet. Add one below!".to_string()
        } else {
            format!("{} of {} tasks completed", stats.completed, stats.total)
        };

        let mut lines = vec![
            self.paint(TITLE, |s| s.bold()),
            self.paint(&summary, |s| s.dimmed()),
            String::new(),
        ];

        if store.is_empty() {
            lines.push(format!("  {}", self.paint("No tasks yet", |s| s.dimmed())));
            lines.push("  Add your first task above to get started!".to_string());
            return join_lines(lines);
        }

        lines.push(self.filter_bar(filter));

        let visible = store.filtered_view(filter);
        if visible.is_empty() {
            lines.push(format!("  {}", self.paint(&format!("No {} tasks", filter), |s| s.dimmed())));
        }
        lines.extend(
            visible
                .iter()
                .enumerate()
                .map(|(i, task)| self.task_line(store, i + 1, task)),
        );

        let mut footer = format!("{} active tasks · {} completed tasks", stats.active, stats.completed);
        if stats.completed > 0 {
            footer.push_str(" · 'clear' to remove completed");
        }
        lines.push(String::new());
        lines.push(self.paint(&footer, |s| s.dimmed()));

        join_lines(lines)
    }

    fn filter_bar(&self, selected: Filter) -> String {
        Filter::ALL
            .iter()
            .map(|f| {
                if *f == selected {
                    self.paint(&format!("[{}]", f.label()), |s| s.blue().bold())
                } else {
                    format!(" {} ", f.label())
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn task_line(&self, store: &TodoStore, position: usize, task: &Task) -> String {
        let added = format!("Added at {}", task.created_at_local(&self.time_format));

        if let Some(draft) = store.edit_state().draft_for(task.id()) {
            return format!(
                "{:>3}. {} {}_  {}",
                position,
                self.paint("[~]", |s| s.yellow()),
                draft,
                self.paint("(editing: enter to save, :esc to cancel)", |s| s.dimmed())
            );
        }

        let (checkbox, text) = if task.is_completed() {
            (
                self.paint("[x]", |s| s.green()),
                self.paint(task.text(), |s| s.dimmed().strikethrough()),
            )
        } else {
            ("[ ]".to_string(), task.text().to_string())
        };

        format!(
            "{:>3}. {} {}  {}",
            position,
            checkbox,
            text,
            self.paint(&added, |s| s.dimmed())
        )
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// One line per entry, each ending in a newline
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
