// TodoStore - In-memory todo list with a terminal front end

pub mod config;
pub mod edit;
pub mod filter;
pub mod intent;
pub mod shell;
pub mod store;
pub mod task;
pub mod view;

// Re-export main types for convenience
pub use config::Config;
pub use edit::{EditSession, EditState};
pub use filter::Filter;
pub use intent::{Intent, Key, Outcome};
pub use shell::Shell;
pub use store::{Stats, TodoStore};
pub use task::{Task, TaskId};
pub use view::Renderer;
