// Interactive line-based session around one TodoStore

use crate::config::Config;
use crate::filter::Filter;
use crate::intent::{Intent, Key, Outcome};
use crate::store::TodoStore;
use crate::task::TaskId;
use crate::view::Renderer;
use eyre::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  add <text>        add a task (a line that is not a command is added as-is)
  toggle <n>        mark task n done / not done
  edit <n>          edit task n; the next line is saved as its text
                    (:enter keeps the text, :esc cancels)
  rm <n>            delete task n
  clear             delete all completed tasks
  filter <name>     show all, active or completed tasks
  json              print the tasks as JSON
  help              show this help
  quit              end the session
Task numbers refer to the list as currently shown.";

/// Parsed form of one input line outside edit mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Add(String),
    Toggle(usize),
    Remove(usize),
    Edit(usize),
    Filter(Filter),
    Clear,
    Json,
    Help,
    Quit,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match (word.to_ascii_lowercase().as_str(), rest) {
            ("add", _) => Command::Add(rest.to_string()),
            ("toggle", _) => Self::position(rest, Command::Toggle),
            ("rm" | "delete", _) => Self::position(rest, Command::Remove),
            ("edit", _) => Self::position(rest, Command::Edit),
            ("filter", _) => match rest.parse() {
                Ok(filter) => Command::Filter(filter),
                Err(e) => Command::Invalid(e.to_string()),
            },
            ("clear", "") => Command::Clear,
            ("json", "") => Command::Json,
            ("help" | "?", "") => Command::Help,
            ("quit" | "exit" | "q", "") => Command::Quit,
            _ => Command::Add(line.to_string()),
        }
    }

    fn position(arg: &str, make: fn(usize) -> Command) -> Command {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => make(n),
            _ => Command::Invalid(format!("Expected a task number, got '{}'", arg)),
        }
    }
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the store for the lifetime of one session
pub struct Shell {
    store: TodoStore,
    filter: Filter,
    renderer: Renderer,
    prompt: String,
}

impl Shell {
    pub fn new(config: &Config) -> Self {
        Self {
            store: TodoStore::new(),
            filter: config.default_filter,
            renderer: Renderer::from_config(config),
            prompt: config.prompt.clone(),
        }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn render(&self) -> String {
        self.renderer.render(&self.store, self.filter)
    }

    /// Read commands until EOF or `quit`, rendering after each one
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W, interactive: bool) -> Result<()> {
        info!(filter = %self.filter, "Session started");

        if interactive {
            write!(output, "{}", self.render())?;
            self.prompt(output)?;
        }

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            let flow = self.execute(&line, output)?;
            if flow == Flow::Quit {
                break;
            }
            if interactive {
                self.prompt(output)?;
            }
        }

        info!(tasks = self.store.len(), "Session ended");
        Ok(())
    }

    /// Handle one input line
    pub fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> Result<Flow> {
        if let Some(id) = self.store.editing_id() {
            self.edit_line(id, line);
            write!(output, "{}", self.render())?;
            return Ok(Flow::Continue);
        }

        let command = Command::parse(line);
        debug!(?command, "execute");

        let intent = match command {
            Command::Empty => return Ok(Flow::Continue),
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(output, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Invalid(message) => {
                writeln!(output, "{} (type 'help' for commands)", message)?;
                return Ok(Flow::Continue);
            }
            Command::Json => {
                let json = serde_json::to_string_pretty(self.store.tasks()).context("Failed to serialize tasks")?;
                writeln!(output, "{}", json)?;
                return Ok(Flow::Continue);
            }
            Command::Filter(filter) => {
                self.filter = filter;
                write!(output, "{}", self.render())?;
                return Ok(Flow::Continue);
            }
            Command::Add(text) => Some(Intent::Submit(text)),
            Command::Clear => Some(Intent::ClearCompleted),
            Command::Toggle(n) => self.resolve(n).map(Intent::Toggle),
            Command::Remove(n) => self.resolve(n).map(Intent::Remove),
            Command::Edit(n) => self.resolve(n).map(Intent::BeginEdit),
        };

        match intent {
            Some(intent) => {
                if self.store.dispatch(intent) == Outcome::Unchanged {
                    debug!("Nothing changed");
                }
                write!(output, "{}", self.render())?;
            }
            None => writeln!(output, "No such task in the current view")?,
        }

        Ok(Flow::Continue)
    }

    /// In edit mode every line is draft text, except the two key commands
    fn edit_line(&mut self, id: TaskId, line: &str) {
        match line.trim() {
            ":esc" => {
                self.store.dispatch(Intent::EditKey(id, Key::Escape));
            }
            ":enter" | "" => {
                self.store.dispatch(Intent::EditKey(id, Key::Enter));
            }
            _ => {
                self.store.dispatch(Intent::EditInput(id, line.to_string()));
                self.store.dispatch(Intent::EditKey(id, Key::Enter));
            }
        }
    }

    /// Map a 1-based position in the visible list to a task id
    fn resolve(&self, position: usize) -> Option<TaskId> {
        self.store
            .filtered_view(self.filter)
            .get(position.checked_sub(1)?)
            .map(|t| t.id())
    }

    fn prompt<W: Write>(&self, output: &mut W) -> Result<()> {
        write!(output, "{}", self.prompt)?;
        output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        let config = Config {
            color: false,
            ..Config::default()
        };
        Shell::new(&config)
    }

    fn run_lines(shell: &mut Shell, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            shell.execute(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    fn texts(shell: &Shell) -> Vec<String> {
        shell.store().tasks().iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("add  Buy milk "), Command::Add("Buy milk".to_string()));
        assert_eq!(Command::parse("Buy milk"), Command::Add("Buy milk".to_string()));
        assert_eq!(Command::parse("toggle 2"), Command::Toggle(2));
        assert_eq!(Command::parse("rm 1"), Command::Remove(1));
        assert_eq!(Command::parse("delete 3"), Command::Remove(3));
        assert_eq!(Command::parse("edit 1"), Command::Edit(1));
        assert_eq!(Command::parse("filter active"), Command::Filter(Filter::Active));
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("QUIT"), Command::Quit);
        assert_eq!(Command::parse("clear the garage"), Command::Add("clear the garage".to_string()));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Command::parse("toggle"), Command::Invalid(_)));
        assert!(matches!(Command::parse("toggle 0"), Command::Invalid(_)));
        assert!(matches!(Command::parse("rm x"), Command::Invalid(_)));
        assert!(matches!(Command::parse("filter soon"), Command::Invalid(_)));
    }

    #[test]
    fn test_add_and_toggle_by_position() {
        let mut shell = shell();
        run_lines(&mut shell, &["add Task1", "Task2", "toggle 2"]);

        assert_eq!(texts(&shell), vec!["Task2", "Task1"]);
        assert!(shell.store().tasks()[1].is_completed());
    }

    #[test]
    fn test_positions_follow_filter() {
        let mut shell = shell();
        run_lines(&mut shell, &["Task1", "Task2", "toggle 2", "filter active", "rm 1"]);

        assert_eq!(shell.filter(), Filter::Active);
        assert_eq!(texts(&shell), vec!["Task1"]);
    }

    #[test]
    fn test_stale_position_is_reported() {
        let mut shell = shell();
        let out = run_lines(&mut shell, &["Only", "rm 1", "rm 1"]);

        assert!(shell.store().is_empty());
        assert!(out.contains("No such task in the current view"));
    }

    #[test]
    fn test_edit_flow() {
        let mut shell = shell();
        run_lines(&mut shell, &["Old text", "edit 1", "  New text  "]);
        assert_eq!(texts(&shell), vec!["New text"]);
        assert_eq!(shell.store().editing_id(), None);

        run_lines(&mut shell, &["edit 1", ":esc"]);
        assert_eq!(texts(&shell), vec!["New text"]);
        assert_eq!(shell.store().editing_id(), None);

        run_lines(&mut shell, &["edit 1", ":enter"]);
        assert_eq!(texts(&shell), vec!["New text"]);
        assert_eq!(shell.store().editing_id(), None);
    }

    #[test]
    fn test_edit_mode_treats_commands_as_text() {
        let mut shell = shell();
        run_lines(&mut shell, &["Task", "edit 1", "clear"]);
        assert_eq!(texts(&shell), vec!["clear"]);
    }

    #[test]
    fn test_clear_and_json() {
        let mut shell = shell();
        let out = run_lines(&mut shell, &["Task1", "Task2", "toggle 2", "clear", "json"]);

        assert_eq!(texts(&shell), vec!["Task2"]);
        assert!(out.contains("\"text\": \"Task2\""));
    }

    #[test]
    fn test_run_stops_at_quit() {
        let mut shell = shell();
        let input = "Task1\nquit\nTask2\n".as_bytes();
        let mut out = Vec::new();

        shell.run(input, &mut out, false).unwrap();
        assert_eq!(texts(&shell), vec!["Task1"]);
    }

    #[test]
    fn test_run_interactive_prints_prompt() {
        let mut shell = shell();
        let mut out = Vec::new();

        shell.run("help\n".as_bytes(), &mut out, true).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("My Todo List"));
        assert!(out.contains("> "));
        assert!(out.contains("Commands:"));
    }
}
