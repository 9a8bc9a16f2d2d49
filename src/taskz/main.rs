use chrono::{DateTime, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::str::FromStr;
use taskz::book::{TaskBook, STORE_KEY};
use taskz::config::TaskzConfig;
use taskz::display::{DisplaySurface, NullDisplay};
use taskz::error::{Result, TaskzError};
use taskz::model::{Priority, Task};
use taskz::store::fs::FileStore;
use taskz::store::StringStore;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    store: FileStore,
    config: TaskzConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context()?;

    match cli.command {
        Some(Commands::Add { text, priority }) => handle_add(ctx, text, priority),
        Some(Commands::List { done, pending, all }) => handle_list(ctx, done, pending, all),
        Some(Commands::Done { id }) => handle_done(ctx, id),
        Some(Commands::Delete { id }) => handle_delete(ctx, id),
        Some(Commands::Clear) => handle_clear(ctx),
        Some(Commands::Stats) => handle_stats(ctx),
        Some(Commands::Config { key, value }) => handle_config(ctx, key, value),
        Some(Commands::Path) => handle_path(ctx),
        None => handle_list(ctx, false, false, false),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = match std::env::var_os("TASKZ_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "taskz", "taskz")
            .ok_or_else(|| TaskzError::Store("Could not determine a data directory".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = TaskzConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone());

    Ok(AppContext {
        store,
        config,
        data_dir,
    })
}

fn handle_add(ctx: AppContext, text: Vec<String>, priority: Option<String>) -> Result<()> {
    let priority = match priority {
        Some(p) => Priority::from_str(&p).map_err(TaskzError::Input)?,
        None => ctx.config.default_priority,
    };

    let display = TerminalDisplay::new(default_filter(&ctx.config));
    let mut book = TaskBook::open_quiet(ctx.store, display);

    if let Some(id) = book.add_with_priority(&text.join(" "), priority)? {
        println!("{}", format!("Task added ({})", id).green());
    }
    Ok(())
}

fn handle_list(ctx: AppContext, done: bool, pending: bool, all: bool) -> Result<()> {
    let filter = if done {
        StatusFilter::Done
    } else if pending {
        StatusFilter::Pending
    } else if !all && ctx.config.hide_done {
        StatusFilter::Pending
    } else {
        StatusFilter::All
    };

    // open() paints through the surface; nothing else to do
    TaskBook::open(ctx.store, TerminalDisplay::new(filter));
    Ok(())
}

fn handle_done(ctx: AppContext, id: u64) -> Result<()> {
    let display = TerminalDisplay::new(default_filter(&ctx.config));
    let mut book = TaskBook::open_quiet(ctx.store, display);

    if book.toggle(id)? {
        let completed = book
            .tasks()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.completed)
            .unwrap_or(false);
        if completed {
            println!("{}", format!("Task {} completed", id).green());
        } else {
            println!("{}", format!("Task {} reopened", id).yellow());
        }
    } else {
        println!("{}", format!("No task with id {}", id).dimmed());
    }
    Ok(())
}

fn handle_delete(ctx: AppContext, id: u64) -> Result<()> {
    let display = TerminalDisplay::new(default_filter(&ctx.config));
    let mut book = TaskBook::open_quiet(ctx.store, display);

    if book.delete(id)? {
        println!("{}", format!("Task {} deleted", id).green());
    } else {
        println!("{}", format!("No task with id {}", id).dimmed());
    }
    Ok(())
}

fn handle_clear(ctx: AppContext) -> Result<()> {
    let display = TerminalDisplay::new(default_filter(&ctx.config));
    let mut book = TaskBook::open_quiet(ctx.store, display);

    let removed = book.clear_completed()?;
    if removed == 0 {
        println!("{}", "No completed tasks.".dimmed());
    } else {
        let noun = if removed == 1 { "task" } else { "tasks" };
        println!("{}", format!("Cleared {} completed {}", removed, noun).green());
    }
    Ok(())
}

fn handle_stats(ctx: AppContext) -> Result<()> {
    let book = TaskBook::open_quiet(ctx.store, NullDisplay);
    let stats = book.stats();

    if stats.total == 0 {
        println!("{}", PLACEHOLDER.dimmed());
        return Ok(());
    }

    println!(
        "{} total, {} pending, {} completed ({}%)",
        stats.total,
        stats.pending,
        stats.completed,
        stats.completed * 100 / stats.total
    );
    println!(
        "{}",
        format!(
            "priority: {} high, {} medium, {} low",
            stats.high, stats.medium, stats.low
        )
        .dimmed()
    );
    Ok(())
}

fn handle_config(ctx: AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = ctx.config;

    match (key.as_deref(), value) {
        (None, _) => {
            println!("default-priority = {}", config.default_priority);
            println!("hide-done = {}", config.hide_done);
        }
        (Some("default-priority"), None) => {
            println!("default-priority = {}", config.default_priority);
        }
        (Some("default-priority"), Some(v)) => {
            config.default_priority = Priority::from_str(&v).map_err(TaskzError::Input)?;
            config.save(&ctx.data_dir)?;
        }
        (Some("hide-done"), None) => {
            println!("hide-done = {}", config.hide_done);
        }
        (Some("hide-done"), Some(v)) => {
            config.hide_done = v
                .parse()
                .map_err(|_| TaskzError::Input(format!("Invalid boolean: {}", v)))?;
            config.save(&ctx.data_dir)?;
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

fn handle_path(ctx: AppContext) -> Result<()> {
    if let Some(path) = ctx.store.location(STORE_KEY) {
        println!("{}", path.display());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusFilter {
    All,
    Pending,
    Done,
}

impl StatusFilter {
    fn keeps(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Done => task.completed,
        }
    }
}

fn default_filter(config: &TaskzConfig) -> StatusFilter {
    if config.hide_done {
        StatusFilter::Pending
    } else {
        StatusFilter::All
    }
}

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 14;
const DONE_MARKER: &str = "✅";
const PENDING_MARKER: &str = "⭕";
const PRIORITY_MARKER: &str = "!";
const PLACEHOLDER: &str = "No tasks yet. Add one with `taskz add`.";

/// Paints the task listing to stdout. Filtering by status is a
/// presentation concern, so it lives here rather than in the book.
struct TerminalDisplay {
    filter: StatusFilter,
}

impl TerminalDisplay {
    fn new(filter: StatusFilter) -> Self {
        Self { filter }
    }
}

impl DisplaySurface for TerminalDisplay {
    fn show_tasks(&mut self, tasks: &[Task]) {
        let visible: Vec<&Task> = tasks.iter().filter(|t| self.filter.keeps(t)).collect();

        if visible.is_empty() {
            let note = match self.filter {
                StatusFilter::Done => "No completed tasks.",
                _ => "No pending tasks.",
            };
            println!("{}", note.dimmed());
            return;
        }

        for task in visible {
            print_row(task);
        }
    }

    fn show_empty(&mut self) {
        println!("{}", PLACEHOLDER.dimmed());
    }
}

fn print_row(task: &Task) {
    let left_prefix = "  ";
    let idx_str = format!("{}. ", task.id);

    let marker = if task.completed {
        DONE_MARKER
    } else {
        PENDING_MARKER
    };
    let body = format!("{} {}", marker, task.text);

    let right_suffix = if task.priority == Priority::High {
        format!("{} ", PRIORITY_MARKER)
    } else {
        "  ".to_string()
    };

    let fixed_width =
        left_prefix.width() + idx_str.width() + right_suffix.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed_width);

    let body_display = truncate_to_width(&body, available);
    let padding = available.saturating_sub(body_display.width());

    let idx_colored = if task.completed {
        idx_str.dimmed()
    } else {
        idx_str.normal()
    };
    let body_colored = if task.completed {
        body_display.dimmed()
    } else {
        body_display.normal()
    };
    let suffix_colored = if task.priority == Priority::High {
        right_suffix.red()
    } else {
        right_suffix.normal()
    };

    println!(
        "{}{}{}{}{}{}",
        left_prefix,
        idx_colored,
        body_colored,
        " ".repeat(padding),
        suffix_colored,
        format_time_ago(task.created_at).dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
