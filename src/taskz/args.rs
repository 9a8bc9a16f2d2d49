use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for dev builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234 2024-01-15" otherwise
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "taskz", bin_name = "taskz", version = get_version())]
#[command(about = "A tiny, persistent task list for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    #[command(alias = "a")]
    Add {
        /// The task text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Priority for the new task (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Show only completed tasks
        #[arg(long)]
        done: bool,

        /// Show only pending tasks
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Show everything, overriding the hide-done setting
        #[arg(long, conflicts_with_all = ["done", "pending"])]
        all: bool,
    },

    /// Toggle completion of a task
    #[command(alias = "d")]
    Done {
        /// Id of the task
        id: u64,
    },

    /// Delete a task
    #[command(alias = "rm")]
    Delete {
        /// Id of the task
        id: u64,
    },

    /// Remove all completed tasks
    Clear,

    /// Show task statistics
    Stats,

    /// Get or set configuration
    Config {
        /// Configuration key (default-priority, hide-done)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print the file path of the task data
    Path,
}
