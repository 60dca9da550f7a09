use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pensum",
    version,
    about = "Personal task and study-session tracker",
    after_help = "\
NOTE:
  Data lives at $PENSUM_DIR (default ~/.pensum). Run `pensum init` first.

TIME VALUES:
  RFC 3339 (2026-08-06T18:00:00Z), \"YYYY-MM-DD HH:MM\" (treated as UTC),
  or relative: +90m, +2h, +1d (and -2h etc. on edit).

BEHAVIOR NOTES:
  A task saves even when its reminder cannot be scheduled (notifications
  off). Marking a task done does not cancel its pending reminder.
  `task list` order and the status labels are recomputed from the clock
  on every invocation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the pensum data directory
    Init,

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Show aggregate progress
    Status,

    /// Inspect or deliver pending reminders
    #[command(subcommand)]
    Remind(RemindCommands),

    /// App settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// User profile
    #[command(subcommand)]
    Profile(ProfileCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    Add {
        /// Task title
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// study, project, exam, exercise, or other
        #[arg(long, default_value = "study")]
        category: String,
        /// Label stored in place of 'other'
        #[arg(long)]
        custom_category: Option<String>,
        /// low, medium, or high
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Start of the time window (must be in the future)
        #[arg(long)]
        start: String,
        /// End of the time window
        #[arg(long)]
        end: String,
    },
    /// List tasks in display order
    List,
    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },
    /// Edit a task (unset flags keep their current value)
    Edit {
        /// Task ID or prefix
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// study, project, exam, exercise, or other
        #[arg(long)]
        category: Option<String>,
        /// Label stored in place of 'other'; implies --category other
        #[arg(long)]
        custom_category: Option<String>,
        /// low, medium, or high
        #[arg(long)]
        priority: Option<String>,
        /// New start time (the reminder is rescheduled)
        #[arg(long, allow_hyphen_values = true)]
        start: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        end: Option<String>,
    },
    /// Toggle completion
    Done {
        /// Task ID or prefix
        id: String,
    },
    /// Delete a task and cancel its reminder
    Delete {
        /// Task ID or prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum RemindCommands {
    /// List pending reminders, soonest first
    List,
    /// Print and remove reminders whose fire time has arrived
    Fire,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Enable or disable reminder notifications
    Notifications {
        /// on or off
        state: String,
    },
    /// Wipe all stored data (tasks, profile, settings) and cancel reminders
    Reset,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the saved profile
    Show,
    /// Create or update the profile
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        bio: Option<String>,
    },
}
