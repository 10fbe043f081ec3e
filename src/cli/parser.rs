use clap::{Parser, Subcommand};

/// Command-line interface definition for uptimer
/// CLI application to track focused work sessions with SQLite
#[derive(Parser)]
#[command(
    name = "uptimer",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple work-session timer: run countdown sessions and glance at your work calendar",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the shared snapshot path read by the widget surface
    #[arg(global = true, long = "snapshot")]
    pub snapshot: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show or change the countdown target
    Timer {
        #[arg(
            long = "target",
            value_name = "DURATION",
            help = "Set the countdown target (e.g. 25m, 1h30m, 90) and enable the timer"
        )]
        target: Option<String>,

        #[arg(
            long = "clear",
            conflicts_with = "target",
            help = "Disable the timer (the stored target is kept)"
        )]
        clear: bool,
    },

    /// Start a work session
    Start {
        #[arg(
            long = "watch",
            help = "Stay in the foreground and tick once per second"
        )]
        watch: bool,
    },

    /// Pause the running session (elapsed time freezes)
    Pause,

    /// Resume a paused session
    Resume,

    /// Stop the session and record it
    Stop,

    /// Show the current session state and today's total
    Status,

    /// Follow the session state at one-second resolution (menu-bar surface)
    Watch {
        #[arg(long = "ticks", hide = true, help = "Exit after N polls (test hook)")]
        ticks: Option<u64>,
    },

    /// List recorded sessions
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long = "today", help = "Show only today's sessions")]
        now: bool,
    },

    /// Render the work-day calendar from the session store
    Calendar {
        #[arg(long, help = "Year to render (defaults to the current year)")]
        year: Option<i32>,
    },

    /// Render the glanceable surface from the shared snapshot
    Widget {
        #[arg(
            long = "follow",
            help = "Keep rendering: hourly, or as soon as the refresh signal fires"
        )]
        follow: bool,

        #[arg(long = "ticks", hide = true, help = "Exit after N polls (test hook)")]
        ticks: Option<u64>,
    },

    /// Insert a closed test session starting at 09:00
    Add {
        /// Date of the session (YYYY-MM-DD)
        date: String,

        /// Session length (e.g. 30m, 1h, 5400)
        duration: String,
    },

    /// Delete recorded sessions
    Del {
        /// Date to delete (YYYY-MM-DD)
        #[arg(required_unless_present = "all")]
        date: Option<String>,

        #[arg(
            long = "all",
            conflicts_with = "date",
            help = "Delete every session and reset the shared snapshot"
        )]
        all: bool,

        #[arg(long = "yes", short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (integrity checks, maintenance)
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
    },
}
