mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mneme-cli", about = "Spaced-repetition study notebook CLI", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Pin "now" to an RFC 3339 instant (for scripting and tests)
    #[arg(long, global = true, value_name = "TIMESTAMP")]
    at: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List topics with stage and due status
    List {
        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
        /// Show only overdue and due-today topics
        #[arg(long)]
        due: bool,
    },

    /// Show a topic's schedule and markdown body
    Show {
        /// Topic title (case-insensitive prefix match) or id
        topic: String,
    },

    /// Create a new topic
    New {
        /// Topic title
        title: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Markdown body (use "-" to read from stdin)
        #[arg(long)]
        content: Option<String>,
    },

    /// Record a successful review of a topic
    Review {
        /// Topic title or id
        topic: String,
    },

    /// Reset a topic back to stage 0
    Reset {
        /// Topic title or id
        topic: String,
    },

    /// Show the review queue: overdue and due-today topics
    Due,

    /// Show review statistics
    Stats,

    /// Show a topic's review history
    History {
        /// Topic title or id
        topic: String,
    },

    /// Export topics to markdown files with frontmatter
    Export {
        /// Topic title or id (omit with --all)
        topic: Option<String>,
        /// Export every topic
        #[arg(long)]
        all: bool,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Import markdown files as topics
    Import {
        /// Markdown file or directory of .md files
        path: PathBuf,
    },

    /// Backup and restore the data directory
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Delete a topic, its body, and its review history
    Delete {
        /// Topic title or id
        topic: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum BackupCommand {
    /// Write a ZIP backup of the data directory
    Create {
        /// Path of the archive to write
        output: PathBuf,
    },

    /// Restore a backup into an empty data directory
    Restore {
        /// Backup archive to restore
        archive: PathBuf,
    },

    /// Show a backup's embedded metadata
    Info {
        /// Backup archive to inspect
        archive: PathBuf,
    },
}

/// Read content from stdin if piped, or resolve "-" as stdin
fn resolve_content(content: Option<String>) -> Option<String> {
    match content.as_deref() {
        Some("-") => {
            // Explicit stdin read
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            Some(buf)
        }
        Some(_) => content,
        None => {
            // Auto-detect piped stdin
            if !stdin_is_tty() {
                let mut buf = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
                if buf.is_empty() { None } else { Some(buf) }
            } else {
                None
            }
        }
    }
}

/// Check if stdin is a terminal (not piped)
fn stdin_is_tty() -> bool {
    unsafe { libc_isatty(0) != 0 }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();

    let app = app::App::new(cli.data_dir.as_deref(), cli.at.as_deref())?;

    match cli.command {
        // No subcommand → show the review queue
        None => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Some(Command::List { tag, due }) => {
            commands::list::run(&app, tag.as_deref(), due, &cli.format, use_color)?;
        }
        Some(Command::Show { topic }) => {
            commands::show::run(&app, &topic, use_color)?;
        }
        Some(Command::New { title, tags, content }) => {
            let content = resolve_content(content);
            commands::new::run(&app, &title, tags.as_deref(), content, &cli.format, use_color)?;
        }
        Some(Command::Review { topic }) => {
            commands::review::run(&app, &topic, &cli.format, use_color)?;
        }
        Some(Command::Reset { topic }) => {
            commands::reset::run(&app, &topic, &cli.format, use_color)?;
        }
        Some(Command::Due) => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Stats) => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Some(Command::History { topic }) => {
            commands::history::run(&app, &topic, &cli.format, use_color)?;
        }
        Some(Command::Export { topic, all, out }) => {
            commands::export::run(&app, topic.as_deref(), all, &out, &cli.format, use_color)?;
        }
        Some(Command::Import { path }) => {
            commands::import::run(&app, &path, &cli.format, use_color)?;
        }
        Some(Command::Backup(subcmd)) => match subcmd {
            BackupCommand::Create { output } => {
                commands::backup::run_create(&app, &output, &cli.format, use_color)?;
            }
            BackupCommand::Restore { archive } => {
                commands::backup::run_restore(&app, &archive, &cli.format, use_color)?;
            }
            BackupCommand::Info { archive } => {
                commands::backup::run_info(&archive, &cli.format, use_color)?;
            }
        },
        Some(Command::Delete { topic, yes }) => {
            commands::delete::run(&app, &topic, yes, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
