#![forbid(unsafe_code)]

//! `chat-queue-ctl` — command-line client for a running `chat-queue` server.
//!
//! Issues one REST call per invocation and prints the JSON answer.

use clap::{Parser, Subcommand};
use reqwest::{Method, StatusCode};

#[derive(Debug, Parser)]
#[command(
    name = "chat-queue-ctl",
    about = "Command-line client for the chat-queue server",
    version,
    long_about = None
)]
struct Cli {
    /// Base URL of the server.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a new chat session.
    Start {
        /// Treat the submission as inside office hours.
        ///
        /// When neither flag is given the server uses its configured window.
        #[arg(long, conflicts_with = "after_hours")]
        office_hours: bool,
        /// Treat the submission as outside office hours.
        #[arg(long)]
        after_hours: bool,
    },

    /// Record a liveness poll for a session.
    Poll {
        /// Session ID.
        id: String,
    },

    /// Show the status of a session.
    Status {
        /// Session ID.
        id: String,
    },

    /// Switch the active shift.
    Shift {
        /// Shift number.
        shift: i32,
    },
}

impl Command {
    fn request(&self) -> (Method, String) {
        match self {
            Self::Start {
                office_hours,
                after_hours,
            } => {
                let query = if *office_hours {
                    "?is_office_hours=true"
                } else if *after_hours {
                    "?is_office_hours=false"
                } else {
                    ""
                };
                (Method::POST, format!("/api/chat/start{query}"))
            }
            Self::Poll { id } => (Method::POST, format!("/api/chat/poll/{id}")),
            Self::Status { id } => (Method::GET, format!("/api/chat/status/{id}")),
            Self::Shift { shift } => (Method::POST, format!("/api/chat/shift/{shift}")),
        }
    }
}

fn main() {
    let args = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("Failed to start runtime: {err}");
            std::process::exit(1);
        }
    };

    match runtime.block_on(send(&args)) {
        Ok((status, body)) if status.is_success() => {
            if body.is_empty() {
                println!("OK");
            } else {
                println!("{}", pretty(&body));
            }
        }
        Ok((status, body)) => {
            eprintln!("Error: {status}: {}", pretty(&body));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Failed to reach server: {err}");
            eprintln!("Is chat-queue running at '{}'?", args.url);
            std::process::exit(1);
        }
    }
}

/// Send the request for `args.command` and return status and raw body.
async fn send(args: &Cli) -> std::result::Result<(StatusCode, String), reqwest::Error> {
    let (method, path) = args.command.request();
    let url = format!("{}{path}", args.url.trim_end_matches('/'));

    let response = reqwest::Client::new().request(method, url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Pretty-print JSON bodies; pass anything else through.
fn pretty(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| body.to_owned())
}
