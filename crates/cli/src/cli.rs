//! Command-line surface.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use gatepass_client::ClientConfig;
use gatepass_console::{ConsoleConfig, Role};
use gatepass_core::GatePassStatus;

#[derive(Debug, Parser)]
#[command(name = "gatepass")]
#[command(about = "Gate pass admin console", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the gate pass API
    #[arg(long, env = "GATEPASS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, env = "GATEPASS_TIMEOUT_SECS", global = true)]
    pub timeout_secs: u64,

    /// Name recorded as the actor of approve/reject/delete
    #[arg(long, default_value = "admin", env = "GATEPASS_ACTOR", global = true)]
    pub actor: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL", global = true)]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "JSON_LOGS", global = true)]
    pub json_logs: bool,
}

impl Cli {
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            anyhow::bail!("no API URL configured; pass --api-url or set GATEPASS_API_URL");
        };
        Ok(ClientConfig::new(url.trim()).with_timeout(Duration::from_secs(self.timeout_secs)))
    }

    pub fn console_config(&self) -> ConsoleConfig {
        ConsoleConfig::default().with_actor(self.actor.as_str())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List passes awaiting approval
    Pending,
    /// List passes, optionally filtered
    List {
        /// pending, approved, rejected, returned or completed
        #[arg(long, value_parser = parse_status)]
        status: Option<GatePassStatus>,
        /// Look up a single pass by number (takes precedence over --status)
        #[arg(long)]
        number: Option<String>,
        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one pass in full
    Show { number: String },
    /// Show the status history of a pass
    History { number: String },
    /// Approve a pending pass
    Approve(ActionArgs),
    /// Reject a pending pass
    Reject(ActionArgs),
    /// Delete a pass
    Delete(ActionArgs),
    /// Create a new pass
    Create {
        #[arg(long)]
        person: String,
        #[arg(long)]
        description: String,
        /// The items will come back through the gate
        #[arg(long)]
        returnable: bool,
    },
    /// Download the printable pass
    Print {
        number: String,
        /// Where to write the file (defaults to the server-suggested name)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Use the HR print endpoint
        #[arg(long)]
        hr: bool,
    },
    /// Fetch an exit/return photo
    Photo {
        id: String,
        /// Save to this path instead of opening a temporary preview
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Record an exit scan with a photo
    ScanExit(ScanArgs),
    /// Record a return scan with a photo
    ScanReturn(ScanArgs),
    /// KPIs, charts and the pass table
    Dashboard {
        #[arg(long, value_parser = parse_role, default_value = "admin")]
        role: Role,
        /// A status, or "all"
        #[arg(long, value_parser = parse_status_filter, default_value = "all")]
        status: StatusFilter,
        /// Animate the KPI counters
        #[arg(long)]
        animate: bool,
    },
}

#[derive(Debug, Args)]
pub struct ActionArgs {
    pub number: String,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    pub number: String,
    /// Photo taken at the gate
    #[arg(long)]
    pub image: PathBuf,
}

fn parse_status(s: &str) -> Result<GatePassStatus, String> {
    s.parse::<GatePassStatus>().map_err(|e| e.to_string())
}

/// A status selector where "all" means no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFilter(pub Option<GatePassStatus>);

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        Ok(StatusFilter(None))
    } else {
        parse_status(s).map(|status| StatusFilter(Some(status)))
    }
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse::<Role>().map_err(|e| e.to_string())
}
