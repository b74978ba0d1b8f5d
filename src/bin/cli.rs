//! EdgeLedger CLI
//!
//! Command-line interface driving a file-backed ledger.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use edgeledger::protocol::Command;
use edgeledger::{Config, Ledger};

/// EdgeLedger CLI
#[derive(Parser, Debug)]
#[command(name = "edgeledger-cli")]
#[command(about = "CLI for the EdgeLedger task-assignment ledger")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./edgeledger_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize the ledger
    Init {
        /// Also insert the built-in sample tasks
        #[arg(long)]
        seed: bool,
    },

    /// Submit a task (JSON object)
    SubmitTask {
        /// Task JSON, e.g. '{"id":"t1","url":"http://x"}'
        json: String,
    },

    /// Register a CDN node (JSON object)
    RegisterNode {
        /// Node JSON, e.g. '{"name":"n1","ip":"1.1.1.1"}'
        json: String,
    },

    /// Claim a task for a node
    Claim {
        /// The claiming node's name
        node: String,

        /// The task id to claim
        task: String,
    },

    /// Record a client visit (JSON object)
    RecordVisit {
        /// Visit record JSON
        json: String,
    },

    /// Confirm recorded visits matching a settlement triple
    Confirm {
        /// Task id
        task: String,

        /// CDN node name
        node: String,

        /// Client endpoint IP
        ip: String,
    },

    /// List all tasks
    Tasks,

    /// List all registered nodes
    Nodes,

    /// Report visit records, optionally filtered (task OR node)
    Report {
        /// Only records for this task id
        #[arg(long)]
        task: Option<String>,

        /// Only records for this node name
        #[arg(long)]
        node: Option<String>,
    },

    /// Locate the serving node IP for an endpoint and task
    Locate {
        /// Client endpoint IP
        ip: String,

        /// Task id
        task: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,edgeledger=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder().data_dir(&args.data_dir).build();
    let ledger = match Ledger::open(config) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to open ledger: {}", e);
            std::process::exit(1);
        }
    };

    let command = to_command(args.command);
    match ledger.execute(command) {
        Ok(Some(payload)) => println!("{}", String::from_utf8_lossy(&payload)),
        Ok(None) => println!("OK"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn to_command(cmd: Commands) -> Command {
    match cmd {
        Commands::Init { seed } => Command::Init { seed },
        Commands::SubmitTask { json } => Command::SubmitTask { json },
        Commands::RegisterNode { json } => Command::RegisterCdnNode { json },
        Commands::Claim { node, task } => Command::ClaimTask {
            node_name: node,
            task_id: task,
        },
        Commands::RecordVisit { json } => Command::RecordVisit { json },
        Commands::Confirm { task, node, ip } => Command::ConfirmRecordVisit {
            task_id: task,
            node_name: node,
            endpoint_ip: ip,
        },
        Commands::Tasks => Command::GetTaskList,
        Commands::Nodes => Command::GetNodeList,
        Commands::Report { task, node } => Command::GetReport {
            task_id: task,
            node_name: node,
        },
        Commands::Locate { ip, task } => Command::LocateCdn {
            endpoint_ip: ip,
            task_id: task,
        },
    }
}
