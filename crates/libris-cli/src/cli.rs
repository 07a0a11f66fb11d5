use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "libris",
    about = "libris — personal library manager",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the libris HTTP server
    Serve(ServeArgs),
    /// Register a user account from the terminal
    Register(RegisterArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind the HTTP listener to
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Directory holding per-user data
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    /// Public base URL embedded in generated share links
    #[arg(long)]
    pub public_url: Option<String>,

    /// TOML configuration file (flags override its values)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct RegisterArgs {
    pub username: String,

    #[arg(long)]
    pub password: String,

    /// Directory holding per-user data
    #[arg(long, default_value = "user_data")]
    pub data_root: PathBuf,
}
