use std::sync::Arc;

use colored::Colorize;

use libris_ops::Accounts;
use libris_server::{LibrisServer, ServerConfig};
use libris_store::FsLibrary;
use libris_types::Username;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Register(args) => cmd_register(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(root) = args.data_root {
        config.data_root = root;
    }
    if let Some(url) = args.public_url {
        config.public_base_url = url;
    }

    println!(
        "{} libris server on {} (data root: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.data_root.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(LibrisServer::new(config).serve())?;
    Ok(())
}

fn cmd_register(args: RegisterArgs) -> anyhow::Result<()> {
    let username = Username::new(args.username)?;
    let store = Arc::new(FsLibrary::new(&args.data_root));
    let accounts = Accounts::new(store.clone(), store);
    accounts.register(&username, &args.password, &args.password)?;
    println!(
        "{} Registered {} (data root: {})",
        "✓".green().bold(),
        username.to_string().yellow(),
        args.data_root.display()
    );
    Ok(())
}
