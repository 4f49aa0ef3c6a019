//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use flock_core::FlockConfig;
use std::path::PathBuf;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (requires --log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: FlockConfig) -> Result<()> {
    println!();
    println!("  {} {}", "Flock".cyan().bold(), "Form Server".bold());
    println!();
    println!("  {}      http://{}:{}", "Forms".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!("  {}    {}", "Backend".green(), config.api_base_url);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    flock_web::run_server(config, &args.host, args.port).await?;

    Ok(())
}
