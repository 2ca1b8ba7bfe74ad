pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "user-management-api")]
#[command(about = "User management REST API with shared-secret authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create the users table if it does not exist")]
    InitDb,
}

pub async fn run(cli: Cli, config: &'static AppConfig) -> anyhow::Result<()> {
    match cli.command {
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::InitDb) => commands::init_db::handle(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["user-management-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["user-management-api", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.host, None);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parses_init_db() {
        let cli = Cli::try_parse_from(["user-management-api", "init-db"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InitDb)));
    }
}
