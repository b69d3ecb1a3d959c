use blogmatch::Result;
use blogmatch::commands::{run_check, run_ingest, run_query};
use blogmatch::config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blogmatch")]
#[command(about = "Embeds demo snippets into Supabase and generates blog posts from the best semantic match")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed the demo snippets and insert them into the documents table
    Ingest,
    /// Match a query against stored snippets and generate a blog post
    Query {
        /// Query text (defaults to the demo query)
        query: Option<String>,
    },
    /// Check connectivity to Ollama and Supabase
    Check,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().map_err(|e| blogmatch::RagError::Config(e.to_string()))?;

    match cli.command {
        Commands::Ingest => run_ingest(&config)?,
        Commands::Query { query } => run_query(&config, query)?,
        Commands::Check => run_check(&config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["blogmatch", "ingest"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Ingest);
        }
    }

    #[test]
    fn query_command_without_argument() {
        let cli = Cli::try_parse_from(["blogmatch", "query"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Query { query } = parsed.command {
                assert_eq!(query, None);
            }
        }
    }

    #[test]
    fn query_command_with_argument() {
        let cli = Cli::try_parse_from(["blogmatch", "query", "life on distant planets"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Query { query } = parsed.command {
                assert_eq!(query, Some("life on distant planets".to_string()));
            }
        }
    }

    #[test]
    fn check_command() {
        let cli = Cli::try_parse_from(["blogmatch", "check"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Check);
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["blogmatch", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["blogmatch", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
