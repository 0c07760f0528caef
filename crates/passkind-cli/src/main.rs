use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "passkind", version, about = "PassKind vault CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account authentication
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Stored secrets
    Secrets {
        #[command(subcommand)]
        action: commands::secrets::SecretsAction,
    },
    /// Generate passwords
    Generate(commands::generate::GenerateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Inactivity auto-lock
    Lock {
        #[command(subcommand)]
        action: commands::lock::LockAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action).await,
        Commands::Secrets { action } => commands::secrets::run(action).await,
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Lock { action } => commands::lock::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "passkind", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
