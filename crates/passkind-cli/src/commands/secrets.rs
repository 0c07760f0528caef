use clap::Subcommand;
use passkind_core::api::{ApiClient, SecretInput};
use passkind_core::error::{ApiError, CoreError};
use passkind_core::session::{AuthSession, SessionHandle};
use passkind_core::storage::{Config, Database};

#[derive(Subcommand)]
pub enum SecretsAction {
    /// List all secrets
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one secret
    Get {
        id: i64,
        /// Also fetch the decrypted value
        #[arg(long)]
        value: bool,
    },
    /// Create a secret
    Add {
        name: String,
        /// Secret value; omit together with --generate to be rejected
        #[arg(long)]
        value: Option<String>,
        /// Generate the value with the configured generator defaults
        #[arg(long)]
        generate: bool,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// May be given multiple times
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Update a secret (unset options keep their current value)
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Delete a secret
    Delete { id: i64 },
    /// Show the audit history of a secret
    History { id: i64 },
}

pub async fn run(action: SecretsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let client = authed_client(&db, &config)?;

    match dispatch(action, &client, &config).await {
        Err(CoreError::Api(ApiError::Unauthorized)) => {
            // Same as the browser interceptor: drop the session and send
            // the user back to login.
            let mut session = AuthSession::load(&db)?;
            session.logout();
            session.save(&db)?;
            Err("session expired; run `passkind auth login`".into())
        }
        other => other.map_err(Into::into),
    }
}

fn authed_client(db: &Database, config: &Config) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let mut session = AuthSession::load(db)?;
    session.check_auth();
    match session.token {
        Some(token) => Ok(ApiClient::new(&config.api.base_url)?.with_token(token)),
        None => Err("not logged in; run `passkind auth login` first".into()),
    }
}

async fn dispatch(
    action: SecretsAction,
    client: &ApiClient,
    config: &Config,
) -> Result<(), CoreError> {
    match action {
        SecretsAction::List { json } => {
            let secrets = client.list_secrets().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&secrets)?);
            } else {
                for secret in &secrets {
                    let tags = if secret.tags.is_empty() {
                        String::new()
                    } else {
                        format!("  [{}]", secret.tags.join(", "))
                    };
                    println!("{}\t{}{}", secret.id, secret.name, tags);
                }
            }
        }
        SecretsAction::Get { id, value } => {
            let secret = client.get_secret(id).await?;
            println!("{}", serde_json::to_string_pretty(&secret)?);
            if value {
                let plaintext = client.secret_value(id).await?;
                println!("{plaintext}");
            }
        }
        SecretsAction::Add {
            name,
            value,
            generate,
            username,
            email,
            tags,
        } => {
            let value = match (value, generate) {
                (Some(v), _) => v,
                (None, true) => passkind_core::generator::generate(&config.generator)?,
                (None, false) => {
                    return Err(CoreError::Custom(
                        "provide --value or --generate".to_string(),
                    ))
                }
            };
            let input = SecretInput {
                name,
                value: Some(value),
                username,
                email,
                tags,
                ..SecretInput::default()
            };
            let secret = client.create_secret(&input).await?;
            println!("created secret {} ({})", secret.id, secret.name);
        }
        SecretsAction::Update {
            id,
            name,
            value,
            username,
            email,
            tags,
        } => {
            let current = client.get_secret(id).await?;
            let input = SecretInput {
                name: name.unwrap_or(current.name),
                value,
                username: username.or(current.username),
                email: email.or(current.email),
                tags: if tags.is_empty() { current.tags } else { tags },
                metadata: current.metadata,
            };
            let secret = client.update_secret(id, &input).await?;
            println!("updated secret {} ({})", secret.id, secret.name);
        }
        SecretsAction::Delete { id } => {
            client.delete_secret(id).await?;
            println!("deleted secret {id}");
        }
        SecretsAction::History { id } => {
            let events = client.secret_history(id).await?;
            if events.is_empty() {
                println!("no history available");
            } else {
                for event in &events {
                    println!(
                        "{}\t{}\t{}",
                        event.modified_at,
                        event.change_type.to_lowercase(),
                        event.modified_by.as_deref().unwrap_or("unknown"),
                    );
                }
            }
        }
    }
    Ok(())
}
