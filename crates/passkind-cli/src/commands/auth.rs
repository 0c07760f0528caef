use clap::Subcommand;
use passkind_core::api::ApiClient;
use passkind_core::session::{AuthSession, SessionHandle};
use passkind_core::storage::{Config, Database};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Register {
        email: String,
        password: String,
        /// Display name
        #[arg(long)]
        username: Option<String>,
    },
    /// Log in and store the session token
    Login { email: String, password: String },
    /// Verify email with the OTP code
    Verify { email: String, code: String },
    /// Resend the verification OTP
    Resend { email: String },
    /// Clear the stored session
    Logout,
    /// Show session status (never prints the token)
    Status,
}

pub async fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let client = ApiClient::new(&config.api.base_url)?;

    match action {
        AuthAction::Register {
            email,
            password,
            username,
        } => {
            client
                .register(&email, &password, username.as_deref())
                .await?;
            println!("account created; check your email for the verification code");
        }
        AuthAction::Login { email, password } => {
            let token = client.login(&email, &password).await?;
            let mut session = AuthSession::load(&db)?;
            session.login(None, token);
            session.save(&db)?;
            println!("logged in as {email}");
        }
        AuthAction::Verify { email, code } => {
            client.verify_email(&email, &code).await?;
            println!("email verified");
        }
        AuthAction::Resend { email } => {
            client.resend_otp(&email).await?;
            println!("verification code sent");
        }
        AuthAction::Logout => {
            let mut session = AuthSession::load(&db)?;
            session.logout();
            session.save(&db)?;
            println!("logged out");
        }
        AuthAction::Status => {
            let mut session = AuthSession::load(&db)?;
            session.check_auth();
            let status = serde_json::json!({
                "authenticated": session.is_authenticated,
                "user": session.user,
                "auto_lock": session.auto_lock,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
