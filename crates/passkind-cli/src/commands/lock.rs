use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Subcommand;
use passkind_core::autolock::{
    ActivityKind, AutoLockController, LockPhase, Navigator, WallClockDriver,
};
use passkind_core::session::AuthSession;
use passkind_core::storage::Database;
use passkind_core::Event;

#[derive(Subcommand)]
pub enum LockAction {
    /// Show auto-lock settings and session state
    Status,
    /// Update auto-lock settings
    Set {
        /// Enable or disable auto-lock
        #[arg(long)]
        enabled: Option<bool>,
        /// Inactivity timeout in minutes
        #[arg(long)]
        minutes: Option<u64>,
    },
    /// Run the inactivity watcher. Any stdin line counts as activity;
    /// type `stay` to dismiss the warning. Events stream as JSON.
    Watch,
}

/// The CLI's stand-in for the browser redirect on forced logout.
struct StdoutNavigator;

impl Navigator for StdoutNavigator {
    fn redirect_to(&mut self, path: &str) {
        println!("redirect: {path}");
    }
}

pub fn run(action: LockAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        LockAction::Status => {
            let mut session = AuthSession::load(&db)?;
            session.check_auth();
            let status = serde_json::json!({
                "authenticated": session.is_authenticated,
                "enabled": session.auto_lock.enabled,
                "duration_minutes": session.auto_lock.duration_minutes,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        LockAction::Set { enabled, minutes } => {
            let mut session = AuthSession::load(&db)?;
            let enabled = enabled.unwrap_or(session.auto_lock.enabled);
            let minutes = minutes.unwrap_or(session.auto_lock.duration_minutes);
            session.update_auto_lock_settings(enabled, minutes);
            session.save(&db)?;
            println!("ok");
        }
        LockAction::Watch => watch(&db)?,
    }
    Ok(())
}

fn watch(db: &Database) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = AuthSession::load(db)?;
    session.check_auth();
    let authenticated = session.is_authenticated;
    let config = session.auto_lock;

    let mut driver = WallClockDriver::new();
    let mut controller = AutoLockController::new(session, StdoutNavigator, config);
    if let Some(event) = controller.set_authenticated(&mut driver, authenticated) {
        print_event(&event)?;
    }
    if controller.phase() == LockPhase::Disabled {
        println!("auto-lock disabled or not logged in; nothing to watch");
        return Ok(());
    }

    // stdin is read on its own thread so the timer loop never blocks.
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    'watch: loop {
        while let Ok(line) = rx.try_recv() {
            let event = if line.trim() == "stay" {
                controller.dismiss(&mut driver)
            } else {
                controller.record_activity(&mut driver, ActivityKind::KeyDown)
            };
            if let Some(event) = event {
                print_event(&event)?;
            }
        }

        for id in driver.poll() {
            if let Some(event) = controller.handle_timer(&mut driver, id) {
                let locked = matches!(event, Event::SessionLocked { .. });
                print_event(&event)?;
                if locked {
                    break 'watch;
                }
            }
        }

        thread::sleep(Duration::from_millis(200));
    }

    // Persist the cleared session so other commands see the lock.
    let (session, _) = controller.into_parts();
    session.save(db)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}
