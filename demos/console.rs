//! Console host
//!
//! Runs a few pipelines and logs each outcome: overall status, error count,
//! every error with its kind, code and description, and any metadata.
//!
//! Run with: cargo run --example console --features tracing

use assertive::prelude::*;
use tracing::{info, warn};

#[derive(Debug)]
struct Profile {
    username: String,
}

fn log_outcome<T>(label: &str, outcome: &Outcome<T>) {
    let report = outcome.report();

    info!(pipeline = label, "Status: {}", if report.is_success() { "Success" } else { "Failed" });
    info!(pipeline = label, "Error(s): {}", report.errors().len());

    for error in report.errors() {
        warn!(
            pipeline = label,
            kind = %error.kind(),
            code = error.code(),
            "Error: {}",
            error.description()
        );
    }

    for (key, value) in report.metadata() {
        info!(pipeline = label, "[{}]: {}", key, value);
    }
}

fn password_check() -> Outcome<Profile> {
    Outcome::new()
        .assert(|a| {
            let pwd = "&pwd";
            a.should().equal(pwd, "&pwd5");
        })
        .resolve_as(ResolveBehavior::Control, |o| {
            if o.has_error() {
                warn!("resolving with errors present");
            } else {
                info!("resolving cleanly");
            }
            Profile {
                username: "Text".to_string(),
            }
        })
}

fn signup(username: &str, password: &str, email: &str) -> Outcome<Profile> {
    Outcome::new()
        .with_metadata("requested_username", username.to_string())
        .assert(|a| {
            a.validate(username).username(3, 16);
            a.validate(password)
                .strong_password(PasswordStrength::Complex);
            a.validate(email).email_address();
        })
        .resolve_with(|o| {
            o.insert_metadata("accepted", true);
        })
        .resolve(|_| Profile {
            username: username.to_string(),
        })
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    info!("Starting...");

    log_outcome("password", &password_check());

    let accepted = signup("jane_doe", "Tr0ubadour", "jane@example.com");
    log_outcome("signup-ok", &accepted);
    let greeting = accepted.match_with(
        |profile| format!("welcome, {}", profile.username),
        |errors| format!("rejected with {} error(s)", errors.len()),
    );
    info!("{}", greeting);

    let rejected = signup("x", "weak", "nobody");
    log_outcome("signup-bad", &rejected);
    if let Err(errors) = rejected.into_result() {
        info!(count = errors.len(), "signup rejected");
    }
}
