use std::process::Command;

use tempfile::TempDir;

/// Binary invocation isolated from the developer's `.env` and environment.
pub fn base_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_casesheet"));
    cmd.current_dir(dir.path())
        .env("DOTENV_PATH", dir.path().join("missing.env"))
        .env_remove("GOOGLE_CREDENTIALS")
        .env_remove("CASESHEET_LOG_FILE")
        .env("RUST_LOG", "info");
    cmd
}

pub fn service_account_json(private_key: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "case-tracker",
        "private_key": private_key,
        "client_email": "sheets@case-tracker.iam.gserviceaccount.com",
        "token_uri": "https://oauth2.googleapis.com/token",
    })
    .to_string()
}
