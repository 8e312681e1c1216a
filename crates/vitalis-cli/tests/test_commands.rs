use std::path::Path;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn vitalis(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vitalis"))
        .arg("--home")
        .arg(home)
        .args(args)
        .env_remove("VITALIS_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run vitalis")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn sign_up_and_log_in(home: &Path) {
    let signup = vitalis(
        home,
        &[
            "signup",
            "--username",
            "johndoe",
            "--password",
            "password123",
            "--name",
            "John Doe",
            "--height",
            "180",
            "--weight",
            "85",
            "--conditions",
            "Hypertension",
        ],
    );
    assert!(signup.status.success(), "{}", stderr(&signup));

    let login = vitalis(
        home,
        &["login", "--username", "johndoe", "--password", "password123"],
    );
    assert!(login.status.success(), "{}", stderr(&login));
    assert!(stdout(&login).contains("Welcome back, John Doe!"));
}

#[test]
fn test_dashboard_requires_login() {
    let home = TempDir::new().unwrap();

    let output = vitalis(home.path(), &["dashboard"]);

    assert!(!output.status.success());
    assert_eq!(stderr(&output).matches("Not logged in").count(), 1);
}

#[test]
fn test_login_without_account() {
    let home = TempDir::new().unwrap();

    let output = vitalis(
        home.path(),
        &["login", "--username", "a", "--password", "b"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No account found. Please sign up."));
}

#[test]
fn test_session_persists_across_invocations() {
    let home = TempDir::new().unwrap();
    sign_up_and_log_in(home.path());

    let dashboard = vitalis(home.path(), &["dashboard"]);
    assert!(dashboard.status.success(), "{}", stderr(&dashboard));
    let text = stdout(&dashboard);
    assert!(text.contains("John Doe"));
    assert!(text.contains("Hypertension"));
    assert!(text.contains("Vitals Trend"));

    let logout = vitalis(home.path(), &["logout"]);
    assert!(logout.status.success());
    assert!(!vitalis(home.path(), &["dashboard"]).status.success());
}

#[test]
fn test_wrong_password_is_rejected() {
    let home = TempDir::new().unwrap();
    sign_up_and_log_in(home.path());
    vitalis(home.path(), &["logout"]);

    let output = vitalis(
        home.path(),
        &["login", "--username", "johndoe", "--password", "nope"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid username or password."));
}

#[test]
fn test_export_writes_csv() {
    let home = TempDir::new().unwrap();
    sign_up_and_log_in(home.path());
    let report = home.path().join("report.csv");

    let output = vitalis(
        home.path(),
        &["export", "--output", report.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let csv = std::fs::read_to_string(&report).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("patient_id,name_alias,age"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_analyze_without_input_fails_before_any_request() {
    let home = TempDir::new().unwrap();
    sign_up_and_log_in(home.path());

    let output = vitalis(home.path(), &["analyze"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Please provide some input or upload a file to analyze."));
}

#[test]
fn test_theme_toggle_persists() {
    let home = TempDir::new().unwrap();

    let toggled = vitalis(home.path(), &["theme", "toggle"]);
    assert!(toggled.status.success());
    assert!(stdout(&toggled).contains("Theme set to dark."));

    let current = vitalis(home.path(), &["theme"]);
    assert!(stdout(&current).contains("Current theme: dark"));
}

#[test]
fn test_chat_without_api_key_replies_with_fallback() {
    let home = TempDir::new().unwrap();
    sign_up_and_log_in(home.path());

    let mut child = Command::new(env!("CARGO_BIN_EXE_vitalis"))
        .arg("--home")
        .arg(home.path())
        .arg("chat")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run vitalis");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"what is bmi\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Sorry, I'm having trouble connecting. Please try again later."));
}
