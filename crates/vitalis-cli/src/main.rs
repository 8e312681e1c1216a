use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod app;
mod commands;
mod logging;
mod render;

use app::App;
use commands::account::{LoginArgs, SignUpArgs};
use commands::predict::PredictArgs;
use commands::theme::ThemeChoice;

#[derive(Parser)]
#[command(name = "vitalis")]
#[command(about = "Vitalis - personal health tracking with AI-assisted risk analysis", long_about = None)]
struct Cli {
    /// Data directory (defaults to $VITALIS_HOME or the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with a health profile
    Signup(SignUpArgs),
    /// Log in to the stored account
    Login(LoginArgs),
    /// End the current session
    Logout,
    /// Show profile, vitals trend and recent logs
    Dashboard,
    /// Run an AI risk analysis on the profile and recent logs
    Analyze {
        /// Free-text description of symptoms or concerns
        #[arg(long)]
        text: Option<String>,
        /// Lab report or image to attach (.pdf, .jpg, .jpeg, .png)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Predict risk from manually entered values
    Predict(PredictArgs),
    /// Look up an educational health topic
    Topic {
        /// Topic to look up; lists suggestions when omitted
        topic: Option<String>,
        /// Also save the article as an HTML fragment
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },
    /// Chat with the health assistant
    Chat,
    /// Export the profile and daily logs as CSV
    Export {
        /// Output file (defaults to health_report_<patient_id>.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show or change the color theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            render::error_panel(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (paths, config) = App::prepare(cli.home.as_deref())?;
    let _log_guard = logging::init(&config.logging, &paths.logs_dir())?;
    let mut app = App::open(paths, config);

    // The panel in `main` shows the error; the log file keeps a copy.
    let result = dispatch(&mut app, cli.command).await;
    if let Err(err) = &result {
        info!(error = %format!("{err:#}"), "command failed");
    }
    result
}

async fn dispatch(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Signup(args) => commands::account::sign_up(app, args)?,
        Commands::Login(args) => commands::account::log_in(app, args)?,
        Commands::Logout => commands::account::log_out(app)?,
        Commands::Dashboard => commands::dashboard::show(app)?,
        Commands::Analyze { text, file } => {
            commands::analyze::run(app, text.as_deref(), file.as_deref()).await?
        }
        Commands::Predict(args) => commands::predict::run(app, args).await?,
        Commands::Topic { topic, html } => {
            commands::topic::run(app, topic.as_deref(), html.as_deref()).await?
        }
        Commands::Chat => commands::chat::run(app).await?,
        Commands::Export { output } => commands::export::run(app, output)?,
        Commands::Theme { choice } => commands::theme::run(app, choice)?,
    }

    Ok(())
}
