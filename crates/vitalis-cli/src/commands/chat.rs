use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;
use vitalis_application::UnavailableGenerator;
use vitalis_core::chat::ChatTranscript;
use vitalis_core::generation::ContentGenerator;

use crate::app::App;
use crate::render;

pub async fn run(app: &App) -> Result<()> {
    app.require_session()?;
    // Without a client every message gets the fallback reply.
    let generator = app
        .generator()
        .await
        .unwrap_or_else(|err| -> Arc<dyn ContentGenerator> {
            warn!(error = %err, "chat running without a generation service");
            Arc::new(UnavailableGenerator::new(err))
        });
    let pipelines = app.pipelines_with(generator)?;
    let mut transcript = ChatTranscript::new();

    render::heading("Vitalis Health Assistant");
    render::hint("Type 'quit' or 'exit' to leave.");
    if let Some(greeting) = transcript.last() {
        render::chat_message(greeting);
    }
    println!();

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                match pipelines.chat.respond(&mut transcript, trimmed).await {
                    Ok(Some(reply)) => render::chat_message(&reply),
                    Ok(None) => {}
                    Err(err) => render::error_panel(&err.to_string()),
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
