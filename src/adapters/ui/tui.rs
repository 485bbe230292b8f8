//! Implements InputPort. Inquire-based interactive query loop.

use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::usecases::QueryRouter;
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::Text;
use std::sync::Arc;
use tracing::info;

use super::progress;

const HELP: &str = "Examples:
  What's on my calendar today?
  Schedule a meeting with Priya tomorrow at 3pm
  Check my inbox
  Search emails from my landlord
  Analyze telegram chat with nisha
  What does the Gita say about duty?
  Bible verse for hard times
Type 'quit', 'exit' or 'q' to leave.";

/// One line of user input, interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Skip,
    Query(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => Command::Skip,
        "quit" | "exit" | "q" => Command::Quit,
        "help" => Command::Help,
        _ => Command::Query(trimmed),
    }
}

/// Applies the prompt theme globally for inquire.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightCyan))
        .with_answered_prompt_prefix(Styled::new("›").with_fg(Color::DarkGrey));
    inquire::set_global_render_config(config);
}

/// TUI adapter. Reads queries line by line and prints the router's answer.
pub struct TuiInputPort {
    router: Arc<QueryRouter>,
}

impl TuiInputPort {
    pub fn new(router: Arc<QueryRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let line = match Text::new("You:").prompt() {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    break;
                }
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            match parse_command(&line) {
                Command::Quit => break,
                Command::Skip => continue,
                Command::Help => println!("{}\n", HELP),
                Command::Query(query) => {
                    let pb = progress::spinner("Thinking...");
                    let answer = self.router.process(query).await;
                    pb.finish_and_clear();
                    println!("\nAssistant: {}\n", answer);
                }
            }
        }
        info!("interactive session ended");
        println!("Goodbye!");
        Ok(())
    }
}
