//! Chat session management

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

use crate::events::EventBus;
use crate::scheduler::JobKind;
use crate::session::ConversationEngine;

/// Interactive chat session
pub struct ChatSession {
    engine: Arc<ConversationEngine>,
    events: Arc<EventBus>,
    session_id: String,
}

impl ChatSession {
    /// Create a new chat session with a fresh session id
    pub fn new(engine: Arc<ConversationEngine>, events: Arc<EventBus>) -> Self {
        Self {
            engine,
            events,
            session_id: Uuid::now_v7().to_string(),
        }
    }

    /// Run the chat main loop
    pub async fn run(self) -> Result<()> {
        self.print_welcome();

        // Briefings arrive out of band; print them as they land
        self.spawn_briefing_printer();

        // Create readline editor for proper line editing
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        // Main chat loop
        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(input);

                    // Handle slash commands
                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        let reply = self.engine.handle_message(&self.session_id, input).await;
                        println!("{}", reply);
                        println!();
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "NewsDaemon Chat".bright_cyan().bold());
        println!("Session: {}", self.session_id.dimmed());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Print briefings delivered on the event bus for this session
    fn spawn_briefing_printer(&self) {
        let mut rx = self.events.subscribe();
        let session_id = self.session_id.clone();

        tokio::spawn(async move {
            while let Ok(event) = rx.recv().await {
                if event.session_id != session_id {
                    continue;
                }

                let label = match event.kind {
                    JobKind::Daily => "Daily briefing",
                    JobKind::Weekly => "Weekly digest",
                };

                println!();
                println!("{}", format!("[{}: {}]", label, event.subject).bright_cyan());
                println!("{}", event.text);
                println!();
            }
        });
    }

    /// Handle slash commands
    async fn handle_slash_command(&self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/schedule" | "/s" => {
                let reply = self.engine.start_conversation(&self.session_id).await;
                println!("{}", reply);
                println!();
                SlashResult::Continue
            }
            "/cancel" => {
                let reply = self.engine.start_cancellation(&self.session_id).await;
                println!("{}", reply);
                println!();
                SlashResult::Continue
            }
            "/list" | "/l" => {
                let reply = self.engine.list_schedules(&self.session_id).await;
                println!("{}", reply);
                println!();
                SlashResult::Continue
            }
            "/report" => {
                let reply = self.engine.trigger_report_test(&self.session_id).await;
                println!("{}", reply);
                println!();
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:12} Show this help", "/help".yellow());
        println!("  {:12} Exit the chat", "/quit".yellow());
        println!("  {:12} Set up a daily briefing schedule", "/schedule".yellow());
        println!("  {:12} Cancel a briefing schedule", "/cancel".yellow());
        println!("  {:12} List your schedules", "/list".yellow());
        println!("  {:12} Send a test weekly report now", "/report".yellow());
        println!();
        println!("Anything else you type continues the current dialogue.");
        println!();
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
