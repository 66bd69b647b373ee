//! Screen loop of the `medibot` REPL.

use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use medibot_application::{
    ConversationView, DocumentDelivery, HistoryAction, HistoryList, PrescriptionWizard,
    SessionStore,
};
use medibot_core::conversation::Exchange;
use medibot_core::error::MedibotError;
use medibot_core::route::Route;
use medibot_core::wizard::{Question, StageKind};

use crate::commands::{self, Command};
use crate::helper::CliHelper;
use crate::render::{progress_bar, render_emphasis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    SignIn,
    Consultation,
    History,
    Wizard,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::SignIn => Screen::SignIn,
            Route::Consultation => Screen::Consultation,
        }
    }
}

/// One line of user input.
enum Input {
    Line(String),
    Interrupted,
    Eof,
}

pub struct App {
    editor: Editor<CliHelper, DefaultHistory>,
    session: SessionStore,
    chat: ConversationView,
    history: HistoryList,
    wizard: PrescriptionWizard,
    delivery: DocumentDelivery,
}

impl App {
    pub fn new(session: SessionStore, delivery: DocumentDelivery) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(CliHelper::new(commands::SIGN_IN_COMMANDS)));
        Ok(Self {
            editor,
            session,
            chat: ConversationView::new(),
            history: HistoryList::new(),
            wizard: PrescriptionWizard::new(),
            delivery,
        })
    }

    /// Resumes the stored session and runs screens until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "=== MediBot ===".bright_magenta().bold());
        println!("{}", "Type '/help' for commands, '/quit' to exit.".bright_black());
        println!();

        let mut screen = match self.session.resume().await {
            Ok(route) => Screen::from(route),
            Err(e) => {
                tracing::warn!("Failed to restore session: {}", e);
                alert(&e);
                Screen::SignIn
            }
        };

        loop {
            let next = match screen {
                Screen::SignIn => self.sign_in().await?,
                Screen::Consultation => self.consultation().await?,
                Screen::History => self.history_screen().await?,
                Screen::Wizard => self.wizard_screen().await?,
            };
            match next {
                Some(next) => screen = next,
                None => break,
            }
        }

        println!("{}", "Goodbye!".bright_green());
        Ok(())
    }

    fn read(&mut self, prompt: &str, commands: &[&'static str]) -> Result<Input> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_commands(commands);
        }
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
                Ok(Input::Interrupted)
            }
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(err) => Err(err.into()),
        }
    }

    // ===== Sign-in =====

    async fn sign_in(&mut self) -> Result<Option<Screen>> {
        println!("{}", "Sign in to continue.".bright_yellow());
        loop {
            let line = match self.read("Username: ", commands::SIGN_IN_COMMANDS)? {
                Input::Line(line) => line,
                Input::Interrupted => continue,
                Input::Eof => return Ok(None),
            };
            match commands::parse(&line) {
                Some(Command::Quit) => return Ok(None),
                Some(Command::Help) => print_help(commands::SIGN_IN_COMMANDS),
                Some(other) => unknown(&other),
                None => match self.session.login(&line).await {
                    Ok(route) => return Ok(Some(Screen::from(route))),
                    Err(e) => alert(&e),
                },
            }
        }
    }

    // ===== Consultation =====

    async fn consultation(&mut self) -> Result<Option<Screen>> {
        self.chat.activate(&self.session);
        if let Some(identity) = self.session.identity() {
            println!("{}", format!("Welcome, {identity}").bright_magenta().bold());
        }
        for exchange in self.chat.exchanges() {
            print_exchange(exchange);
        }
        print_samples(self.chat.sample_prompts());

        loop {
            let line = match self.read(">> ", commands::CONSULTATION_COMMANDS)? {
                Input::Line(line) => line,
                Input::Interrupted => continue,
                Input::Eof => return Ok(None),
            };
            let text = match commands::parse(&line) {
                Some(Command::History) => return Ok(Some(Screen::History)),
                Some(Command::Prescription) => {
                    self.wizard.reset();
                    return Ok(Some(Screen::Wizard));
                }
                Some(Command::New) => {
                    self.session.start_new_conversation();
                    return Ok(Some(Screen::Consultation));
                }
                Some(Command::Logout) => match self.session.logout().await {
                    Ok(route) => {
                        self.wizard.reset();
                        self.history = HistoryList::new();
                        return Ok(Some(Screen::from(route)));
                    }
                    Err(e) => {
                        notice(&e);
                        continue;
                    }
                },
                Some(Command::Quit) => return Ok(None),
                Some(Command::Help) => {
                    print_help(commands::CONSULTATION_COMMANDS);
                    continue;
                }
                Some(other) => {
                    unknown(&other);
                    continue;
                }
                None => self.sample_or_text(&line),
            };
            if text.trim().is_empty() {
                continue;
            }

            println!("{}", format!("> {}", text.trim()).green());
            println!("{}", "Thinking...".bright_black());
            match self.chat.send(&mut self.session, &text).await {
                Ok(reply) => print_exchange(reply),
                Err(e) => notice(&e),
            }
        }
    }

    /// A bare `1`-`3` picks a sample prompt while the conversation is empty.
    fn sample_or_text(&self, line: &str) -> String {
        let samples = self.chat.sample_prompts();
        line.trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| samples.get(i))
            .map(|s| s.to_string())
            .unwrap_or_else(|| line.to_string())
    }

    // ===== History =====

    async fn history_screen(&mut self) -> Result<Option<Screen>> {
        println!("{}", "Consultation history".bright_magenta().bold());
        if let Err(e) = self.history.refresh(&mut self.session).await {
            notice(&e);
        }
        self.print_history();

        loop {
            let line = match self.read("history> ", commands::HISTORY_COMMANDS)? {
                Input::Line(line) => line,
                Input::Interrupted => continue,
                Input::Eof => return Ok(None),
            };
            match commands::parse(&line) {
                Some(Command::Open(n)) => match self.history.open(&mut self.session, n - 1) {
                    Ok(HistoryAction::Resume(_)) => return Ok(Some(Screen::Consultation)),
                    Ok(HistoryAction::Download(payload)) => {
                        match self.delivery.deliver(&payload).await {
                            Ok(path) => saved(&path),
                            Err(e) => alert(&e),
                        }
                    }
                    Err(e) => notice(&e),
                },
                Some(Command::New) => {
                    self.history.start_new(&mut self.session);
                    return Ok(Some(Screen::Consultation));
                }
                Some(Command::Back) => return Ok(Some(Screen::Consultation)),
                Some(Command::Quit) => return Ok(None),
                Some(Command::Help) => print_help(commands::HISTORY_COMMANDS),
                Some(other) => unknown(&other),
                None if line.trim().is_empty() => {}
                None => println!("{}", "Use /open N to open a card.".bright_black()),
            }
        }
    }

    fn print_history(&self) {
        let entries = self.history.entries();
        if entries.is_empty() {
            println!("{}", "No consultations yet. Type /new to start one.".bright_black());
            return;
        }
        for (i, entry) in entries.iter().enumerate() {
            let badge = if entry.has_document {
                format!(" [{}]", "Prescription".bright_green())
            } else {
                String::new()
            };
            println!(
                "{:>3}. {}  {}{}",
                i + 1,
                entry.created_label.bright_black(),
                entry.title,
                badge
            );
        }
    }

    // ===== Prescription wizard =====

    async fn wizard_screen(&mut self) -> Result<Option<Screen>> {
        println!("{}", "Prescription".bright_magenta().bold());
        loop {
            let kind = self.wizard.kind();
            println!("{}", progress_bar(self.wizard.progress()).bright_black());

            if kind == StageKind::Success {
                println!("{}", "Your prescription is ready.".bright_green().bold());
            }
            let prompt = wizard_prompt(kind, self.next_question().as_ref());

            let line = match self.read(&prompt, commands::WIZARD_COMMANDS)? {
                Input::Line(line) => line,
                Input::Interrupted => continue,
                Input::Eof => return Ok(None),
            };

            match commands::parse(&line) {
                Some(Command::Back) => {
                    if kind == StageKind::Symptom {
                        return Ok(Some(Screen::Consultation));
                    }
                    self.wizard.back();
                }
                Some(Command::Home) => {
                    self.wizard.reset();
                    return Ok(Some(Screen::Consultation));
                }
                Some(Command::Download) => match self.wizard.download(&self.delivery).await {
                    Ok(path) => saved(&path),
                    Err(e) => alert(&e),
                },
                Some(Command::Quit) => return Ok(None),
                Some(Command::Help) => print_help(commands::WIZARD_COMMANDS),
                Some(other) => unknown(&other),
                None => self.wizard_input(kind, &line).await,
            }
        }
    }

    /// The first question still waiting for an answer.
    fn next_question(&self) -> Option<Question> {
        let questions = self.wizard.stage().questions()?;
        questions.unanswered().next().cloned()
    }

    async fn wizard_input(&mut self, kind: StageKind, line: &str) {
        let result = match kind {
            StageKind::Symptom => {
                if let Err(e) = self.wizard.edit_symptom(line) {
                    notice(&e);
                    return;
                }
                println!("{}", "Preparing follow-up questions...".bright_black());
                self.wizard.submit_symptom(&self.session).await.map(|_| ())
            }
            StageKind::Questions => {
                let pending = self.next_question().map(|q| q.key);
                match pending {
                    Some(key) => self.wizard.answer(&key, line.trim()),
                    None => {
                        println!("{}", progress_bar(StageKind::Generating.progress()).bright_black());
                        println!("{}", "Generating your prescription...".bright_black());
                        self.wizard.generate(&self.session).await.map(|_| ())
                    }
                }
            }
            StageKind::Generating | StageKind::Success => {
                println!("{}", "Type /download or /home.".bright_black());
                Ok(())
            }
        };
        if let Err(e) = result {
            notice(&e);
        }
    }
}

/// Prompt for the wizard stage. `generate` settles on questions or success
/// before returning, so the generating stage shares the success prompt.
fn wizard_prompt(kind: StageKind, pending: Option<&Question>) -> String {
    match kind {
        StageKind::Symptom => "Describe your symptoms: ".to_string(),
        StageKind::Questions => match pending {
            Some(q) => format!("[{}] {} ", q.category, q.prompt),
            None => "Press Enter to generate your prescription: ".to_string(),
        },
        StageKind::Generating | StageKind::Success => {
            "Type /download to save it or /home to go back: ".to_string()
        }
    }
}

fn print_exchange(exchange: &Exchange) {
    if exchange.is_user() {
        println!("{}", format!("> {}", exchange.body).green());
        return;
    }
    for line in exchange.body.lines() {
        println!("{}", render_emphasis(line).bright_blue());
    }
    if exchange.has_document() {
        println!("{}", "(includes a prescription; open it from /history)".bright_black());
    }
    println!();
}

fn print_samples(samples: &[&str]) {
    if samples.is_empty() {
        return;
    }
    println!("{}", "Try one of these (type its number):".bright_black());
    for (i, sample) in samples.iter().enumerate() {
        println!("  {}. {}", i + 1, sample);
    }
}

fn print_help(commands: &[&str]) {
    println!("{}", format!("Commands: {}", commands.join(", ")).bright_black());
}

fn unknown(command: &Command) {
    match command {
        Command::Unknown(raw) => println!("{}", format!("Unknown command: {raw}").bright_black()),
        _ => println!("{}", "Not available here. Type /help.".bright_black()),
    }
}

fn saved(path: &std::path::Path) {
    println!("{}", format!("Saved to {}", path.display()).bright_green());
}

/// Blocking failures: login and documents.
fn alert(err: &MedibotError) {
    eprintln!("{}", format!("Error: {err}").red().bold());
}

/// One-line notice for recoverable failures.
fn notice(err: &MedibotError) {
    eprintln!("{}", err.to_string().yellow());
}
