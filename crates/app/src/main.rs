mod cli;
mod input;
mod render;
mod vm;

use std::future::Future;
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::ProgressBar;
use satprep_core::model::SessionPhase;
use services::{
    Clock, GeminiClient, GeminiQuestionSource, QuestionSource, SessionController, SourceError,
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::input::{Action, dispatch, parse_command, unavailable_message};
use crate::render::Renderer;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Source(#[from] SourceError),
}

const HELP: &str = "\
a-d      select an answer
enter    check the selected answer, or go to the next question
check    check the selected answer
n        next question (after checking)
s        skip this question
v        print the diagram markup
r        restart after an error
q        quit";

fn init_tracing() {
    // Quiz output owns stdout; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn with_spinner<F: Future>(message: &'static str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = future.await;
    spinner.finish_and_clear();
    output
}

async fn start_session(source: &Arc<dyn QuestionSource>) -> SessionController {
    with_spinner(
        "Generating question...",
        SessionController::start(Arc::clone(source), Clock::system()),
    )
    .await
}

fn draw(renderer: &Renderer, controller: &SessionController) {
    let header = vm::map_header(controller.difficulty(), controller.streak());
    println!("\n{}", renderer.header(&header));

    if controller.phase() == SessionPhase::Error {
        println!("{}", renderer.error_screen());
        return;
    }

    if let Some(question) = vm::map_question(controller.state()) {
        println!("{}", renderer.question(&question));
        println!("{}", renderer.hints(&question));
    }
}

fn print_diagrams(controller: &SessionController) {
    let Some(question) = controller.current_question() else {
        return;
    };
    let mut printed = false;
    if let Some(svg) = question.svg() {
        println!("Problem diagram:\n{svg}");
        printed = true;
    }
    if controller.phase() == SessionPhase::Review {
        if let Some(svg) = question.explanation_svg() {
            println!("Solution graph:\n{svg}");
            printed = true;
        }
    }
    if !printed {
        println!("No diagram for this question.");
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.gemini_config();
    if config.is_none() {
        warn!("no API key configured; question requests will fail");
        eprintln!("Set SATPREP_AI_API_KEY (or GEMINI_API_KEY) to generate questions.");
    }
    let client = GeminiClient::new(config)?;
    info!(model = client.model().unwrap_or("none"), "starting quiz");
    let source: Arc<dyn QuestionSource> = Arc::new(GeminiQuestionSource::new(client));

    let color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    let renderer = Renderer::new(color);

    let mut controller = start_session(&source).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        draw(&renderer, &controller);
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match dispatch(controller.phase(), command) {
            Action::Quit => break,
            Action::Help => println!("{HELP}"),
            Action::ShowDiagrams => print_diagrams(&controller),
            Action::Restart => {
                controller = start_session(&source).await;
            }
            Action::Select(index) => {
                controller.select_option(index);
            }
            Action::Check => {
                if controller.submit().is_none() {
                    println!("Select an answer first.");
                }
            }
            Action::Next => {
                with_spinner("Generating question...", controller.next()).await;
            }
            Action::Skip => {
                with_spinner("Generating question...", controller.skip()).await;
            }
            Action::Unavailable { command, phase } => {
                println!("{}", unavailable_message(command, phase));
            }
        }
    }

    println!("{}", renderer.farewell(controller.stats()));
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
