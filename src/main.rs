#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use domain::models::PollPolicy;
use domain::models::StartupError;
use domain::models::TurnState;
use domain::services::Conversation;
use domain::services::SessionClient;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::cli::CliAction;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Parley has failed with the following app version and error.\n\nVersion: {}\nBuilt: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_BUILD_DATE"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

fn handle_startup_error(err: StartupError) {
    tracing::error!(error = %err, "Startup failed");
    eprintln!(
        "{}",
        Paint::red(format!(
            "Parley could not start because of a configuration error.\n\nError: {err}"
        ))
    );
    eprintln!(
        "\nSet OPENAI_API_KEY and OPENAI_ASSISTANT_ID in your environment or a .env file, or run `parley config create` to write a config file."
    );

    process::exit(1);
}

/// Runs a single turn outside the terminal UI. Returns false if the turn
/// errored. The prompt has already been checked for content.
async fn ask(mut conversation: Conversation, prompt: &str) -> Result<bool> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let state = conversation.handle_turn(prompt, &tx).await;
    drop(tx);

    while let Some(event) = rx.recv().await {
        if let Event::TurnFailed(notice) = event {
            eprintln!("{}", Paint::red(notice.text));
        }
    }

    if state == TurnState::Errored {
        return Ok(false);
    }

    if let Some(reply) = conversation.transcript().entries().last() {
        println!("{}", reply.text);
    }

    return Ok(true);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    dotenv::dotenv().ok();

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("parley")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let cli_action = match cli::parse().await {
        Ok(cli_action) => cli_action,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    if cli_action == CliAction::Exit {
        process::exit(0);
    }

    let session = match SessionClient::from_config().await {
        Ok(session) => session,
        Err(err) => {
            handle_startup_error(err);
            return;
        }
    };
    let assistant_name = session.assistant_name();
    Config::set(ConfigKey::AssistantName, &assistant_name);

    let poll = match PollPolicy::from_config() {
        Ok(poll) => poll,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    let conversation = Conversation::new(session, poll);

    if let CliAction::Ask(prompt) = cli_action {
        match ask(conversation, &prompt).await {
            Ok(true) => process::exit(0),
            Ok(false) => process::exit(1),
            Err(err) => handle_error(err),
        }
        return;
    }

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(conversation, event_tx, &mut action_rx).await;
    });

    let ui_future = ui::start(action_tx, event_rx, &assistant_name);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if let Err(err) = res {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
