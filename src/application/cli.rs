#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::help_text;

/// What `main` should do once the command line has been handled.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Exit,
    Chat,
    Ask(String),
}

/// Directory holding `debug.log`. Overridable with `PARLEY_LOG_DIR`.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("PARLEY_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("parley");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    if config_file_path_str.is_empty() {
        bail!("Unable to resolve a configuration directory for this system");
    }

    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Asks the assistant a single question, prints the reply and exits.")
        .arg(
            Arg::new("prompt")
                .help("The question to send to the assistant.")
                .required(true)
                .num_args(1),
        );
}

/// Reads the prompt for `ask`, refusing blank ones before any session is
/// opened.
fn ask_prompt(matches: &ArgMatches) -> Result<String> {
    let prompt = matches
        .get_one::<String>("prompt")
        .map(|prompt| return prompt.to_string())
        .unwrap_or_default();

    if prompt.trim().is_empty() {
        bail!("There is nothing to ask, the prompt is empty");
    }

    return Ok(prompt);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Parley")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Parley with environment variable RUST_LOG=parley")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_millis(key: ConfigKey, env_name: &'static str, help: &str) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env_name)
        .num_args(1)
        .help(format!("{help} [default: {}]", Config::default(key)))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nBuilt: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_BUILD_DATE")
    );

    return Command::new("parley")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start a chat session with the assistant. This is the default."))
        .subcommand(subcommand_ask())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PARLEY_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::AssistantID.to_string())
                .short('a')
                .long(ConfigKey::AssistantID.to_string())
                .env("OPENAI_ASSISTANT_ID")
                .num_args(1)
                .help("ID of the pre-configured assistant to chat with.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiToken.to_string())
                .long(ConfigKey::OpenAiToken.to_string())
                .env("OPENAI_API_KEY")
                .hide_env_values(true)
                .num_args(1)
                .help("OpenAI API token.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.to_string())
                .long(ConfigKey::OpenAiURL.to_string())
                .env("PARLEY_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenAiURL)))
                .global(true),
        )
        .arg(arg_millis(
            ConfigKey::PollInterval,
            "PARLEY_POLL_INTERVAL",
            "Milliseconds to wait before the first check on a running reply.",
        ))
        .arg(arg_millis(
            ConfigKey::PollMaxInterval,
            "PARLEY_POLL_MAX_INTERVAL",
            "Upper bound in milliseconds for the wait between checks on a running reply.",
        ))
        .arg(arg_millis(
            ConfigKey::PollTimeout,
            "PARLEY_POLL_TIMEOUT",
            "Milliseconds to wait for a reply before giving up on the turn.",
        ))
        .arg(
            Arg::new(ConfigKey::Title.to_string())
                .long(ConfigKey::Title.to_string())
                .env("PARLEY_TITLE")
                .num_args(1)
                .help(format!("Title shown above the chat. [default: {}]", Config::default(ConfigKey::Title)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("PARLEY_USERNAME")
                .num_args(1)
                .help("Your user name displayed in all chat bubbles.")
                .global(true),
        );
}

pub async fn parse() -> Result<CliAction> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").display());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(CliAction::Exit);
        }
        Some(("ask", subcmd_matches)) => {
            let prompt = ask_prompt(subcmd_matches)?;
            Config::load(vec![&matches, subcmd_matches]).await?;

            return Ok(CliAction::Ask(prompt));
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(CliAction::Exit);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(CliAction::Exit);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(CliAction::Exit);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(CliAction::Exit);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(CliAction::Exit);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(CliAction::Exit);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(CliAction::Chat);
}
