use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use dilemma::{
    Logging, PROJECT_NAME, PROJECT_VERSION, PromptConfig, config::MenuFile, prompt,
};

/// Exit status of a process ended by SIGINT, reported when the user presses Ctrl+C.
const INTERRUPTED_EXIT_CODE: u8 = 130;

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    /// Options to choose from. Runs the demo when none are given
    options: Vec<String>,

    /// Title printed above the options
    #[arg(short, long)]
    title: Option<String>,

    /// Help text shown after an unrecognized key
    #[arg(long)]
    hint: Option<String>,

    /// Show at most this many options at a time
    #[arg(long, value_name = "N")]
    visible: Option<usize>,

    /// Read the menu from a TOML file
    #[arg(short, long, value_name = "FILE")]
    menu: Option<PathBuf>,

    /// Verbose
    #[arg(short, long)]
    verbose: bool,
}

impl UserArgs {
    fn overrides(&self) -> MenuFile {
        MenuFile {
            title: self.title.clone(),
            help: self.hint.clone(),
            options: self.options.clone(),
            visible: self.visible,
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    if verbose {
        Logging::new().with_debug_mode(true).start()
    } else {
        let file_name = format!("{PROJECT_NAME}.log");
        Logging::new().with_file(file_name).start()
    }
}

/// Run one prompt on the terminal.
///
/// Returns: the chosen option, or None if the user pressed Ctrl+C
fn ask(config: &PromptConfig) -> Result<Option<String>> {
    let outcome = prompt(config).context("Failed to read selection")?;
    Ok(outcome.selected().map(str::to_string))
}

fn interrupted() -> ExitCode {
    eprintln!("Exiting...");
    ExitCode::from(INTERRUPTED_EXIT_CODE)
}

fn demo_menus() -> [PromptConfig; 2] {
    let help = "Use arrow up and down, then enter to select.\nChoose wisely.";
    [
        PromptConfig::builder()
            .title("Hello there!\nSelect a treat using the arrow keys:")
            .options(
                [
                    "waffles",
                    "ice cream",
                    "candy",
                    "biscuits",
                    "icy-poles",
                    "cake",
                    "cupcake",
                    "muffin",
                ]
                .map(String::from)
                .to_vec(),
            )
            .help(help)
            .build(),
        PromptConfig::builder()
            .title("Select a companion using the arrow keys:")
            .options(
                ["dog", "pony", "cat", "rabbit", "gopher", "elephant"]
                    .map(String::from)
                    .to_vec(),
            )
            .help(help)
            .build(),
    ]
}

/// Walk through the demo menus, one after the other.
fn run_demo() -> Result<ExitCode> {
    println!();
    for config in demo_menus() {
        let Some(choice) = ask(&config)? else {
            return Ok(interrupted());
        };
        println!("Enjoy your {}!", choice.green().bold());
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn run_menu(config: &PromptConfig) -> Result<ExitCode> {
    match ask(config)? {
        Some(choice) => {
            println!("{choice}");
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(interrupted()),
    }
}

fn main() -> Result<ExitCode> {
    let args = UserArgs::parse();

    init_logging(args.verbose)?;

    let file = match &args.menu {
        Some(path) => MenuFile::load(path)?,
        None => MenuFile::default(),
    };
    let menu = file.merge(args.overrides());

    if !menu.has_options() {
        return run_demo();
    }

    run_menu(&menu.into_prompt_config()?)
}
