//! nuxhash settings - terminal front-end
//!
//! Hosts the settings form on stdin/stdout. It handles:
//! - Logging initialization
//! - Configuration loading
//! - Wiring the editor and the config file to the settings store
//! - The command loop

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};

use nux_core::config::{ConfigManager, Region, Settings, Units};
use nux_core::editor::{FieldStyle, FormSnapshot, SettingsEditor, SettingsMsg};
use nux_core::logging::{init_tracing, LogLevel};
use nux_core::store::{SettingsChannel, SettingsStore};

mod commands;

use commands::{echo_input, parse, Command, HELP};

/// Command line options.
struct Args {
    config_path: Option<PathBuf>,
    log_level: LogLevel,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config_path: None,
        log_level: LogLevel::Warn,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a path")?;
                args.config_path = Some(PathBuf::from(path));
            }
            "--log-level" => {
                let level = iter.next().context("--log-level needs a value")?;
                args.log_level = level.parse().map_err(anyhow::Error::msg)?;
            }
            other => bail!("unexpected argument {:?}", other),
        }
    }
    Ok(args)
}

/// Default config path: `<user config dir>/nuxhash/settings.toml`
fn default_config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "nuxhash")
        .context("could not determine the user config directory")?;
    Ok(dirs.config_dir().join("settings.toml"))
}

fn main() -> Result<()> {
    let args = parse_args()?;
    init_tracing(args.log_level);

    let config_path = match args.config_path {
        Some(path) => path,
        None => default_config_path()?,
    };

    let mut config_manager = ConfigManager::new(&config_path);
    config_manager
        .load_or_create()
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    tracing::info!("nuxhash settings starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", nux_core::version());

    let store = Rc::new(SettingsStore::new(config_manager.settings().clone()));

    // Persist every committed value
    let config = Rc::new(RefCell::new(config_manager));
    {
        let config = Rc::clone(&config);
        store.subscribe(Box::new(move |settings: &Settings| {
            if let Err(e) = config.borrow_mut().replace(settings.clone()) {
                tracing::error!("Failed to save settings: {}", e);
                eprintln!("Warning: failed to save settings: {}", e);
            }
        }));
    }

    let editor =
        SettingsEditor::new(store.clone(), FormSnapshot::default(), store.current()).attach();

    println!("nuxhash settings ({})", config_path.display());
    println!("Type 'help' for commands.");
    print_form(editor.borrow().view());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {:#}", e);
                continue;
            }
        };

        let mut editor = editor.borrow_mut();
        match command {
            Command::Show => print_form(editor.view()),
            Command::Help => println!("{}", HELP),
            Command::Edit(msg) => {
                let is_wallet = matches!(msg, SettingsMsg::Wallet(_));
                echo_input(editor.view_mut(), &msg);
                editor.on_field_edit(msg);
                if is_wallet && editor.view().wallet_style == FieldStyle::Invalid {
                    println!("note: wallet address does not look valid");
                }
            }
            Command::Save => {
                editor.on_save();
                println!("saved");
            }
            Command::Revert => {
                editor.on_revert();
                print_form(editor.view());
            }
            Command::Quit => break,
        }
    }

    if editor.borrow().is_modified() {
        println!("unsaved changes discarded");
    }
    editor.borrow_mut().detach();
    Ok(())
}

fn print_form(form: &FormSnapshot) {
    let invalid = match form.wallet_style {
        FieldStyle::Normal => "",
        FieldStyle::Invalid => "  (invalid)",
    };
    let region = Region::ALL
        .get(form.region_index)
        .map(|r| r.as_str())
        .unwrap_or("?");
    let units = Units::ALL
        .get(form.units_index)
        .map(|u| u.as_str())
        .unwrap_or("?");
    let actions = if form.actions_enabled {
        "[Revert] [Apply]"
    } else {
        "(no changes)"
    };

    println!("  Wallet address                     {}{}", form.wallet, invalid);
    println!("  Worker name                        {}", form.worker);
    println!("  Region                             {}", region);
    println!("  Organization ID                    {}", form.api_organization);
    println!("  API Key Code                       {}", mask(&form.api_key));
    println!("  API Secret Key Code                {}", mask(&form.api_secret));
    println!("  Update interval (secs)             {}", form.interval);
    println!("  Profitability switch threshold (%) {}", form.threshold_percent);
    println!("  Display units                      {}", units);
    println!("  {}", actions);
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
