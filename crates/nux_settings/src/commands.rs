//! Line commands for the terminal settings form.

use anyhow::{anyhow, bail, Context, Result};

use nux_core::config::{Region, Units};
use nux_core::editor::{FormSnapshot, SettingsMsg, INTERVAL_FIELD, THRESHOLD_PERCENT_FIELD};

pub const HELP: &str = "\
Commands:
  show                  print the form
  wallet <address>      set wallet address
  worker <name>         set worker name
  region <eu|usa|jp|hk> set region
  org <id>              set API organization ID
  key <code>            set API key code
  secret <code>         set API secret key code
  interval <secs>       set update interval (10-300)
  threshold <percent>   set profitability switch threshold (1-50)
  units <BTC|mBTC>      set display units
  save                  save changes
  revert                discard changes
  help                  show this help
  quit                  exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Edit(SettingsMsg),
    Save,
    Revert,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "show" => Command::Show,
        "save" => Command::Save,
        "revert" => Command::Revert,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        // Text fields accept an empty value
        "wallet" => Command::Edit(SettingsMsg::Wallet(rest.to_string())),
        "worker" => Command::Edit(SettingsMsg::Worker(rest.to_string())),
        "org" => Command::Edit(SettingsMsg::ApiOrganization(rest.to_string())),
        "key" => Command::Edit(SettingsMsg::ApiKey(rest.to_string())),
        "secret" => Command::Edit(SettingsMsg::ApiSecret(rest.to_string())),
        "region" => {
            let region: Region = rest.parse()?;
            Command::Edit(SettingsMsg::Region(option_index(&Region::ALL, region)?))
        }
        "units" => {
            let units: Units = rest.parse()?;
            Command::Edit(SettingsMsg::Units(option_index(&Units::ALL, units)?))
        }
        "interval" => Command::Edit(SettingsMsg::Interval(parse_number(rest, "interval")?)),
        "threshold" => Command::Edit(SettingsMsg::ThresholdPercent(parse_number(
            rest.trim_end_matches('%'),
            "threshold",
        )?)),
        other => bail!("unknown command {:?} (try 'help')", other),
    };

    Ok(Some(command))
}

/// Mirror an edit into the form the way a widget shows what the user typed.
pub fn echo_input(form: &mut FormSnapshot, msg: &SettingsMsg) {
    match msg {
        SettingsMsg::Wallet(v) => form.wallet = v.clone(),
        SettingsMsg::Worker(v) => form.worker = v.clone(),
        SettingsMsg::Region(i) => form.region_index = *i,
        SettingsMsg::ApiOrganization(v) => form.api_organization = v.clone(),
        SettingsMsg::ApiKey(v) => form.api_key = v.clone(),
        SettingsMsg::ApiSecret(v) => form.api_secret = v.clone(),
        SettingsMsg::Interval(v) => form.interval = INTERVAL_FIELD.clamp(*v) as u32,
        SettingsMsg::ThresholdPercent(v) => {
            form.threshold_percent = THRESHOLD_PERCENT_FIELD.clamp(*v) as u32
        }
        SettingsMsg::Units(i) => form.units_index = *i,
    }
}

fn option_index<T: PartialEq>(options: &[T], value: T) -> Result<usize> {
    options
        .iter()
        .position(|o| *o == value)
        .ok_or_else(|| anyhow!("option is not selectable"))
}

fn parse_number(raw: &str, field: &str) -> Result<i64> {
    raw.parse::<i64>()
        .with_context(|| format!("{} must be a whole number, got {:?}", field, raw))
}
