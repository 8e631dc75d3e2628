//! Settings editor messages (field events)

/// One message per editable field, as delivered by the host front-end.
///
/// Choice fields carry the selected option index; spin fields carry the raw
/// displayed number.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsMsg {
    // === Basic ===
    Wallet(String),
    Worker(String),
    Region(usize),

    // === API keys ===
    ApiOrganization(String),
    ApiKey(String),
    ApiSecret(String),

    // === Advanced ===
    /// Update interval in seconds.
    Interval(i64),
    /// Switch threshold as displayed, in percent.
    ThresholdPercent(i64),
    Units(usize),
}

impl SettingsMsg {
    /// Name of the field this message edits, for logging.
    pub fn field_name(&self) -> &'static str {
        match self {
            SettingsMsg::Wallet(_) => "wallet",
            SettingsMsg::Worker(_) => "workername",
            SettingsMsg::Region(_) => "region",
            SettingsMsg::ApiOrganization(_) => "api_organization",
            SettingsMsg::ApiKey(_) => "api_key",
            SettingsMsg::ApiSecret(_) => "api_secret",
            SettingsMsg::Interval(_) => "interval",
            SettingsMsg::ThresholdPercent(_) => "threshold",
            SettingsMsg::Units(_) => "units",
        }
    }
}
