//! Render side of the settings form.

use super::widgets::FieldStyle;

/// Widgets the editor renders into.
///
/// Implementations only display values; they must not feed them back as
/// edits. User changes arrive separately as [`super::SettingsMsg`].
pub trait SettingsView {
    fn show_wallet(&mut self, wallet: &str);
    fn show_wallet_style(&mut self, style: FieldStyle);
    fn show_worker(&mut self, worker: &str);
    /// Select the region option at `index`.
    fn show_region(&mut self, index: usize);
    fn show_api_credentials(&mut self, organization: &str, key: &str, secret: &str);
    fn show_interval(&mut self, secs: u32);
    fn show_threshold(&mut self, percent: u32);
    /// Select the units option at `index`.
    fn show_units(&mut self, index: usize);
    /// Enable or disable the save and revert actions together.
    fn set_actions_enabled(&mut self, enabled: bool);
}

/// Plain in-memory form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    pub wallet: String,
    pub wallet_style: FieldStyle,
    pub worker: String,
    pub region_index: usize,
    pub api_organization: String,
    pub api_key: String,
    pub api_secret: String,
    pub interval: u32,
    pub threshold_percent: u32,
    pub units_index: usize,
    pub actions_enabled: bool,
}

impl SettingsView for FormSnapshot {
    fn show_wallet(&mut self, wallet: &str) {
        self.wallet = wallet.to_string();
    }

    fn show_wallet_style(&mut self, style: FieldStyle) {
        self.wallet_style = style;
    }

    fn show_worker(&mut self, worker: &str) {
        self.worker = worker.to_string();
    }

    fn show_region(&mut self, index: usize) {
        self.region_index = index;
    }

    fn show_api_credentials(&mut self, organization: &str, key: &str, secret: &str) {
        self.api_organization = organization.to_string();
        self.api_key = key.to_string();
        self.api_secret = secret.to_string();
    }

    fn show_interval(&mut self, secs: u32) {
        self.interval = secs;
    }

    fn show_threshold(&mut self, percent: u32) {
        self.threshold_percent = percent;
    }

    fn show_units(&mut self, index: usize) {
        self.units_index = index;
    }

    fn set_actions_enabled(&mut self, enabled: bool) {
        self.actions_enabled = enabled;
    }
}
