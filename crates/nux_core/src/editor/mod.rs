//! Settings editor form controller
//!
//! Keeps two copies of the settings:
//! - committed: the last value accepted by the store
//! - working: an independent clone that accumulates unsaved edits
//!
//! Save publishes a clone of the working copy; revert re-clones committed.
//! A single modified flag drives the save/revert actions.

mod messages;
mod view;
mod widgets;

pub use messages::SettingsMsg;
pub use view::{FormSnapshot, SettingsView};
pub use widgets::{
    percent_to_threshold, threshold_to_percent, ChoiceByValue, FieldStyle, SpinField,
    INTERVAL_FIELD, THRESHOLD_PERCENT_FIELD,
};

use std::cell::RefCell;
use std::rc::Rc;

use crate::bitcoin::check_bc;
use crate::config::{Region, Settings, Units};
use crate::store::{SettingsChannel, SubscriptionId};

/// Address format check run on every wallet edit.
pub type AddressValidator = Box<dyn Fn(&str) -> bool>;

/// Region choice with the default region as fallback.
pub fn region_choice() -> ChoiceByValue<Region> {
    ChoiceByValue::new("region", &Region::ALL, Settings::default().region())
}

/// Units choice with the default units as fallback.
pub fn units_choice() -> ChoiceByValue<Units> {
    ChoiceByValue::new("units", &Units::ALL, Settings::default().units())
}

/// Settings form controller bound to a view and a settings channel.
pub struct SettingsEditor<V: SettingsView> {
    channel: Rc<dyn SettingsChannel>,
    view: V,
    committed: Settings,
    working: Settings,
    modified: bool,
    validator: AddressValidator,
    region: ChoiceByValue<Region>,
    units: ChoiceByValue<Units>,
    subscription: Option<SubscriptionId>,
    /// Latest value delivered while the editor was borrowed by `on_save`.
    deferred: Rc<RefCell<Option<Settings>>>,
}

impl<V: SettingsView> SettingsEditor<V> {
    /// Create an editor showing `committed`, validating wallets with `check_bc`.
    pub fn new(channel: Rc<dyn SettingsChannel>, view: V, committed: Settings) -> Self {
        Self::with_validator(channel, view, committed, Box::new(check_bc))
    }

    pub fn with_validator(
        channel: Rc<dyn SettingsChannel>,
        view: V,
        committed: Settings,
        validator: AddressValidator,
    ) -> Self {
        let mut editor = Self {
            channel,
            view,
            working: committed.clone(),
            committed,
            modified: false,
            validator,
            region: region_choice(),
            units: units_choice(),
            subscription: None,
            deferred: Rc::new(RefCell::new(None)),
        };
        editor.reset();
        editor
    }

    /// Move the editor behind `Rc<RefCell<_>>` and subscribe it to its channel.
    ///
    /// The subscription holds a weak reference, and dropping the editor
    /// unsubscribes it, so the returned handle can simply be dropped.
    pub fn attach(self) -> Rc<RefCell<Self>>
    where
        V: 'static,
    {
        let channel = Rc::clone(&self.channel);
        let deferred = Rc::clone(&self.deferred);
        let editor = Rc::new(RefCell::new(self));
        let weak = Rc::downgrade(&editor);

        let id = channel.subscribe(Box::new(move |settings: &Settings| {
            let Some(cell) = weak.upgrade() else {
                return;
            };
            // Delivered from inside our own on_save, which applies it once
            // the publish returns
            let Ok(mut editor) = cell.try_borrow_mut() else {
                tracing::trace!("settings editor busy, deferring update");
                *deferred.borrow_mut() = Some(settings.clone());
                return;
            };
            editor.on_external_settings_update(settings);
        }));

        editor.borrow_mut().subscription = Some(id);
        editor
    }

    /// Stop receiving store notifications. Returns false if not attached.
    pub fn detach(&mut self) -> bool {
        match self.subscription.take() {
            Some(id) => self.channel.unsubscribe(id),
            None => false,
        }
    }

    /// Handle a committed value delivered by the store.
    ///
    /// Values equal to the current committed settings are ignored; this
    /// absorbs the echo of our own save.
    pub fn on_external_settings_update(&mut self, settings: &Settings) {
        if *settings == self.committed {
            return;
        }
        tracing::debug!("committed settings changed externally, resetting form");
        self.committed = settings.clone();
        self.reset();
    }

    /// Apply one field edit to the working copy.
    pub fn on_field_edit(&mut self, msg: SettingsMsg) {
        tracing::debug!("settings field edited: {}", msg.field_name());
        self.mark_modified();

        match msg {
            SettingsMsg::Wallet(wallet) => {
                let style = self.wallet_style(&wallet);
                self.view.show_wallet_style(style);
                self.working.nicehash.wallet = wallet;
            }
            SettingsMsg::Worker(worker) => self.working.nicehash.workername = worker,
            SettingsMsg::Region(index) => match self.region.value_at(index) {
                Some(region) => self.working.nicehash.region = region.as_str().to_string(),
                None => tracing::warn!("ignoring out-of-range region index {}", index),
            },
            SettingsMsg::ApiOrganization(v) => self.working.nicehash.api_organization = v,
            SettingsMsg::ApiKey(v) => self.working.nicehash.api_key = v,
            SettingsMsg::ApiSecret(v) => self.working.nicehash.api_secret = v,
            SettingsMsg::Interval(secs) => {
                self.working.switching.interval = INTERVAL_FIELD.clamp(secs) as u32;
            }
            SettingsMsg::ThresholdPercent(percent) => {
                self.working.switching.threshold =
                    percent_to_threshold(THRESHOLD_PERCENT_FIELD.clamp(percent));
            }
            SettingsMsg::Units(index) => match self.units.value_at(index) {
                Some(units) => self.working.gui.units = units.as_str().to_string(),
                None => tracing::warn!("ignoring out-of-range units index {}", index),
            },
        }
    }

    /// Commit the working copy and publish it on the channel.
    pub fn on_save(&mut self) {
        let published = self.working.clone();
        self.committed = self.working.clone();
        self.modified = false;
        self.view.set_actions_enabled(false);

        tracing::info!("settings saved");
        self.channel.publish(published);

        // Subscribers may have re-published a normalized value
        let latest = self.deferred.borrow_mut().take();
        if let Some(latest) = latest {
            self.on_external_settings_update(&latest);
        }
    }

    /// Discard edits and re-render from the committed settings.
    pub fn on_revert(&mut self) {
        tracing::info!("settings edits reverted");
        self.reset();
    }

    pub fn committed(&self) -> &Settings {
        &self.committed
    }

    pub fn working(&self) -> &Settings {
        &self.working
    }

    /// Whether unsaved edits exist.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access for hosts whose widgets hold their own text.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn region_choices(&self) -> &'static [Region] {
        self.region.choices()
    }

    pub fn units_choices(&self) -> &'static [Units] {
        self.units.choices()
    }

    fn mark_modified(&mut self) {
        self.modified = true;
        self.view.set_actions_enabled(true);
    }

    fn wallet_style(&self, wallet: &str) -> FieldStyle {
        if (self.validator)(wallet) {
            FieldStyle::Normal
        } else {
            FieldStyle::Invalid
        }
    }

    fn reset(&mut self) {
        self.working = self.committed.clone();
        self.render();
        self.modified = false;
        self.view.set_actions_enabled(false);
    }

    fn render(&mut self) {
        let wallet_style = self.wallet_style(&self.working.nicehash.wallet);
        let region_index = self.region.index_of(&self.working.nicehash.region);
        let units_index = self.units.index_of(&self.working.gui.units);
        let interval = INTERVAL_FIELD.clamp(i64::from(self.working.switching.interval));
        let threshold =
            THRESHOLD_PERCENT_FIELD.clamp(threshold_to_percent(self.working.switching.threshold));

        let nicehash = &self.working.nicehash;
        let view = &mut self.view;
        view.show_wallet(&nicehash.wallet);
        view.show_wallet_style(wallet_style);
        view.show_worker(&nicehash.workername);
        view.show_region(region_index);
        view.show_api_credentials(
            &nicehash.api_organization,
            &nicehash.api_key,
            &nicehash.api_secret,
        );
        view.show_interval(interval as u32);
        view.show_threshold(threshold as u32);
        view.show_units(units_index);
    }
}

impl<V: SettingsView> Drop for SettingsEditor<V> {
    fn drop(&mut self) {
        self.detach();
    }
}
