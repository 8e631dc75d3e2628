//! nuxhash core - settings model, store and editor for the nuxhash
//! settings panel.
//!
//! This crate has zero UI dependencies. A host front-end implements
//! [`editor::SettingsView`] and forwards field events as
//! [`editor::SettingsMsg`].

pub mod bitcoin;
pub mod config;
pub mod editor;
pub mod logging;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
