//! Tray menu model
//!
//! The menu is a pure function of the bound toggle key. Whenever that key
//! changes the whole menu is rebuilt and handed to the `TrayHost`.

use tracing::{debug, info};

use crate::constants::tray::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    OpenSettings,
    ToggleOverlay,
    Quit,
}

impl TrayAction {
    /// Stable menu item id, unchanged across rebuilds
    pub fn id(&self) -> &'static str {
        match self {
            TrayAction::OpenSettings => OPEN_SETTINGS_ID,
            TrayAction::ToggleOverlay => TOGGLE_OVERLAY_ID,
            TrayAction::Quit => QUIT_ID,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        [TrayAction::OpenSettings, TrayAction::ToggleOverlay, TrayAction::Quit]
            .into_iter()
            .find(|action| action.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayItem {
    pub action: TrayAction,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayMenu {
    pub items: Vec<TrayItem>,
}

impl TrayMenu {
    pub fn label_of(&self, action: TrayAction) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.action == action)
            .map(|item| item.label.as_str())
    }
}

/// Build the fixed menu for the given bound key
pub fn build_menu(toggle_key: Option<&str>) -> TrayMenu {
    let key = toggle_key.filter(|k| !k.is_empty()).unwrap_or(NO_KEY_LABEL);
    TrayMenu {
        items: vec![
            TrayItem {
                action: TrayAction::OpenSettings,
                label: OPEN_SETTINGS_LABEL.to_string(),
            },
            TrayItem {
                action: TrayAction::ToggleOverlay,
                label: format!("Show/Hide Crosshair ({key})"),
            },
            TrayItem {
                action: TrayAction::Quit,
                label: QUIT_LABEL.to_string(),
            },
        ],
    }
}

/// Whatever actually displays the menu
pub trait TrayHost {
    fn set_menu(&mut self, menu: &TrayMenu);
}

pub struct TrayController<T: TrayHost> {
    host: T,
    menu: Option<TrayMenu>,
}

impl<T: TrayHost> TrayController<T> {
    pub fn new(host: T) -> Self {
        Self { host, menu: None }
    }

    /// Rebuild the menu if the bound key changed since the last build
    pub fn refresh(&mut self, toggle_key: Option<&str>) {
        let menu = build_menu(toggle_key);
        if self.menu.as_ref() == Some(&menu) {
            debug!("Tray menu unchanged");
            return;
        }
        info!(key = toggle_key.unwrap_or(NO_KEY_LABEL), "Rebuilding tray menu");
        self.host.set_menu(&menu);
        self.menu = Some(menu);
    }

    pub fn menu(&self) -> Option<&TrayMenu> {
        self.menu.as_ref()
    }

    pub fn host(&self) -> &T {
        &self.host
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTray;
    use super::*;

    #[test]
    fn test_menu_has_fixed_actions() {
        let menu = build_menu(Some("F8"));
        let actions: Vec<_> = menu.items.iter().map(|item| item.action).collect();
        assert_eq!(
            actions,
            vec![TrayAction::OpenSettings, TrayAction::ToggleOverlay, TrayAction::Quit]
        );
        assert_eq!(menu.label_of(TrayAction::ToggleOverlay), Some("Show/Hide Crosshair (F8)"));
    }

    #[test]
    fn test_unbound_key_is_explicit() {
        for key in [None, Some("")] {
            let menu = build_menu(key);
            assert_eq!(
                menu.label_of(TrayAction::ToggleOverlay),
                Some("Show/Hide Crosshair (no key set)")
            );
        }
    }

    #[test]
    fn test_action_ids_roundtrip() {
        for action in [TrayAction::OpenSettings, TrayAction::ToggleOverlay, TrayAction::Quit] {
            assert_eq!(TrayAction::from_id(action.id()), Some(action));
        }
        assert_eq!(TrayAction::from_id("bogus"), None);
    }

    #[test]
    fn test_refresh_rebuilds_only_on_change() {
        let mut tray = TrayController::new(FakeTray::default());
        tray.refresh(Some("F8"));
        tray.refresh(Some("F8"));
        tray.refresh(Some("Ctrl+F3"));
        tray.refresh(None);

        let labels: Vec<_> = tray
            .host()
            .menus
            .iter()
            .filter_map(|menu| menu.label_of(TrayAction::ToggleOverlay).map(str::to_string))
            .collect();
        assert_eq!(
            labels,
            vec![
                "Show/Hide Crosshair (F8)",
                "Show/Hide Crosshair (Ctrl+F3)",
                "Show/Hide Crosshair (no key set)",
            ]
        );
    }
}
