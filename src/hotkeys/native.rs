//! `global-hotkey` backed registration

use anyhow::{Context, Result};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::{debug, error, warn};

use super::{Hotkey, HotkeyBackend, Modifier};
use crate::error::HotkeyError;

/// OS hotkey registration; inert when the platform refused to hand out a manager
pub struct NativeHotkeys {
    manager: Option<GlobalHotKeyManager>,
}

impl NativeHotkeys {
    pub fn new() -> Self {
        match GlobalHotKeyManager::new().context("Failed to create global hotkey manager") {
            Ok(manager) => Self {
                manager: Some(manager),
            },
            Err(e) => {
                error!(error = ?e, "Global hotkeys unavailable");
                warn!("Continuing without hotkey support...");
                Self { manager: None }
            }
        }
    }

    fn manager(&self, hotkey: Hotkey) -> Result<&GlobalHotKeyManager, HotkeyError> {
        self.manager.as_ref().ok_or_else(|| HotkeyError::Register {
            key: hotkey.to_string(),
            reason: "global hotkeys are not available on this system".to_string(),
        })
    }
}

impl HotkeyBackend for NativeHotkeys {
    fn register(&mut self, hotkey: Hotkey) -> Result<(), HotkeyError> {
        self.manager(hotkey)?
            .register(to_native(hotkey))
            .map_err(|e| HotkeyError::Register {
                key: hotkey.to_string(),
                reason: e.to_string(),
            })
    }

    fn unregister(&mut self, hotkey: Hotkey) -> Result<(), HotkeyError> {
        self.manager(hotkey)?
            .unregister(to_native(hotkey))
            .map_err(|e| HotkeyError::Unregister {
                key: hotkey.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Count pending presses of `bound`, discarding every other queued event
pub fn drain_presses(bound: Option<Hotkey>) -> usize {
    let bound_id = bound.map(|hotkey| to_native(hotkey).id());
    let mut presses = 0;

    while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
        if event.state != HotKeyState::Pressed {
            continue;
        }
        if Some(event.id) == bound_id {
            presses += 1;
        } else {
            debug!(id = event.id, "Ignoring press of a hotkey that is no longer bound");
        }
    }

    presses
}

fn to_native(hotkey: Hotkey) -> HotKey {
    let modifiers = hotkey.modifier.map(|modifier| match modifier {
        Modifier::Ctrl => Modifiers::CONTROL,
        Modifier::Alt => Modifiers::ALT,
        Modifier::Shift => Modifiers::SHIFT,
    });
    HotKey::new(modifiers, function_code(hotkey.function_key))
}

fn function_code(number: u8) -> Code {
    match number {
        1 => Code::F1,
        2 => Code::F2,
        3 => Code::F3,
        4 => Code::F4,
        5 => Code::F5,
        6 => Code::F6,
        7 => Code::F7,
        8 => Code::F8,
        9 => Code::F9,
        10 => Code::F10,
        11 => Code::F11,
        _ => Code::F12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keys_get_distinct_ids() {
        let f3 = to_native(Hotkey::new(None, 3)).id();
        let ctrl_f3 = to_native(Hotkey::new(Some(Modifier::Ctrl), 3)).id();
        let alt_f3 = to_native(Hotkey::new(Some(Modifier::Alt), 3)).id();
        assert_ne!(f3, ctrl_f3);
        assert_ne!(ctrl_f3, alt_f3);
        assert_eq!(ctrl_f3, to_native("Ctrl+F3".parse().unwrap()).id());
    }
}
