//! Global toggle hotkey
//!
//! `HotkeyManager` owns the single binding of the "toggle overlay" action and
//! talks to the OS through a `HotkeyBackend`. Rebinding is always
//! unregister-then-register, never a diff.

mod native;

pub use native::{drain_presses, NativeHotkeys};

use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::constants::hotkeys::{MAX_MODIFIED_FUNCTION_KEY, MAX_PLAIN_FUNCTION_KEY, SEPARATOR};
use crate::error::HotkeyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::Ctrl, Modifier::Alt, Modifier::Shift];

    fn as_str(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "alt" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            _ => None,
        }
    }
}

/// A function key with at most one modifier, e.g. `F8` or `Ctrl+F3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifier: Option<Modifier>,
    /// 1-based function key number
    pub function_key: u8,
}

impl Hotkey {
    pub fn new(modifier: Option<Modifier>, function_key: u8) -> Self {
        Self {
            modifier,
            function_key,
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Some(modifier) => write!(f, "{}{}F{}", modifier.as_str(), SEPARATOR, self.function_key),
            None => write!(f, "F{}", self.function_key),
        }
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || HotkeyError::UnknownKey(s.to_string());

        let (modifier, key) = match s.trim().split_once(SEPARATOR) {
            Some((modifier, key)) => (Some(Modifier::parse(modifier.trim()).ok_or_else(unknown)?), key.trim()),
            None => (None, s.trim()),
        };

        let number = key
            .strip_prefix('F')
            .or_else(|| key.strip_prefix('f'))
            .and_then(|n| n.parse::<u8>().ok())
            .ok_or_else(unknown)?;

        if !(1..=MAX_PLAIN_FUNCTION_KEY).contains(&number) {
            return Err(unknown());
        }

        Ok(Hotkey::new(modifier, number))
    }
}

/// Key combinations the settings panel may offer: F1–F12, then
/// Ctrl/Alt/Shift with F1–F6
pub fn valid_hotkeys() -> Vec<Hotkey> {
    let plain = (1..=MAX_PLAIN_FUNCTION_KEY).map(|n| Hotkey::new(None, n));
    let modified = Modifier::ALL
        .into_iter()
        .flat_map(|m| (1..=MAX_MODIFIED_FUNCTION_KEY).map(move |n| Hotkey::new(Some(m), n)));
    plain.chain(modified).collect()
}

/// OS-level registration of global hotkeys
pub trait HotkeyBackend {
    fn register(&mut self, hotkey: Hotkey) -> Result<(), HotkeyError>;
    fn unregister(&mut self, hotkey: Hotkey) -> Result<(), HotkeyError>;
}

/// Keeps at most one hotkey bound to the toggle action
pub struct HotkeyManager<B: HotkeyBackend> {
    backend: B,
    bound: Option<Hotkey>,
    last_error: Option<HotkeyError>,
}

impl<B: HotkeyBackend> HotkeyManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bound: None,
            last_error: None,
        }
    }

    /// Release the current binding and bind `key` in its place
    ///
    /// `None` or an empty string leaves nothing bound. On failure the manager
    /// is left with nothing bound and the error is returned for reporting.
    pub fn rebind(&mut self, key: Option<&str>) -> Result<(), HotkeyError> {
        self.release();
        self.last_error = None;

        let Some(key) = key.map(str::trim).filter(|k| !k.is_empty()) else {
            info!("No toggle key configured");
            return Ok(());
        };

        let result = key
            .parse::<Hotkey>()
            .and_then(|hotkey| self.backend.register(hotkey).map(|()| hotkey));

        match result {
            Ok(hotkey) => {
                info!(key = %hotkey, "Toggle key bound");
                self.bound = Some(hotkey);
                Ok(())
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to bind toggle key, continuing without one");
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Unregister the current binding, if any
    pub fn release(&mut self) {
        if let Some(hotkey) = self.bound.take() {
            match self.backend.unregister(hotkey) {
                Ok(()) => info!(key = %hotkey, "Toggle key released"),
                Err(e) => warn!(key = %hotkey, error = %e, "Failed to unregister toggle key"),
            }
        }
    }

    pub fn bound(&self) -> Option<Hotkey> {
        self.bound
    }

    /// Error from the most recent `rebind`, cleared by the next one
    pub fn last_error(&self) -> Option<&HotkeyError> {
        self.last_error.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("F8".parse::<Hotkey>(), Ok(Hotkey::new(None, 8)));
        assert_eq!("Ctrl+F3".parse::<Hotkey>(), Ok(Hotkey::new(Some(Modifier::Ctrl), 3)));
        assert_eq!(" shift + f6 ".parse::<Hotkey>(), Ok(Hotkey::new(Some(Modifier::Shift), 6)));
        assert_eq!(Hotkey::new(Some(Modifier::Alt), 2).to_string(), "Alt+F2");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for bad in ["", "F0", "F13", "Q", "Meta+F1", "Ctrl+"] {
            assert_eq!(
                bad.parse::<Hotkey>(),
                Err(HotkeyError::UnknownKey(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_valid_hotkeys_list() {
        let keys: Vec<String> = valid_hotkeys().iter().map(Hotkey::to_string).collect();
        assert_eq!(keys.len(), 12 + 3 * 6);
        assert_eq!(keys.first().map(String::as_str), Some("F1"));
        assert!(keys.contains(&"F12".to_string()));
        assert!(keys.contains(&"Ctrl+F3".to_string()));
        assert!(keys.contains(&"Shift+F6".to_string()));
        assert!(!keys.contains(&"Alt+F7".to_string()));
        // Every offered key parses back to itself
        for key in &keys {
            assert_eq!(key.parse::<Hotkey>().map(|k| k.to_string()).as_ref(), Ok(key));
        }
    }

    #[test]
    fn test_rebind_same_key_twice_leaves_one_binding() {
        let mut manager = HotkeyManager::new(FakeBackend::default());
        assert_eq!(manager.rebind(Some("F8")), Ok(()));
        assert_eq!(manager.rebind(Some("F8")), Ok(()));

        assert_eq!(manager.bound(), Some(Hotkey::new(None, 8)));
        assert_eq!(manager.backend().active.len(), 1);
        assert_eq!(
            manager.backend().calls,
            vec!["register F8", "unregister F8", "register F8"]
        );
    }

    #[test]
    fn test_rebind_switches_key() {
        let mut manager = HotkeyManager::new(FakeBackend::default());
        manager.rebind(Some("F8")).unwrap();
        manager.rebind(Some("Ctrl+F3")).unwrap();

        let active: Vec<_> = manager.backend().active.iter().copied().collect();
        assert_eq!(active, vec![Hotkey::new(Some(Modifier::Ctrl), 3)]);
    }

    #[test]
    fn test_rebind_empty_unbinds() {
        let mut manager = HotkeyManager::new(FakeBackend::default());
        manager.rebind(Some("F8")).unwrap();
        assert_eq!(manager.rebind(Some("")), Ok(()));
        assert_eq!(manager.bound(), None);
        assert!(manager.backend().active.is_empty());

        manager.rebind(Some("F8")).unwrap();
        assert_eq!(manager.rebind(None), Ok(()));
        assert_eq!(manager.bound(), None);
    }

    #[test]
    fn test_registration_failure_leaves_nothing_bound() {
        let mut backend = FakeBackend::default();
        backend.claimed.insert(Hotkey::new(None, 9));
        let mut manager = HotkeyManager::new(backend);

        manager.rebind(Some("F8")).unwrap();
        let err = manager.rebind(Some("F9")).unwrap_err();

        assert!(matches!(err, HotkeyError::Register { .. }));
        assert_eq!(manager.bound(), None);
        assert!(manager.backend().active.is_empty());
        assert_eq!(manager.last_error(), Some(&err));
    }

    #[test]
    fn test_unknown_key_reported_without_backend_call() {
        let mut manager = HotkeyManager::new(FakeBackend::default());
        let err = manager.rebind(Some("Hyper+Q")).unwrap_err();
        assert_eq!(err, HotkeyError::UnknownKey("Hyper+Q".to_string()));
        assert!(manager.backend().calls.is_empty());
    }

    #[test]
    fn test_successful_rebind_clears_last_error() {
        let mut manager = HotkeyManager::new(FakeBackend::default());
        let _ = manager.rebind(Some("nope"));
        assert!(manager.last_error().is_some());
        manager.rebind(Some("F2")).unwrap();
        assert!(manager.last_error().is_none());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut manager = HotkeyManager::new(FakeBackend::default());
        manager.rebind(Some("F8")).unwrap();
        manager.release();
        manager.release();
        assert_eq!(manager.backend().calls, vec!["register F8", "unregister F8"]);
    }
}
