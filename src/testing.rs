//! Shared helpers for the fakes used in unit tests

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Ordered record of calls across several fakes
///
/// When `watched` is set, each entry notes whether that file existed at the
/// time of the call, which pins calls relative to disk writes.
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Rc<RefCell<Vec<String>>>,
    watched: Option<PathBuf>,
}

impl CallLog {
    pub fn watching(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Rc::default(),
            watched: Some(path.into()),
        }
    }

    pub fn record(&self, call: impl Into<String>) {
        let mut call = call.into();
        if let Some(path) = &self.watched {
            call.push_str(if path.exists() { " [on disk]" } else { " [not on disk]" });
        }
        self.entries.borrow_mut().push(call);
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}
