//! Per-field state and the stateless validation rule.

use serde::{Deserialize, Serialize};

/// Which draft field a rule or action targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FieldKind {
    Title,
    Body,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Title => "title",
            FieldKind::Body => "body",
        }
    }

    /// Fixed human message shown when the field is required but blank.
    pub fn required_message(self) -> &'static str {
        match self {
            FieldKind::Title => "You must provide a title.",
            FieldKind::Body => "You must provide body content.",
        }
    }
}

/// Validate a raw field value.
///
/// The only rule: a field is invalid iff its trimmed value is empty.
/// Returns the field-specific message on failure, `None` when valid.
/// Side-effect free; stable for equal input.
pub fn validate(kind: FieldKind, raw: &str) -> Option<&'static str> {
    if raw.trim().is_empty() {
        Some(kind.required_message())
    } else {
        None
    }
}

/// Live state of a single text field.
///
/// `old_value` is tracked only for edit drafts and drives dirty-checking
/// against the last persisted value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldState {
    pub value: String,
    pub old_value: Option<String>,
    pub has_errors: bool,
    pub message: String,
}

impl FieldState {
    /// Fresh untracked field (create drafts).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh field that tracks its persisted value (edit drafts).
    pub(crate) fn tracked() -> Self {
        Self {
            old_value: Some(String::new()),
            ..Self::default()
        }
    }

    /// Current value differs from the last known persisted value.
    pub fn is_dirty(&self) -> bool {
        self.old_value
            .as_deref()
            .is_some_and(|old| old != self.value)
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}
