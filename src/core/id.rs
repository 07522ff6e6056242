//! State identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::ops::Deref;

/// Opaque, unique identifier of a state in a tree.
///
/// Identifiers compare by their string value. `StateId::from_static` is a
/// `const fn`, so well-known ids can be declared as constants (see
/// [`state_ids!`](crate::state_ids)).
///
/// # Example
///
/// ```rust
/// use statetree::core::StateId;
///
/// const ROOT: StateId = StateId::from_static("Root");
///
/// let parsed = StateId::from("Root");
/// assert_eq!(ROOT, parsed);
/// assert_eq!(parsed, "Root");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(Cow<'static, str>);

impl StateId {
    /// Create an id from a static string without allocating.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Create an id from any owned or borrowed string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The empty id denotes "no state" and is rejected by the builders.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.as_ref())
    }
}

impl Deref for StateId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

impl From<&StateId> for StateId {
    fn from(id: &StateId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const IDLE: StateId = StateId::from_static("Idle");

    #[test]
    fn static_and_owned_ids_are_equal() {
        assert_eq!(IDLE, StateId::new("Idle"));
        assert_eq!(IDLE, StateId::from(String::from("Idle")));
        assert_ne!(IDLE, StateId::from("Patrol"));
    }

    #[test]
    fn ids_can_be_looked_up_by_str() {
        let mut map = HashMap::new();
        map.insert(IDLE, 1);

        assert_eq!(map.get("Idle"), Some(&1));
        assert_eq!(map.get("Chase"), None);
    }

    #[test]
    fn empty_id_is_detected() {
        assert!(StateId::from("").is_empty());
        assert!(!IDLE.is_empty());
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let json = serde_json::to_string(&IDLE).unwrap();
        assert_eq!(json, "\"Idle\"");

        let back: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, IDLE);
    }

    #[test]
    fn display_and_debug_show_the_name() {
        assert_eq!(IDLE.to_string(), "Idle");
        assert_eq!(format!("{IDLE:?}"), "\"Idle\"");
    }
}
