//! Command descriptor issued by the host once per render cycle.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved string meaning "no value stored under this name".
pub const NULL_SENTINEL: &str = "null|";

/// Storage medium a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    /// `document.cookie`, root path, strict same-site.
    #[default]
    Cookie,
    /// `window.localStorage`.
    LocalPersistent,
    /// `window.sessionStorage`.
    SessionScoped,
}

impl BackendKind {
    /// Resolves a host-supplied type selector. Unknown or missing selectors fall back to cookies.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("LocalStorage") => Self::LocalPersistent,
            Some("SessionStorage") => Self::SessionScoped,
            _ => Self::Cookie,
        }
    }

    /// Returns the selector token the host uses for this backend.
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Cookie => "CookieStorage",
            Self::LocalPersistent => "LocalStorage",
            Self::SessionScoped => "SessionStorage",
        }
    }
}

impl Serialize for BackendKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.selector())
    }
}

impl<'de> Deserialize<'de> for BackendKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_selector(raw.as_deref()))
    }
}

/// Operation requested against the selected backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Write a value.
    Set,
    /// Read a single value.
    Get,
    /// Read every entry in the backend namespace.
    GetAll,
    /// Remove a value.
    Delete,
    /// Any selector this component does not know; dispatching it is a no-op.
    Unknown(Option<String>),
}

impl Action {
    /// Resolves a host-supplied action selector.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("SET") => Self::Set,
            Some("GET") => Self::Get,
            Some("GET_ALL") => Self::GetAll,
            Some("DELETE") => Self::Delete,
            other => Self::Unknown(other.map(str::to_string)),
        }
    }

    /// Returns the selector token, or `None` for unknown actions without one.
    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::Set => Some("SET"),
            Self::Get => Some("GET"),
            Self::GetAll => Some("GET_ALL"),
            Self::Delete => Some("DELETE"),
            Self::Unknown(raw) => raw.as_deref(),
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.selector().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_selector(raw.as_deref()))
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::Unknown(None)
    }
}

/// Per-invocation input describing backend, action, key, value and expiry.
///
/// Field names match the component arguments the host sends.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Backend selector (`type` on the wire).
    #[serde(rename = "type", default)]
    pub backend: BackendKind,
    /// Action selector.
    #[serde(default)]
    pub action: Action,
    /// Storage key.
    #[serde(default)]
    pub name: Option<String>,
    /// Value to store (SET only).
    #[serde(default)]
    pub value: Option<String>,
    /// Expiry instant as sent by the host (SET only).
    #[serde(default)]
    pub expires_at: Option<String>,
}

impl CommandDescriptor {
    /// Creates a descriptor for `action` against `backend` with no arguments.
    pub fn new(backend: BackendKind, action: Action) -> Self {
        Self {
            backend,
            action,
            ..Self::default()
        }
    }

    /// Sets the storage key.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the value to store.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the expiry timestamp.
    pub fn with_expires_at(mut self, expires_at: impl Into<String>) -> Self {
        self.expires_at = Some(expires_at.into());
        self
    }

    /// Storage key, empty when the host omitted it.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn descriptor_deserializes_host_args() {
        let args = json!({
            "type": "LocalStorage",
            "action": "SET",
            "name": "theme",
            "value": "dark",
            "expires_at": "2030-01-01",
            "key": "browser_storage__SET_1"
        });
        let command: CommandDescriptor = serde_json::from_value(args).expect("descriptor");
        assert_eq!(
            command,
            CommandDescriptor::new(BackendKind::LocalPersistent, Action::Set)
                .with_name("theme")
                .with_value("dark")
                .with_expires_at("2030-01-01")
        );
    }

    #[test]
    fn unknown_or_missing_backend_selector_defaults_to_cookie() {
        let unknown: CommandDescriptor =
            serde_json::from_value(json!({ "type": "IndexedDb", "action": "GET" }))
                .expect("descriptor");
        let missing: CommandDescriptor =
            serde_json::from_value(json!({ "action": "GET" })).expect("descriptor");
        let null: CommandDescriptor =
            serde_json::from_value(json!({ "type": null, "action": "GET" })).expect("descriptor");

        assert_eq!(unknown.backend, BackendKind::Cookie);
        assert_eq!(missing.backend, BackendKind::Cookie);
        assert_eq!(null.backend, BackendKind::Cookie);
    }

    #[test]
    fn unknown_action_selector_is_preserved_as_unknown() {
        let command: CommandDescriptor =
            serde_json::from_value(json!({ "type": "SessionStorage", "action": "DELETE_ALL" }))
                .expect("descriptor");
        assert_eq!(command.action, Action::Unknown(Some("DELETE_ALL".to_string())));
        assert_eq!(command.action.selector(), Some("DELETE_ALL"));

        let missing: CommandDescriptor =
            serde_json::from_value(json!({})).expect("descriptor");
        assert_eq!(missing.action, Action::Unknown(None));
    }

    #[test]
    fn descriptor_serializes_back_to_host_args() {
        let command = CommandDescriptor::new(BackendKind::SessionScoped, Action::GetAll);
        assert_eq!(
            serde_json::to_value(&command).expect("serialize"),
            json!({
                "type": "SessionStorage",
                "action": "GET_ALL",
                "name": null,
                "value": null,
                "expires_at": null
            })
        );
    }

    #[test]
    fn selectors_are_stable_tokens() {
        assert_eq!(BackendKind::Cookie.selector(), "CookieStorage");
        assert_eq!(BackendKind::LocalPersistent.selector(), "LocalStorage");
        assert_eq!(BackendKind::SessionScoped.selector(), "SessionStorage");
        assert_eq!(Action::GetAll.selector(), Some("GET_ALL"));
    }
}
