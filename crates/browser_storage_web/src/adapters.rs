use browser_storage::{BrowserStorageComponent, ComponentConfig, StorageBackends};

use crate::{PostMessageHost, WebCookieStore, WebLocalStorage, WebSessionStorage};

/// The three browser media, one per backend kind.
pub type WebStorageBackends = StorageBackends<WebCookieStore, WebLocalStorage, WebSessionStorage>;

/// Component wired to browser media and the parent-frame host.
pub type WebStorageComponent =
    BrowserStorageComponent<WebCookieStore, WebLocalStorage, WebSessionStorage, PostMessageHost>;

/// Builds the browser media bundle.
pub fn web_storage_backends() -> WebStorageBackends {
    StorageBackends::new(WebCookieStore, WebLocalStorage, WebSessionStorage)
}

/// Builds a component instance with a fresh dedup slot.
pub fn web_storage_component(config: ComponentConfig) -> WebStorageComponent {
    BrowserStorageComponent::with_config(web_storage_backends(), PostMessageHost::new(), config)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use browser_storage::{Action, BackendKind, CommandDescriptor, PublishOutcome};

    use super::*;

    #[test]
    fn native_component_publishes_stub_results() {
        let mut component = web_storage_component(ComponentConfig::default());
        let get = CommandDescriptor::new(BackendKind::LocalPersistent, Action::Get).with_name("k");

        assert_eq!(
            component.render(&get).expect("render"),
            PublishOutcome::Published("\"null|\"".to_string())
        );
        assert_eq!(
            component.render(&get).expect("render"),
            PublishOutcome::Unchanged
        );
    }
}
