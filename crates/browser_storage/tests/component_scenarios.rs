use browser_storage::{
    BrowserStorageComponent, CommandDescriptor, HostEvent, MemoryCookieJar, MemoryStore,
    PublishOutcome, RecordingHost, StorageBackend, StorageBackends, NULL_SENTINEL,
};
use pretty_assertions::assert_eq;
use serde_json::json;

type MemoryComponent =
    BrowserStorageComponent<MemoryCookieJar, MemoryStore, MemoryStore, RecordingHost>;

fn component() -> (MemoryComponent, RecordingHost) {
    let host = RecordingHost::default();
    let component = BrowserStorageComponent::new(
        StorageBackends::new(
            MemoryCookieJar::default(),
            MemoryStore::default(),
            MemoryStore::default(),
        ),
        host.clone(),
    );
    (component, host)
}

fn command(args: serde_json::Value) -> CommandDescriptor {
    serde_json::from_value(args).expect("host args")
}

#[test]
fn local_set_then_get_publishes_each_distinct_result() {
    let (mut component, host) = component();

    let set = command(json!({
        "type": "LocalStorage",
        "action": "SET",
        "name": "theme",
        "value": "dark",
        "expires_at": "2030-01-01"
    }));
    assert_eq!(
        component.render(&set).expect("set"),
        PublishOutcome::Published("true".to_string())
    );
    assert_eq!(
        component
            .dispatcher()
            .backends()
            .local
            .get("theme")
            .expect("stored"),
        "dark"
    );

    let get = command(json!({ "type": "LocalStorage", "action": "GET", "name": "theme" }));
    assert_eq!(
        component.render(&get).expect("get"),
        PublishOutcome::Published("\"dark\"".to_string())
    );

    assert_eq!(
        host.events(),
        vec![
            HostEvent::Value("true".to_string()),
            HostEvent::Ready,
            HostEvent::FrameHeight(None),
            HostEvent::Value("\"dark\"".to_string()),
            HostEvent::Ready,
            HostEvent::FrameHeight(None),
        ]
    );
}

#[test]
fn session_get_for_missing_key_publishes_sentinel() {
    let (mut component, host) = component();

    let get = command(json!({ "type": "SessionStorage", "action": "GET", "name": "missing" }));
    component.render(&get).expect("get");

    assert_eq!(
        host.published_values(),
        vec![serde_json::to_string(NULL_SENTINEL).expect("sentinel json")]
    );
}

#[test]
fn default_backend_delete_removes_cookie_and_publishes_true() {
    let (mut component, host) = component();
    let cookies = &component.dispatcher().backends().cookie;
    cookies
        .set("session_id", "abc", None)
        .expect("seed cookie");

    let delete = command(json!({ "type": "CookieStorage", "action": "DELETE", "name": "session_id" }));
    component.render(&delete).expect("delete");

    assert_eq!(
        component
            .dispatcher()
            .backends()
            .cookie
            .get("session_id")
            .expect("get"),
        NULL_SENTINEL
    );
    assert_eq!(host.published_values(), vec!["true".to_string()]);
}

#[test]
fn repeated_get_of_unchanged_key_notifies_once() {
    let (mut component, host) = component();
    let set = command(json!({ "type": "LocalStorage", "action": "SET", "name": "k", "value": "v" }));
    let get = command(json!({ "type": "LocalStorage", "action": "GET", "name": "k" }));

    component.render(&set).expect("set");
    component.render(&get).expect("first get");
    assert_eq!(
        component.render(&get).expect("second get"),
        PublishOutcome::Unchanged
    );

    assert_eq!(
        host.published_values(),
        vec!["true".to_string(), "\"v\"".to_string()]
    );
}

#[test]
fn unknown_action_never_publishes() {
    let (mut component, host) = component();
    let bogus = command(json!({ "type": "LocalStorage", "action": "PURGE", "name": "k" }));

    assert_eq!(
        component.render(&bogus).expect("render"),
        PublishOutcome::Suppressed
    );
    assert!(host.published_values().is_empty());
}

#[test]
fn get_all_reflects_current_keys_per_backend() {
    let (mut component, host) = component();
    for (name, value) in [("a", "1"), ("b", "2"), ("a", "3")] {
        let set = command(json!({
            "type": "SessionStorage",
            "action": "SET",
            "name": name,
            "value": value
        }));
        component.render(&set).expect("set");
    }
    let delete = command(json!({ "type": "SessionStorage", "action": "DELETE", "name": "b" }));
    component.render(&delete).expect("delete");

    let get_all = command(json!({ "type": "SessionStorage", "action": "GET_ALL" }));
    component.render(&get_all).expect("get_all");

    let local_all = command(json!({ "type": "LocalStorage", "action": "GET_ALL" }));
    component.render(&local_all).expect("get_all");

    assert_eq!(
        host.published_values(),
        vec![
            "true".to_string(),
            "{\"a\":\"3\"}".to_string(),
            "{}".to_string(),
        ]
    );
}

#[test]
fn new_component_instance_starts_with_empty_dedup_slot() {
    let (mut first, first_host) = component();
    let get = command(json!({ "type": "SessionStorage", "action": "GET", "name": "x" }));
    first.render(&get).expect("get");
    drop(first);

    let (mut second, second_host) = component();
    second.render(&get).expect("get");

    assert_eq!(first_host.published_values(), second_host.published_values());
    assert_eq!(second_host.published_values().len(), 1);
}
