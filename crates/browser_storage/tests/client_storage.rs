use browser_storage::{
    BackendKind, ClientError, DirectTransport, ManualClock, MemoryCookieJar, MemoryStore,
    StorageBackend, StorageBackends, StorageClient, StorageLimits,
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

type Transport = DirectTransport<MemoryCookieJar<ManualClock>, MemoryStore, MemoryStore>;

fn client(kind: BackendKind) -> (StorageClient<Transport, ManualClock>, ManualClock) {
    let clock = ManualClock::at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
    let transport = DirectTransport::new(StorageBackends::new(
        MemoryCookieJar::with_clock(clock.clone()),
        MemoryStore::default(),
        MemoryStore::default(),
    ));
    let client = StorageClient::new(transport, kind)
        .with_limits(StorageLimits {
            max_entries_count: 10,
            max_entry_size: 1000,
        })
        .with_clock(clock.clone());
    (client, clock)
}

fn raw_local(client: &StorageClient<Transport, ManualClock>) -> Vec<(String, String)> {
    client
        .transport()
        .backends()
        .local
        .get_all()
        .expect("get_all")
        .into_iter()
        .collect()
}

#[test]
fn set_stores_encoded_values() {
    let (mut client, _) = client(BackendKind::LocalPersistent);

    client.set("greeting", "hello", None).expect("set");
    client.set("pair", &json!(["hello", 1]), None).expect("set");

    assert_eq!(
        raw_local(&client),
        vec![
            ("greeting".to_string(), "\"hello\"|".to_string()),
            ("pair".to_string(), "[\"hello\",1]|".to_string()),
        ]
    );
}

#[test]
fn set_rejects_invalid_input() {
    let (mut client, _) = client(BackendKind::LocalPersistent);

    assert!(matches!(
        client.set("", &json!(["hello", 1]), None),
        Err(ClientError::EmptyName)
    ));
    assert!(matches!(
        client.set("greetings", &Value::Null, None),
        Err(ClientError::EmptyValue)
    ));
    assert!(matches!(
        client.set("greetings", &"a".repeat(992), None),
        Err(ClientError::EntryTooLarge { max: 1000 })
    ));
    assert!(raw_local(&client).is_empty());
}

#[test]
fn set_refuses_new_names_once_full_but_allows_overwrite() {
    let (mut client, _) = client(BackendKind::LocalPersistent);
    for i in 0..10 {
        client
            .set(&format!("name_{i}"), &format!("value_{i}"), None)
            .expect("set");
    }

    let err = client.set("greetings", "what?", None).expect_err("full");
    assert!(matches!(err, ClientError::TooManyEntries { max: 10 }));
    assert_eq!(
        err.to_string(),
        "Allowed maximum number of 10 `names` has been exceeded. Remove some before adding more"
    );

    client.set("name_0", "replaced", None).expect("overwrite");
    assert_eq!(client.get("name_0").expect("get"), Some(json!("replaced")));
}

#[test]
fn get_returns_values_and_none_for_missing() {
    let (mut client, _) = client(BackendKind::SessionScoped);
    client
        .set("greeting", &json!([12, "hello", true]), None)
        .expect("set");
    client.set("hey", "ho", None).expect("set");

    assert_eq!(
        client.get("greeting").expect("get"),
        Some(json!([12, "hello", true]))
    );
    assert_eq!(client.get("hello?").expect("get"), None);
    assert_eq!(
        client.get_as::<Vec<Value>>("greeting").expect("typed"),
        Some(vec![json!(12), json!("hello"), json!(true)])
    );
}

#[test]
fn expired_entries_disappear_from_get_and_get_all() {
    let (mut client, clock) = client(BackendKind::LocalPersistent);
    client
        .set("greeting", &json!([12, "hello", true]), None)
        .expect("set");
    client
        .set("hey1", "ho1", Some(Duration::seconds(8)))
        .expect("set");
    client
        .set("hey2", "ho2", Some(Duration::seconds(1)))
        .expect("set");
    client
        .set("hey3", "ho3", Some(Duration::seconds(1)))
        .expect("set");

    clock.advance(6);

    let all = client.get_all().expect("get_all");
    assert_eq!(
        all.into_iter().collect::<Vec<_>>(),
        vec![
            ("greeting".to_string(), json!([12, "hello", true])),
            ("hey1".to_string(), json!("ho1")),
        ]
    );
    assert_eq!(raw_local(&client).len(), 2);

    clock.advance(3);
    assert_eq!(client.get("hey1").expect("get"), None);
    assert!(!client.exists("hey1").expect("exists"));
    assert!(client.exists("greeting").expect("exists"));
}

#[test]
fn expires_in_reports_remaining_seconds() {
    let (mut client, clock) = client(BackendKind::Cookie);
    client.set("greeting", "hello", None).expect("set");
    client
        .set("hey", "ho", Some(Duration::seconds(10)))
        .expect("set");

    assert_eq!(client.expires_in("hey").expect("expires_in"), Some(10));
    assert_eq!(client.expires_in("greeting").expect("expires_in"), None);
    assert_eq!(client.expires_in("hey?").expect("expires_in"), None);

    clock.advance(11);
    assert_eq!(client.expires_in("hey").expect("expires_in"), None);
}

#[test]
fn delete_removes_only_the_named_entry() {
    let (mut client, _) = client(BackendKind::LocalPersistent);
    client.set("greeting", "hello", None).expect("set");
    client.set("what", "hey", None).expect("set");

    client.delete("what?").expect("delete missing");
    assert_eq!(raw_local(&client).len(), 2);

    client.delete("what").expect("delete");
    assert_eq!(
        raw_local(&client),
        vec![("greeting".to_string(), "\"hello\"|".to_string())]
    );
}

#[test]
fn get_all_on_empty_backend_is_empty() {
    let (mut client, _) = client(BackendKind::Cookie);
    assert!(client.get_all().expect("get_all").is_empty());
}
