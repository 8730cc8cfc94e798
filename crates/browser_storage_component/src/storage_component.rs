use std::{cell::RefCell, rc::Rc};

use browser_storage::{CommandDescriptor, ComponentConfig, PublishOutcome};
use browser_storage_web::{parse_render_message, web_storage_component};
use leptos::*;

/// Invisible component bridging host render messages to browser storage.
///
/// Every render message runs one dispatch/publish cycle; results reach the host only when they
/// differ from the previous publish.
#[component]
pub fn BrowserStorage(#[prop(optional)] config: ComponentConfig) -> impl IntoView {
    let instance = Rc::new(RefCell::new(web_storage_component(config)));
    let command = create_rw_signal(None::<CommandDescriptor>);

    let message_listener = window_event_listener(ev::message, move |event| {
        let data = match serde_wasm_bindgen::from_value::<serde_json::Value>(event.data()) {
            Ok(data) => data,
            Err(_) => return,
        };
        match parse_render_message(data) {
            Some(Ok(next)) => command.set(Some(next)),
            Some(Err(err)) => logging::warn!("browser storage render args rejected: {err}"),
            None => {}
        }
    });
    on_cleanup(move || message_listener.remove());

    if let Err(err) = instance.borrow().publisher().host().announce_ready() {
        logging::warn!("browser storage ready announcement failed: {err}");
    }

    create_effect(move |_| {
        let Some(command) = command.get() else {
            return;
        };
        let outcome = instance.borrow_mut().render(&command);
        match outcome {
            Ok(PublishOutcome::Published(value)) => {
                logging::log!(
                    "browser storage {} {} published {value}",
                    command.backend.selector(),
                    command.action.selector().unwrap_or("?")
                );
            }
            Ok(PublishOutcome::Unchanged | PublishOutcome::Suppressed) => {}
            Err(err) => logging::warn!(
                "browser storage {} {} failed: {err}",
                command.backend.selector(),
                command.action.selector().unwrap_or("?")
            ),
        }
    });

    view! { <div class="browser-storage"></div> }
}
