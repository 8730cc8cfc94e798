//! Binary entrypoint for the browser-hosted storage component.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    browser_storage_component::mount();
}

#[cfg(not(all(target_arch = "wasm32", feature = "csr")))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Build `browser_storage_app` for wasm32 with the `csr` feature and serve it inside the host page's component iframe."
    );
}
