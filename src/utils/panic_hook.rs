use leptos::logging::log;
use std::panic;

/// Sets up a panic hook that adds context for Leptos owner disposal panics,
/// which otherwise surface as an opaque `OwnerDisposed` in the console.
pub fn set_custom_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        original_hook(panic_info);

        let message = if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        if message.contains("OwnerDisposed") {
            log!("[PANIC] Leptos owner disposal detected. This usually happens when:");
            log!("[PANIC] 1. A component has been unmounted but JavaScript is still calling into Rust");
            log!("[PANIC] 2. An effect or signal update is running after the component is gone");
            log!("[PANIC] 3. A closure or callback is being called after cleanup");
        }
    }));
}

/// Call once during hydration, before mounting the app.
pub fn init() {
    set_custom_panic_hook();
}
