//! Small browser utilities shared by the pages.
//!
//! - **User feedback**: toast notifications and the native `alert`, `confirm`
//!   and `prompt` dialogs used by the batch actions.
//! - **Formatting**: thousands separators for the counters on the dashboard.
//! - **Theme**: reading and applying the light/dark preference.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::THEME_STORAGE_KEY;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Shows `message` at the bottom of the screen for three seconds.
pub fn show_toast(message: &str, kind: ToastKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    let class = match kind {
        ToastKind::Info => "toast",
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    };
    toast.set_class_name(class);
    let toast: HtmlElement = toast.unchecked_into();

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            toast.remove();
        });
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// `false` when the user cancels or no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Native prompt pre-filled with `default`; `None` when cancelled or left blank.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()
        .and_then(|w| w.prompt_with_message_and_default(message, default).ok())
        .flatten()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `12345` -> `"12.345"`.
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::pt)
}

/// Stored theme, falling back to the system preference.
pub fn initial_dark_mode() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let saved = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    match saved.as_deref() {
        Some("dark") => true,
        Some(_) => false,
        None => window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false),
    }
}

/// Toggles the `dark` class on `<html>` and remembers the choice.
pub fn apply_theme(dark: bool) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let classes = root.class_list();
        let _ = if dark {
            classes.add_1("dark")
        } else {
            classes.remove_1("dark")
        };
    }
    if let Some(storage) = window.local_storage().ok().flatten() {
        let _ = storage.set_item(THEME_STORAGE_KEY, if dark { "dark" } else { "light" });
    }
}
