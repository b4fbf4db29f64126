mod dashboard;
mod goals;
mod log;

pub use dashboard::Dashboard;
pub use goals::Goals;
pub use log::Log;

use dioxus::prelude::*;

/// Subscribe to the shell-provided language code so pages re-render on
/// locale change.
fn use_lang_marker() -> String {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    lang_code
        .as_ref()
        .map(|code| code())
        .unwrap_or_else(|| "en-US".to_string())
}
