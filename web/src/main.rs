use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{AppNavbar, NoticeBanner};
use ui::core::platform;
use ui::state::{use_insights_provider, use_store_provider};
use ui::views::{Dashboard, Goals, Log};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Dashboard {},
    #[route("/log")]
    Log {},
    #[route("/goals")]
    Goals {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");
const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_dashboard(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" })
}
fn nav_log(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Log {}, "{label}" })
}
fn nav_goals(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Goals {}, "{label}" })
}

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    tracing::info!(
        platform = %platform::platform_string(),
        user_agent = ?platform::user_agent_string(),
        "starting bodymetrics"
    );
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        dashboard: nav_dashboard,
        log: nav_log,
        goals: nav_goals,
    });

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);
    use_store_provider();
    use_insights_provider();

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Style { "{THEME_CSS}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Shared navbar and notice banner around the web `Route` outlet.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        NoticeBanner {}
        Outlet::<Route> {}
    }
}
