//! Shared UI crate for Bodymetrics: measurement model, chart math,
//! persistence, insights and every view. The `web` and `desktop` crates are
//! thin shells around it.

pub mod core;
pub mod dashboard;
pub mod goals;
pub mod i18n;
pub mod insight;
pub mod log;
pub mod state;
pub mod views;

pub mod components {
    pub mod app_navbar;
    mod notice;

    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
    pub use notice::NoticeBanner;
}
