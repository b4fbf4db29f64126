//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
        }
    }
}

pub fn platform_string() -> String {
    Platform::current().as_str().to_string()
}

#[cfg(target_arch = "wasm32")]
pub fn user_agent_string() -> Option<String> {
    web_sys::window().and_then(|window| window.navigator().user_agent().ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn user_agent_string() -> Option<String> {
    None
}
