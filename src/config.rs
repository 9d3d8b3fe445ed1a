//! Build-time configuration with an optional runtime override.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API base URL is baked in from `ADMIN_API_BASE_URL` at compile time and
//! may be replaced at startup by `window.ADMIN_CONFIG.api_base_url`, so a
//! static deployment can point at a different backend without rebuilding.
//! Values here are public; never put secrets in them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Navigation targets used by the route guards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePaths {
    /// Where anonymous users land when a private route rejects them.
    pub login: String,
    /// Where authenticated users land when a public route rejects them.
    pub dashboard: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_owned(),
            dashboard: "/admin/dashboard".to_owned(),
        }
    }
}

/// Frontend configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub routes: RoutePaths,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            routes: RoutePaths::default(),
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::from_build_env(option_env!("ADMIN_API_BASE_URL"));
        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }
        config
    }

    fn from_build_env(api_base_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_base_url.and_then(normalize_value) {
            config.api_base_url = url;
        }
        config
    }
}

#[derive(Debug, Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
}

#[cfg(feature = "csr")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("ADMIN_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let api_base_url = Reflect::get(&config, &JsValue::from_str("api_base_url"))
        .ok()?
        .as_string()
        .and_then(|value| normalize_value(&value));
    Some(RuntimeConfig { api_base_url })
}

#[cfg(not(feature = "csr"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
