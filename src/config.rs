use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://flyers-ng.flippback.com/api/flipp/data";
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_POSTAL_CODE: &str = "M5V2T6";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_SID: &str = "5672125193598641";

/// Where the catalog and the backend live, and the fixed location sent to both.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub catalog_url: String,
    pub api_base: String,
    pub postal_code: String,
    pub locale: String,
    pub sid: String,
    /// `None` means requests wait for as long as the server takes.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            postal_code: DEFAULT_POSTAL_CODE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            sid: DEFAULT_SID.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var("FLYERPLAN_CATALOG_URL") {
            cfg.catalog_url = url;
        }
        if let Ok(base) = std::env::var("FLYERPLAN_API_BASE") {
            cfg.api_base = base;
        }
        if let Ok(pc) = std::env::var("FLYERPLAN_POSTAL_CODE") {
            cfg.postal_code = pc;
        }
        if let Ok(locale) = std::env::var("FLYERPLAN_LOCALE") {
            cfg.locale = locale;
        }
        if let Ok(sid) = std::env::var("FLYERPLAN_SID") {
            cfg.sid = sid;
        }
        if let Ok(timeout) = std::env::var("FLYERPLAN_TIMEOUT_SECS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                cfg.timeout = (parsed > 0).then(|| Duration::from_secs(parsed));
            }
        }
        cfg
    }

    /// Apply CLI flags on top of the env-derived values.
    pub fn with_overrides(
        mut self,
        api_base: Option<String>,
        catalog_url: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        if let Some(base) = api_base { self.api_base = base; }
        if let Some(url) = catalog_url { self.catalog_url = url; }
        if let Some(pc) = postal_code { self.postal_code = pc; }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_fields() {
        let cfg = ClientConfig::default().with_overrides(
            Some("http://backend:9000".into()),
            None,
            Some("V6B1A1".into()),
        );
        assert_eq!(cfg.api_base, "http://backend:9000");
        assert_eq!(cfg.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(cfg.postal_code, "V6B1A1");
        assert_eq!(cfg.timeout, None);
    }
}
