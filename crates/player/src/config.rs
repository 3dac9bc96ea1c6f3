use lessongate_core::capability::DEFAULT_DEVICE_ID;

/// Connection settings for [`HttpAuthorizeClient`](crate::HttpAuthorizeClient).
#[derive(Clone)]
pub struct PlaybackConfig {
    /// Base URL of the API server, e.g. `https://api.example.com`.
    pub api_base_url: String,
    /// Identity token sent as `Authorization: Bearer`; `None` plays as guest.
    pub access_token: Option<String>,
    /// Device label bound into capabilities (audit only).
    pub device_id: String,
}

impl PlaybackConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            access_token: None,
            device_id: DEFAULT_DEVICE_ID.to_string(),
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    /// Full URL of the authorization endpoint.
    pub fn authorize_url(&self) -> String {
        format!("{}/api/v1/videos/authorize", self.api_base_url)
    }
}

impl std::fmt::Debug for PlaybackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackConfig")
            .field("api_base_url", &self.api_base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("device_id", &self.device_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = PlaybackConfig::new("http://localhost:3000/");
        assert_eq!(config.authorize_url(), "http://localhost:3000/api/v1/videos/authorize");
    }

    #[test]
    fn defaults_to_guest_on_web_browser() {
        let config = PlaybackConfig::new("http://localhost:3000");
        assert!(config.access_token.is_none());
        assert_eq!(config.device_id, "web-browser");
    }

    #[test]
    fn debug_hides_access_token() {
        let config = PlaybackConfig::new("http://x").with_access_token("very-secret");
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
