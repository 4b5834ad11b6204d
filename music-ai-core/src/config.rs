use crate::types::ComputeDevice;

/// Used when `MUSIC_AI_API_BASE_URL` is not set at build time.
pub const DEFAULT_BASE_URL: &str = "https://abhinference-music-ai-analysis.hf.space";

/// ML inference can take minutes; the upload request waits this long.
pub const UPLOAD_TIMEOUT_MS: u32 = 300_000;

/// Device requested for every submission.
pub const COMPUTE_DEVICE: ComputeDevice = ComputeDevice::Cpu;

/// Location of the remote analysis service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    base_url: String,
}

impl ServiceConfig {
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_BASE_URL } else { trimmed };
        Self { base_url: base_url.to_string() }
    }

    /// Reads the base URL baked in from the build environment, falling back
    /// to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        Self::new(option_env!("MUSIC_AI_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self, device: ComputeDevice) -> String {
        format!("{}/v1/audio/upload?device={}", self.base_url, device.as_str())
    }

    /// `encoded_id` must already be escaped for use as a path segment.
    pub fn session_url(&self, encoded_id: &str) -> String {
        format!("{}/v1/audio/session/{}", self.base_url, encoded_id)
    }

    pub fn health_url(&self) -> String {
        format!("{}/v1/health", self.base_url)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let cfg = ServiceConfig::new("http://localhost:8000/");
        assert_eq!(cfg.base_url(), "http://localhost:8000");
        assert_eq!(cfg.health_url(), "http://localhost:8000/v1/health");
    }

    #[test]
    fn test_empty_falls_back_to_default() {
        assert_eq!(ServiceConfig::new("  ").base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_upload_url_carries_device() {
        let cfg = ServiceConfig::new("http://api");
        assert_eq!(cfg.upload_url(ComputeDevice::Cpu), "http://api/v1/audio/upload?device=cpu");
        assert_eq!(cfg.upload_url(ComputeDevice::Cuda), "http://api/v1/audio/upload?device=cuda");
    }

    #[test]
    fn test_session_url_keeps_encoded_segment() {
        let cfg = ServiceConfig::new("http://api/");
        assert_eq!(cfg.session_url("abc-123"), "http://api/v1/audio/session/abc-123");
        // Escaping happens once, in the transport; an escaped id is not escaped again.
        assert_eq!(cfg.session_url("a%2Fb%20c"), "http://api/v1/audio/session/a%2Fb%20c");
    }
}
