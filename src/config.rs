use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Settings for the Gemini-backed tutor.
///
/// The API key itself is not stored here: it is looked up in the process
/// environment on every relay call, under the variable named by `api_key_var`.
#[derive(Debug, Clone, Deserialize)]
pub struct TutorConfig {
    pub api_key_var: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl TutorConfig {
    /// Current API key, if set and non-blank.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_var)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            api_key_var: "GEMINI_API_KEY".into(),
            model: "gemini-pro".into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub tutor: TutorConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "masomohub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "masomohub-students".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let defaults = TutorConfig::default();
        let tutor = TutorConfig {
            api_key_var: std::env::var("GEMINI_API_KEY_VAR").unwrap_or(defaults.api_key_var),
            model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
        };
        Ok(Self {
            database_url,
            jwt,
            tutor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_missing_or_blank_is_none() {
        let cfg = TutorConfig {
            api_key_var: "MASOMOHUB_TEST_KEY_NEVER_SET".into(),
            ..TutorConfig::default()
        };
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn default_tutor_config_points_at_gemini() {
        let cfg = TutorConfig::default();
        assert_eq!(cfg.api_key_var, "GEMINI_API_KEY");
        assert_eq!(cfg.model, "gemini-pro");
        assert!(cfg.base_url.contains("generativelanguage"));
    }
}
