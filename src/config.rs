//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded once at startup.
///
/// | Environment variable | Default | Meaning |
/// |----------------------|---------|---------|
/// | WORK_DIR | ./data | Database file and local document storage |
/// | HTTP_PORT | 8080 | HTTP API port |
/// | JWT_SECRET | (required outside development) | Token signing key |
/// | ENVIRONMENT | development | development / staging / production |
/// | FRONTEND_ORIGIN | (permissive CORS) | Allowed browser origin |
/// | S3_BUCKET | (local store) | Invoice document bucket |
/// | DOCUMENT_BASE_URL | S3 virtual-host URL | Public prefix of uploaded documents |
/// | UPLOAD_TIMEOUT_MS | 15000 | Bound on render-upload I/O inside the order transaction |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the SQLite file and the local document store
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT signing secret for staff tokens
    pub jwt_secret: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Allowed CORS origin for the frontend; permissive when unset
    pub frontend_origin: Option<String>,
    /// S3 bucket for invoice documents; falls back to the local store when unset
    pub s3_bucket: Option<String>,
    /// Public URL prefix under which uploaded documents resolve
    pub document_base_url: Option<String>,
    /// Upload timeout in milliseconds (the order transaction stays open
    /// for the duration of the upload)
    pub upload_timeout_ms: u64,
}

impl Config {
    /// Require a secret in staging/production; development falls back to a
    /// clearly-marked dev value so local runs work out of the box.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables.
    ///
    /// Fails fast on a missing JWT secret instead of erroring per-request.
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment: environment.clone(),
            frontend_origin: std::env::var("FRONTEND_ORIGIN").ok().filter(|s| !s.is_empty()),
            s3_bucket: std::env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            document_base_url: std::env::var("DOCUMENT_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            upload_timeout_ms: std::env::var("UPLOAD_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15_000),
        })
    }

    /// SQLite database file path under the working directory
    pub fn db_path(&self) -> String {
        format!("{}/triact.db", self.work_dir)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_secret_falls_back_in_development() {
        let val = Config::require_secret("TRIACT_TEST_UNSET_SECRET", "development").unwrap();
        assert!(val.contains("not-for-production"));
    }

    #[test]
    fn require_secret_fails_fast_in_production() {
        let err = Config::require_secret("TRIACT_TEST_UNSET_SECRET", "production");
        assert!(err.is_err());
    }
}
