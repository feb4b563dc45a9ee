use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv, env_list, env_required};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allowed browser origins.
///
/// `CORS_ALLOWED_ORIGIN` is required and comma separated, e.g.
/// `CORS_ALLOWED_ORIGIN=http://localhost:3000,https://app.example.com`.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        // Fail with MissingEnvVar rather than an empty list
        env_required("CORS_ALLOWED_ORIGIN")?;
        let allowed_origins = env_list("CORS_ALLOWED_ORIGIN");

        if allowed_origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "cannot be empty".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}

/// Build the CORS layer for the configured origins.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Authorization, Accept, Cookie
/// - Credentials allowed, 1 hour max age
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    tracing::info!(
        "CORS configured with allowed origins: {}",
        config.allowed_origins.join(",")
    );

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::COOKIE,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_config_from_env_splits_origins() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("http://localhost:3000, https://app.example.com,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(
                    config.allowed_origins,
                    vec!["http://localhost:3000", "https://app.example.com"]
                );
            },
        );
    }

    #[test]
    fn test_cors_config_from_env_missing() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let err = CorsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
        });
    }

    #[test]
    fn test_cors_config_from_env_blank() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            assert!(CorsConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_create_cors_layer_rejects_invalid_origin() {
        let config = CorsConfig::new(["http://bad\norigin"]);
        assert!(create_cors_layer(&config).is_err());
    }

    #[test]
    fn test_create_cors_layer_accepts_origins() {
        let config = CorsConfig::new(["http://localhost:3000"]);
        assert!(create_cors_layer(&config).is_ok());
    }
}
