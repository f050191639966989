//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RouterConfig, ConfigError> {
    let config: RouterConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ViewId;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.navigation.routes.is_empty());
        assert_eq!(config.navigation.build_router().unwrap().table().len(), 10);
    }

    #[test]
    fn test_parses_routes_and_views() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [navigation]
            app_title = "Ops"

            [[navigation.routes]]
            path = "/"
            name = "Home"
            view = "Dashboard"

            [[navigation.routes]]
            path = "/settings"
            redirect = "/"

            [[navigation.routes]]
            path = "/project/:id"
            view = "ProjectDetail"
            title = "工单详情"

            [[navigation.views]]
            view = "Dashboard"
            component = "views/Home.vue"
            "#,
        )
        .unwrap();

        assert_eq!(config.navigation.app_title, "Ops");
        let router = config.navigation.build_router().unwrap();
        assert_eq!(router.table().len(), 3);

        let nav = router.navigate("/settings");
        let resolved = nav.resolved().unwrap();
        assert_eq!(resolved.view, ViewId::Dashboard);
        assert_eq!(resolved.component, "views/Home.vue");
        assert_eq!(resolved.name.as_deref(), Some("Home"));
    }

    #[test]
    fn test_rejects_unknown_view() {
        let err = parse_config(
            r#"
            [[navigation.routes]]
            path = "/"
            view = "Nope"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = parse_config(
            r#"
            [[navigation.routes]]
            path = "/a"
            name = "Same"
            view = "Reports"

            [[navigation.routes]]
            path = "/b"
            name = "Same"
            view = "Dashboard"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/console-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
