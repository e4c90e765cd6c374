use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use portal_application::{LiveViewSettings, TerminalSettings};
use portal_core::AppError;
use tracing_subscriber::EnvFilter;

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub terminal: TerminalSettings,
    pub system_log_path: PathBuf,
    pub live_view: LiveViewSettings,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");
        let current_dir = env::current_dir().map_err(|error| {
            AppError::Internal(format!("failed to resolve working directory: {error}"))
        })?;

        Self::from_lookup(|name| env::var(name).ok(), migrate_only, current_dir)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        migrate_only: bool,
        current_dir: PathBuf,
    ) -> Result<Self, AppError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = non_empty("DATABASE_URL")
            .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;
        let frontend_url =
            non_empty("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let api_host = non_empty("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = parse_or("API_PORT", non_empty("API_PORT"), 3000_u16)?;

        let project_root = non_empty("TERMINAL_PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or(current_dir);
        let restart_grace_ms = parse_or(
            "TERMINAL_RESTART_GRACE_MS",
            non_empty("TERMINAL_RESTART_GRACE_MS"),
            1_000_u64,
        )?;
        let terminal = TerminalSettings {
            verify_script: non_empty("TERMINAL_VERIFY_SCRIPT")
                .unwrap_or_else(|| "verify.sh".to_owned()),
            log_script: non_empty("TERMINAL_LOG_SCRIPT").unwrap_or_else(|| "log.sh".to_owned()),
            database_file: non_empty("TERMINAL_DATABASE_FILE").map(PathBuf::from),
            server_port: api_port,
            restart_grace: Duration::from_millis(restart_grace_ms),
            project_root: project_root.clone(),
        };

        let system_log_path = non_empty("SYSTEM_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| project_root.join("backend").join("logs").join("system.log"));

        let keepalive_seconds = parse_or(
            "LIVE_LOGS_KEEPALIVE_SECONDS",
            non_empty("LIVE_LOGS_KEEPALIVE_SECONDS"),
            30_u64,
        )?;
        if keepalive_seconds == 0 {
            return Err(AppError::Validation(
                "LIVE_LOGS_KEEPALIVE_SECONDS must be greater than zero".to_owned(),
            ));
        }
        let live_view = LiveViewSettings {
            keepalive_interval: Duration::from_secs(keepalive_seconds),
            push_audit_entries: non_empty("LIVE_LOGS_PUSH_AUDIT")
                .is_some_and(|value| value.eq_ignore_ascii_case("true")),
            overview_recent_entries: parse_or(
                "OVERVIEW_RECENT_ENTRIES",
                non_empty("OVERVIEW_RECENT_ENTRIES"),
                10_usize,
            )?,
        };

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            api_host,
            api_port,
            terminal,
            system_log_path,
            live_view,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use portal_core::AppError;

    use super::ApiConfig;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ApiConfig::from_lookup(
            |name| values.get(name).cloned(),
            false,
            PathBuf::from("/srv/portal"),
        )
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/portal")]);

        let Ok(config) = config else {
            panic!("config should load");
        };
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.terminal.server_port, 3000);
        assert_eq!(config.terminal.project_root, PathBuf::from("/srv/portal"));
        assert_eq!(config.terminal.verify_script, "verify.sh");
        assert_eq!(config.terminal.database_file, None);
        assert_eq!(config.terminal.restart_grace, Duration::from_millis(1_000));
        assert_eq!(
            config.system_log_path,
            PathBuf::from("/srv/portal/backend/logs/system.log")
        );
        assert_eq!(config.live_view.keepalive_interval, Duration::from_secs(30));
        assert!(!config.live_view.push_audit_entries);
        assert_eq!(config.live_view.overview_recent_entries, 10);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/portal"),
            ("API_PORT", "5000"),
            ("TERMINAL_DATABASE_FILE", "/data/isp.db"),
            ("LIVE_LOGS_PUSH_AUDIT", "TRUE"),
            ("LIVE_LOGS_KEEPALIVE_SECONDS", "5"),
        ]);

        assert!(matches!(
            config,
            Ok(ref config) if config.terminal.server_port == 5000
                && config.terminal.database_file == Some(PathBuf::from("/data/isp.db"))
                && config.live_view.push_audit_entries
                && config.live_view.keepalive_interval == Duration::from_secs(5)
        ));
    }

    #[test]
    fn missing_database_url_fails() {
        assert!(matches!(load(&[]), Err(AppError::Validation(_))));
    }

    #[test]
    fn invalid_numbers_fail_startup() {
        let bad_port = load(&[
            ("DATABASE_URL", "postgres://localhost/portal"),
            ("API_PORT", "http"),
        ]);
        let zero_keepalive = load(&[
            ("DATABASE_URL", "postgres://localhost/portal"),
            ("LIVE_LOGS_KEEPALIVE_SECONDS", "0"),
        ]);

        assert!(matches!(bad_port, Err(AppError::Validation(_))));
        assert!(matches!(zero_keepalive, Err(AppError::Validation(_))));
    }
}
