use log_submitter::app::{Cli, Config, ConfigError, LogLevel, ReportMode};
use log_submitter::sender::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS, SubmitterConfig,
    default_user_agent,
};
use serial_test::serial;
use std::io::Write;
use std::{env, time::Duration};
use tempfile::NamedTempFile;

// Helper function to clean all environment variables before and after tests
fn clean_all_env_vars() {
    let env_vars = [
        "LOG_SUBMITTER_ENDPOINT",
        "LOG_SUBMITTER_TIMEOUT_MS",
        "LOG_SUBMITTER_CONNECT_TIMEOUT_MS",
        "LOG_SUBMITTER_USER_AGENT",
        "LOG_SUBMITTER_REPORT",
        "LOG_SUBMITTER_CONFIG",
        "LOG_LEVEL",
    ];

    unsafe {
        for var in &env_vars {
            env::remove_var(var);
        }
    }
}

fn write_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_cli_defaults() {
    clean_all_env_vars();

    let cli = Cli::from_args(["log-submitter", "Backend", "Info", "Handler", "User created"])
        .unwrap();

    assert_eq!(cli.stack, "Backend");
    assert_eq!(cli.level, "Info");
    assert_eq!(cli.package, "Handler");
    assert_eq!(cli.message, "User created");
    assert_eq!(cli.config, Config::default());
    assert_eq!(cli.config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(cli.config.timeout(), Duration::from_secs(30));
}

#[test]
#[serial]
fn test_cli_flags_override_defaults() {
    clean_all_env_vars();

    let cli = Cli::from_args([
        "log-submitter",
        "--endpoint",
        "http://logs.internal:8080/evaluation-service/logs",
        "--timeout-ms",
        "2500",
        "--log-level",
        "debug",
        "--report",
        "tracing",
        "frontend",
        "error",
        "api",
        "Request failed",
    ])
    .unwrap();

    assert_eq!(
        cli.config.endpoint,
        "http://logs.internal:8080/evaluation-service/logs"
    );
    assert_eq!(cli.config.timeout(), Duration::from_millis(2500));
    assert_eq!(cli.config.log_level, LogLevel::Debug);
    assert_eq!(cli.config.report, ReportMode::Tracing);

    let submitter_config = cli.config.to_submitter_config();
    assert_eq!(submitter_config.endpoint, cli.config.endpoint);
    assert_eq!(submitter_config.timeout, Duration::from_millis(2500));
}

#[test]
#[serial]
fn test_env_vars_are_read() {
    clean_all_env_vars();
    unsafe {
        env::set_var("LOG_SUBMITTER_ENDPOINT", "https://collector.example/logs");
        env::set_var("LOG_LEVEL", "warn");
    }

    let cli = Cli::from_args(["log-submitter", "backend", "info", "db", "hello"]).unwrap();

    assert_eq!(cli.config.endpoint, "https://collector.example/logs");
    assert_eq!(cli.config.log_level, LogLevel::Warn);

    clean_all_env_vars();
}

#[test]
#[serial]
fn test_missing_positional_arguments_is_an_args_error() {
    clean_all_env_vars();

    let result = Cli::from_args(["log-submitter", "backend", "info"]);

    assert!(matches!(result, Err(ConfigError::Args(_))));
}

#[test]
#[serial]
fn test_invalid_endpoint_rejected() {
    clean_all_env_vars();

    let result = Cli::from_args([
        "log-submitter",
        "--endpoint",
        "not-a-url",
        "backend",
        "info",
        "db",
        "hello",
    ]);

    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn test_validate_rejects_non_http_scheme_and_zero_timeouts() {
    let config = Config {
        endpoint: "ftp://logs.example/upload".to_string(),
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

    let config = Config {
        timeout_ms: 0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidConfig(_))
    ));

    let config = Config {
        connection_timeout_ms: 0,
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidConfig(_))
    ));
}

#[test]
fn test_from_file_fills_missing_fields_with_defaults() {
    let file = write_config_file(
        r#"
endpoint = "http://10.0.0.5/evaluation-service/logs"
timeout_ms = 1500
log_level = "trace"
"#,
    );

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.endpoint, "http://10.0.0.5/evaluation-service/logs");
    assert_eq!(config.timeout_ms, 1500);
    assert_eq!(config.log_level, LogLevel::Trace);
    assert_eq!(config.connection_timeout_ms, 10_000);
    assert_eq!(config.report, ReportMode::Lines);
}

#[test]
fn test_from_file_rejects_unknown_keys() {
    let file = write_config_file("endpiont = \"http://typo\"\n");

    let result = Config::from_file(file.path());

    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_from_file_missing_file() {
    let result = Config::from_file("/nonexistent/log-submitter.toml");

    assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[test]
#[serial]
fn test_cli_values_win_over_config_file() {
    clean_all_env_vars();

    let file = write_config_file(
        r#"
endpoint = "http://from-file/evaluation-service/logs"
timeout_ms = 1500
report = "tracing"
"#,
    );
    let path = file.path().to_str().unwrap().to_string();

    let cli = Cli::from_args([
        "log-submitter",
        "--config-file",
        path.as_str(),
        "--timeout-ms",
        "750",
        "backend",
        "info",
        "db",
        "hello",
    ])
    .unwrap();

    assert_eq!(
        cli.config.endpoint,
        "http://from-file/evaluation-service/logs"
    );
    assert_eq!(cli.config.timeout_ms, 750);
    assert_eq!(cli.config.report, ReportMode::Tracing);
}

#[test]
#[serial]
fn test_explicit_default_valued_flag_beats_config_file() {
    clean_all_env_vars();

    let file = write_config_file("timeout_ms = 1500\n");
    let path = file.path().to_str().unwrap().to_string();
    let default_timeout = DEFAULT_TIMEOUT_MS.to_string();

    let cli = Cli::from_args([
        "log-submitter",
        "--config-file",
        path.as_str(),
        "--timeout-ms",
        default_timeout.as_str(),
        "backend",
        "info",
        "db",
        "hello",
    ])
    .unwrap();

    assert_eq!(cli.config.timeout_ms, DEFAULT_TIMEOUT_MS);
}

#[test]
#[serial]
fn test_env_var_equal_to_default_beats_config_file() {
    clean_all_env_vars();

    let file = write_config_file("endpoint = \"http://from-file/evaluation-service/logs\"\n");
    let path = file.path().to_str().unwrap().to_string();
    unsafe {
        env::set_var("LOG_SUBMITTER_ENDPOINT", DEFAULT_ENDPOINT);
    }

    let cli = Cli::from_args([
        "log-submitter",
        "--config-file",
        path.as_str(),
        "backend",
        "info",
        "db",
        "hello",
    ])
    .unwrap();

    assert_eq!(cli.config.endpoint, DEFAULT_ENDPOINT);

    clean_all_env_vars();
}

#[test]
fn test_config_defaults_match_submitter_defaults() {
    let config = Config::default();
    let submitter = SubmitterConfig::default();

    assert_eq!(config.endpoint, submitter.endpoint);
    assert_eq!(config.timeout(), submitter.timeout);
    assert_eq!(config.connection_timeout(), submitter.connection_timeout);
    assert_eq!(config.user_agent, submitter.user_agent);
    assert_eq!(
        config.to_submitter_config().user_agent,
        default_user_agent()
    );
}

#[test]
#[serial]
fn test_clap_defaults_match_config_default() {
    clean_all_env_vars();

    let cli = Cli::from_args(["log-submitter", "a", "b", "c", "d"]).unwrap();

    assert_eq!(cli.config.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(cli.config.connection_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
    assert_eq!(cli.config.user_agent, default_user_agent());
}
