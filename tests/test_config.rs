use courier::config::{Config, DEFAULT_PORT, DEFAULT_WORKER_COUNT};

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "0.0.0.0");
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.worker_count, DEFAULT_WORKER_COUNT);
    assert_eq!(cfg.server_agent, "AndroidHTTPServer");
    assert!(!cfg.debug);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_socket_addr() {
    let cfg = Config {
        listen_addr: "127.0.0.1".to_string(),
        port: 9000,
        ..Config::default()
    };

    assert_eq!(cfg.socket_addr(), "127.0.0.1:9000");
}

#[test]
fn test_config_from_yaml_file() {
    let path = std::env::temp_dir().join(format!("courier-config-{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        "port: 9100\nworker_count: 5\nserver_agent: bench-agent\ndebug: true\n",
    )
    .unwrap();

    let cfg = Config::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.worker_count, 5);
    assert_eq!(cfg.server_agent, "bench-agent");
    assert!(cfg.debug);
    // unspecified fields keep their defaults
    assert_eq!(cfg.listen_addr, "0.0.0.0");

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_config_rejects_reserved_port() {
    let cfg = Config {
        port: 80,
        ..Config::default()
    };

    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_allows_ephemeral_port() {
    let cfg = Config {
        port: 0,
        ..Config::default()
    };

    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_rejects_zero_workers() {
    let cfg = Config {
        worker_count: 0,
        ..Config::default()
    };

    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_load_without_env_uses_defaults() {
    unsafe {
        std::env::remove_var("COURIER_CONFIG");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn test_config_rejects_unknown_fields() {
    let path = std::env::temp_dir().join(format!("courier-config-bad-{}.yaml", std::process::id()));
    std::fs::write(&path, "port: 9100\nnot_a_field: 1\n").unwrap();

    assert!(Config::from_file(path.to_str().unwrap()).is_err());

    std::fs::remove_file(&path).ok();
}
