use std::path::Path;
use waiter::config::Config;
use clap::Parser;

#[test]
fn test_config_defaults() {
    let cfg = Config::try_parse_from(["waiter"]).unwrap();

    assert_eq!(cfg.directory, Path::new("."));
    if std::env::var("LISTEN").is_err() {
        assert_eq!(cfg.listen_addr, "0.0.0.0:4221");
    }
}

#[test]
fn test_config_directory_flag() {
    let cfg = Config::try_parse_from(["waiter", "--directory", "/tmp/served"]).unwrap();

    assert_eq!(cfg.directory, Path::new("/tmp/served"));
}

#[test]
fn test_config_listen_flag() {
    let cfg = Config::try_parse_from(["waiter", "--listen", "127.0.0.1:8000"]).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8000");
}

#[test]
fn test_config_directory_without_value_is_usage_error() {
    let err = Config::try_parse_from(["waiter", "--directory"]).unwrap_err();

    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::try_parse_from(["waiter", "--directory", "d"]).unwrap();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg1.directory, cfg2.directory);
}
