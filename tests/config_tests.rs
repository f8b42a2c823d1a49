// Tests for configuration loading

use speech_session::Config;
use std::fs;

#[test]
fn test_defaults_without_config_file() {
    let cfg = Config::load("does-not-exist/speech-session").unwrap();

    assert_eq!(cfg.service.name, "speech-session");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 8090);
    assert_eq!(cfg.recognizer.engine, "nats");
    assert_eq!(cfg.recognizer.locale, "ja-JP");
    assert_eq!(cfg.recognizer.silence_limit_ms, 20_000);
    assert_eq!(cfg.playback.sink, "wav-file");
}

#[test]
fn test_file_overrides_merge_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("speech-session.toml");
    fs::write(
        &path,
        r#"
[service.http]
port = 9100

[recognizer]
locale = "en-US"
silence_limit_ms = 5000
"#,
    )
    .unwrap();

    let stem = dir.path().join("speech-session");
    let cfg = Config::load(stem.to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.http.port, 9100);
    assert_eq!(cfg.recognizer.locale, "en-US");
    assert_eq!(cfg.recognizer.silence_limit_ms, 5000);

    // Untouched sections keep their defaults
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.recognizer.engine, "nats");
    assert_eq!(cfg.playback.sink, "wav-file");
}
