#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use expvarprom_exporter::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
exporter:
  listen: "127.0.0.1:9101"
sources:
  app:
    url: "http://localhost:8080/debug/vars"
    metrics:
      app_goroutines:
        expvar: "Goroutines"
        labelname: "x" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "bad_config");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
exporter:
  listen: "127.0.0.1:9101"
sources:
  app:
    url: "http://localhost:8080/debug/vars"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.scrape_timeout_ms, 5000);
    let sources = cfg.source_configs();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].0, "app");
    assert_eq!(sources[0].1.timeout, Duration::from_secs(5));
    assert!(sources[0].1.overrides.is_empty());
}

#[test]
fn missing_listen_is_fatal() {
    let bad = r#"
version: 1
exporter: {}
sources:
  app:
    url: "http://localhost:8080/debug/vars"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("listen"), "{err}");
}

#[test]
fn unsupported_version() {
    let bad = r#"
version: 2
exporter:
  listen: "127.0.0.1:9101"
sources:
  app:
    url: "http://localhost:8080/debug/vars"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "unsupported_version");
}

#[test]
fn overrides_are_keyed_by_expvar() {
    let ok = r#"
version: 1
exporter:
  listen: "0.0.0.0:9101"
  scrape_timeout_ms: 2000
sources:
  app:
    url: "https://app.internal/debug/vars"
    timeout_ms: 750
    m:
      app_goroutines:
        expvar: "Goroutines"
        help: "Live goroutines."
      app_workers:
        expvar: "workers"
        label_name: "worker_id"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let (_, src) = cfg.source_configs().pop().unwrap();
    assert_eq!(src.timeout, Duration::from_millis(750));

    let g = &src.overrides["Goroutines"];
    assert_eq!(g.metric_name.as_deref(), Some("app_goroutines"));
    assert_eq!(g.help.as_deref(), Some("Live goroutines."));
    assert_eq!(g.label_name, None);

    let w = &src.overrides["workers"];
    assert_eq!(w.metric_name.as_deref(), Some("app_workers"));
    assert_eq!(w.help, None);
    assert_eq!(w.label_name.as_deref(), Some("worker_id"));
}

#[test]
fn rejects_invalid_names_and_duplicates() {
    let cases = [
        ("bad-name", "expvar: \"a\""),
        ("ok_name", "expvar: \"a\"\n        label_name: \"__reserved\""),
    ];
    for (name, body) in cases {
        let bad = format!(
            r#"
version: 1
exporter:
  listen: "0.0.0.0:9101"
sources:
  app:
    url: "http://localhost/debug/vars"
    metrics:
      {name}:
        {body}
"#
        );
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert_eq!(err.kind().as_str(), "bad_config", "{name}: {err}");
    }

    let dup = r#"
version: 1
exporter:
  listen: "0.0.0.0:9101"
sources:
  app:
    url: "http://localhost/debug/vars"
    metrics:
      first:
        expvar: "a"
      second:
        expvar: "a"
"#;
    let err = config::load_from_str(dup).expect_err("must fail");
    assert!(err.to_string().contains("already mapped"), "{err}");
}

#[test]
fn rejects_bad_url_timeout_and_empty_sources() {
    let bad_url = r#"
version: 1
exporter:
  listen: "0.0.0.0:9101"
sources:
  app:
    url: "localhost:8080/debug/vars"
"#;
    assert!(config::load_from_str(bad_url).is_err());

    let bad_timeout = r#"
version: 1
exporter:
  listen: "0.0.0.0:9101"
  scrape_timeout_ms: 5
sources:
  app:
    url: "http://localhost:8080/debug/vars"
"#;
    assert!(config::load_from_str(bad_timeout).is_err());

    let no_sources = r#"
version: 1
exporter:
  listen: "0.0.0.0:9101"
"#;
    assert!(config::load_from_str(no_sources).is_err());
}
