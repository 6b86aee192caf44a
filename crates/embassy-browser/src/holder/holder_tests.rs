use std::time::Duration;

use super::*;
use crate::cdp::CdpError;

#[test]
fn test_config_defaults() {
    let config = BrowserConfig::default();
    assert_eq!(config.debug_port, 9222);
    assert!(config.headless);
    assert_eq!(config.viewport_width, 1920);
    assert_eq!(config.viewport_height, 1080);
    assert_eq!(config.page_load_timeout, Duration::from_secs(30));
    assert!(config.user_agent.contains("Chrome/131"));
}

#[test]
fn test_config_endpoint() {
    let config = BrowserConfig {
        debug_port: 9333,
        ..Default::default()
    };
    assert_eq!(config.endpoint(), "http://localhost:9333");
}

#[test]
fn test_chromium_args_fixed_flag_set() {
    let config = BrowserConfig::default();
    let args = config.chromium_args();

    for expected in [
        "--remote-debugging-port=9222",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--disable-blink-features=AutomationControlled",
        "--ignore-certificate-errors",
        "--allow-insecure-localhost",
        "--window-size=1920,1080",
        "--headless=new",
    ] {
        assert!(
            args.iter().any(|a| a == expected),
            "missing flag {}",
            expected
        );
    }

    assert!(args.iter().any(|a| a.starts_with("--user-agent=Mozilla/5.0")));
}

#[test]
fn test_chromium_args_headed() {
    let config = BrowserConfig {
        headless: false,
        ..Default::default()
    };
    assert!(!config.chromium_args().iter().any(|a| a.starts_with("--headless")));
}

#[test]
fn test_resolved_profile_dir_override() {
    let config = BrowserConfig {
        profile_dir: Some(std::path::PathBuf::from("/tmp/profile")),
        ..Default::default()
    };
    assert_eq!(
        config.resolved_profile_dir(),
        std::path::PathBuf::from("/tmp/profile")
    );
}

#[test]
fn test_cdp_error_mapping() {
    let err: BrowserError = CdpError::ElementNotFound("#missing".to_string()).into();
    assert!(matches!(err, BrowserError::ElementNotFound(_)));

    let err: BrowserError = CdpError::SessionClosed.into();
    assert!(matches!(err, BrowserError::NotStarted));

    let err: BrowserError = CdpError::Timeout("load".to_string()).into();
    assert!(matches!(err, BrowserError::ActionFailed(_)));
}

#[test]
fn test_wait_timeout_display() {
    let err = BrowserError::WaitTimeout {
        what: "css=#submit".to_string(),
        timeout_ms: 5000,
    };
    let msg = err.to_string();
    assert!(msg.contains("css=#submit"));
    assert!(msg.contains("5000ms"));
}

#[tokio::test]
async fn test_holder_starts_empty() {
    let holder = SessionHolder::new(BrowserConfig::default());
    assert!(!holder.is_started().await);
    assert!(matches!(
        holder.current().await,
        Err(BrowserError::NotStarted)
    ));
}

#[tokio::test]
async fn test_dispose_on_empty_holder_is_noop() {
    let holder = SessionHolder::new(BrowserConfig::default());
    holder.dispose().await;
    assert!(!holder.is_started().await);
}

#[tokio::test]
async fn test_ops_lock_serializes() {
    let holder = std::sync::Arc::new(SessionHolder::new(BrowserConfig::default()));

    let guard = holder.lock_ops().await;

    // A second acquisition must block while the guard is held.
    let contender = holder.clone();
    let blocked =
        tokio::time::timeout(Duration::from_millis(50), contender.lock_ops()).await;
    assert!(blocked.is_err());

    drop(guard);
    let acquired =
        tokio::time::timeout(Duration::from_millis(50), holder.lock_ops()).await;
    assert!(acquired.is_ok());
}
