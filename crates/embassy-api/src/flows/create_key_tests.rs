use super::*;

fn sample_key() -> String {
    format!("sk-ant-api03-{}", "a".repeat(95))
}

#[test]
fn test_extract_key_from_page_text() {
    let text = format!("Your new key:\n{}\nKeep it secret.", sample_key());
    assert_eq!(extract_key_from_text(&text), Some(sample_key()));
}

#[test]
fn test_extract_key_ignores_short_matches() {
    // Too short to be a real key.
    assert_eq!(extract_key_from_text("sk-ant-api03-abc123"), None);
}

#[test]
fn test_extract_key_none_on_plain_text() {
    assert_eq!(extract_key_from_text("no keys here"), None);
}

#[test]
fn test_extract_key_stops_at_invalid_chars() {
    let text = format!("\"{}\"", sample_key());
    let found = extract_key_from_text(&text).unwrap();
    assert!(!found.contains('"'));
}

#[test]
fn test_truncate_chars_respects_char_boundaries() {
    let s = "héllo wörld";
    let truncated = truncate_chars(s, 4);
    assert_eq!(truncated, "héll");
}

#[test]
fn test_truncate_chars_shorter_than_max() {
    assert_eq!(truncate_chars("abc", 500), "abc");
}

#[test]
fn test_is_on_host() {
    assert!(is_on_host(
        "https://console.anthropic.com/settings/keys",
        "console.anthropic.com"
    ));
    assert!(!is_on_host("https://example.com/", "console.anthropic.com"));
    assert!(!is_on_host("about:blank", "console.anthropic.com"));
    assert!(!is_on_host("", "console.anthropic.com"));
}

#[test]
fn test_default_key_name_prefix() {
    let name = default_key_name();
    assert!(name.starts_with("Auto-generated Key "));
    // timestamp suffix: YYYYMMDD_HHMMSS
    let suffix = name.trim_start_matches("Auto-generated Key ");
    assert_eq!(suffix.len(), 15);
}

#[test]
fn test_create_button_candidates_order() {
    let candidates = create_button_candidates();
    // CSS attribute selectors first, text-matching XPath last.
    assert!(candidates[0].as_css().is_some());
    assert!(candidates.last().unwrap().as_css().is_none());
    assert!(candidates[0].target.contains("aria-label"));
}

#[test]
fn test_confirm_candidates_are_distinct_from_create() {
    let create = create_button_candidates();
    let confirm = confirm_button_candidates();
    assert!(confirm.iter().any(|c| c.target.contains("submit")));
    assert_ne!(create, confirm);
}

#[test]
fn test_fallback_scripts_are_expressions() {
    // Runtime.evaluate needs expressions, not function bodies.
    for script in [
        FIND_AND_CLICK_CREATE_SCRIPT,
        CONFIRM_FALLBACK_SCRIPT,
        KEY_SCAN_SCRIPT,
    ] {
        assert!(script.trim_start().starts_with("(() => {"));
        assert!(script.trim_end().ends_with("})()"));
    }
}
