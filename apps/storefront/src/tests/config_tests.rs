use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(None, no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.page_size, 5);
    assert_eq!(settings.api_base_url, "http://localhost:8080/api");
}

#[test]
fn file_values_accept_strings_and_integers() {
    let raw = r#"
api_base_url = "https://shop.example.com/api"
page_size = 10
request_timeout_secs = "5"
"#;
    let settings = load_settings_from(Some(raw), no_env);
    assert_eq!(settings.api_base_url, "https://shop.example.com/api");
    assert_eq!(settings.page_size, 10);
    assert_eq!(settings.request_timeout_secs, 5);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let raw = r#"api_base_url = "https://file.example.com/api""#;
    let settings = load_settings_from(Some(raw), |key| match key {
        "STOREFRONT_API_URL" => Some("https://legacy.example.com/api".into()),
        "APP__API_BASE_URL" => Some("https://env.example.com/api".into()),
        "APP__PAGE_SIZE" => Some("20".into()),
        _ => None,
    });
    assert_eq!(settings.api_base_url, "https://env.example.com/api");
    assert_eq!(settings.page_size, 20);
}

#[test]
fn invalid_numbers_are_ignored() {
    let settings = load_settings_from(Some("page_size = 0"), |key| match key {
        "APP__REQUEST_TIMEOUT_SECS" => Some("soon".into()),
        _ => None,
    });
    assert_eq!(settings.page_size, 5);
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let settings = load_settings_from(Some("this is = = not toml"), no_env);
    assert_eq!(settings, Settings::default());
}
