//! Server configuration from environment lookups.

use club_tournament::ServerConfig;

#[test]
fn config_reads_overrides_and_defaults() {
    let config = ServerConfig::from_lookup(|key| match key {
        "PORT" => Some("9090".to_string()),
        "SHUFFLE_SEED" => Some("17".to_string()),
        _ => None,
    });
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9090);
    assert_eq!(config.shuffle_seed, Some(17));

    let fallback = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "nope".to_string()));
    assert_eq!(fallback, ServerConfig::default());
}
