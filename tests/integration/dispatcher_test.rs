use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use moncord::core::config::Config;
use moncord::core::dispatcher::Dispatcher;

fn config_with_cron(cron: &str) -> Config {
    let mut env = HashMap::new();
    env.insert(
        "DISCORD_WEBHOOK_URL",
        "https://discord.com/api/webhooks/1/abc".to_string(),
    );
    env.insert("MONITOR_CRON", cron.to_string());
    env.insert("HOST_ROOT_PATH", "/".to_string());
    Config::from_lookup(move |key| env.get(key).cloned()).unwrap()
}

#[test]
fn test_all_invalid_cron_expressions_are_fatal() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let result = Dispatcher::new(config_with_cron("bogus; also bad"), shutdown);

    assert!(result.is_err());
}

#[test]
fn test_partially_valid_cron_list_registers() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let result = Dispatcher::new(config_with_cron("bogus; 0 * * * *"), shutdown);

    assert!(result.is_ok());
}
