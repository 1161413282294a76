use crate::config::Config;
use anyhow::{Context, Result};

pub fn list(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", toml_str);
    Ok(())
}

/// Look up a dotted key such as `tape.storage_key`.
pub fn lookup(key: &str, config: &Config) -> Result<serde_json::Value> {
    let value = serde_json::to_value(config).context("Failed to serialize config")?;

    let mut current = &value;
    for part in key.split('.') {
        current = current
            .get(part)
            .with_context(|| format!("Key not found: {}", key))?;
    }
    Ok(current.clone())
}

pub fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(key, config)? {
        serde_json::Value::String(s) => println!("{}", s),
        v => println!("{}", v),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nested_key() {
        let config = Config::default();
        assert_eq!(
            lookup("tape.storage_key", &config).unwrap(),
            serde_json::json!("timecalc_tape")
        );
        assert_eq!(
            lookup("tape.enabled", &config).unwrap(),
            serde_json::json!(true)
        );
    }

    #[test]
    fn test_lookup_missing_key() {
        let err = lookup("tape.nope", &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Key not found"));
    }
}
