//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::ConfigStore;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, store: &ConfigStore) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let settings = store.load()?;
            let json = serde_json::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", json);
        }

        ConfigAction::Set { key, value } => {
            let mut settings = store.load()?;
            settings.set(key, value)?;
            settings.save_to(store.path())?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        run_config(
            &ConfigAction::Set {
                key: "destination_folder".into(),
                value: "/srv/music".into(),
            },
            &store,
        )
        .unwrap();

        assert_eq!(store.load_destination().unwrap(), "/srv/music");
    }

    #[test]
    fn test_set_unknown_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let action = ConfigAction::Set {
            key: "bitrate".into(),
            value: "320".into(),
        };
        assert!(run_config(&action, &store).is_err());
        assert!(!store.path().exists());
    }
}
