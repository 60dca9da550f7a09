use crate::error::PensumError;
use crate::models::{AppSettings, Profile};

use super::kv::{DurableStore, PROFILE_KEY, SETTINGS_KEY};

pub fn load_settings<S: DurableStore>(store: &S) -> Result<AppSettings, PensumError> {
    match store.get(SETTINGS_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| PensumError::storage(format!("Corrupt settings record: {e}"))),
        None => Ok(AppSettings::default()),
    }
}

pub fn save_settings<S: DurableStore>(store: &S, settings: &AppSettings) -> Result<(), PensumError> {
    let raw = serde_json::to_string(settings).map_err(|e| PensumError::storage(e.to_string()))?;
    store.set(SETTINGS_KEY, &raw)
}

pub fn load_profile<S: DurableStore>(store: &S) -> Result<Option<Profile>, PensumError> {
    match store.get(PROFILE_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PensumError::storage(format!("Corrupt profile record: {e}"))),
        None => Ok(None),
    }
}

pub fn save_profile<S: DurableStore>(store: &S, profile: &Profile) -> Result<(), PensumError> {
    let raw = serde_json::to_string(profile).map_err(|e| PensumError::storage(e.to_string()))?;
    store.set(PROFILE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::SqliteStore;
    use crate::store::migrations;
    use rusqlite::Connection;

    #[test]
    fn settings_default_until_saved() {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        let store = SqliteStore::new(&conn);

        let settings = load_settings(&store).unwrap();
        assert!(settings.notifications_enabled);

        let off = AppSettings {
            notifications_enabled: false,
        };
        save_settings(&store, &off).unwrap();
        assert_eq!(load_settings(&store).unwrap(), off);
    }

    #[test]
    fn profile_round_trips() {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        let store = SqliteStore::new(&conn);

        assert!(load_profile(&store).unwrap().is_none());
        let profile = Profile {
            username: "maya".to_string(),
            age: Some(23),
            bio: None,
        };
        save_profile(&store, &profile).unwrap();
        assert_eq!(load_profile(&store).unwrap(), Some(profile));
    }
}
