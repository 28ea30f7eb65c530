use gloo::storage::{LocalStorage, Storage};
use shared::SessionStorage;

/// Session persistence in the browser's local storage
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStorage;

impl SessionStorage for BrowserSessionStorage {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            gloo::console::error!("Failed to persist session");
        }
    }

    fn remove(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}
