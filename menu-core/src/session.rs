//! Admin session flags
//!
//! Written by the login flow and read by the admin shell to decide which
//! screens to show. These are client-trusted flags, not a security boundary:
//! every privileged write is still checked by the remote store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::keys;

use crate::storage::{LocalStorage, StorageResult, read_json, write_json};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub is_admin_logged_in: bool,
    pub is_super_admin: bool,
    pub business_slug: Option<String>,
    pub business_id: Option<String>,
    pub business_name: Option<String>,
    pub admin_phone: Option<String>,
}

impl AdminSession {
    /// Session of a business admin after a successful login
    pub fn business_admin(
        business_id: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            is_admin_logged_in: true,
            is_super_admin: false,
            business_slug: Some(slug.into()),
            business_id: Some(business_id.into()),
            business_name: Some(name.into()),
            admin_phone: Some(phone.into()),
        }
    }

    /// Session of the platform owner; not bound to a business
    pub fn super_admin(phone: impl Into<String>) -> Self {
        Self {
            is_admin_logged_in: true,
            is_super_admin: true,
            admin_phone: Some(phone.into()),
            ..Default::default()
        }
    }

    /// Read every flag. Missing or unreadable keys read as unset.
    pub fn load(storage: &dyn LocalStorage) -> Self {
        Self {
            is_admin_logged_in: read_key(storage, keys::IS_ADMIN_LOGGED_IN).unwrap_or(false),
            is_super_admin: read_key(storage, keys::IS_SUPER_ADMIN).unwrap_or(false),
            business_slug: read_key(storage, keys::CURRENT_BUSINESS_SLUG),
            business_id: read_key(storage, keys::CURRENT_BUSINESS_ID),
            business_name: read_key(storage, keys::CURRENT_BUSINESS_NAME),
            admin_phone: read_key(storage, keys::ADMIN_PHONE),
        }
    }

    /// Write every flag; unset fields remove their key
    pub fn save(&self, storage: &dyn LocalStorage) -> StorageResult<()> {
        write_json(storage, keys::IS_ADMIN_LOGGED_IN, &self.is_admin_logged_in)?;
        write_json(storage, keys::IS_SUPER_ADMIN, &self.is_super_admin)?;
        write_optional(storage, keys::CURRENT_BUSINESS_SLUG, &self.business_slug)?;
        write_optional(storage, keys::CURRENT_BUSINESS_ID, &self.business_id)?;
        write_optional(storage, keys::CURRENT_BUSINESS_NAME, &self.business_name)?;
        write_optional(storage, keys::ADMIN_PHONE, &self.admin_phone)?;
        tracing::debug!(super_admin = self.is_super_admin, "Admin session saved");
        Ok(())
    }

    /// Logout: drop every session key
    pub fn clear(storage: &dyn LocalStorage) -> StorageResult<()> {
        for key in keys::SESSION_KEYS {
            storage.remove_item(key)?;
        }
        tracing::debug!("Admin session cleared");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_admin_logged_in
    }

    /// A business admin needs a business bound to the session
    pub fn can_manage_business(&self) -> bool {
        self.is_admin_logged_in && (self.is_super_admin || self.business_id.is_some())
    }
}

fn read_key<T: DeserializeOwned>(storage: &dyn LocalStorage, key: &str) -> Option<T> {
    match read_json(storage, key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Ignoring unreadable session key");
            None
        }
    }
}

fn write_optional(
    storage: &dyn LocalStorage,
    key: &str,
    value: &Option<String>,
) -> StorageResult<()> {
    match value {
        Some(v) => write_json(storage, key, v),
        None => storage.remove_item(key),
    }
}
