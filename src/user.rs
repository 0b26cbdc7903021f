//! Account data model owning a credential record.
//!
//! The user is a plain value type: generated identifier, contact fields, and
//! an opaque [`Credential`] the hashing subsystem produced. Persistence and
//! transport layers serialize it as-is and never look inside the credential.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credential::{Credential, HashingParams, derive, verify};
use crate::error::CredentialError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: String,
    username: String,
    email: String,
    email_verified: bool,
    roles: Vec<String>,
    permissions: Vec<String>,
    applications: Vec<String>,
    created_at: String,
    updated_at: String,
    credentials: Option<Credential>,
}

impl User {
    pub fn new(username: &str, email: &str) -> Self {
        let now = Utc::now().to_rfc3339();

        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            email_verified: false,
            roles: Vec::new(),
            permissions: Vec::new(),
            applications: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
            credentials: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn applications(&self) -> &[String] {
        &self.applications
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    pub fn credentials(&self) -> Option<&Credential> {
        self.credentials.as_ref()
    }

    /// Derive a fresh credential record for `password` and replace the old
    /// one wholesale. The previous record (if any) is discarded, never
    /// patched in place.
    pub fn set_password(
        &mut self,
        password: &str,
        params: HashingParams,
    ) -> Result<(), CredentialError> {
        self.credentials = Some(derive(password, params)?);
        self.touch();
        Ok(())
    }

    /// Check `password` against this user's stored credential.
    ///
    /// A user without a credential never matches.
    pub fn check_password(&self, password: &str) -> Result<bool, CredentialError> {
        match &self.credentials {
            Some(record) => verify(password, record),
            None => Ok(false),
        }
    }

    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.touch();
    }

    pub fn assign_role(&mut self, role_id: &str) {
        self.roles.push(role_id.to_string());
        self.touch();
    }

    pub fn grant_permission(&mut self, permission_id: &str) {
        self.permissions.push(permission_id.to_string());
        self.touch();
    }

    pub fn authorize_application(&mut self, application_id: &str) {
        self.applications.push(application_id.to_string());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_params() -> HashingParams {
        HashingParams::new(32, 16, 1, 8, 1).unwrap()
    }

    #[test]
    fn new_user_has_unique_id_and_no_credential() {
        let a = User::new("alice", "alice@example.com");
        let b = User::new("bob", "bob@example.com");

        assert_ne!(a.id(), b.id());
        assert!(a.credentials().is_none());
        assert!(!a.email_verified());
    }

    #[test]
    fn check_password_without_credential_is_false() {
        let user = User::new("alice", "alice@example.com");
        assert!(!user.check_password("anything").unwrap());
    }

    #[test]
    fn set_and_check_password() {
        let mut user = User::new("alice", "alice@example.com");
        user.set_password("hunter2", fast_params()).unwrap();

        assert!(user.check_password("hunter2").unwrap());
        assert!(!user.check_password("hunter3").unwrap());
    }

    #[test]
    fn password_reset_replaces_record_wholesale() {
        let mut user = User::new("alice", "alice@example.com");

        user.set_password("old-password", fast_params()).unwrap();
        let old = user.credentials().unwrap().clone();

        user.set_password("new-password", fast_params()).unwrap();
        let new = user.credentials().unwrap();

        assert_ne!(old.salt(), new.salt());
        assert_ne!(old.key(), new.key());
        assert!(user.check_password("new-password").unwrap());
        assert!(!user.check_password("old-password").unwrap());
    }

    #[test]
    fn user_serialize_roundtrip_keeps_credential_opaque() {
        let mut user = User::new("alice", "alice@example.com");
        user.set_password("hunter2", fast_params()).unwrap();
        user.assign_role("role-1");

        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id(), user.id());
        assert_eq!(parsed.roles(), user.roles());
        assert!(parsed.check_password("hunter2").unwrap());
    }
}
