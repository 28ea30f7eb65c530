//! # Session and Role Capabilities
//!
//! The signed-in user is held in an explicit [`SessionManager`] that is
//! created once at start-up (restoring whatever the browser stored) and
//! torn down on logout. Route access is decided per route by checking a
//! [`Capability`] against the session's role.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Local-storage key holding the serialized session
pub const SESSION_STORAGE_KEY: &str = "user";

/// Header carrying the caller's role to the server-side guard
pub const ROLE_HEADER: &str = "x-netcompassion-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pd,
    Pcd,
    Teacher,
    Burser,
    Auditor,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Pd, Role::Pcd, Role::Teacher, Role::Burser, Role::Auditor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pd => "pd",
            Role::Pcd => "pcd",
            Role::Teacher => "teacher",
            Role::Burser => "burser",
            Role::Auditor => "auditor",
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        capability.allowed_roles().contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// Something a route needs the caller to be allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ViewDashboard,
    ManageYouth,
    RecordAttendance,
    ViewAttendance,
}

impl Capability {
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Capability::ViewDashboard => &Role::ALL,
            Capability::ManageYouth => &[Role::Pd, Role::Pcd, Role::Teacher],
            Capability::RecordAttendance => &[Role::Pcd],
            Capability::ViewAttendance => &[Role::Pcd],
        }
    }
}

/// Details handed over by the (external) sign-in step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginDetails {
    pub user_id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_logged_in: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn from_login(details: LoginDetails) -> Self {
        Self {
            is_logged_in: true,
            user_id: Some(details.user_id),
            name: Some(details.name),
            role: Some(details.role),
        }
    }

    /// Role that counts for access checks; none unless signed in
    pub fn active_role(&self) -> Option<Role> {
        if self.is_logged_in {
            self.role
        } else {
            None
        }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.active_role()
            .map(|role| role.can(capability))
            .unwrap_or(false)
    }
}

/// Raw key/value persistence for the session (browser local storage in
/// the app, memory in tests)
pub trait SessionStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage holding a single value
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    value: RefCell<Option<(String, String)>>,
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.value
            .borrow()
            .as_ref()
            .filter(|(stored_key, _)| stored_key == key)
            .map(|(_, value)| value.clone())
    }

    fn save(&self, key: &str, value: &str) {
        *self.value.borrow_mut() = Some((key.to_string(), value.to_string()));
    }

    fn remove(&self, key: &str) {
        let mut value = self.value.borrow_mut();
        if value.as_ref().map(|(stored_key, _)| stored_key == key).unwrap_or(false) {
            *value = None;
        }
    }
}

pub struct SessionManager<S: SessionStorage> {
    storage: S,
    session: Session,
}

impl<S: SessionStorage> SessionManager<S> {
    /// Read the stored session, or start logged out when nothing usable is
    /// stored
    pub fn restore(storage: S) -> Self {
        let session = storage
            .load(SESSION_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<Session>(&raw).ok())
            .unwrap_or_default();
        Self { storage, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(&mut self, details: LoginDetails) -> &Session {
        self.session = Session::from_login(details);
        if let Ok(raw) = serde_json::to_string(&self.session) {
            self.storage.save(SESSION_STORAGE_KEY, &raw);
        }
        &self.session
    }

    pub fn logout(&mut self) {
        self.session = Session::logged_out();
        self.storage.remove(SESSION_STORAGE_KEY);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
