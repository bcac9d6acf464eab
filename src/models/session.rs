// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Swarg Store contributors

//! Signed-in session shared by the API client and the app model.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Panel the signed-in user operates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Buyer,
    SubAdmin,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Buyer, Role::SubAdmin, Role::Admin];

    pub fn label(self) -> &'static str {
        match self {
            Self::Buyer => "Buyer",
            Self::SubAdmin => "Sub-admin",
            Self::Admin => "Admin",
        }
    }

    /// Staff roles act on the backend with a bearer token.
    pub fn requires_token(self) -> bool {
        !matches!(self, Self::Buyer)
    }
}

/// Bearer token plus the panel it unlocks.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Cloneable handle to the current session. Set at sign-in, cleared at sign-out.
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl AuthContext {
    pub fn sign_in(&self, token: impl Into<String>, role: Role) -> Result<(), String> {
        let token = token.into().trim().to_string();
        if role.requires_token() && token.is_empty() {
            return Err(format!("{} sign-in needs an access token.", role.label()));
        }
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Session { token, role });
        Ok(())
    }

    pub fn sign_out(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn session(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Non-empty bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.session()
            .map(|s| s.token)
            .filter(|t| !t.is_empty())
    }

    pub fn role(&self) -> Role {
        self.session().map(|s| s.role).unwrap_or_default()
    }
}
