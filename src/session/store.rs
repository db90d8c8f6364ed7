use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{SessionSnapshot, SessionState, TokenStore, UserProfile};
use crate::events::{Listener, ListenerRegistry, SessionEvent, SignOutReason};
use crate::{BearerToken, ClientError, TokenClaims, UserRole, claims};

/// Owner of the client's authentication state.
///
/// Holds the bearer token (persisted through a [`TokenStore`]), the claims
/// decoded from it and the current user. Every state change dispatches one
/// [`SessionEvent`] to the listeners registered with [`listen`](Self::listen).
///
/// The in-memory state sits behind a lock that is never held across an
/// `.await`, so readers always see a whole session or an empty one.
pub struct SessionStore {
    store: Arc<dyn TokenStore>,
    key: String,
    inner: RwLock<SessionSnapshot>,
    listeners: ListenerRegistry,
}

impl SessionStore {
    /// Creates an empty session backed by `store`, persisting under `key`.
    pub fn new(store: impl TokenStore + 'static, key: impl Into<String>) -> Self {
        Self::with_shared_store(Arc::new(store), key)
    }

    pub fn with_shared_store(store: Arc<dyn TokenStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            inner: RwLock::new(SessionSnapshot::default()),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Register a listener for session changes.
    pub fn listen(&self, listener: impl Listener) -> &Self {
        self.listeners.listen(listener);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().clone()
    }

    pub fn state(&self) -> SessionState {
        self.read().state()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.read().token.clone()
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        self.read().claims.clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.read().user.clone()
    }

    /// Whether privileged affordances should be shown.
    pub fn is_admin(&self) -> bool {
        self.read().is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// `Authorization` header value for the current token, if any.
    pub fn authorization(&self) -> Option<String> {
        self.read().token.as_ref().map(BearerToken::authorization)
    }

    /// Decodes and persists `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// [`ClientError::Decode`] if the token carries no readable claims (nothing
    /// is stored in that case), or a storage error from the backend.
    pub async fn set_token(
        &self,
        token: impl Into<BearerToken>,
    ) -> Result<TokenClaims, ClientError> {
        let token = token.into();
        let claims = claims::decode(token.expose_secret())?;

        self.store.save(&self.key, &token).await?;

        let mut inner = self.write();
        inner.token = Some(token);
        inner.claims = Some(claims.clone());
        drop(inner);

        Ok(claims)
    }

    /// Resets the in-memory session and removes the persisted token.
    ///
    /// Does not notify listeners; use [`clear_auth`](Self::clear_auth) to end
    /// the session.
    pub async fn clear_token(&self) -> Result<(), ClientError> {
        *self.write() = SessionSnapshot::default();
        self.store.remove(&self.key).await
    }

    /// Ends the session: token, claims, user and admin flag are all reset.
    ///
    /// The in-memory session is always emptied and listeners always get one
    /// `SignedOut` event.
    ///
    /// # Errors
    ///
    /// A storage error if the persisted token could not be removed. The token
    /// would come back on the next start, so callers must not report the
    /// sign-out as complete.
    pub async fn clear_auth(&self, reason: SignOutReason) -> Result<(), ClientError> {
        *self.write() = SessionSnapshot::default();

        let removed = self.store.remove(&self.key).await;
        match &removed {
            Ok(()) => log::info!(
                target: "storefront_client",
                "msg=\"session cleared\" reason={}",
                reason.as_str()
            ),
            Err(e) => log::error!(
                target: "storefront_client",
                "msg=\"failed to remove persisted token\" reason={} error=\"{e}\"",
                reason.as_str()
            ),
        }

        self.listeners
            .dispatch(&SessionEvent::SignedOut {
                reason,
                at: Utc::now(),
            })
            .await;

        removed
    }

    /// Clears the session for a reason the caller can't act on, logging a
    /// failed removal instead of returning it.
    pub(crate) async fn force_sign_out(&self, reason: SignOutReason) {
        // already logged by clear_auth
        let _ = self.clear_auth(reason).await;
    }

    /// Loads the persisted token, if any, and decodes it.
    ///
    /// A token that can't be read or decoded, or whose `exp` has passed,
    /// clears the session and yields `None`. A valid one becomes the session
    /// token with a provisional user built from its claims; privileges stay
    /// off until [`restore_user`](Self::restore_user) resolves the role.
    pub async fn load_persisted(&self) -> Option<TokenClaims> {
        let token = match self.store.load(&self.key).await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                log::warn!(
                    target: "storefront_client",
                    "msg=\"unreadable persisted token\" error=\"{e}\""
                );
                self.force_sign_out(SignOutReason::DecodeFailed).await;
                return None;
            }
        };

        let claims = match claims::decode(token.expose_secret()) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!(target: "storefront_client", "msg=\"{e}\"");
                self.force_sign_out(SignOutReason::DecodeFailed).await;
                return None;
            }
        };

        if claims.is_expired() {
            log::info!(target: "storefront_client", "msg=\"token expired\"");
            self.force_sign_out(SignOutReason::Expired).await;
            return None;
        }

        let mut inner = self.write();
        inner.user = Some(UserProfile::from_claims(&claims));
        inner.token = Some(token);
        inner.claims = Some(claims.clone());
        inner.is_admin = false;
        drop(inner);

        Some(claims)
    }

    /// Records the user after login or registration.
    pub async fn set_user(&self, user: UserProfile, is_admin: bool) {
        self.apply_user(user, is_admin, false).await;
    }

    /// Records the user resolved for a restored token.
    pub async fn restore_user(&self, user: UserProfile, is_admin: bool) {
        self.apply_user(user, is_admin, true).await;
    }

    async fn apply_user(&self, user: UserProfile, is_admin: bool, restored: bool) {
        let email = user.email.clone();
        {
            let mut inner = self.write();
            inner.user = Some(user);
            inner.is_admin = is_admin;
        }

        let role = if is_admin {
            UserRole::Admin
        } else {
            UserRole::Client
        };
        let at = Utc::now();
        let event = if restored {
            SessionEvent::Restored { email, role, at }
        } else {
            SessionEvent::SignedIn { email, role, at }
        };
        self.listeners.dispatch(&event).await;
    }
}
