// ABOUTME: User profile store and the onboarding-completion flag it resets alongside.
// ABOUTME: Profile updates are validated typed patches merged into the current profile.

use std::sync::Arc;

use novus_core::{ProfilePatch, UserProfile, ValidationError};

use crate::backend::KvBackend;
use crate::persisted::{PersistHandle, PersistedStore};

/// Whether the user has finished onboarding.
#[derive(Clone)]
pub struct OnboardingStore {
    store: PersistedStore<bool>,
}

impl OnboardingStore {
    pub const KEY: &'static str = "onboardingCompleted";

    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            store: PersistedStore::open(Self::KEY, backend),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.store.read()
    }

    pub fn complete(&self) -> PersistHandle {
        self.store.mutate(|done| *done = true)
    }

    pub fn store(&self) -> &PersistedStore<bool> {
        &self.store
    }
}

/// The user's profile and the onboarding flag it owns. Resetting the
/// profile also clears the flag.
#[derive(Clone)]
pub struct UserStore {
    profile: PersistedStore<UserProfile>,
    onboarding: OnboardingStore,
}

impl UserStore {
    pub const KEY: &'static str = "userProfile";

    /// Open the profile, then the onboarding flag, over the same backend.
    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        let profile = PersistedStore::open(Self::KEY, Arc::clone(&backend));
        let onboarding = OnboardingStore::open(backend);
        Self {
            profile,
            onboarding,
        }
    }

    pub fn onboarding(&self) -> &OnboardingStore {
        &self.onboarding
    }

    pub fn user(&self) -> UserProfile {
        self.profile.read()
    }

    /// Validate the patch, then merge it into the current profile. A rejected
    /// patch changes nothing.
    pub fn update_user(&self, patch: ProfilePatch) -> Result<PersistHandle, ValidationError> {
        if let Err(e) = patch.validate() {
            tracing::debug!("rejected profile update: {}", e);
            return Err(e);
        }
        Ok(self.profile.mutate(|profile| patch.apply(profile)))
    }

    /// Select the focus area the daily briefing should use.
    pub fn set_daily_focus(&self, focus_id: &str) -> PersistHandle {
        let focus_id = focus_id.to_string();
        self.profile
            .mutate(|profile| profile.daily_focus_id = Some(focus_id))
    }

    /// Forget the profile and the onboarding flag. The returned handle covers
    /// both removals.
    pub fn reset_user(&self) -> PersistHandle {
        tracing::info!("resetting user profile and onboarding state");
        self.profile.reset().join(self.onboarding.store().reset())
    }

    pub fn store(&self) -> &PersistedStore<UserProfile> {
        &self.profile
    }
}
