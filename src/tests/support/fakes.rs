//! Hand-rolled doubles shared across route and service tests. In-memory
//! fakes model the real backend semantics (atomic counters, ownership
//! gates); stubs just pin a use case to a canned answer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::auth::application::domain::{AuthSession, SignedInSession, UserId};
use crate::modules::auth::application::ports::outgoing::{AuthProvider, AuthProviderError};
use crate::modules::media::application::ports::outgoing::{ImageStore, ImageStoreError};
use crate::modules::public_site::application::ports::incoming::use_cases::{
    PublicPortfolioView, ResolveError, ResolvePublicPortfolioUseCase,
};
use crate::modules::publish::application::ports::incoming::use_cases::{
    PublishCommand, PublishError, PublishPortfolioUseCase, PublishReceipt,
    RemainingDeploysUseCase,
};
use crate::modules::publish::application::ports::outgoing::{
    PortfolioRepository, PortfolioRepositoryError, PublishedPortfolio, QuotaStore,
    QuotaStoreError, UpsertPortfolio,
};

// ──────────────────────────────────────────────────────────
// Quota store fakes
// ──────────────────────────────────────────────────────────

/// Mutex-backed counter store. The whole check-and-increment runs under
/// one lock acquisition, mirroring the server-side atomicity of the real
/// backend.
#[derive(Clone, Default)]
pub struct InMemoryQuotaStore {
    counts: Arc<Mutex<HashMap<(UserId, NaiveDate), u32>>>,
    increments: Arc<AtomicU32>,
}

impl InMemoryQuotaStore {
    /// Total successful increments across all users and days.
    pub fn total_increments(&self) -> u32 {
        self.increments.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn get_count(
        &self,
        user: UserId,
        date: NaiveDate,
    ) -> Result<Option<u32>, QuotaStoreError> {
        Ok(self.counts.lock().unwrap().get(&(user, date)).copied())
    }

    async fn try_increment(
        &self,
        user: UserId,
        date: NaiveDate,
        max: u32,
    ) -> Result<bool, QuotaStoreError> {
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry((user, date)).or_insert(0);

        if *count >= max {
            return Ok(false);
        }

        *count += 1;
        self.increments.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// Every call errors; exercises the fail-closed paths.
#[derive(Clone, Default)]
pub struct FailingQuotaStore;

#[async_trait]
impl QuotaStore for FailingQuotaStore {
    async fn get_count(
        &self,
        _user: UserId,
        _date: NaiveDate,
    ) -> Result<Option<u32>, QuotaStoreError> {
        Err(QuotaStoreError::StoreError("quota store is down".into()))
    }

    async fn try_increment(
        &self,
        _user: UserId,
        _date: NaiveDate,
        _max: u32,
    ) -> Result<bool, QuotaStoreError> {
        Err(QuotaStoreError::StoreError("quota store is down".into()))
    }
}

// ──────────────────────────────────────────────────────────
// Portfolio repository fakes
// ──────────────────────────────────────────────────────────

/// Map-backed repository with the same ownership gate as the real
/// conditional upsert.
#[derive(Clone, Default)]
pub struct InMemoryPortfolioRepository {
    records: Arc<Mutex<HashMap<String, PublishedPortfolio>>>,
    upserts: Arc<AtomicU32>,
}

impl InMemoryPortfolioRepository {
    pub fn get(&self, username: &str) -> Option<PublishedPortfolio> {
        self.records.lock().unwrap().get(username).cloned()
    }

    /// Seed a record directly, bypassing the ownership gate.
    pub fn insert_raw(&self, record: PublishedPortfolio) {
        self.records
            .lock()
            .unwrap()
            .insert(record.username.clone(), record);
    }

    /// Number of `upsert` invocations, successful or not.
    pub fn upsert_calls(&self) -> u32 {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn get_by_username(
        &self,
        normalized_username: &str,
    ) -> Result<Option<PublishedPortfolio>, PortfolioRepositoryError> {
        Ok(self.get(normalized_username))
    }

    async fn upsert(
        &self,
        payload: UpsertPortfolio,
    ) -> Result<PublishedPortfolio, PortfolioRepositoryError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.lock().unwrap();

        if let Some(existing) = records.get(&payload.username) {
            if existing.user_id != payload.user_id {
                return Err(PortfolioRepositoryError::OwnedByAnotherUser);
            }
        }

        let record = PublishedPortfolio {
            username: payload.username.clone(),
            user_id: payload.user_id,
            data: payload.data,
            updated_at: Utc::now(),
        };
        records.insert(payload.username, record.clone());

        Ok(record)
    }
}

#[derive(Clone, Default)]
pub struct FailingPortfolioRepository;

#[async_trait]
impl PortfolioRepository for FailingPortfolioRepository {
    async fn get_by_username(
        &self,
        _normalized_username: &str,
    ) -> Result<Option<PublishedPortfolio>, PortfolioRepositoryError> {
        Err(PortfolioRepositoryError::DatabaseError("db is down".into()))
    }

    async fn upsert(
        &self,
        _payload: UpsertPortfolio,
    ) -> Result<PublishedPortfolio, PortfolioRepositoryError> {
        Err(PortfolioRepositoryError::DatabaseError("db is down".into()))
    }
}

/// Never answers; for exercising step timeouts.
#[derive(Clone, Default)]
pub struct HangingPortfolioRepository;

#[async_trait]
impl PortfolioRepository for HangingPortfolioRepository {
    async fn get_by_username(
        &self,
        _normalized_username: &str,
    ) -> Result<Option<PublishedPortfolio>, PortfolioRepositoryError> {
        futures::future::pending().await
    }

    async fn upsert(
        &self,
        _payload: UpsertPortfolio,
    ) -> Result<PublishedPortfolio, PortfolioRepositoryError> {
        futures::future::pending().await
    }
}

// ──────────────────────────────────────────────────────────
// Auth provider fake
// ──────────────────────────────────────────────────────────

/// Auth provider pinned to a fixed state per test.
#[derive(Clone, Default)]
pub struct StaticAuthProvider {
    session: Option<AuthSession>,
    resolves_tokens: bool,
    redeem_token: Option<String>,
    reject_email: bool,
}

impl StaticAuthProvider {
    /// No session resolves, no link redeems.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Rejects every sign-in link request as an invalid address.
    pub fn rejecting_email() -> Self {
        Self {
            reject_email: true,
            ..Self::default()
        }
    }

    /// Any bearer token resolves to this user's session.
    pub fn signed_in(user_id: Uuid, email: &str) -> Self {
        Self {
            session: Some(AuthSession {
                user_id: UserId::from(user_id),
                email: email.to_string(),
            }),
            resolves_tokens: true,
            ..Self::default()
        }
    }

    /// Any link token redeems into a session carrying `session_token`.
    pub fn redeemable(user_id: Uuid, email: &str, session_token: &str) -> Self {
        Self {
            session: Some(AuthSession {
                user_id: UserId::from(user_id),
                email: email.to_string(),
            }),
            resolves_tokens: false,
            redeem_token: Some(session_token.to_string()),
            reject_email: false,
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn session_for_token(
        &self,
        _token: &str,
    ) -> Result<Option<AuthSession>, AuthProviderError> {
        if self.resolves_tokens {
            Ok(self.session.clone())
        } else {
            Ok(None)
        }
    }

    async fn request_sign_in_link(&self, _email: &str) -> Result<(), AuthProviderError> {
        if self.reject_email {
            Err(AuthProviderError::InvalidEmail)
        } else {
            Ok(())
        }
    }

    async fn complete_sign_in(&self, _token: &str) -> Result<SignedInSession, AuthProviderError> {
        match (&self.redeem_token, &self.session) {
            (Some(token), Some(session)) => Ok(SignedInSession {
                token: token.clone(),
                session: session.clone(),
            }),
            _ => Err(AuthProviderError::LinkInvalid),
        }
    }
}

// ──────────────────────────────────────────────────────────
// Use case stubs
// ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StubPublishPortfolio {
    result: Result<PublishReceipt, PublishError>,
    calls: Arc<AtomicU32>,
}

impl StubPublishPortfolio {
    pub fn ok(receipt: PublishReceipt) -> Self {
        Self {
            result: Ok(receipt),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn err(error: PublishError) -> Self {
        Self {
            result: Err(error),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublishPortfolioUseCase for StubPublishPortfolio {
    async fn execute(
        &self,
        _session: Option<AuthSession>,
        _command: PublishCommand,
    ) -> Result<PublishReceipt, PublishError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubRemainingDeploys {
    remaining: u32,
}

impl StubRemainingDeploys {
    pub fn fixed(remaining: u32) -> Self {
        Self { remaining }
    }
}

#[async_trait]
impl RemainingDeploysUseCase for StubRemainingDeploys {
    async fn execute(&self, _user: UserId) -> u32 {
        self.remaining
    }
}

#[derive(Clone)]
pub struct StubResolvePublicPortfolio {
    result: Result<PublicPortfolioView, ResolveError>,
}

impl StubResolvePublicPortfolio {
    pub fn ok(view: PublicPortfolioView) -> Self {
        Self { result: Ok(view) }
    }

    pub fn err(error: ResolveError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl ResolvePublicPortfolioUseCase for StubResolvePublicPortfolio {
    async fn execute(&self, _raw_username: &str) -> Result<PublicPortfolioView, ResolveError> {
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubImageStore {
    result: Result<String, ImageStoreError>,
    calls: Arc<AtomicU32>,
}

impl StubImageStore {
    pub fn ok(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(ImageStoreError::Infrastructure("storage is down".into())),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageStore for StubImageStore {
    async fn upload(
        &self,
        _owner: UserId,
        _path_hint: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, ImageStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
