use std::sync::Arc;

use actix_web::web;

use crate::modules::auth::application::ports::outgoing::AuthProvider;
use crate::modules::media::application::ports::outgoing::ImageStore;
use crate::modules::public_site::application::ports::incoming::use_cases::{
    ResolveError, ResolvePublicPortfolioUseCase,
};
use crate::modules::publish::application::ports::incoming::use_cases::{
    PublishError, PublishPortfolioUseCase, RemainingDeploysUseCase,
};
use crate::tests::support::fakes::*;
use crate::AppState;

/// Builds an `AppState` where every slot a test does not care about is a
/// benign stub. Route tests swap in only the collaborator under test.
pub struct TestAppStateBuilder {
    publish: Arc<dyn PublishPortfolioUseCase>,
    remaining: Arc<dyn RemainingDeploysUseCase>,
    resolve: Arc<dyn ResolvePublicPortfolioUseCase>,
    auth: Arc<dyn AuthProvider>,
    image_store: Arc<dyn ImageStore>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            publish: Arc::new(StubPublishPortfolio::err(PublishError::StorageFailure(
                "not wired in this test".to_string(),
            ))),
            remaining: Arc::new(StubRemainingDeploys::fixed(0)),
            resolve: Arc::new(StubResolvePublicPortfolio::err(ResolveError::NotFound)),
            auth: Arc::new(StaticAuthProvider::signed_out()),
            image_store: Arc::new(StubImageStore::failing()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_publish(mut self, uc: impl PublishPortfolioUseCase + 'static) -> Self {
        self.publish = Arc::new(uc);
        self
    }

    pub fn with_remaining(mut self, uc: impl RemainingDeploysUseCase + 'static) -> Self {
        self.remaining = Arc::new(uc);
        self
    }

    pub fn with_resolve(mut self, uc: impl ResolvePublicPortfolioUseCase + 'static) -> Self {
        self.resolve = Arc::new(uc);
        self
    }

    pub fn with_auth(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Arc::new(provider);
        self
    }

    pub fn with_image_store(mut self, store: impl ImageStore + 'static) -> Self {
        self.image_store = Arc::new(store);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            publish_portfolio: self.publish,
            remaining_deploys: self.remaining,
            resolve_public_portfolio: self.resolve,
            auth: self.auth,
            image_store: self.image_store,
        })
    }
}
