//! Access to a facilitator's advertised payment kinds.
//!
//! Solana `exact` requirements name a fee payer that only the facilitator knows. The builder
//! asks for it through [`SupportedKindsSource`], which may be a remote HTTP client, a fixed
//! response, or an async closure wrapped in [`SupportedKindsFn`].

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::proto::SupportedPaymentKindsResponse;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait SupportedKindsSource: Send + Sync {
    async fn supported_kinds(&self) -> Result<SupportedPaymentKindsResponse, BoxError>;
}

/// A fixed list of kinds, e.g. loaded from configuration.
#[async_trait]
impl SupportedKindsSource for SupportedPaymentKindsResponse {
    async fn supported_kinds(&self) -> Result<SupportedPaymentKindsResponse, BoxError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl<T: SupportedKindsSource + ?Sized> SupportedKindsSource for Arc<T> {
    async fn supported_kinds(&self) -> Result<SupportedPaymentKindsResponse, BoxError> {
        self.as_ref().supported_kinds().await
    }
}

/// Adapts an async closure into a [`SupportedKindsSource`].
pub struct SupportedKindsFn<F>(pub F);

#[async_trait]
impl<F, Fut> SupportedKindsSource for SupportedKindsFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<SupportedPaymentKindsResponse, BoxError>> + Send,
{
    async fn supported_kinds(&self) -> Result<SupportedPaymentKindsResponse, BoxError> {
        (self.0)().await
    }
}
