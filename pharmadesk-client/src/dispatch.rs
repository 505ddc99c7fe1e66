use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::response::classify;
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Shared plumbing of every typed client: credential attachment,
/// cancellation, status classification.
pub(crate) struct Dispatcher<T> {
    transport: Arc<T>,
    session: Session,
    cancel: Option<CancellationToken>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            session: self.session.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<T: Transport> Dispatcher<T> {
    pub(crate) fn new(transport: Arc<T>, session: Session) -> Self {
        Self {
            transport,
            session,
            cancel: None,
        }
    }

    pub(crate) fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    /// Send once. Non-success statuses are classified; a 401 also drops the
    /// session credential.
    pub(crate) async fn send(
        &self,
        mut request: ApiRequest,
        label_field: &str,
    ) -> Result<ApiResponse, ApiError> {
        request.bearer = self.session.token().await;
        let method = request.method.clone();
        let path = request.path.clone();
        tracing::debug!(%method, %path, "dispatching request");

        let pending = self.transport.send(request);
        let response = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(%method, %path, "request cancelled");
                    return Err(ApiError::Cancelled);
                }
                result = pending => result,
            },
            None => pending.await,
        }
        .inspect_err(|e| tracing::warn!(%method, %path, error = %e, "backend unreachable"))?;

        if response.is_success() {
            return Ok(response);
        }

        let error = classify(&response, label_field);
        if response.status == 401 {
            self.session.clear().await;
        }
        tracing::warn!(%method, %path, status = response.status, error = %error, "request failed");
        Err(error)
    }

    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
        label_field: &str,
    ) -> Result<R, ApiError> {
        self.send(request, label_field).await?.decode()
    }
}
