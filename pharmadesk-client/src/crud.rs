use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use http::Method;
use pharmadesk_core::{FieldError, FormValues};
use pharmadesk_data::{Entity, EntityId};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{ApiRequest, Transport};

/// List/get/create/update/remove for one entity type.
///
/// `create` and `update` validate the form first; a validation failure
/// returns [`ApiError::Validation`] without contacting the backend. Each
/// call is attempted exactly once.
pub trait CrudApi<E: Entity>: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<E>, ApiError>> + Send;

    fn get(&self, id: EntityId) -> impl Future<Output = Result<E, ApiError>> + Send;

    fn create(&self, form: &FormValues) -> impl Future<Output = Result<E, ApiError>> + Send;

    /// Partial update: only the fields present in `form` are sent.
    fn update(
        &self,
        id: EntityId,
        form: &FormValues,
    ) -> impl Future<Output = Result<E, ApiError>> + Send;

    fn remove(&self, id: EntityId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// [`CrudApi`] over a [`Transport`], addressing `/{resource}` and
/// `/{resource}/{id}`.
pub struct CrudClient<E, T> {
    dispatcher: Dispatcher<T>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, T> Clone for CrudClient<E, T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity, T: Transport> CrudClient<E, T> {
    pub fn new(transport: Arc<T>, session: Session) -> Self {
        Self::from_dispatcher(Dispatcher::new(transport, session))
    }

    pub(crate) fn from_dispatcher(dispatcher: Dispatcher<T>) -> Self {
        Self {
            dispatcher,
            _entity: PhantomData,
        }
    }

    /// A copy whose requests are abandoned with [`ApiError::Cancelled`]
    /// once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self::from_dispatcher(self.dispatcher.with_cancellation(token))
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    fn collection() -> String {
        format!("/{}", E::RESOURCE)
    }

    fn member(id: EntityId) -> String {
        format!("/{}/{id}", E::RESOURCE)
    }
}

pub(crate) fn encode<P: Serialize>(payload: &P) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::encode(e.to_string()))
}

fn rejected<P>(resource: &'static str, result: Result<P, Vec<FieldError>>) -> Result<P, ApiError> {
    result.map_err(|errors| {
        tracing::debug!(resource, errors = errors.len(), "validation failed, request not sent");
        ApiError::Validation(errors)
    })
}

impl<E: Entity, T: Transport> CrudApi<E> for CrudClient<E, T> {
    async fn list(&self) -> Result<Vec<E>, ApiError> {
        self.dispatcher
            .fetch(ApiRequest::get(Self::collection()), E::LABEL_FIELD)
            .await
    }

    async fn get(&self, id: EntityId) -> Result<E, ApiError> {
        self.dispatcher
            .fetch(ApiRequest::get(Self::member(id)), E::LABEL_FIELD)
            .await
    }

    async fn create(&self, form: &FormValues) -> Result<E, ApiError> {
        let payload = rejected(E::RESOURCE, E::validate_create(form))?;
        let request = ApiRequest::post(Self::collection()).json(encode(&payload)?);
        self.dispatcher.fetch(request, E::LABEL_FIELD).await
    }

    async fn update(&self, id: EntityId, form: &FormValues) -> Result<E, ApiError> {
        let payload = rejected(E::RESOURCE, E::validate_update(form))?;
        let request = ApiRequest::new(Method::PATCH, Self::member(id)).json(encode(&payload)?);
        self.dispatcher.fetch(request, E::LABEL_FIELD).await
    }

    async fn remove(&self, id: EntityId) -> Result<(), ApiError> {
        self.dispatcher
            .send(ApiRequest::new(Method::DELETE, Self::member(id)), E::LABEL_FIELD)
            .await
            .map(|_| ())
    }
}
