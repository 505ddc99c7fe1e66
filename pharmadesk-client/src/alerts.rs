use pharmadesk_data::{Alert, EntityId};
use serde::Deserialize;

use crate::crud::CrudClient;
use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// Alert workflow endpoints beyond plain CRUD.
pub struct AlertsClient<T> {
    dispatcher: Dispatcher<T>,
}

#[derive(Deserialize)]
struct CheckOutcome {
    #[serde(default)]
    message: String,
}

impl<T: Transport> AlertsClient<T> {
    pub(crate) fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    pub fn crud(&self) -> CrudClient<Alert, T> {
        CrudClient::from_dispatcher(self.dispatcher.clone())
    }

    /// Alerts that have not been resolved yet.
    pub async fn active(&self) -> Result<Vec<Alert>, ApiError> {
        let request = ApiRequest::get("/alerts").query("active_only", true);
        self.dispatcher.fetch(request, "message").await
    }

    pub async fn resolve(&self, id: EntityId) -> Result<Alert, ApiError> {
        let request = ApiRequest::post(format!("/alerts/{id}/resolve"));
        self.dispatcher.fetch(request, "message").await
    }

    /// Ask the backend to rescan inventory and raise new alerts. Returns the
    /// backend's summary message.
    pub async fn check(&self) -> Result<String, ApiError> {
        let outcome: CheckOutcome = self
            .dispatcher
            .fetch(ApiRequest::post("/alerts/check"), "message")
            .await?;
        Ok(outcome.message)
    }
}
