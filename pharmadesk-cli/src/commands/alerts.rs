use pharmadesk_client::{ApiClient, Transport};
use pharmadesk_data::EntityId;
use serde_json::Value;

use super::{to_json, CommandError};

pub async fn resolve<T: Transport>(
    api: &ApiClient<T>,
    id: EntityId,
) -> Result<Value, CommandError> {
    let alert = api.alerts().resolve(id).await?;
    tracing::info!(alert = alert.id, "alert resolved");
    to_json(&alert)
}
