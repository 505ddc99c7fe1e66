use pharmadesk_client::{ApiClient, CrudApi, Transport};
use pharmadesk_data::EntityId;
use serde_json::{json, Value};

use super::CommandError;

/// Fetch a client and list the fiscal fields still blocking invoicing.
pub async fn run<T: Transport>(
    api: &ApiClient<T>,
    id: EntityId,
) -> Result<Value, CommandError> {
    let client = api.clients().get(id).await?;
    let missing = client.invoicing_readiness().err().unwrap_or_default();
    Ok(json!({
        "client": client.id,
        "name": client.name,
        "ready": missing.is_empty(),
        "missing": missing,
    }))
}
