use pharmadesk_client::{ApiClient, CrudApi, Transport};
use pharmadesk_core::FormValues;
use pharmadesk_data::{Alert, Client, Entity, EntityId, Report, Role, Supplier, User};
use serde_json::{json, Value};

use super::{to_json, CommandError, Resource};

/// One CRUD operation, independent of the resource it targets.
#[derive(Debug, Clone, PartialEq)]
pub enum CrudAction {
    List,
    Get(EntityId),
    Create(FormValues),
    Update(EntityId, FormValues),
    Delete(EntityId),
}

/// Run `action` against the collection named by `resource`.
pub async fn run<T: Transport>(
    api: &ApiClient<T>,
    resource: Resource,
    action: CrudAction,
) -> Result<Value, CommandError> {
    tracing::debug!(?resource, "running crud command");
    match resource {
        Resource::Clients => execute::<Client, _>(&api.clients(), action).await,
        Resource::Suppliers => execute::<Supplier, _>(&api.suppliers(), action).await,
        Resource::Reports => execute::<Report, _>(&api.reports(), action).await,
        Resource::Roles => execute::<Role, _>(&api.roles(), action).await,
        Resource::Users => execute::<User, _>(&api.users(), action).await,
        Resource::Alerts => execute::<Alert, _>(&api.alerts().crud(), action).await,
    }
}

async fn execute<E, C>(client: &C, action: CrudAction) -> Result<Value, CommandError>
where
    E: Entity,
    C: CrudApi<E>,
{
    match action {
        CrudAction::List => to_json(&client.list().await?),
        CrudAction::Get(id) => to_json(&client.get(id).await?),
        CrudAction::Create(form) => to_json(&client.create(&form).await?),
        CrudAction::Update(id, form) => to_json(&client.update(id, &form).await?),
        CrudAction::Delete(id) => {
            client.remove(id).await?;
            Ok(json!({ "deleted": id, "resource": E::RESOURCE }))
        }
    }
}
