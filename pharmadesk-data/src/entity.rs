use std::fmt::Debug;

use pharmadesk_core::{FieldError, FormValues, Schema, SchemaKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::form::to_payload;

/// Backend-assigned identity, immutable once created.
pub type EntityId = i64;

/// A business object exchanged with the backend.
///
/// The readable shape is `Self`; `Create` and `Update` are the writable
/// shapes. Server-managed projections (counts, nested snapshots, timestamps)
/// only ever appear on `Self`.
///
/// # Example
///
/// ```ignore
/// impl Entity for Role {
///     type Create = RoleCreate;
///     type Update = RoleUpdate;
///     const RESOURCE: &'static str = "roles";
///     fn id(&self) -> EntityId { self.id }
///     fn schema(kind: SchemaKind) -> &'static Schema { ... }
///     fn writable(&self) -> RoleCreate { ... }
///     fn to_form(&self) -> FormValues { ... }
/// }
/// ```
pub trait Entity: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    type Create: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync + 'static;
    type Update: Serialize
        + DeserializeOwned
        + Clone
        + PartialEq
        + Debug
        + Default
        + Send
        + Sync
        + 'static;

    /// Path segment of the resource collection, e.g. `"clients"`.
    const RESOURCE: &'static str;

    /// Primary label field: carries the `min_length(2)` rule and is blamed
    /// for conflicts the backend does not attribute.
    const LABEL_FIELD: &'static str = "name";

    fn id(&self) -> EntityId;

    fn schema(kind: SchemaKind) -> &'static Schema;

    /// Writable projection of this entity, with blank optionals as `None`.
    fn writable(&self) -> Self::Create;

    /// Form state for an edit form, including display-only fields.
    fn to_form(&self) -> FormValues;

    fn validate_create(form: &FormValues) -> Result<Self::Create, Vec<FieldError>> {
        to_payload(Self::schema(SchemaKind::Create), form)
    }

    fn validate_update(form: &FormValues) -> Result<Self::Update, Vec<FieldError>> {
        to_payload(Self::schema(SchemaKind::Update), form)
    }
}
