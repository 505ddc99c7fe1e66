use std::fmt;
use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema, SchemaKind};
use pharmadesk_core::FormValues;
use serde::{Deserialize, Serialize};

use super::RoleRef;
use crate::entity::{Entity, EntityId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub role: RoleRef,
}

/// Writable user. The password is write-only and only accepted on create.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub role_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role_id", &self.role_id)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<EntityId>,
}

static CREATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("user")
        .field(FieldSpec::required("name", FieldKind::Text).rule(Rule::MinLength(2)))
        .field(FieldSpec::required("email", FieldKind::Text).rule(Rule::Email))
        .field(FieldSpec::required("role_id", FieldKind::Integer).rule(Rule::PositiveInteger))
        .field(FieldSpec::optional("password", FieldKind::Text).verbatim())
});

static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.partial().without("password"));

impl Entity for User {
    type Create = UserCreate;
    type Update = UserUpdate;

    const RESOURCE: &'static str = "users";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema(kind: SchemaKind) -> &'static Schema {
        match kind {
            SchemaKind::Create => &CREATE,
            SchemaKind::Update => &UPDATE,
        }
    }

    fn writable(&self) -> UserCreate {
        UserCreate {
            name: self.name.clone(),
            email: self.email.clone(),
            role_id: self.role.id,
            password: None,
        }
    }

    /// The role snapshot is flattened: `role_id` is editable, `role_name` is
    /// display-only and never submitted.
    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("role_id", self.role.id)
            .with("role_name", self.role.name.as_str())
    }
}
