use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema, SchemaKind};
use pharmadesk_core::FormValues;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::form::non_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of users holding this role. Computed by the backend.
    #[serde(rename = "usersCount", default, skip_serializing_if = "Option::is_none")]
    pub users_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

static CREATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("role")
        .field(FieldSpec::required("name", FieldKind::Text).rule(Rule::MinLength(2)))
        .field(FieldSpec::optional("description", FieldKind::Text))
});

static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.partial());

impl Entity for Role {
    type Create = RoleCreate;
    type Update = RoleUpdate;

    const RESOURCE: &'static str = "roles";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema(kind: SchemaKind) -> &'static Schema {
        match kind {
            SchemaKind::Create => &CREATE,
            SchemaKind::Update => &UPDATE,
        }
    }

    fn writable(&self) -> RoleCreate {
        RoleCreate {
            name: self.name.clone(),
            description: non_blank(&self.description),
        }
    }

    fn to_form(&self) -> FormValues {
        let mut form = FormValues::new().with("name", self.name.as_str());
        form.insert_opt("description", self.description.clone());
        form
    }
}
