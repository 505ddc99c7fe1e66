use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema, SchemaKind};
use pharmadesk_core::FormValues;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::form::non_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

static CREATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("supplier")
        .field(FieldSpec::required("name", FieldKind::Text).rule(Rule::MinLength(2)))
        .field(FieldSpec::optional("contact_info", FieldKind::Text))
        .field(FieldSpec::optional("email", FieldKind::Text).rule(Rule::Email))
        .field(FieldSpec::optional("phone", FieldKind::Text))
        .field(FieldSpec::optional("address", FieldKind::Text))
});

static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.partial());

impl Entity for Supplier {
    type Create = SupplierCreate;
    type Update = SupplierUpdate;

    const RESOURCE: &'static str = "suppliers";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema(kind: SchemaKind) -> &'static Schema {
        match kind {
            SchemaKind::Create => &CREATE,
            SchemaKind::Update => &UPDATE,
        }
    }

    fn writable(&self) -> SupplierCreate {
        SupplierCreate {
            name: self.name.clone(),
            contact_info: non_blank(&self.contact_info),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            address: non_blank(&self.address),
        }
    }

    fn to_form(&self) -> FormValues {
        let mut form = FormValues::new().with("name", self.name.as_str());
        form.insert_opt("contact_info", self.contact_info.clone());
        form.insert_opt("email", self.email.clone());
        form.insert_opt("phone", self.phone.clone());
        form.insert_opt("address", self.address.clone());
        form
    }
}
