use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema, SchemaKind};
use pharmadesk_core::FormValues;
use serde::{Deserialize, Serialize};

use super::UserRef;
use crate::entity::{Entity, EntityId};

/// A generated report. `data` is an opaque serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: EntityId,
    pub report_type: String,
    /// ISO-8601 date or date-time, kept as sent by the backend.
    pub date: String,
    pub data: String,
    pub generated_by: EntityId,
    pub user: UserRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCreate {
    pub report_type: String,
    pub date: String,
    pub data: String,
    pub generated_by: EntityId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_by: Option<EntityId>,
}

static CREATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("report")
        .field(FieldSpec::required("report_type", FieldKind::Text).rule(Rule::MinLength(2)))
        .field(FieldSpec::required("date", FieldKind::Text).rule(Rule::IsoDateTime))
        .field(FieldSpec::required("data", FieldKind::Text))
        .field(FieldSpec::required("generated_by", FieldKind::Integer).rule(Rule::PositiveInteger))
});

static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.partial());

impl Entity for Report {
    type Create = ReportCreate;
    type Update = ReportUpdate;

    const RESOURCE: &'static str = "reports";
    const LABEL_FIELD: &'static str = "report_type";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema(kind: SchemaKind) -> &'static Schema {
        match kind {
            SchemaKind::Create => &CREATE,
            SchemaKind::Update => &UPDATE,
        }
    }

    fn writable(&self) -> ReportCreate {
        ReportCreate {
            report_type: self.report_type.clone(),
            date: self.date.clone(),
            data: self.data.clone(),
            generated_by: self.generated_by,
        }
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("report_type", self.report_type.as_str())
            .with("date", self.date.as_str())
            .with("data", self.data.as_str())
            .with("generated_by", self.generated_by)
            .with("generated_by_name", self.user.name.as_str())
    }
}
