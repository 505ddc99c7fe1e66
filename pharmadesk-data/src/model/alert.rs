use std::fmt;
use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema, SchemaKind};
use pharmadesk_core::FormValues;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};

/// What triggered an inventory alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowStock,
    Expiring,
    Expired,
    CriticalStock,
}

impl AlertKind {
    pub const ALL: &'static [&'static str] = &["low_stock", "expiring", "expired", "critical_stock"];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::LowStock => "low_stock",
            AlertKind::Expiring => "expiring",
            AlertKind::Expired => "expired",
            AlertKind::CriticalStock => "critical_stock",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: &'static [&'static str] = &["low", "medium", "high", "critical"];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub quantity: i64,
}

/// Snapshot of the medicine an alert refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineSummary {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<InventoryLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub medicine_id: EntityId,
    pub severity: Severity,
    pub is_active: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine: Option<MedicineSummary>,
}

impl Alert {
    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some() || !self.is_active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCreate {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub medicine_id: EntityId,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertUpdate {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AlertKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

static CREATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("alert")
        .field(FieldSpec::required("type", FieldKind::Text).rule(Rule::OneOf(AlertKind::ALL)))
        .field(FieldSpec::required("message", FieldKind::Text).rule(Rule::MinLength(2)))
        .field(FieldSpec::required("medicine_id", FieldKind::Integer).rule(Rule::PositiveInteger))
        .field(FieldSpec::required("severity", FieldKind::Text).rule(Rule::OneOf(Severity::ALL)))
        .field(FieldSpec::optional("is_active", FieldKind::Bool))
});

static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.partial());

impl Entity for Alert {
    type Create = AlertCreate;
    type Update = AlertUpdate;

    const RESOURCE: &'static str = "alerts";
    const LABEL_FIELD: &'static str = "message";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema(kind: SchemaKind) -> &'static Schema {
        match kind {
            SchemaKind::Create => &CREATE,
            SchemaKind::Update => &UPDATE,
        }
    }

    fn writable(&self) -> AlertCreate {
        AlertCreate {
            kind: self.kind,
            message: self.message.clone(),
            medicine_id: self.medicine_id,
            severity: self.severity,
            is_active: Some(self.is_active),
        }
    }

    fn to_form(&self) -> FormValues {
        let mut form = FormValues::new()
            .with("type", self.kind.as_str())
            .with("message", self.message.as_str())
            .with("medicine_id", self.medicine_id)
            .with("severity", self.severity.as_str())
            .with("is_active", self.is_active);
        form.insert_opt("medicine_name", self.medicine.as_ref().map(|m| m.name.clone()));
        form
    }
}
