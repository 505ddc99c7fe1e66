mod alert;
mod client;
mod report;
mod role;
mod supplier;
mod user;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

pub use alert::{Alert, AlertCreate, AlertKind, AlertUpdate, InventoryLevel, MedicineSummary, Severity};
pub use client::{Client, ClientCreate, ClientUpdate, FiscalData};
pub use report::{Report, ReportCreate, ReportUpdate};
pub use role::{Role, RoleCreate, RoleUpdate};
pub use supplier::{Supplier, SupplierCreate, SupplierUpdate};
pub use user::{User, UserCreate, UserUpdate};

/// Read-only `{id, name}` snapshot of a role embedded in another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: EntityId,
    pub name: String,
}

/// Read-only `{id, name}` snapshot of a user embedded in another entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: EntityId,
    pub name: String,
}
