pub mod auth;
pub mod dashboard;
pub mod entity;
pub mod form;
pub mod model;

pub use auth::{LoginPayload, RegisterPayload, Token};
pub use dashboard::{DashboardComparison, FulfillmentStats, Timeframe, TopProduct, Totals};
pub use entity::{Entity, EntityId};
pub use form::{from_entity, to_payload};
pub use model::{
    Alert, AlertCreate, AlertKind, AlertUpdate, Client, ClientCreate, ClientUpdate, FiscalData,
    InventoryLevel, MedicineSummary, Report, ReportCreate, ReportUpdate, Role, RoleCreate,
    RoleRef, RoleUpdate, Severity, Supplier, SupplierCreate, SupplierUpdate, User, UserCreate,
    UserRef, UserUpdate,
};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{from_entity, to_payload, Entity, EntityId};
    pub use pharmadesk_core::prelude::*;
}
