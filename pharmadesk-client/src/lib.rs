//! Client side of the pharmadesk backend contract.
//!
//! Forms are validated locally before anything is sent; failures are
//! reported as [`ApiError`] with distinct validation, transport and
//! conflict kinds.

pub mod alerts;
pub mod api;
pub mod auth;
pub mod config;
pub mod crud;
pub mod dashboard;
mod dispatch;
pub mod error;
pub mod list;
mod response;
pub mod session;
pub mod transport;

pub use alerts::AlertsClient;
pub use api::ApiClient;
pub use auth::AuthClient;
pub use config::ApiConfig;
pub use crud::{CrudApi, CrudClient};
pub use dashboard::{DashboardClient, DEFAULT_TOP_SELLING};
pub use error::ApiError;
pub use list::ResourceList;
pub use session::Session;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, RequestBody, Transport};

pub use tokio_util::sync::CancellationToken;

pub mod prelude {
    //! Re-exports of the most commonly used client types.
    pub use crate::{
        ApiClient, ApiConfig, ApiError, CancellationToken, CrudApi, CrudClient, ResourceList,
        Session, Transport,
    };
    pub use pharmadesk_data::prelude::*;
}
