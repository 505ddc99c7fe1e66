use std::sync::Arc;

use pharmadesk_data::{Client, Entity, Report, Role, Supplier, User};
use tokio_util::sync::CancellationToken;

use crate::alerts::AlertsClient;
use crate::auth::AuthClient;
use crate::config::ApiConfig;
use crate::crud::CrudClient;
use crate::dashboard::DashboardClient;
use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};

/// Entry point: every typed client over one transport and one session.
///
/// ```ignore
/// let api = ApiClient::from_config(&config)?;
/// api.auth().login(&form).await?;
/// let clients = api.clients().list().await?;
/// ```
pub struct ApiClient<T = HttpTransport> {
    dispatcher: Dispatcher<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl ApiClient<HttpTransport> {
    /// Build over HTTP. A configured token seeds the session.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::from_config(config)?;
        let session = match &config.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };
        tracing::debug!(url = %config.url, timeout = config.timeout, "api client configured");
        Ok(Self::new(transport, session))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::new(transport), session),
        }
    }

    /// A copy whose requests are abandoned once `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            dispatcher: self.dispatcher.with_cancellation(token),
        }
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    /// CRUD client for any entity type.
    pub fn crud<E: Entity>(&self) -> CrudClient<E, T> {
        CrudClient::from_dispatcher(self.dispatcher.clone())
    }

    pub fn clients(&self) -> CrudClient<Client, T> {
        self.crud()
    }

    pub fn suppliers(&self) -> CrudClient<Supplier, T> {
        self.crud()
    }

    pub fn reports(&self) -> CrudClient<Report, T> {
        self.crud()
    }

    pub fn roles(&self) -> CrudClient<Role, T> {
        self.crud()
    }

    pub fn users(&self) -> CrudClient<User, T> {
        self.crud()
    }

    pub fn alerts(&self) -> AlertsClient<T> {
        AlertsClient::new(self.dispatcher.clone())
    }

    pub fn dashboard(&self) -> DashboardClient<T> {
        DashboardClient::new(self.dispatcher.clone())
    }

    pub fn auth(&self) -> AuthClient<T> {
        AuthClient::new(self.dispatcher.clone())
    }
}
