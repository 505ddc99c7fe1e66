use pharmadesk_core::FormValues;
use pharmadesk_data::{LoginPayload, RegisterPayload, Token, User};

use crate::crud::encode;
use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::session::Session;
use crate::transport::{ApiRequest, Transport};

/// Login, registration and the current-user lookup.
pub struct AuthClient<T> {
    dispatcher: Dispatcher<T>,
}

impl<T: Transport> AuthClient<T> {
    pub(crate) fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    pub fn session(&self) -> &Session {
        self.dispatcher.session()
    }

    /// Exchange credentials for a token and store it in the session.
    ///
    /// The token endpoint takes a form-encoded `username`/`password` pair.
    pub async fn login(&self, form: &FormValues) -> Result<Token, ApiError> {
        let credentials = LoginPayload::from_form(form)?;
        let request = ApiRequest::post("/token").form(vec![
            ("username".to_string(), credentials.username),
            ("password".to_string(), credentials.password),
        ]);
        let token: Token = self.dispatcher.fetch(request, "username").await?;
        self.session().set(token.access_token.clone()).await;
        Ok(token)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, form: &FormValues) -> Result<User, ApiError> {
        let payload = RegisterPayload::from_form(form)?;
        let body = encode(&payload)?;
        self.dispatcher
            .fetch(ApiRequest::post("/users").json(body), "email")
            .await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.dispatcher.fetch(ApiRequest::get("/users/me"), "email").await
    }

    pub async fn logout(&self) {
        self.session().clear().await;
    }
}
