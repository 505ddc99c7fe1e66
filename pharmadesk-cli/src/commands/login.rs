use pharmadesk_client::{ApiClient, Transport};
use pharmadesk_core::FormValues;
use serde_json::{json, Value};

use super::CommandError;

/// Exchange credentials for a token.
///
/// The process exits right after, so the token is printed for reuse through
/// `PHARMADESK_API_TOKEN`.
pub async fn run<T: Transport>(
    api: &ApiClient<T>,
    username: &str,
    password: &str,
) -> Result<Value, CommandError> {
    let form = FormValues::new()
        .with("username", username)
        .with("password", password);
    let token = api.auth().login(&form).await?;
    Ok(json!({
        "access_token": token.access_token,
        "token_type": token.token_type,
    }))
}
