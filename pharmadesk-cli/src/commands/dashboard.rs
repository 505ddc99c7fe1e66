use pharmadesk_client::{ApiClient, Transport};
use pharmadesk_data::Timeframe;
use serde_json::{json, Value};

use super::CommandError;

/// Fetch the three dashboard panels in sequence and print them together.
pub async fn run<T: Transport>(
    api: &ApiClient<T>,
    timeframe: Timeframe,
    top: u32,
) -> Result<Value, CommandError> {
    let dashboard = api.dashboard();
    let comparison = dashboard.comparison(timeframe).await?;
    let fulfillment = dashboard.fulfillment_stats().await?;
    let top_selling = dashboard.top_selling(top).await?;

    Ok(json!({
        "comparison": comparison,
        "fulfillment": fulfillment,
        "outstanding_orders": fulfillment.outstanding(),
        "top_selling": top_selling,
    }))
}
