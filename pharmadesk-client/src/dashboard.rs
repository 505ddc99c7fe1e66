use pharmadesk_data::{DashboardComparison, FulfillmentStats, Timeframe, TopProduct};

use crate::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};

/// Default size of the best-sellers chart.
pub const DEFAULT_TOP_SELLING: u32 = 10;

/// Read-only dashboard statistics under `/financial-reports`.
pub struct DashboardClient<T> {
    dispatcher: Dispatcher<T>,
}

impl<T: Transport> DashboardClient<T> {
    pub(crate) fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    pub async fn comparison(&self, timeframe: Timeframe) -> Result<DashboardComparison, ApiError> {
        let request = ApiRequest::get("/financial-reports/dashboard-comparison")
            .query("timeframe", timeframe);
        self.dispatcher.fetch(request, "timeframe").await
    }

    pub async fn fulfillment_stats(&self) -> Result<FulfillmentStats, ApiError> {
        self.dispatcher
            .fetch(ApiRequest::get("/financial-reports/fulfillment-stats"), "")
            .await
    }

    pub async fn top_selling(&self, limit: u32) -> Result<Vec<TopProduct>, ApiError> {
        let request = ApiRequest::get("/financial-reports/top-selling").query("limit", limit);
        self.dispatcher.fetch(request, "limit").await
    }
}
