//! Price quote endpoint

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::types::{CurrencyAmount, OrderType, PriceRequest};

const GET_PRICE: &str = "getPrice";

impl Client {
    /// Quote a currency pair for a given amount
    ///
    /// # Arguments
    /// * `from` - Currency to send, e.g. `"0.1 ETH"` or `"ETH"`
    /// * `to` - Currency to receive, e.g. `"BTC"` or `"0.005 BTC"`
    /// * `order_type` - Fixed or float rate
    ///
    /// Exactly one side is expected to carry an amount. If neither does, the call fails
    /// with [`crate::Error::InvalidCall`] without contacting the API.
    ///
    /// # Example
    /// ```ignore
    /// let price = client.get_price("0.1 ETH", "BTC", OrderType::Float).await?;
    /// ```
    pub async fn get_price(&self, from: &str, to: &str, order_type: OrderType) -> Result<Value> {
        let request = PriceRequest::new(CurrencyAmount::parse(from)?, CurrencyAmount::parse(to)?)
            .order_type(order_type);
        self.get_price_with(&request).await
    }

    /// Quote a currency pair from a typed request
    pub async fn get_price_with(&self, request: &PriceRequest) -> Result<Value> {
        let payload = request.to_payload()?;
        self.post(GET_PRICE, &payload).await
    }
}
