//! Order creation endpoint

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::types::{attach_status_label, CreateOrderRequest, CurrencyAmount, OrderType};

const CREATE_ORDER: &str = "createOrder";

impl Client {
    /// Create an exchange order
    ///
    /// # Arguments
    /// * `from` - Currency to send, e.g. `"0.1 ETH"`
    /// * `to` - Currency to receive, e.g. `"BTC"`
    /// * `to_address` - Destination address for the exchanged funds
    /// * `order_type` - Fixed or float rate
    /// * `extra` - MEMO or destination tag. Can be omitted by writing it into
    ///   `to_address` after a colon.
    ///
    /// The returned order carries `statusText` when its status is known.
    ///
    /// # Example
    /// ```ignore
    /// let order = client
    ///     .create_order("0.1 ETH", "BTC", "bc1q...", OrderType::Float, None)
    ///     .await?;
    /// println!("Send funds to {}", order["from"]["address"]);
    /// ```
    pub async fn create_order(
        &self,
        from: &str,
        to: &str,
        to_address: &str,
        order_type: OrderType,
        extra: Option<&str>,
    ) -> Result<Value> {
        let mut request = CreateOrderRequest::new(
            CurrencyAmount::parse(from)?,
            CurrencyAmount::parse(to)?,
            to_address,
        )
        .order_type(order_type);
        if let Some(extra) = extra {
            request = request.extra(extra);
        }
        self.create_order_with(&request).await
    }

    /// Create an exchange order from a typed request
    pub async fn create_order_with(&self, request: &CreateOrderRequest) -> Result<Value> {
        let payload = request.to_payload()?;
        let order = self.post(CREATE_ORDER, &payload).await?;
        Ok(attach_status_label(order))
    }
}
