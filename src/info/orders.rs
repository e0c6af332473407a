//! Order lookup endpoint

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::types::{attach_status_label, OrderQuery};

const GET_ORDER: &str = "getOrder";

impl Client {
    /// Retrieve an order
    ///
    /// The returned object gets a `statusText` field when its numeric `status` is known.
    /// An unknown status leaves the object as the API sent it.
    ///
    /// # Arguments
    /// * `id` - Order ID
    /// * `token` - Security token of the order
    pub async fn get_order(&self, id: &str, token: &str) -> Result<Value> {
        self.get_order_with(&OrderQuery::new(id, token)).await
    }

    /// Retrieve an order from a typed query
    pub async fn get_order_with(&self, query: &OrderQuery) -> Result<Value> {
        let payload = query.to_payload()?;
        let order = self.get(GET_ORDER, &payload).await?;
        Ok(attach_status_label(order))
    }
}
