//! Currency listing endpoint

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::payload::Payload;

const GET_CURRENCIES: &str = "getCurrencies";

impl Client {
    /// List all currencies available on FixedFloat
    ///
    /// Sends an empty, signed GET request and returns the `data` array as-is.
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::from_keys(api_key, secret_key)?;
    /// let currencies = client.list_currencies().await?;
    /// ```
    pub async fn list_currencies(&self) -> Result<Value> {
        self.get(GET_CURRENCIES, &Payload::new()).await
    }
}
