//! Emergency action endpoint
//!
//! Orders in status 7 wait for the owner to either continue the exchange or request a
//! refund.

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::types::{EmergencyChoice, EmergencyRequest};

const SET_EMERGENCY: &str = "setEmergency";

impl Client {
    /// Choose how to proceed with an order that needs a decision
    ///
    /// # Arguments
    /// * `id` - Order ID
    /// * `token` - Security token of the order
    /// * `choice` - Continue the exchange or refund
    /// * `address` - Refund address. Required for [`EmergencyChoice::Refund`]; when
    ///   `None` the field is left out of the request.
    pub async fn set_emergency(
        &self,
        id: &str,
        token: &str,
        choice: EmergencyChoice,
        address: Option<&str>,
    ) -> Result<Value> {
        let request = EmergencyRequest {
            id: id.to_string(),
            token: token.to_string(),
            choice,
            address: address.map(str::to_string),
        };
        self.set_emergency_with(&request).await
    }

    /// Send an emergency choice from a typed request
    pub async fn set_emergency_with(&self, request: &EmergencyRequest) -> Result<Value> {
        let payload = request.to_payload()?;
        self.get(SET_EMERGENCY, &payload).await
    }
}
