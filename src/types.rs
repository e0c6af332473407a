//! Request and response types for the FixedFloat API
//!
//! This module contains the typed inputs of every operation, the validation rules
//! they are checked against before any request is sent, and the response envelope.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::payload::Payload;

// ============================================================================
// Common Enums
// ============================================================================

/// Exchange rate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Rate locked at order creation
    Fixed,
    /// Rate follows the market until the exchange happens
    #[default]
    Float,
}

impl OrderType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Fixed => "fixed",
            OrderType::Float => "float",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fixed" => Ok(OrderType::Fixed),
            "float" => Ok(OrderType::Float),
            other => Err(Error::invalid_call(format!(
                "Unknown order type '{}', expected fixed or float",
                other
            ))),
        }
    }
}

/// Action to take on an order that needs a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmergencyChoice {
    /// Continue the exchange at the current rate
    Exchange,
    /// Return the funds to a refund address
    Refund,
}

impl EmergencyChoice {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyChoice::Exchange => "EXCHANGE",
            EmergencyChoice::Refund => "REFUND",
        }
    }
}

impl fmt::Display for EmergencyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmergencyChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EXCHANGE" => Ok(EmergencyChoice::Exchange),
            "REFUND" => Ok(EmergencyChoice::Refund),
            other => Err(Error::invalid_call(format!(
                "Unknown emergency choice '{}', expected EXCHANGE or REFUND",
                other
            ))),
        }
    }
}

/// Side of an exchange pair, used as the payload field prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    From,
    To,
}

impl Role {
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::From => "from",
            Role::To => "to",
        }
    }
}

// ============================================================================
// Currency Amounts
// ============================================================================

/// A currency code with an optional quantity, e.g. `"0.1 ETH"` or `"BTC"`
///
/// The quantity is kept as the caller wrote it; no numeric parsing or rounding is
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyAmount {
    pub quantity: Option<String>,
    pub currency: String,
}

impl CurrencyAmount {
    /// Currency code without a quantity
    pub fn currency(currency: impl Into<String>) -> Self {
        Self {
            quantity: None,
            currency: currency.into(),
        }
    }

    /// Currency code with an explicit quantity
    pub fn with_quantity(quantity: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            quantity: Some(quantity.into()),
            currency: currency.into(),
        }
    }

    /// Parse `"<quantity> <CURRENCY>"` or `"<CURRENCY>"`
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let first = parts.next();
        let second = parts.next();

        if parts.next().is_some() {
            return Err(Error::invalid_call(format!(
                "Invalid currency amount '{}'. Example: '0.1 ETH' or 'BTC'",
                input
            )));
        }

        match (first, second) {
            (Some(currency), None) => Ok(Self::currency(currency)),
            (Some(quantity), Some(currency)) => Ok(Self::with_quantity(quantity, currency)),
            _ => Err(Error::invalid_call(
                "Currency code is required. Example: '0.1 ETH' or 'BTC'",
            )),
        }
    }

    pub fn has_quantity(&self) -> bool {
        self.quantity.is_some()
    }

    /// Flatten into `{role}Qty` (when a quantity is set) and `{role}Currency`
    pub fn append_to(&self, payload: &mut Payload, role: Role) {
        let prefix = role.prefix();
        if let Some(qty) = &self.quantity {
            payload.push(format!("{}Qty", prefix), qty.as_str());
        }
        payload.push(format!("{}Currency", prefix), self.currency.as_str());
    }
}

impl FromStr for CurrencyAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quantity {
            Some(qty) => write!(f, "{} {}", qty, self.currency),
            None => f.write_str(&self.currency),
        }
    }
}

// ============================================================================
// Order Status
// ============================================================================

/// Field the resolved status label is stored under
pub const STATUS_TEXT_FIELD: &str = "statusText";

const STATUS_LABELS: [&str; 8] = [
    "Transaction expected",
    "The transaction is waiting for the required number of confirmations",
    "Currency exchange",
    "Sending funds",
    "Completed",
    "Expired",
    "Not currently in use",
    "A decision must be made to proceed with the order",
];

/// Order lifecycle status as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Waiting for the incoming transaction
    New,
    /// Transaction received, waiting for confirmations
    Pending,
    /// Exchanging currencies
    Exchange,
    /// Sending the outgoing funds
    Withdraw,
    /// Order completed
    Done,
    /// Order expired
    Expired,
    /// Reserved status code
    Unused,
    /// Order needs an emergency choice
    Emergency,
}

impl OrderStatus {
    const ALL: [OrderStatus; 8] = [
        OrderStatus::New,
        OrderStatus::Pending,
        OrderStatus::Exchange,
        OrderStatus::Withdraw,
        OrderStatus::Done,
        OrderStatus::Expired,
        OrderStatus::Unused,
        OrderStatus::Emergency,
    ];

    /// Map a numeric status code; unknown codes yield `None`
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Human-readable description
    pub fn label(&self) -> &'static str {
        STATUS_LABELS[*self as usize]
    }
}

/// Label for a numeric status code, `None` when the code is unknown
pub fn status_label(code: i64) -> Option<&'static str> {
    OrderStatus::from_code(code).map(|status| status.label())
}

/// Attach `statusText` to an order object when its `status` is a known code
///
/// Accepts integer codes and numeric strings. Anything else leaves the value untouched.
pub fn attach_status_label(mut data: Value) -> Value {
    if let Some(order) = data.as_object_mut() {
        let code = match order.get("status") {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if let Some(label) = code.and_then(status_label) {
            order.insert(
                STATUS_TEXT_FIELD.to_string(),
                Value::String(label.to_string()),
            );
        }
    }
    data
}

// ============================================================================
// Validation Predicates
// ============================================================================

/// At least one side of the pair carries an explicit quantity
pub fn has_explicit_quantity(from: &CurrencyAmount, to: &CurrencyAmount) -> bool {
    from.has_quantity() || to.has_quantity()
}

/// A required string argument is non-empty
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// A refund choice comes with a refund address
pub fn refund_address_present(choice: EmergencyChoice, address: Option<&str>) -> bool {
    match choice {
        EmergencyChoice::Refund => address.is_some_and(is_present),
        EmergencyChoice::Exchange => true,
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if is_present(value) {
        Ok(())
    } else {
        Err(Error::invalid_call(format!("{} is required", field)))
    }
}

fn require_quantity(from: &CurrencyAmount, to: &CurrencyAmount) -> Result<()> {
    if has_explicit_quantity(from, to) {
        Ok(())
    } else {
        Err(Error::invalid_call(
            "An amount is required on one side. Example: from '0.1 ETH', to 'BTC'",
        ))
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Input of `getPrice`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub from: CurrencyAmount,
    pub to: CurrencyAmount,
    pub order_type: OrderType,
}

impl PriceRequest {
    /// Create a float-rate price request
    pub fn new(from: CurrencyAmount, to: CurrencyAmount) -> Self {
        Self {
            from,
            to,
            order_type: OrderType::default(),
        }
    }

    /// Set the order type (default: float)
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_quantity(&self.from, &self.to)
    }

    /// Validate and encode as `type` + flattened from/to fields
    pub fn to_payload(&self) -> Result<Payload> {
        self.validate()?;

        let mut payload = Payload::new();
        payload.push("type", self.order_type.as_str());
        self.from.append_to(&mut payload, Role::From);
        self.to.append_to(&mut payload, Role::To);
        Ok(payload)
    }
}

/// Input of `createOrder`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    pub from: CurrencyAmount,
    pub to: CurrencyAmount,
    pub to_address: String,
    pub order_type: OrderType,
    /// MEMO or destination tag; may instead be appended to `to_address` after a colon
    pub extra: Option<String>,
}

impl CreateOrderRequest {
    /// Create a float-rate order request without an extra field
    pub fn new(from: CurrencyAmount, to: CurrencyAmount, to_address: impl Into<String>) -> Self {
        Self {
            from,
            to,
            to_address: to_address.into(),
            order_type: OrderType::default(),
            extra: None,
        }
    }

    /// Set the order type (default: float)
    pub fn order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    /// Set the MEMO / destination tag
    pub fn extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_quantity(&self.from, &self.to)?;
        require("toAddress", &self.to_address)
    }

    /// Validate and encode as `type`, `toAddress`, flattened from/to, then `extra`
    pub fn to_payload(&self) -> Result<Payload> {
        self.validate()?;

        let mut payload = Payload::new();
        payload
            .push("type", self.order_type.as_str())
            .push("toAddress", self.to_address.as_str());
        self.from.append_to(&mut payload, Role::From);
        self.to.append_to(&mut payload, Role::To);
        payload.push_opt("extra", self.extra.as_deref().filter(|e| is_present(e)));
        Ok(payload)
    }
}

/// Input of `getOrder`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub id: String,
    pub token: String,
}

impl OrderQuery {
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)?;
        require("token", &self.token)
    }

    pub fn to_payload(&self) -> Result<Payload> {
        self.validate()?;

        let mut payload = Payload::new();
        payload
            .push("id", self.id.as_str())
            .push("token", self.token.as_str());
        Ok(payload)
    }
}

/// Input of `setEmergency`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyRequest {
    pub id: String,
    pub token: String,
    pub choice: EmergencyChoice,
    /// Refund address, required when `choice` is [`EmergencyChoice::Refund`]
    pub address: Option<String>,
}

impl EmergencyRequest {
    /// Continue the exchange
    pub fn exchange(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            choice: EmergencyChoice::Exchange,
            address: None,
        }
    }

    /// Refund to `address`
    pub fn refund(
        id: impl Into<String>,
        token: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
            choice: EmergencyChoice::Refund,
            address: Some(address.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("id", &self.id)?;
        require("token", &self.token)?;
        if !refund_address_present(self.choice, self.address.as_deref()) {
            return Err(Error::invalid_call(
                "address is required when choice is REFUND",
            ));
        }
        Ok(())
    }

    /// Validate and encode; `address` is omitted when none was given
    pub fn to_payload(&self) -> Result<Payload> {
        self.validate()?;

        let mut payload = Payload::new();
        payload
            .push("id", self.id.as_str())
            .push("token", self.token.as_str())
            .push("choice", self.choice.as_str())
            .push_opt("address", self.address.as_deref());
        Ok(payload)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Result code of a successful call
pub const SUCCESS_CODE: i64 = 0;
/// Result message of a successful call
pub const SUCCESS_MSG: &str = "OK";

/// Outer structure of every API response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Envelope {
    pub code: i64,
    pub msg: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Success requires both the success code and the success message
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE && self.msg == SUCCESS_MSG
    }

    /// Unwrap `data`, or turn the envelope into [`Error::Remote`]
    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(Error::Remote {
                code: self.code,
                message: self.msg,
            })
        }
    }
}
