//! State-changing endpoints of the FixedFloat API
//!
//! Order creation and the emergency choice for orders that need a decision.

mod emergency;
mod orders;
