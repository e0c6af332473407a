//! Read-only endpoints of the FixedFloat API
//!
//! Currency listing, price quotes and order lookups. None of these change state on the
//! exchange side.

mod currencies;
mod orders;
mod price;
