//! Builder patterns for complex object construction.
//!
//! - **`RouteQuoterBuilder`**: assembles a quoter from a pair registry, a pair
//!   oracle and an optional configuration, failing when a component is missing

pub mod quoter;

pub use quoter::RouteQuoterBuilder;
