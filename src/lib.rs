//! Liquidity Book Route Quoter
//!
//! Quotes swaps along a caller-supplied token route through Liquidity Book
//! style pairs, where liquidity sits in discrete price bins and a pair's price
//! is a power of `1 + bin_step / 10_000` indexed by its active bin.
//!
//! # Architecture Overview
//!
//! - **`quote`**: the quoting engine and the [`Quote`] it produces
//! - **`pairs`**: the [`PairRegistry`] and [`PairOracle`] seams, plus an in-memory
//!   [`MarketSnapshot`] implementing both
//! - **`math`**: 128.128 fixed-point price math and amount conversion
//! - **`config`**: engine configuration, loadable from the environment
//! - **`builders`**: fluent construction of a [`RouteQuoter`]
//! - **`errors`**: error types for every component
//! - **`utils`**: checked narrowing and parsing helpers
//!
//! # Quoting
//!
//! For every hop the quoter asks the registry for the pairs joining the two
//! tokens and simulates the hop through each of them. Only pairs that fully
//! fill the hop qualify. An exact-input quote keeps the largest output and an
//! exact-output quote keeps the smallest input; the first pair in registry
//! order wins ties. Alongside the simulated amounts the quote tracks the
//! amounts the route would yield at each chosen pair's reference price, which
//! gives a slippage-free baseline for price impact.
//!
//! ```no_run
//! use lb_route_quoter::{MarketSnapshot, RouteQuoter};
//! use lb_route_quoter::utils::parse_route;
//!
//! # fn main() -> lb_route_quoter::Result<()> {
//! let market = MarketSnapshot::from_file("snapshot.json")?;
//! let quoter = RouteQuoter::new(&market, &market);
//! let route = parse_route("0x0000000000000000000000000000000000000001,0x0000000000000000000000000000000000000002")?;
//! let quote = quoter.quote_from_amount_in(&route, 1_000_000)?;
//! println!("{quote}");
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The quoter only borrows its registry and oracle immutably. Both traits
//! require `Sync` so a hop's candidates can be evaluated on the rayon pool.

pub mod builders;
pub mod config;
pub mod errors;
pub mod math;
pub mod pairs;
pub mod quote;
pub mod utils;

// Re-export the main Result type and error enum for convenience
pub use errors::{QuoterError, Result};

pub use builders::RouteQuoterBuilder;
pub use config::QuoterConfig;
pub use pairs::{LbPairInformation, MarketSnapshot, PairOracle, PairRegistry, Version};
pub use quote::{Quote, QuoteKind, RouteQuoter};

pub type MathResult<T> = std::result::Result<T, errors::MathError>;
pub type SimulationResult<T> = std::result::Result<T, errors::SimulationError>;
