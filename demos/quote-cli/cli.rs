use alloy::primitives::Address;
use clap::Parser;
use lb_route_quoter::errors::Result;
use lb_route_quoter::utils::parse_route;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Quote a token route against a market snapshot", long_about = None)]
pub struct Args {
    #[clap(long, env = "LB_QUOTER_SNAPSHOT", help = "Path to the market snapshot JSON file")]
    pub snapshot: PathBuf,

    #[clap(long, help = "Comma-separated token addresses, first is sold and last is bought")]
    pub route: String,

    #[clap(long, conflicts_with = "amount_out", required_unless_present = "amount_out", help = "Exact amount of the first token to sell")]
    pub amount_in: Option<u128>,

    #[clap(long, help = "Exact amount of the last token to buy")]
    pub amount_out: Option<u128>,

    #[clap(long, help = "Evaluate candidate pairs in parallel, overriding LB_QUOTER_PARALLEL_SCAN")]
    pub parallel: bool,
}

/// What the caller fixed.
#[derive(Debug, Clone, Copy)]
pub enum Request {
    AmountIn(u128),
    AmountOut(u128),
}

impl Args {
    pub fn route(&self) -> Result<Vec<Address>> {
        parse_route(&self.route)
    }

    pub fn request(&self) -> Result<Request> {
        match (self.amount_in, self.amount_out) {
            (Some(amount), None) => Ok(Request::AmountIn(amount)),
            (None, Some(amount)) => Ok(Request::AmountOut(amount)),
            _ => Err(anyhow::anyhow!("exactly one of --amount-in or --amount-out is required").into()),
        }
    }
}

pub fn parse_cli_args() -> Result<Args> {
    let args = Args::parse();
    tracing::debug!(
        snapshot = %args.snapshot.display(),
        route = %args.route,
        parallel = args.parallel,
        "Parsed CLI arguments"
    );
    Ok(args)
}
