pub mod cli;

use lb_route_quoter::errors::Result;
use lb_route_quoter::{MarketSnapshot, QuoterConfig, RouteQuoterBuilder};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "lb_route_quoter=info"
                        .parse::<tracing_subscriber::filter::Directive>()
                        .map_err(anyhow::Error::from)?,
                ),
        )
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_cli_args()?;
    let route = args.route()?;
    let request = args.request()?;

    let mut config = QuoterConfig::from_env()?;
    if args.parallel {
        config = config.with_parallel_scan(true);
    }

    let market = MarketSnapshot::from_file(&args.snapshot)?;
    let quoter = RouteQuoterBuilder::new()
        .with_registry(&market)
        .with_oracle(&market)
        .with_config(config)
        .build()?;

    let quote = match request {
        cli::Request::AmountIn(amount) => quoter.quote_from_amount_in(&route, amount)?,
        cli::Request::AmountOut(amount) => quoter.quote_from_amount_out(&route, amount)?,
    };

    if !quote.is_complete() {
        tracing::warn!(quote = %quote, "Route could not be fully routed");
    }
    if let Some(impact) = quote.price_impact_bps() {
        tracing::info!(price_impact_bps = impact, "Route quoted");
    }

    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}
