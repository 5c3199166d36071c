//! Per-hop candidate evaluation.
//!
//! Every eligible pair of a hop is simulated independently and reduced to a
//! [`Candidate`]. Simulation failures and partial fills become
//! `Candidate::Unavailable` and never leave this module as errors.

use crate::errors::SimulationError;
use crate::pairs::{LbPairInformation, PairOracle};
use alloy::primitives::Address;
use rayon::prelude::*;
use std::fmt;

/// Outcome of evaluating one pair for one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Candidate<T> {
    Quoted(T),
    Unavailable(Unavailable),
}

/// Why a pair is not a candidate for a hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Unavailable {
    Simulation(SimulationError),
    PartialFill { left: u128 },
    ZeroInput,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::Simulation(error) => write!(f, "{error}"),
            Unavailable::PartialFill { left } => write!(f, "partial fill, {left} left"),
            Unavailable::ZeroInput => write!(f, "zero input required"),
        }
    }
}

/// A pair that can fully fill an exact-input hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ForwardFill {
    pub info: LbPairInformation,
    pub swap_for_y: bool,
    pub active_id: u32,
    pub amount_out: u128,
    pub fee: u128,
}

/// A pair that can fully fill an exact-output hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BackwardFill {
    pub info: LbPairInformation,
    pub swap_for_y: bool,
    pub active_id: u32,
    pub amount_in: u128,
    pub fee: u128,
}

/// Simulate selling `amount_in` through `info.pair` to receive `token_out`.
///
/// Any oracle failure, including the `token_y` and `active_id` reads, drops
/// the candidate rather than failing the quote.
pub(crate) fn evaluate_forward<O: PairOracle>(
    oracle: &O,
    info: &LbPairInformation,
    token_out: Address,
    amount_in: u128,
) -> Candidate<ForwardFill> {
    let simulated = oracle.token_y(info.pair).and_then(|token_y| {
        let swap_for_y = token_y == token_out;
        let out = oracle.swap_out(info.pair, amount_in, swap_for_y)?;
        let active_id = oracle.active_id(info.pair)?;
        Ok((swap_for_y, out, active_id))
    });

    match simulated {
        Err(error) => Candidate::Unavailable(Unavailable::Simulation(error)),
        Ok((_, out, _)) if out.amount_in_left != 0 => {
            Candidate::Unavailable(Unavailable::PartialFill { left: out.amount_in_left })
        }
        Ok((swap_for_y, out, active_id)) => Candidate::Quoted(ForwardFill {
            info: *info,
            swap_for_y,
            active_id,
            amount_out: out.amount_out,
            fee: out.fee,
        }),
    }
}

/// Simulate buying `amount_out` of `token_out` from `info.pair`.
///
/// Oracle failures drop the candidate, as in [`evaluate_forward`].
pub(crate) fn evaluate_backward<O: PairOracle>(
    oracle: &O,
    info: &LbPairInformation,
    token_out: Address,
    amount_out: u128,
) -> Candidate<BackwardFill> {
    let simulated = oracle.token_y(info.pair).and_then(|token_y| {
        let swap_for_y = token_y == token_out;
        let quote = oracle.swap_in(info.pair, amount_out, swap_for_y)?;
        let active_id = oracle.active_id(info.pair)?;
        Ok((swap_for_y, quote, active_id))
    });

    match simulated {
        Err(error) => Candidate::Unavailable(Unavailable::Simulation(error)),
        Ok((_, quote, _)) if quote.amount_out_left != 0 => {
            Candidate::Unavailable(Unavailable::PartialFill { left: quote.amount_out_left })
        }
        Ok((_, quote, _)) if quote.amount_in == 0 => Candidate::Unavailable(Unavailable::ZeroInput),
        Ok((swap_for_y, quote, active_id)) => Candidate::Quoted(BackwardFill {
            info: *info,
            swap_for_y,
            active_id,
            amount_in: quote.amount_in,
            fee: quote.fee,
        }),
    }
}

/// Evaluate every pair not ignored for routing, keeping registry order.
///
/// With `parallel` the evaluations run on the rayon pool; the collected
/// vector is still in registry order, so selection downstream sees the same
/// sequence either way.
pub(crate) fn scan<T, F>(
    pairs: &[LbPairInformation],
    parallel: bool,
    evaluate: F,
) -> Vec<(LbPairInformation, Candidate<T>)>
where
    T: Send,
    F: Fn(&LbPairInformation) -> Candidate<T> + Sync,
{
    if parallel {
        pairs
            .par_iter()
            .filter(|info| !info.ignored_for_routing)
            .map(|info| (*info, evaluate(info)))
            .collect()
    } else {
        pairs
            .iter()
            .filter(|info| !info.ignored_for_routing)
            .map(|info| (*info, evaluate(info)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::{SwapIn, SwapOut};

    struct FixedOracle {
        token_y: Address,
        out: Result<SwapOut, SimulationError>,
        quote: Result<SwapIn, SimulationError>,
    }

    impl PairOracle for FixedOracle {
        fn swap_out(&self, _pair: Address, _amount_in: u128, _swap_for_y: bool) -> Result<SwapOut, SimulationError> {
            self.out.clone()
        }

        fn swap_in(&self, _pair: Address, _amount_out: u128, _swap_for_y: bool) -> Result<SwapIn, SimulationError> {
            self.quote.clone()
        }

        fn active_id(&self, _pair: Address) -> Result<u32, SimulationError> {
            Ok(1 << 23)
        }

        fn token_y(&self, _pair: Address) -> Result<Address, SimulationError> {
            Ok(self.token_y)
        }
    }

    fn info(n: u8, ignored: bool) -> LbPairInformation {
        LbPairInformation {
            pair: Address::repeat_byte(n),
            bin_step: 10,
            ignored_for_routing: ignored,
        }
    }

    #[test]
    fn test_forward_partial_fill_is_unavailable() {
        let oracle = FixedOracle {
            token_y: Address::with_last_byte(2),
            out: Ok(SwapOut { amount_in_left: 1, amount_out: 900, fee: 1 }),
            quote: Ok(SwapIn::default()),
        };
        let candidate = evaluate_forward(&oracle, &info(1, false), Address::with_last_byte(2), 1_000);
        assert_eq!(candidate, Candidate::Unavailable(Unavailable::PartialFill { left: 1 }));
    }

    #[test]
    fn test_forward_direction_follows_token_y() {
        let oracle = FixedOracle {
            token_y: Address::with_last_byte(2),
            out: Ok(SwapOut { amount_in_left: 0, amount_out: 900, fee: 1 }),
            quote: Ok(SwapIn::default()),
        };
        let Candidate::Quoted(to_y) = evaluate_forward(&oracle, &info(1, false), Address::with_last_byte(2), 1_000) else {
            panic!("expected a quoted candidate");
        };
        assert!(to_y.swap_for_y);

        let Candidate::Quoted(to_x) = evaluate_forward(&oracle, &info(1, false), Address::with_last_byte(1), 1_000) else {
            panic!("expected a quoted candidate");
        };
        assert!(!to_x.swap_for_y);
    }

    #[test]
    fn test_backward_rejections() {
        let failing = FixedOracle {
            token_y: Address::with_last_byte(2),
            out: Ok(SwapOut::default()),
            quote: Err(SimulationError::InsufficientLiquidity { pair: Address::repeat_byte(1) }),
        };
        assert!(matches!(
            evaluate_backward(&failing, &info(1, false), Address::with_last_byte(2), 10),
            Candidate::Unavailable(Unavailable::Simulation(_))
        ));

        let free = FixedOracle {
            token_y: Address::with_last_byte(2),
            out: Ok(SwapOut::default()),
            quote: Ok(SwapIn { amount_in: 0, amount_out_left: 0, fee: 0 }),
        };
        assert_eq!(
            evaluate_backward(&free, &info(1, false), Address::with_last_byte(2), 10),
            Candidate::Unavailable(Unavailable::ZeroInput)
        );
    }

    /// Swaps succeed but the pair's state reads fail.
    struct UnreadableOracle;

    impl PairOracle for UnreadableOracle {
        fn swap_out(&self, _pair: Address, amount_in: u128, _swap_for_y: bool) -> Result<SwapOut, SimulationError> {
            Ok(SwapOut { amount_in_left: 0, amount_out: amount_in, fee: 0 })
        }

        fn swap_in(&self, _pair: Address, amount_out: u128, _swap_for_y: bool) -> Result<SwapIn, SimulationError> {
            Ok(SwapIn { amount_in: amount_out, amount_out_left: 0, fee: 0 })
        }

        fn active_id(&self, pair: Address) -> Result<u32, SimulationError> {
            Err(SimulationError::PairNotFound { pair })
        }

        fn token_y(&self, pair: Address) -> Result<Address, SimulationError> {
            Err(SimulationError::PairNotFound { pair })
        }
    }

    #[test]
    fn test_state_read_failures_drop_the_candidate() {
        let pair = info(1, false);
        let expected = Unavailable::Simulation(SimulationError::PairNotFound { pair: pair.pair });

        assert_eq!(
            evaluate_forward(&UnreadableOracle, &pair, Address::with_last_byte(2), 10),
            Candidate::Unavailable(expected.clone())
        );
        assert_eq!(
            evaluate_backward(&UnreadableOracle, &pair, Address::with_last_byte(2), 10),
            Candidate::Unavailable(expected)
        );
    }

    #[test]
    fn test_scan_skips_ignored_and_keeps_order() {
        let pairs = [info(1, false), info(2, true), info(3, false), info(4, false)];
        for parallel in [false, true] {
            let scanned = scan(&pairs, parallel, |info| Candidate::<u8>::Quoted(info.pair[0]));
            let order: Vec<u8> = scanned.iter().map(|(info, _)| info.pair[0]).collect();
            assert_eq!(order, vec![1, 3, 4]);
        }
    }
}
