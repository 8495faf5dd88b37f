use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::RateRule;

/// CBS test-phase rate.
const CBS_RATE: Decimal = dec!(0.009);

/// IBS test-phase rate.
const IBS_RATE: Decimal = dec!(0.001);

/// Rules shipped with the crate, keyed by CST code.
///
/// | Code | Meaning | Reduction |
/// |------|---------|-----------|
/// | `000` | Fully taxed | none |
/// | `011` | Taxed with 60% rate reduction | 60% |
/// | `210` | Taxed with 50% rate reduction | 50% |
pub const BUILTIN_RULES: [(&str, RateRule); 3] = [
    (
        "000",
        RateRule::from_parts_unchecked(CBS_RATE, IBS_RATE, Decimal::ZERO),
    ),
    (
        "011",
        RateRule::from_parts_unchecked(CBS_RATE, IBS_RATE, dec!(0.6)),
    ),
    (
        "210",
        RateRule::from_parts_unchecked(CBS_RATE, IBS_RATE, dec!(0.5)),
    ),
];
