mod classification_code;
mod rate_rule;
mod rate_trend;

pub use classification_code::ClassificationCode;
pub use rate_rule::{RateRule, RateRuleError};
pub use rate_trend::RateTrend;
