use rust_decimal::Decimal;

/// Longest tenure the amortization math accepts.
pub const MAX_TENURE_MONTHS: i64 = 600;

/// Highest annual rate, in percent, accepted by the EMI calculator.
pub const MAX_ANNUAL_RATE_PERCENT: f64 = 100.0;

/// Bounded-input failures raised instead of propagating NaN or overflowed results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} of {value} exceeds the supported magnitude of {limit}")]
    AmountOutOfRange {
        field: &'static str,
        value: f64,
        limit: f64,
    },
    #[error("tenure of {months} months exceeds the maximum of {max}")]
    TenureOutOfRange { months: i64, max: i64 },
    #[error("annual rate {rate}% must be between 0 and {max}")]
    RateOutOfRange { rate: f64, max: f64 },
    #[error("an installment of {emi} never repays a principal of {principal} over {months} months")]
    NonAmortizing {
        principal: Decimal,
        emi: Decimal,
        months: i64,
    },
    #[error("numeric overflow while computing {operation}")]
    NumericOverflow { operation: &'static str },
}

pub(crate) fn check_tenure(months: i64) -> Result<(), EngineError> {
    if months > MAX_TENURE_MONTHS {
        return Err(EngineError::TenureOutOfRange {
            months,
            max: MAX_TENURE_MONTHS,
        });
    }
    Ok(())
}

pub(crate) fn check_rate(rate: f64) -> Result<(), EngineError> {
    if !rate.is_finite() {
        return Err(EngineError::NonFinite {
            field: "annual_rate",
        });
    }
    if !(0.0..=MAX_ANNUAL_RATE_PERCENT).contains(&rate) {
        return Err(EngineError::RateOutOfRange {
            rate,
            max: MAX_ANNUAL_RATE_PERCENT,
        });
    }
    Ok(())
}
