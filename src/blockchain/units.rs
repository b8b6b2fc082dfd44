use ethers::types::U256;
use ethers::utils::format_ether;

/// Render a base-unit amount as a decimal string on the 18-decimal
/// "ether" scale, with trailing zeros trimmed (`2000000000000000000`
/// becomes `"2"`, not `"2.000000000000000000"`).
///
/// Every asset goes through this same divisor, contract tokens included.
/// Tokens whose contracts use fewer than 18 decimals (mainnet USDT and
/// USDC use 6) come out scaled down accordingly.
pub fn to_decimal_string(base_units: U256) -> String {
    let ether = format_ether(base_units);
    ether.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::utils::parse_ether;

    #[test]
    fn test_whole_amounts_have_no_fraction() {
        assert_eq!(to_decimal_string(U256::exp10(18) * 2u64), "2");
        assert_eq!(to_decimal_string(U256::exp10(18)), "1");
    }

    #[test]
    fn test_zero() {
        assert_eq!(to_decimal_string(U256::zero()), "0");
    }

    #[test]
    fn test_fractional_amounts_keep_significant_digits() {
        assert_eq!(to_decimal_string(U256::exp10(17) * 15u64), "1.5");
        assert_eq!(to_decimal_string(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_round_trips_through_parse_ether() {
        let amounts = [
            U256::zero(),
            U256::from(1u64),
            U256::exp10(18) * 2u64,
            U256::exp10(17) * 15u64,
            U256::from(123_456_789_000_000_000u64),
        ];
        for amount in amounts {
            let rendered = to_decimal_string(amount);
            assert_eq!(parse_ether(&rendered).unwrap(), amount, "{rendered}");
        }
    }
}
