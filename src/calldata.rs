//! Classification of raw transaction input before it reaches the ABI router

/// What a transaction asks of the sale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Calldata<'a> {
    /// Empty input: a plain currency transfer, handled as a direct payment
    Payment,
    /// A 4-byte function selector followed by its ABI-encoded arguments
    Call { selector: u32, args: &'a [u8] },
    /// One to three bytes; no method can match
    Malformed,
}

impl<'a> Calldata<'a> {
    pub fn parse(input: &'a [u8]) -> Self {
        match input {
            [] => Calldata::Payment,
            [a, b, c, d, args @ ..] => Calldata::Call {
                selector: u32::from_be_bytes([*a, *b, *c, *d]),
                args,
            },
            _ => Calldata::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use alloy_sol_types::{sol, SolCall};

    sol! {
        function buyTokens(uint256 amount) external payable;
        function finalize() external;
    }

    #[test]
    fn empty_input_is_a_payment() {
        assert_eq!(Calldata::parse(&[]), Calldata::Payment);
    }

    #[test]
    fn short_input_is_malformed() {
        assert_eq!(Calldata::parse(&[0x01]), Calldata::Malformed);
        assert_eq!(Calldata::parse(&[0x01, 0x02, 0x03]), Calldata::Malformed);
    }

    #[test]
    fn selector_and_arguments_are_split() {
        let input = buyTokensCall {
            amount: U256::from(10),
        }
        .abi_encode();

        match Calldata::parse(&input) {
            Calldata::Call { selector, args } => {
                assert_eq!(selector.to_be_bytes(), buyTokensCall::SELECTOR);
                assert_eq!(args, &input[4..]);
                assert_eq!(args.len(), 32);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bare_selector_has_no_arguments() {
        let input = finalizeCall {}.abi_encode();

        assert_eq!(
            Calldata::parse(&input),
            Calldata::Call {
                selector: u32::from_be_bytes(finalizeCall::SELECTOR),
                args: &[],
            }
        );
    }
}
