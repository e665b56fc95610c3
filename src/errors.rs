//! Solidity custom errors raised by the crowdsale

use alloy_sol_types::sol;
use stylus_sdk::prelude::*;

sol! {
    #[derive(Debug)]
    error NotInitialized();
    #[derive(Debug)]
    error AlreadyInitialized();
    #[derive(Debug)]
    error Unauthorized();
    #[derive(Debug)]
    error ZeroValueArgumentInjected();
    #[derive(Debug)]
    error InvalidContributionBounds();
    #[derive(Debug)]
    error NotWhitelisted();
    #[derive(Debug)]
    error SaleClosed();
    #[derive(Debug)]
    error BelowMinimum();
    #[derive(Debug)]
    error AboveMaximum();
    #[derive(Debug)]
    error SoldOut();
    #[derive(Debug)]
    error InsufficientPayment();
    #[derive(Debug)]
    error ArithmeticOverflow();
    #[derive(Debug)]
    error TransferFailed();
    #[derive(Debug)]
    error BalanceQueryFailed();
    #[derive(Debug)]
    error ValueTransferFailed();
    #[derive(Debug)]
    error AlreadyFinalized();
    #[derive(Debug)]
    error ReentrantCall();
}

/// Exporting Solidity errors defined in sol! as Rust enums
#[derive(Debug, SolidityError)]
pub enum Errors {
    NotInitialized(NotInitialized),
    AlreadyInitialized(AlreadyInitialized),
    Unauthorized(Unauthorized),
    ZeroValueArgumentInjected(ZeroValueArgumentInjected),
    InvalidContributionBounds(InvalidContributionBounds),
    NotWhitelisted(NotWhitelisted),
    SaleClosed(SaleClosed),
    BelowMinimum(BelowMinimum),
    AboveMaximum(AboveMaximum),
    SoldOut(SoldOut),
    InsufficientPayment(InsufficientPayment),
    ArithmeticOverflow(ArithmeticOverflow),
    TransferFailed(TransferFailed),
    BalanceQueryFailed(BalanceQueryFailed),
    ValueTransferFailed(ValueTransferFailed),
    AlreadyFinalized(AlreadyFinalized),
    ReentrantCall(ReentrantCall),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolError;

    #[test]
    fn revert_data_starts_with_error_selector() {
        let data: Vec<u8> = Errors::SaleClosed(SaleClosed {}).into();
        assert_eq!(&data[..4], SaleClosed::SELECTOR.as_slice());

        let data: Vec<u8> = Errors::NotWhitelisted(NotWhitelisted {}).into();
        assert_eq!(&data[..4], NotWhitelisted::SELECTOR.as_slice());
    }
}
