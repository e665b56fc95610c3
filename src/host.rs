//! Execution environment seen by the sale: caller, value, clock, balances
//! and the external asset ledger.

use alloc::vec::Vec;

use alloy_primitives::{Address, U256};

use crate::errors::{BalanceQueryFailed, Errors, TransferFailed, ValueTransferFailed};
use crate::events::SaleEvent;

/// External ERC20 ledger holding the asset being sold.
///
/// Errors carry the raw revert data of the failed call.
pub trait AssetLedger {
    /// Balance of `account` on the `token` ledger
    fn balance_of(&mut self, token: Address, account: Address) -> Result<U256, Vec<u8>>;

    /// Move `amount` of `token` from the sale's own holdings to `to`
    fn transfer(&mut self, token: Address, to: Address, amount: U256) -> Result<bool, Vec<u8>>;
}

/// The transaction currently executing against the sale
pub trait Host: AssetLedger {
    /// Account that invoked the current operation
    fn sender(&self) -> Address;

    /// Native currency attached to the current operation
    fn value(&self) -> U256;

    /// Block timestamp in seconds
    fn timestamp(&self) -> u64;

    /// Address of the sale itself
    fn contract_address(&self) -> Address;

    /// Native currency held by the sale, including the attached value
    fn balance(&self) -> U256;

    /// Send native currency from the sale to `to`
    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>>;

    /// Record an event in the transaction log
    fn emit(&mut self, event: SaleEvent);
}

/// Transfer asset out of the sale, treating a `false` return the same as a revert
pub fn transfer_asset<H: AssetLedger>(
    host: &mut H,
    token: Address,
    to: Address,
    amount: U256,
) -> Result<(), Errors> {
    match host.transfer(token, to, amount) {
        Ok(transfer_success) => {
            if transfer_success {
                Ok(())
            } else {
                Err(Errors::TransferFailed(TransferFailed {}))
            }
        }
        Err(_) => Err(Errors::TransferFailed(TransferFailed {})),
    }
}

/// Asset balance currently held by the sale
pub fn asset_balance<H: Host>(host: &mut H, token: Address) -> Result<U256, Errors> {
    let sale = host.contract_address();
    host.balance_of(token, sale)
        .map_err(|_| Errors::BalanceQueryFailed(BalanceQueryFailed {}))
}

/// Send native currency out of the sale
pub fn send_value<H: Host>(host: &mut H, to: Address, amount: U256) -> Result<(), Errors> {
    host.transfer_value(to, amount)
        .map_err(|_| Errors::ValueTransferFailed(ValueTransferFailed {}))
}
