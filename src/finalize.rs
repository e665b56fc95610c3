//! One-shot sweep of unsold tokens and collected currency to the owner

use alloy_primitives::U256;

use crate::errors::{AlreadyFinalized, Errors};
use crate::events::{Finalize, SaleEvent};
use crate::host::{asset_balance, send_value, transfer_asset, Host};
use crate::ownable::only_owner;
use crate::sale::validate_is_initialized;
use crate::storage::{non_reentrant, SaleStorage};

/// Send the sale's entire token and native balances to the owner. Can only succeed once.
///
/// The finalized flag is only written once both transfers went through, so a refused
/// transfer leaves the sale finalizable. Reentry during the transfers hits the lock.
pub fn finalize<S: SaleStorage, H: Host>(store: &mut S, host: &mut H) -> Result<(), Errors> {
    validate_is_initialized(store)?;
    only_owner(host.sender(), store.owner())?;

    non_reentrant(store, |store| {
        if store.is_finalized() {
            return Err(Errors::AlreadyFinalized(AlreadyFinalized {}))
        }

        let owner = store.owner();
        let token = store.config().token;

        let tokens_returned = asset_balance(host, token)?;
        if tokens_returned > U256::ZERO {
            transfer_asset(host, token, owner, tokens_returned)?;
        }

        let value_returned = host.balance();
        if value_returned > U256::ZERO {
            send_value(host, owner, value_returned)?;
        }

        store.set_finalized();

        host.emit(SaleEvent::Finalize(Finalize {
            tokens_sold: store.tokens_sold(),
            value_returned,
        }));

        Ok(())
    })
}
