//! Owner-managed registry of approved buyers

use alloy_primitives::Address;

use crate::errors::{Errors, ZeroValueArgumentInjected};
use crate::events::{AddressWhitelisted, SaleEvent};
use crate::host::Host;
use crate::ownable::only_owner;
use crate::sale::validate_is_initialized;
use crate::storage::SaleStorage;

/// Approve `account` to buy tokens. Adding an address twice is a no-op.
pub fn whitelist_address<S: SaleStorage, H: Host>(
    store: &mut S,
    host: &mut H,
    account: Address,
) -> Result<(), Errors> {
    validate_is_initialized(store)?;
    only_owner(host.sender(), store.owner())?;

    if account == Address::ZERO {
        return Err(Errors::ZeroValueArgumentInjected(ZeroValueArgumentInjected {}))
    }

    if store.is_whitelisted(account) {
        return Ok(())
    }

    store.add_to_whitelist(account);
    host.emit(SaleEvent::AddressWhitelisted(AddressWhitelisted { account }));

    Ok(())
}

/// Function ensuring a buyer was approved by the owner
///
/// # Arguments
///
/// * `account` - The buyer to look up
pub fn is_whitelisted<S: SaleStorage>(store: &S, account: Address) -> bool {
    store.is_whitelisted(account)
}
