//! Single-owner access control

use alloy_primitives::Address;

use crate::errors::{Errors, Unauthorized, ZeroValueArgumentInjected};
use crate::events::{OwnershipTransferred, SaleEvent};
use crate::host::Host;
use crate::sale::validate_is_initialized;
use crate::storage::SaleStorage;

/// Function ensuring the caller is the current owner
pub fn only_owner(caller: Address, owner: Address) -> Result<(), Errors> {
    if caller != owner {
        return Err(Errors::Unauthorized(Unauthorized {}))
    }

    Ok(())
}

/// Hand the sale over to `new_owner`
///
/// # Arguments
///
/// * `new_owner` - Account receiving owner privileges, which must not be the zero address
pub fn transfer_ownership<S: SaleStorage, H: Host>(
    store: &mut S,
    host: &mut H,
    new_owner: Address,
) -> Result<(), Errors> {
    validate_is_initialized(store)?;
    only_owner(host.sender(), store.owner())?;

    if new_owner == Address::ZERO {
        return Err(Errors::ZeroValueArgumentInjected(ZeroValueArgumentInjected {}))
    }

    let previous_owner = store.owner();
    store.set_owner(new_owner);

    host.emit(SaleEvent::OwnershipTransferred(OwnershipTransferred {
        previous_owner,
        new_owner,
    }));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_guard() {
        let owner = Address::repeat_byte(0x01);
        assert!(only_owner(owner, owner).is_ok());
    }

    #[test]
    fn anyone_else_is_unauthorized() {
        let owner = Address::repeat_byte(0x01);
        let stranger = Address::repeat_byte(0x02);

        assert!(matches!(only_owner(stranger, owner), Err(Errors::Unauthorized(_))));
        assert!(matches!(only_owner(Address::ZERO, owner), Err(Errors::Unauthorized(_))));
    }
}
