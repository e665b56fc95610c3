//! Sale engine: initialization, pricing, purchase validation and execution.
//!
//! The sale is open while the block timestamp is before the deadline. There is
//! no stored phase; "closed" is always derived from the clock.

use alloy_primitives::{Address, U256};

use crate::errors::{
    AboveMaximum, AlreadyInitialized, ArithmeticOverflow, BelowMinimum, Errors,
    InsufficientPayment, InvalidContributionBounds, NotInitialized, NotWhitelisted, SaleClosed,
    SoldOut, ZeroValueArgumentInjected,
};
use crate::events::{Buy, PriceUpdated, SaleEvent};
use crate::host::{transfer_asset, Host};
use crate::ownable::only_owner;
use crate::storage::{non_reentrant, SaleConfig, SaleStorage};

/// Fixed-point denominator of prices and token amounts (18 decimals)
pub const SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Initialize the sale, making the caller its owner
///
/// # Arguments
///
/// * `config` - Token, supply, deadline and contribution bounds, immutable afterwards
/// * `price` - Native currency per whole token, scaled by [`SCALE`]
pub fn init<S: SaleStorage, H: Host>(
    store: &mut S,
    host: &mut H,
    config: SaleConfig,
    price: U256,
) -> Result<(), Errors> {
    // Perform required validation
    validate_initialization(store)?;
    validate_price(price)?;
    validate_address(config.token)?;
    validate_non_zero(config.max_tokens)?;
    validate_non_zero(config.min_contribution)?;
    if config.min_contribution > config.max_contribution {
        return Err(Errors::InvalidContributionBounds(InvalidContributionBounds {}))
    }

    store.set_initialized();
    store.set_owner(host.sender());
    store.set_config(config);
    store.set_price(price);

    Ok(())
}

/// Buy exactly `amount` base units, paying with the value attached to the call.
/// Any excess payment stays with the sale.
pub fn buy_tokens<S: SaleStorage, H: Host>(
    store: &mut S,
    host: &mut H,
    amount: U256,
) -> Result<(), Errors> {
    validate_is_initialized(store)?;

    non_reentrant(store, |store| {
        let buyer = host.sender();
        validate_purchase(store, host, buyer, amount)?;

        let cost = cost_of(amount, store.price())?;
        if host.value() < cost {
            return Err(Errors::InsufficientPayment(InsufficientPayment {}))
        }

        execute_purchase(store, host, buyer, amount)
    })
}

/// Plain currency payment: buys as many base units as the attached value covers
pub fn receive_payment<S: SaleStorage, H: Host>(store: &mut S, host: &mut H) -> Result<(), Errors> {
    validate_is_initialized(store)?;

    non_reentrant(store, |store| {
        let buyer = host.sender();
        let amount = amount_for(host.value(), store.price())?;
        validate_purchase(store, host, buyer, amount)?;

        execute_purchase(store, host, buyer, amount)
    })
}

/// Owner-only price update
pub fn set_price<S: SaleStorage, H: Host>(
    store: &mut S,
    host: &mut H,
    new_price: U256,
) -> Result<(), Errors> {
    validate_is_initialized(store)?;
    only_owner(host.sender(), store.owner())?;
    validate_price(new_price)?;

    let old_price = store.price();
    store.set_price(new_price);

    host.emit(SaleEvent::PriceUpdated(PriceUpdated {
        old_price,
        new_price,
    }));

    Ok(())
}

/// Whether purchases are still accepted at the current block time
pub fn is_open<S: SaleStorage, H: Host>(store: &S, host: &H) -> bool {
    U256::from(host.timestamp()) < store.config().deadline
}

/// Currency owed for `amount` base units at `price`
pub fn cost_of(amount: U256, price: U256) -> Result<U256, Errors> {
    amount
        .checked_mul(price)
        .map(|scaled| scaled / SCALE)
        .ok_or(Errors::ArithmeticOverflow(ArithmeticOverflow {}))
}

/// Base units bought by `value` at `price`, rounded down
pub fn amount_for(value: U256, price: U256) -> Result<U256, Errors> {
    validate_price(price)?;

    value
        .checked_mul(SCALE)
        .map(|scaled| scaled / price)
        .ok_or(Errors::ArithmeticOverflow(ArithmeticOverflow {}))
}

/// Function ensuring we are initialized
pub fn validate_is_initialized<S: SaleStorage>(store: &S) -> Result<(), Errors> {
    if !store.is_initialized() {
        return Err(Errors::NotInitialized(NotInitialized {}))
    }

    Ok(())
}

/// Function ensuring we are not already initialized
fn validate_initialization<S: SaleStorage>(store: &S) -> Result<(), Errors> {
    if store.is_initialized() {
        return Err(Errors::AlreadyInitialized(AlreadyInitialized {}))
    }

    Ok(())
}

/// Function ensuring a zero price never reaches storage, since direct payments divide by it
fn validate_price(price: U256) -> Result<(), Errors> {
    validate_non_zero(price)
}

fn validate_non_zero(value: U256) -> Result<(), Errors> {
    if value == U256::ZERO {
        return Err(Errors::ZeroValueArgumentInjected(ZeroValueArgumentInjected {}))
    }

    Ok(())
}

fn validate_address(value: Address) -> Result<(), Errors> {
    if value == Address::ZERO {
        return Err(Errors::ZeroValueArgumentInjected(ZeroValueArgumentInjected {}))
    }

    Ok(())
}

/// Checks shared by both purchase paths, in the order buyers hit them
fn validate_purchase<S: SaleStorage, H: Host>(
    store: &S,
    host: &H,
    buyer: Address,
    amount: U256,
) -> Result<(), Errors> {
    let config = store.config();

    if !store.is_whitelisted(buyer) {
        return Err(Errors::NotWhitelisted(NotWhitelisted {}))
    }

    if !is_open(store, host) {
        return Err(Errors::SaleClosed(SaleClosed {}))
    }

    if amount < config.min_contribution {
        return Err(Errors::BelowMinimum(BelowMinimum {}))
    }

    if amount > config.max_contribution {
        return Err(Errors::AboveMaximum(AboveMaximum {}))
    }

    let tokens_sold = store
        .tokens_sold()
        .checked_add(amount)
        .ok_or(Errors::ArithmeticOverflow(ArithmeticOverflow {}))?;
    if tokens_sold > config.max_tokens {
        return Err(Errors::SoldOut(SoldOut {}))
    }

    Ok(())
}

/// Record the sale, then hand over the tokens. The counter moves before the
/// external call so a reentrant ledger sees the updated total, and moves back
/// if the ledger refuses.
fn execute_purchase<S: SaleStorage, H: Host>(
    store: &mut S,
    host: &mut H,
    buyer: Address,
    amount: U256,
) -> Result<(), Errors> {
    let previous = store.tokens_sold();
    store.set_tokens_sold(previous + amount);

    if let Err(e) = transfer_asset(host, store.config().token, buyer, amount) {
        store.set_tokens_sold(previous);
        return Err(e)
    }

    host.emit(SaleEvent::Buy(Buy { amount, buyer }));

    Ok(())
}
