//! Persistent state of a single deployed sale

use std::collections::HashSet;

use alloy_primitives::{Address, U256};

use crate::errors::{Errors, ReentrantCall};

/// Sale parameters fixed by `init` and never written again
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SaleConfig {
    /// Address of the ERC20 being sold
    pub token: Address,
    /// Total base units offered by the sale
    pub max_tokens: U256,
    /// Unix timestamp at which the sale closes
    pub deadline: U256,
    /// Smallest purchase in base units
    pub min_contribution: U256,
    /// Largest purchase in base units
    pub max_contribution: U256,
}

/// Storage slots the sale logic reads and writes.
///
/// Implemented by the Stylus entrypoint over `sol_storage!` and by
/// [`MemorySale`] for native use.
pub trait SaleStorage {
    fn is_initialized(&self) -> bool;
    fn set_initialized(&mut self);

    fn owner(&self) -> Address;
    fn set_owner(&mut self, owner: Address);

    fn config(&self) -> SaleConfig;
    fn set_config(&mut self, config: SaleConfig);

    fn price(&self) -> U256;
    fn set_price(&mut self, price: U256);

    fn tokens_sold(&self) -> U256;
    fn set_tokens_sold(&mut self, tokens_sold: U256);

    fn is_whitelisted(&self, account: Address) -> bool;
    fn add_to_whitelist(&mut self, account: Address);

    fn is_finalized(&self) -> bool;
    fn set_finalized(&mut self);

    fn is_locked(&self) -> bool;
    fn set_locked(&mut self, locked: bool);
}

/// Plain in-process sale state; one value per deployed sale
#[derive(Clone, Debug, Default)]
pub struct MemorySale {
    initialized: bool,
    owner: Address,
    config: SaleConfig,
    price: U256,
    tokens_sold: U256,
    whitelist: HashSet<Address>,
    finalized: bool,
    locked: bool,
}

impl MemorySale {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaleStorage for MemorySale {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn set_initialized(&mut self) {
        self.initialized = true;
    }

    fn owner(&self) -> Address {
        self.owner
    }

    fn set_owner(&mut self, owner: Address) {
        self.owner = owner;
    }

    fn config(&self) -> SaleConfig {
        self.config
    }

    fn set_config(&mut self, config: SaleConfig) {
        self.config = config;
    }

    fn price(&self) -> U256 {
        self.price
    }

    fn set_price(&mut self, price: U256) {
        self.price = price;
    }

    fn tokens_sold(&self) -> U256 {
        self.tokens_sold
    }

    fn set_tokens_sold(&mut self, tokens_sold: U256) {
        self.tokens_sold = tokens_sold;
    }

    fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.contains(&account)
    }

    fn add_to_whitelist(&mut self, account: Address) {
        self.whitelist.insert(account);
    }

    fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn set_finalized(&mut self) {
        self.finalized = true;
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// Run `operation` while holding the sale's reentrancy lock.
///
/// Fails with `ReentrantCall` if the lock is already held. The lock is
/// released whether `operation` succeeds or fails.
pub fn non_reentrant<S, T, F>(store: &mut S, operation: F) -> Result<T, Errors>
where
    S: SaleStorage,
    F: FnOnce(&mut S) -> Result<T, Errors>,
{
    if store.is_locked() {
        return Err(Errors::ReentrantCall(ReentrantCall {}));
    }

    store.set_locked(true);
    let result = operation(store);
    store.set_locked(false);

    result
}
