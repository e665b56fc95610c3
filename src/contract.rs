//! Stylus entrypoint. The program is ABI-equivalent with Solidity, which means you can call it
//! from both Solidity and Rust. To do this, run `cargo stylus export-abi`.
//!
//! Calldata is routed by hand so that a plain ETH transfer (empty calldata) buys tokens
//! instead of reverting; everything else goes through the `#[public]` router.

use alloc::vec::Vec;

use stylus_sdk::{
    abi::Router,
    alloy_primitives::{Address, U256},
    block,           // block::timestamp
    call::{self, Call},
    console,
    contract,        // contract::address / contract::balance
    evm,             // Events
    msg,             // msg::sender / msg::value
    prelude::*,
    ArbResult,
};

use crate::calldata::Calldata;
use crate::errors::Errors;
use crate::events::SaleEvent;
use crate::host::{AssetLedger, Host};
use crate::storage::{SaleConfig, SaleStorage};
use crate::{finalize, ownable, sale, whitelist};

sol_interface! {
    interface IERC20 {
        function balanceOf(address) external view returns (uint256);
        function transfer(address, uint256) external returns (bool);
    }
}

sol_storage! {
    pub struct OwlCrowdsale {
        bool initialized;                       // Required before contract usage
        bool finalized;                         // Set once the sale has been swept
        bool locked;                            // Reentrancy lock
        address owner;                          // Smart contract manager
        address token;                          // Token being sold
        uint256 price;                          // Wei per whole token
        uint256 max_tokens;                     // Total base units offered
        uint256 tokens_sold;                    // Base units sold across all buyers
        uint256 deadline;                       // Purchases rejected from this timestamp on
        uint256 min_contribution;               // Smallest purchase in base units
        uint256 max_contribution;               // Largest purchase in base units
        mapping(address => bool) whitelist;     // Approved buyers
    }
}

// Storage lives at slot zero and is only ever entered through `user_main`.
unsafe impl TopLevelStorage for OwlCrowdsale {}

const _: () = {
    OwlCrowdsale::__stylus_assert_overrides();
};

/// Program entrypoint: empty calldata is a direct payment, anything else an ABI call
#[entrypoint]
fn user_main(input: Vec<u8>) -> ArbResult {
    let mut storage = unsafe { <OwlCrowdsale as StorageType>::new(U256::ZERO, 0) };

    match Calldata::parse(&input) {
        Calldata::Payment => storage.receive().map(|_| Vec::new()),
        Calldata::Call { selector, args } => {
            match <OwlCrowdsale as Router<OwlCrowdsale>>::route(&mut storage, selector, args) {
                Some(result) => result,
                None => {
                    console!("unknown method selector: {:08x}", selector);
                    Err(Vec::new())
                }
            }
        }
        Calldata::Malformed => {
            console!("calldata too short: {} bytes", input.len());
            Err(Vec::new())
        }
    }
}

/// Prints the Solidity interface of `OwlCrowdsale`
#[cfg(feature = "export-abi")]
pub fn print_abi(license: &str, pragma: &str) {
    stylus_sdk::abi::export::print_abi::<OwlCrowdsale>(license, pragma);
}

/// External methods for `OwlCrowdsale`
#[public]
impl OwlCrowdsale {
    /// Initialize the smart contract, making the caller its owner
    ///
    /// # Arguments
    ///
    /// * `token` - The address of the ERC20 being sold
    /// * `price` - Wei per whole token
    /// * `max_tokens` - Total base units offered
    /// * `deadline` - Unix timestamp at which purchases stop
    /// * `min_contribution` - Smallest purchase in base units
    /// * `max_contribution` - Largest purchase in base units
    pub fn init(
        &mut self,
        token: Address,
        price: U256,
        max_tokens: U256,
        deadline: U256,
        min_contribution: U256,
        max_contribution: U256,
    ) -> Result<(), Errors> {
        let config = SaleConfig {
            token,
            max_tokens,
            deadline,
            min_contribution,
            max_contribution,
        };

        sale::init(self, &mut EvmHost, config, price)
    }

    /// Main entry point for whitelisted users to buy tokens
    ///
    /// # Arguments
    ///
    /// * `amount` - Number of base units being purchased; the attached value must cover the cost
    #[payable]
    pub fn buy_tokens(&mut self, amount: U256) -> Result<(), Errors> {
        console!("buyTokens amount={} sender={} value={}", amount, msg::sender(), msg::value());
        sale::buy_tokens(self, &mut EvmHost, amount)
    }

    /// Function ensuring only the owner can reprice the remaining tokens
    ///
    /// # Arguments
    ///
    /// * `new_price` - Wei per whole token, must be non-zero
    pub fn set_price(&mut self, new_price: U256) -> Result<(), Errors> {
        sale::set_price(self, &mut EvmHost, new_price)
    }

    /// Function ensuring only the owner can approve buyers
    ///
    /// # Arguments
    ///
    /// * `account` - The buyer to approve; approving twice is a no-op
    pub fn whitelist_address(&mut self, account: Address) -> Result<(), Errors> {
        whitelist::whitelist_address(self, &mut EvmHost, account)
    }

    /// Function ensuring only the owner can hand over the sale
    ///
    /// # Arguments
    ///
    /// * `new_owner` - The next owner, never the zero address
    pub fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), Errors> {
        ownable::transfer_ownership(self, &mut EvmHost, new_owner)
    }

    /// Sweep unsold tokens and collected ETH to the owner
    pub fn finalize(&mut self) -> Result<(), Errors> {
        console!("finalize tokens_sold={} balance={}", self.tokens_sold.get(), contract::balance());
        finalize::finalize(self, &mut EvmHost)
    }

    /// Current price in wei per whole token
    pub fn price(&self) -> U256 {
        self.price.get()
    }

    /// Base units sold so far across all buyers
    pub fn tokens_sold(&self) -> U256 {
        self.tokens_sold.get()
    }

    /// Address of the ERC20 being sold
    pub fn token(&self) -> Address {
        self.token.get()
    }

    /// Whether an account is approved to buy
    ///
    /// # Arguments
    ///
    /// * `account` - The buyer to look up
    pub fn whitelist(&self, account: Address) -> bool {
        whitelist::is_whitelisted(self, account)
    }

    /// Current owner of the sale
    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    /// Unix timestamp from which purchases are rejected
    pub fn deadline(&self) -> U256 {
        self.deadline.get()
    }

    /// Smallest purchase in base units
    pub fn min_contribution(&self) -> U256 {
        self.min_contribution.get()
    }

    /// Largest purchase in base units
    pub fn max_contribution(&self) -> U256 {
        self.max_contribution.get()
    }

    /// Total base units offered
    pub fn max_tokens(&self) -> U256 {
        self.max_tokens.get()
    }

    /// Whether the sale has already been swept to the owner
    pub fn finalized(&self) -> bool {
        self.finalized.get()
    }

    /// Whether purchases are accepted at the current block time
    pub fn is_open(&self) -> bool {
        sale::is_open(self, &EvmHost)
    }
}

impl OwlCrowdsale {
    /// Plain ETH transfers buy as many tokens as the value covers
    fn receive(&mut self) -> Result<(), Vec<u8>> {
        console!("receive sender={} value={}", msg::sender(), msg::value());
        sale::receive_payment(self, &mut EvmHost).map_err(Into::into)
    }
}

impl SaleStorage for OwlCrowdsale {
    fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    fn set_initialized(&mut self) {
        self.initialized.set(true);
    }

    fn owner(&self) -> Address {
        self.owner.get()
    }

    fn set_owner(&mut self, owner: Address) {
        self.owner.set(owner);
    }

    fn config(&self) -> SaleConfig {
        SaleConfig {
            token: self.token.get(),
            max_tokens: self.max_tokens.get(),
            deadline: self.deadline.get(),
            min_contribution: self.min_contribution.get(),
            max_contribution: self.max_contribution.get(),
        }
    }

    fn set_config(&mut self, config: SaleConfig) {
        self.token.set(config.token);
        self.max_tokens.set(config.max_tokens);
        self.deadline.set(config.deadline);
        self.min_contribution.set(config.min_contribution);
        self.max_contribution.set(config.max_contribution);
    }

    fn price(&self) -> U256 {
        self.price.get()
    }

    fn set_price(&mut self, price: U256) {
        self.price.set(price);
    }

    fn tokens_sold(&self) -> U256 {
        self.tokens_sold.get()
    }

    fn set_tokens_sold(&mut self, tokens_sold: U256) {
        self.tokens_sold.set(tokens_sold);
    }

    fn is_whitelisted(&self, account: Address) -> bool {
        self.whitelist.get(account)
    }

    fn add_to_whitelist(&mut self, account: Address) {
        self.whitelist.insert(account, true);
    }

    fn is_finalized(&self) -> bool {
        self.finalized.get()
    }

    fn set_finalized(&mut self) {
        self.finalized.set(true);
    }

    fn is_locked(&self) -> bool {
        self.locked.get()
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked.set(locked);
    }
}

/// The live Stylus VM: message context, block clock, ETH and ERC20 calls
pub struct EvmHost;

impl AssetLedger for EvmHost {
    fn balance_of(&mut self, token: Address, account: Address) -> Result<U256, Vec<u8>> {
        IERC20::new(token)
            .balance_of(Call::new(), account)
            .map_err(Into::into)
    }

    fn transfer(&mut self, token: Address, to: Address, amount: U256) -> Result<bool, Vec<u8>> {
        IERC20::new(token)
            .transfer(Call::new(), to, amount)
            .map_err(Into::into)
    }
}

impl Host for EvmHost {
    fn sender(&self) -> Address {
        msg::sender()
    }

    fn value(&self) -> U256 {
        msg::value()
    }

    fn timestamp(&self) -> u64 {
        block::timestamp()
    }

    fn contract_address(&self) -> Address {
        contract::address()
    }

    fn balance(&self) -> U256 {
        contract::balance()
    }

    fn transfer_value(&mut self, to: Address, amount: U256) -> Result<(), Vec<u8>> {
        call::transfer_eth(to, amount)
    }

    fn emit(&mut self, event: SaleEvent) {
        match event {
            SaleEvent::Buy(event) => evm::log(event),
            SaleEvent::Finalize(event) => evm::log(event),
            SaleEvent::AddressWhitelisted(event) => evm::log(event),
            SaleEvent::PriceUpdated(event) => evm::log(event),
            SaleEvent::OwnershipTransferred(event) => evm::log(event),
        }
    }
}
