//! Whitelisted fixed-price crowdsale. The owner funds the sale with an ERC20, approves buyers,
//! and may adjust the price; approved buyers pay ETH for tokens until the deadline, either by
//! calling `buyTokens` or by sending ETH directly. `finalize` sweeps the unsold tokens and the
//! collected ETH back to the owner exactly once.
//!
//! The sale logic is written against [`storage::SaleStorage`] and [`host::Host`], so the same
//! code runs inside the Stylus VM (`OwlCrowdsale`) and natively over [`storage::MemorySale`].

// Allow `cargo stylus export-abi` to generate a main function.
#![cfg_attr(not(any(feature = "export-abi", test)), no_main)]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOC: mini_alloc::MiniAlloc = mini_alloc::MiniAlloc::INIT;

pub mod calldata;
pub mod errors;
pub mod events;
pub mod finalize;
pub mod host;
pub mod ownable;
pub mod sale;
pub mod storage;
pub mod whitelist;

#[cfg(any(target_arch = "wasm32", feature = "export-abi"))]
pub mod contract;


#[cfg(any(target_arch = "wasm32", feature = "export-abi"))]
pub use contract::{EvmHost, OwlCrowdsale};

#[cfg(feature = "export-abi")]
pub use contract::print_abi;

pub use errors::Errors;
pub use events::SaleEvent;
pub use host::{AssetLedger, Host};
pub use storage::{MemorySale, SaleConfig, SaleStorage};
