//! Solidity events emitted by the crowdsale

use alloy_sol_types::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    event Buy(uint256 amount, address buyer);
    #[derive(Debug, PartialEq, Eq)]
    event Finalize(uint256 tokens_sold, uint256 value_returned);
    #[derive(Debug, PartialEq, Eq)]
    event AddressWhitelisted(address indexed account);
    #[derive(Debug, PartialEq, Eq)]
    event PriceUpdated(uint256 old_price, uint256 new_price);
    #[derive(Debug, PartialEq, Eq)]
    event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
}

/// Every event the sale can emit, handed to the host for logging
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaleEvent {
    Buy(Buy),
    Finalize(Finalize),
    AddressWhitelisted(AddressWhitelisted),
    PriceUpdated(PriceUpdated),
    OwnershipTransferred(OwnershipTransferred),
}
