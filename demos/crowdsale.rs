//! Talks to a deployed `OwlCrowdsale`.
//!
//! Reads `RPC_URL`, `PRIV_KEY_PATH` and `STYLUS_CONTRACT_ADDRESS` from the environment or `.env`.
//!
//! ```text
//! cargo run --example crowdsale                       # print sale status
//! cargo run --example crowdsale -- whitelist <addr>   # owner only
//! cargo run --example crowdsale -- price <ether>      # owner only
//! cargo run --example crowdsale -- buy <tokens>
//! cargo run --example crowdsale -- finalize           # owner only
//! ```

use dotenv::dotenv;
use ethers::{
    middleware::SignerMiddleware,
    prelude::abigen,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TransactionReceipt, U256},
    utils::parse_ether,
};
use eyre::eyre;
use std::io::{BufRead, BufReader};
use std::str::FromStr;
use std::sync::Arc;

/// Your private key file path.
const PRIV_KEY_PATH: &str = "PRIV_KEY_PATH";

/// Stylus RPC endpoint url.
const RPC_URL: &str = "RPC_URL";

/// Deployed crowdsale address.
const STYLUS_CONTRACT_ADDRESS: &str = "STYLUS_CONTRACT_ADDRESS";

abigen!(
    OwlCrowdsale,
    r#"[
        function price() external view returns (uint256)
        function tokensSold() external view returns (uint256)
        function token() external view returns (address)
        function owner() external view returns (address)
        function deadline() external view returns (uint256)
        function isOpen() external view returns (bool)
        function finalized() external view returns (bool)
        function whitelist(address) external view returns (bool)
        function whitelistAddress(address) external
        function setPrice(uint256) external
        function buyTokens(uint256) external payable
        function finalize() external
    ]"#
);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();

    let priv_key_path =
        std::env::var(PRIV_KEY_PATH).map_err(|_| eyre!("No {} env var set", PRIV_KEY_PATH))?;
    let rpc_url = std::env::var(RPC_URL).map_err(|_| eyre!("No {} env var set", RPC_URL))?;
    let contract_address = std::env::var(STYLUS_CONTRACT_ADDRESS)
        .map_err(|_| eyre!("No {} env var set", STYLUS_CONTRACT_ADDRESS))?;

    let provider = Provider::<Http>::try_from(rpc_url)?;
    let address: Address = contract_address.parse()?;

    let privkey = read_secret_from_file(&priv_key_path)?;
    let wallet = LocalWallet::from_str(&privkey)?;
    let chain_id = provider.get_chainid().await?.as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.clone().with_chain_id(chain_id),
    ));

    let crowdsale = OwlCrowdsale::new(address, client);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("whitelist") => {
            let account: Address = argument(&args, 1)?.parse()?;
            let call = crowdsale.whitelist_address(account);
            report(call.send().await?.await?);
        }
        Some("price") => {
            let price = parse_ether(argument(&args, 1)?)?;
            let call = crowdsale.set_price(price);
            report(call.send().await?.await?);
        }
        Some("buy") => {
            let amount = parse_ether(argument(&args, 1)?)?;
            let price = crowdsale.price().call().await?;
            let cost = amount * price / parse_ether(1)?;
            let call = crowdsale.buy_tokens(amount).value(cost);
            report(call.send().await?.await?);
        }
        Some("finalize") => {
            let call = crowdsale.finalize();
            report(call.send().await?.await?);
        }
        Some(other) => return Err(eyre!("unknown command {}", other)),
        None => {}
    }

    let price: U256 = crowdsale.price().call().await?;
    let tokens_sold: U256 = crowdsale.tokens_sold().call().await?;
    println!("Token = {:?}", crowdsale.token().call().await?);
    println!("Owner = {:?}", crowdsale.owner().call().await?);
    println!("Price = {}", price);
    println!("Tokens sold = {}", tokens_sold);
    println!("Deadline = {}", crowdsale.deadline().call().await?);
    println!("Open = {}", crowdsale.is_open().call().await?);
    println!("Finalized = {}", crowdsale.finalized().call().await?);
    println!(
        "Whitelisted ({:?}) = {}",
        wallet.address(),
        crowdsale.whitelist(wallet.address()).call().await?
    );

    Ok(())
}

fn argument(args: &[String], index: usize) -> eyre::Result<&str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| eyre!("missing argument {}", index))
}

fn report(receipt: Option<TransactionReceipt>) {
    match receipt {
        Some(receipt) => println!("Receipt = {:?}", receipt.transaction_hash),
        None => println!("Transaction dropped from mempool"),
    }
}

fn read_secret_from_file(fpath: &str) -> eyre::Result<String> {
    let f = std::fs::File::open(fpath)?;
    let mut buf_reader = BufReader::new(f);
    let mut secret = String::new();
    buf_reader.read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}
