//! Demo walkthrough of the fully sponsored, gasless cross-chain flow.
//!
//! ```bash
//! GLIDE_QUOTE_TOKEN=... GLIDE_API_KEY=... GLIDE_SIGNER_KEY=... \
//!   cargo run --bin glide -- \
//!     --user 0x... --delegate 0x... --amount 10000000
//! ```
//!
//! Secrets come from the environment, never from flags:
//! - `GLIDE_QUOTE_TOKEN`: bearer token for the quote endpoint
//! - `GLIDE_API_KEY`: service key for the execute endpoint
//! - `GLIDE_SIGNER_KEY`: hex secp256k1 key for the 7702 authorization

use alloy::primitives::Address;
use alloy::providers::ProviderBuilder;
use anyhow::Result;
use clap::Parser;
use glide_auth::{AuthorizationSigner, DelegationAuthorization};
use glide_chain::{ChainReader, DelegationStatus};
use glide_ops::{Engine, FlowEvent, FlowOutcome, FlowParams, fees};
use glide_relay::{ExecutionClient, QuoteClient, StatusPoller};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "glide")]
#[command(about = "Gasless cross-chain transfer demo against a relay service")]
struct Args {
    /// Origin chain RPC endpoint
    #[arg(long)]
    rpc_url: String,

    /// Relay API base URL
    #[arg(long)]
    relay_url: String,

    /// Account performing the transfer
    #[arg(long)]
    user: Address,

    /// Recipient on the destination chain (defaults to the user)
    #[arg(long)]
    recipient: Option<Address>,

    #[arg(long, default_value_t = 8453)]
    origin_chain_id: u64,

    #[arg(long, default_value_t = 42161)]
    destination_chain_id: u64,

    /// Origin currency address (zero address for the native token)
    #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
    origin_currency: String,

    /// Destination currency address
    #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
    destination_currency: String,

    /// Amount in the origin currency's smallest unit
    #[arg(long)]
    amount: String,

    /// Expected EIP-7702 delegation implementation
    #[arg(long)]
    delegate: Address,

    /// Cap on the sponsored amount, in USD
    #[arg(long, default_value = "1.00")]
    max_subsidy_usd: String,

    /// Referrer tag sent with the execution request
    #[arg(long)]
    referrer: Option<String>,

    #[arg(long, default_value_t = 2000)]
    poll_interval_ms: u64,

    #[arg(long, default_value_t = 60)]
    poll_max_attempts: u32,

    /// Without a signing key, substitute a labeled inert authorization
    /// instead of failing. Demo mode only; no delegation is established.
    #[arg(long)]
    allow_unsigned_demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt::init();

    let quote_token = std::env::var("GLIDE_QUOTE_TOKEN").ok();
    let api_key = std::env::var("GLIDE_API_KEY").ok();
    let signer_key = std::env::var("GLIDE_SIGNER_KEY").ok();

    let signer = AuthorizationSigner::from_key_hex(signer_key.as_deref(), args.allow_unsigned_demo)?;
    if let Some(address) = signer.signer_address() {
        info!(%address, "signing key loaded");
    }

    let provider = ProviderBuilder::new().connect_http(args.rpc_url.parse()?);
    let params = FlowParams {
        user: args.user,
        recipient: args.recipient.unwrap_or(args.user),
        origin_chain_id: args.origin_chain_id,
        destination_chain_id: args.destination_chain_id,
        origin_currency: args.origin_currency.clone(),
        destination_currency: args.destination_currency.clone(),
        amount: args.amount.clone(),
        expected_delegate: args.delegate,
        max_subsidization_usd: args.max_subsidy_usd.clone(),
        referrer: args.referrer.clone(),
        poll_interval: Duration::from_millis(args.poll_interval_ms),
        poll_max_attempts: args.poll_max_attempts,
    };

    let engine = Engine::new(
        ChainReader::new(provider, args.origin_chain_id),
        QuoteClient::new(&args.relay_url, quote_token.as_deref(), None),
        ExecutionClient::new(&args.relay_url, api_key.as_deref(), None),
        StatusPoller::new(&args.relay_url, None),
        signer,
        params,
    );

    println!("Gasless transfer: {} -> chain {}", args.user, args.destination_chain_id);

    let outcome = engine
        .run(|event| match event {
            FlowEvent::DelegationChecked(state) => match state.status {
                DelegationStatus::DelegatedToExpected => {
                    println!("[1/5] Account already delegated to {}", state.expected_delegate);
                }
                DelegationStatus::PlainAccount => {
                    println!("[1/5] Plain account; a delegation authorization will be signed");
                }
                DelegationStatus::DelegatedToOther { current } => {
                    println!(
                        "[1/5] Account delegated elsewhere ({}); re-authorization needed",
                        current
                    );
                }
            },
            FlowEvent::Quoted(quote) => {
                println!("[2/5] Quote received");
                print!("{}", fees::render_fee_breakdown(&quote));
            }
            FlowEvent::Authorized(auth) => match auth {
                DelegationAuthorization::Reused { .. } => {
                    println!("[3/5] Reusing the existing delegation; no signature needed");
                }
                DelegationAuthorization::Placeholder { .. } => {
                    println!(
                        "[3/5] WARNING: inert placeholder authorization (demo mode); \
                         delegation will NOT be established"
                    );
                }
                DelegationAuthorization::Signed(_) => {
                    println!("[3/5] Delegation authorization signed");
                }
            },
            FlowEvent::Submitted { request_id, message } => {
                println!("[4/5] Execution submitted, request id {}", request_id);
                if let Some(message) = message {
                    println!("      relay: {}", message);
                }
            }
        })
        .await?;

    match outcome {
        FlowOutcome::NothingToExecute { .. } => {
            println!("[5/5] Nothing to execute; the balance is already settled.");
        }
        FlowOutcome::Completed { request_id, snapshot } => {
            println!("[5/5] Execution succeeded ({})", request_id);
            if let Some(hash) = snapshot.destination_tx_hash() {
                println!("      destination tx: {}", hash);
            }
        }
    }

    Ok(())
}
