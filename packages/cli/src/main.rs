//! Basemint console
//!
//! Command-line frontend for the token factory: deploy tokens and manage
//! the ones you own. Write commands validate locally, submit through the
//! wallet, and report each lifecycle stage; read commands aggregate
//! on-chain state into records.

mod config;
mod output;

use clap::{Parser, Subcommand};
use eyre::{bail, eyre, Result};

use basemint::evm::{EvmReader, EvmSubmitter};
use basemint::validate::{
    validate_burn, validate_create, validate_mint, validate_pause, validate_transfer,
    validate_transfer_ownership, FieldError,
};
use basemint::{
    explorer, BurnInput, CallBuilder, CreateTokenInput, FactoryRegistry, MintInput, PauseAction,
    PauseInput, TokenCall, TokenListing, TransferInput, TransferOwnershipInput, TxStage,
    TxTracker,
};
use config::Config;
use output::TokenView;

#[derive(Parser)]
#[command(name = "basemint", about = "Deploy and manage Basemint tokens")]
struct Cli {
    /// Emit records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy a new token through the factory
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        initial_supply: String,
        /// Maximum total supply; omit or pass 0 for uncapped
        #[arg(long, default_value = "")]
        cap: String,
        #[arg(long)]
        mintable: bool,
        #[arg(long)]
        burnable: bool,
        #[arg(long)]
        pausable: bool,
    },
    /// Mint new tokens to an address (owner only, mintable tokens)
    Mint {
        token: String,
        to: String,
        amount: String,
    },
    /// Burn tokens from your balance (burnable tokens)
    Burn { token: String, amount: String },
    /// Transfer tokens to an address
    Transfer {
        token: String,
        to: String,
        amount: String,
    },
    /// Pause all transfers (owner only, pausable tokens)
    Pause { token: String },
    /// Resume transfers (owner only)
    Unpause { token: String },
    /// Hand the token to a new owner
    TransferOwnership { token: String, new_owner: String },
    /// List tokens the factory deployed for an owner
    List {
        /// Owner address; defaults to the configured signer
        #[arg(long)]
        owner: Option<String>,
    },
    /// Show one token's detail, including your balance
    Show { token: String },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!(?config, "configuration loaded");

    let registry = build_registry(&config)?;
    let builder = CallBuilder::new(registry.clone());

    match cli.command {
        Command::Create {
            name,
            symbol,
            initial_supply,
            cap,
            mintable,
            burnable,
            pausable,
        } => {
            let input = CreateTokenInput {
                name,
                symbol,
                initial_supply,
                cap,
                is_mintable: mintable,
                is_burnable: burnable,
                is_pausable: pausable,
            };
            check_fields(validate_create(&input))?;
            let Some(call) = builder.create_token(&input, config.chain_id)? else {
                println!("The token factory is not deployed on this network yet.");
                return Ok(());
            };
            let stage = run_write(&config, &call).await?;
            report_created(&config, &stage).await?;
        }
        Command::Mint { token, to, amount } => {
            let input = MintInput { token, to, amount };
            check_fields(validate_mint(&input))?;
            run_write(&config, &builder.mint(&input)?).await?;
        }
        Command::Burn { token, amount } => {
            let input = BurnInput { token, amount };
            check_fields(validate_burn(&input))?;
            run_write(&config, &builder.burn(&input)?).await?;
        }
        Command::Transfer { token, to, amount } => {
            let input = TransferInput { token, to, amount };
            check_fields(validate_transfer(&input))?;
            run_write(&config, &builder.transfer(&input)?).await?;
        }
        Command::Pause { token } => {
            let input = PauseInput {
                token,
                action: PauseAction::Pause,
            };
            check_fields(validate_pause(&input))?;
            run_write(&config, &builder.toggle_pause(&input)?).await?;
        }
        Command::Unpause { token } => {
            let input = PauseInput {
                token,
                action: PauseAction::Unpause,
            };
            check_fields(validate_pause(&input))?;
            run_write(&config, &builder.toggle_pause(&input)?).await?;
        }
        Command::TransferOwnership { token, new_owner } => {
            let input = TransferOwnershipInput { token, new_owner };
            check_fields(validate_transfer_ownership(&input))?;
            run_write(&config, &builder.transfer_ownership(&input)?).await?;
        }
        Command::List { owner } => {
            list_tokens(&config, &registry, owner, cli.json).await?;
        }
        Command::Show { token } => {
            show_token(&config, &registry, &token, cli.json).await?;
        }
    }

    Ok(())
}

/// Initialize tracing/logging with structured output
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,basemint=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// The shipped Base registry, with the configured override applied.
fn build_registry(config: &Config) -> Result<FactoryRegistry> {
    let mut registry = FactoryRegistry::base_defaults();
    if let Some(raw) = &config.factory_address {
        let factory = raw
            .parse()
            .map_err(|_| eyre!("FACTORY_ADDRESS is not a valid address: {raw}"))?;
        registry.register(config.chain_id, factory);
    }
    Ok(registry)
}

fn check_fields(result: std::result::Result<(), Vec<FieldError>>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(errors) => {
            for error in &errors {
                eprintln!("  - {error}");
            }
            bail!("validation failed; nothing was submitted")
        }
    }
}

/// Submit one call and drive it to a terminal stage, reporting progress.
async fn run_write(config: &Config, call: &TokenCall) -> Result<TxStage> {
    let key = config
        .private_key
        .as_ref()
        .ok_or_else(|| eyre!("PRIVATE_KEY is required for write commands"))?;

    let submitter = EvmSubmitter::new(&config.rpc_url, key)?
        .with_confirmations(config.confirmations)
        .with_poll_interval(std::time::Duration::from_millis(config.poll_interval_ms));

    let chain_id = config.chain_id;
    let mut tracker = TxTracker::new();
    tracker
        .run_with(&submitter, call, |stage| match stage {
            TxStage::Submitted { hash } => {
                tracing::info!(tx_hash = %hash, "transaction submitted, awaiting inclusion")
            }
            TxStage::Confirming { hash } => {
                tracing::info!(tx_hash = %hash, "included, awaiting confirmations")
            }
            _ => {}
        })
        .await?;

    let stage = tracker.stage().clone();
    match &stage {
        TxStage::Confirmed { hash } => {
            println!("Confirmed: {hash}");
            if let Some(url) = explorer::tx_url(chain_id, *hash) {
                println!("  {url}");
            }
        }
        TxStage::Failed { hash, failure } => {
            tracing::error!(detail = %failure.detail, "transaction failed");
            if let Some(url) = hash.and_then(|h| explorer::tx_url(chain_id, h)) {
                eprintln!("  {url}");
            }
            bail!("{}", failure.short);
        }
        _ => {}
    }
    Ok(stage)
}

/// After a confirmed createToken, look up and print the deployed address.
async fn report_created(config: &Config, stage: &TxStage) -> Result<()> {
    let TxStage::Confirmed { hash } = stage else {
        return Ok(());
    };
    let reader = EvmReader::new(&config.rpc_url)?;
    match reader.created_token(*hash).await {
        Ok(Some(token)) => {
            println!("Token deployed at {token}");
            if let Some(url) = explorer::token_url(config.chain_id, token) {
                println!("  {url}");
            }
        }
        Ok(None) => tracing::warn!("no TokenCreated event found in receipt"),
        Err(e) => tracing::warn!(error = %e, "could not read deployment receipt"),
    }
    Ok(())
}

fn signer_address(config: &Config) -> Result<alloy::primitives::Address> {
    let key = config
        .private_key
        .as_ref()
        .ok_or_else(|| eyre!("pass --owner or set PRIVATE_KEY"))?;
    let signer: alloy::signers::local::PrivateKeySigner =
        key.parse().map_err(|_| eyre!("PRIVATE_KEY is invalid"))?;
    Ok(signer.address())
}

async fn list_tokens(
    config: &Config,
    registry: &FactoryRegistry,
    owner: Option<String>,
    json: bool,
) -> Result<()> {
    let owner = match owner {
        Some(raw) => raw
            .parse()
            .map_err(|_| eyre!("--owner is not a valid address: {raw}"))?,
        None => signer_address(config)?,
    };

    let reader = EvmReader::new(&config.rpc_url)?;
    let aggregator = basemint::TokenAggregator::new(reader, registry.clone());

    match aggregator.owner_tokens(config.chain_id, owner).await? {
        TokenListing::FactoryNotDeployed => {
            println!("The token factory is not deployed on this network yet.");
        }
        TokenListing::Tokens(records) if records.is_empty() => {
            println!("No tokens deployed by {owner} yet.");
        }
        TokenListing::Tokens(records) => {
            let views: Vec<TokenView> = records.iter().map(TokenView::from).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for view in &views {
                    println!("{view}");
                }
            }
        }
    }
    Ok(())
}

async fn show_token(
    config: &Config,
    registry: &FactoryRegistry,
    token: &str,
    json: bool,
) -> Result<()> {
    let address = match basemint::reader::parse_token_address(token) {
        Ok(address) => address,
        Err(_) => {
            // Dedicated state, distinct from an RPC failure.
            println!("`{token}` is not a valid token address.");
            return Ok(());
        }
    };

    let user = signer_address(config).ok();
    let reader = EvmReader::new(&config.rpc_url)?;
    let aggregator = basemint::TokenAggregator::new(reader, registry.clone());

    match aggregator.token_detail(address, user).await? {
        None => println!("No token found at {address} on this network."),
        Some(record) => {
            let view = TokenView::from(&record);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("{view}");
            }
        }
    }
    Ok(())
}
