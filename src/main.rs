// This is my main entry point for the wallet CLI application
// I'm importing the key readers, builders and config I built for this wallet
use clap::Parser;
use erd_wallet::cli::{KeyArgs, PropertyArgs, TxArgs};
use erd_wallet::core::monetary::conversions::{denominated_to_egld, egld_to_denominated};
use erd_wallet::storage::KEYSTORE_FILE_EXTENSION;
use erd_wallet::utils::hex_decode;
use erd_wallet::{
    open_key_source, write_keystore, write_pem, Address, Command, Config, EsdtProperties,
    GasEstimator, IssueEsdtParams, Opt, TokenPayment, Transaction, TransactionBuilderInput,
    TransactionFactory, TransactionKind, Wallet, WalletError, GLOBAL_CONFIG,
};
use log::{error, info, warn, LevelFilter};
use num_bigint::BigUint;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    // I initialize logging with Info as the default level, RUST_LOG can still override it
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    // I parse the command line arguments using clap
    let opt = Opt::parse();

    // An explicit --config file wins, otherwise I fall back to the global config
    let config = match opt.config.as_deref() {
        Some(path) => match Config::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Error: {e}");
                process::exit(1);
            }
        },
        None => GLOBAL_CONFIG.clone(),
    };

    // I run the actual command and exit with code 1 if anything goes wrong
    if let Err(e) = run_command(opt.command, &config) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// This is where I handle all the different CLI commands
fn run_command(command: Command, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // When I want to see which address a key file belongs to
        Command::Address { key } => {
            let wallet = load_wallet(&key)?;
            println!("{}", wallet.address());
        }
        // When I want to sign an arbitrary message with my key
        Command::Sign { key, message } => {
            let wallet = load_wallet(&key)?;
            println!("{}", wallet.sign_message(message.as_bytes()));
        }
        // When I want to check someone's message signature
        Command::Verify {
            address,
            message,
            signature,
        } => {
            let address: Address = address.parse()?;
            let signature = hex_decode(&signature)?;
            if !erd_wallet::ed25519_verify(&signature, message.as_bytes(), address.public_key())
            {
                return Err(format!("Signature is not valid for {address}").into());
            }
            println!("Signature is valid for {address}");
        }
        // When I want to send EGLD to another account
        Command::Transfer {
            key,
            receiver,
            value,
            data,
            tx,
        } => {
            let wallet = load_wallet(&key)?;
            let value = egld_to_denominated(&value)?;
            info!("Transferring {} EGLD", denominated_to_egld(&value));
            let transaction = build_signed(
                &wallet,
                receiver.parse()?,
                value,
                data.map(String::into_bytes),
                TransactionKind::EgldTransfer,
                &tx,
                config,
            )?;
            emit(&transaction, tx.output.as_deref())?;
        }
        // When I want to move tokens, fungible or not
        Command::EsdtTransfer {
            key,
            receiver,
            token,
            amount,
            token_nonce,
            tx,
        } => {
            let wallet = load_wallet(&key)?;
            let amount = parse_amount(&amount)?;
            let payment = if token_nonce == 0 {
                TokenPayment::fungible(&token, amount)
            } else {
                TokenPayment::non_fungible(&token, token_nonce, amount)
            };
            let transaction = build_signed(
                &wallet,
                receiver.parse()?,
                BigUint::from(0u8),
                None,
                TransactionKind::EsdtTransfer(payment),
                &tx,
                config,
            )?;
            emit(&transaction, tx.output.as_deref())?;
        }
        // When I want to issue a brand new token
        Command::EsdtIssue {
            key,
            name,
            ticker,
            supply,
            decimals,
            properties,
            tx,
        } => {
            let wallet = load_wallet(&key)?;
            let params = IssueEsdtParams {
                token_name: name,
                ticker,
                initial_supply: parse_amount(&supply)?,
                num_decimals: decimals,
                properties: esdt_properties(&properties),
            };
            // The issue builder always targets the system smart contract
            let transaction = build_signed(
                &wallet,
                Address::esdt_system_sc(),
                BigUint::from(0u8),
                None,
                TransactionKind::EsdtIssue(params),
                &tx,
                config,
            )?;
            emit(&transaction, tx.output.as_deref())?;
        }
        // When I want a fresh account
        Command::Generate { output, password } => {
            let wallet = Wallet::generate()?;
            let is_keystore =
                output.extension().and_then(|e| e.to_str()) == Some(KEYSTORE_FILE_EXTENSION);
            if is_keystore {
                let password = password
                    .ok_or_else(|| WalletError::Config("A password is required for keystores".into()))?;
                write_keystore(&output, &wallet, &password)?;
            } else {
                write_pem(&output, &wallet)?;
            }
            println!("Your new address: {}", wallet.address());
        }
        // When I want to double-check a signed transaction before submitting it
        Command::VerifyTx { file } => {
            let text = fs::read_to_string(&file)
                .map_err(|e| WalletError::FileAccess(format!("{}: {e}", file.display())))?;
            let transaction = Transaction::from_json(&text)?;
            if !transaction.verify_signature() {
                return Err(format!(
                    "Transaction {} has no valid signature from {}",
                    file.display(),
                    transaction.sender()
                )
                .into());
            }
            println!("Signature is valid for {}", transaction.sender());
        }
    }
    Ok(())
}

// I load the key file once and keep the wallet only for this command
fn load_wallet(key: &KeyArgs) -> Result<Wallet, WalletError> {
    let source = open_key_source(&key.key, key.password.as_deref())?;
    Ok(Wallet::from_key_source(source.as_ref()))
}

fn parse_amount(amount: &str) -> Result<BigUint, WalletError> {
    amount
        .trim()
        .parse::<BigUint>()
        .map_err(|e| WalletError::Transaction(format!("Invalid amount '{amount}': {e}")))
}

fn esdt_properties(args: &PropertyArgs) -> EsdtProperties {
    EsdtProperties {
        can_freeze: args.can_freeze,
        can_wipe: args.can_wipe,
        can_pause: args.can_pause,
        can_mint: args.can_mint,
        can_burn: args.can_burn,
        can_change_owner: args.can_change_owner,
        can_upgrade: !args.no_upgrade,
        can_add_special_roles: !args.no_special_roles,
    }
}

// I build the transaction, estimate gas when no limit was given, and sign it
fn build_signed(
    wallet: &Wallet,
    receiver: Address,
    value: BigUint,
    data: Option<Vec<u8>>,
    kind: TransactionKind,
    tx: &TxArgs,
    config: &Config,
) -> Result<Transaction, WalletError> {
    let gas_price = tx.gas_price.unwrap_or(config.min_gas_price);
    if gas_price < config.min_gas_price {
        warn!(
            "Gas price {gas_price} is below the network minimum {}",
            config.min_gas_price
        );
    }

    let mut input = TransactionBuilderInput {
        sender: wallet.address().clone(),
        receiver,
        value,
        nonce: tx.nonce,
        gas_price,
        gas_limit: tx.gas_limit.unwrap_or(config.min_gas_limit),
        chain_id: tx.chain_id.clone().unwrap_or_else(|| config.chain_id.clone()),
        version: config.tx_version,
        data,
    };

    // The data field only exists after building, so I build a draft to size it
    if tx.gas_limit.is_none() {
        let draft = TransactionFactory::create(input.clone(), kind.clone())?.build();
        input.gas_limit = GasEstimator::new(config).estimate(&kind, draft.data().len());
    }

    let mut transaction = TransactionFactory::create(input, kind)?.build();
    wallet.sign_transaction(&mut transaction)?;
    Ok(transaction)
}

fn emit(transaction: &Transaction, output: Option<&Path>) -> Result<(), WalletError> {
    let json = transaction.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .map_err(|e| WalletError::FileAccess(format!("{}: {e}", path.display())))?;
            println!("Signed transaction written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
