use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "erd-wallet", about = "Key management and transaction signing for erd accounts")]
pub struct Opt {
    // ERD_CONFIG is read by GLOBAL_CONFIG, which falls back to defaults
    #[arg(long = "config", global = true, help = "TOML file with network parameters")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Key file plus the password that unlocks it (keystores only)
#[derive(Debug, Clone, Args)]
pub struct KeyArgs {
    #[arg(long = "key", help = "Path to a .pem key file or a .json keystore")]
    pub key: PathBuf,
    #[arg(
        long = "password",
        env = "ERD_KEYSTORE_PASSWORD",
        hide_env_values = true,
        help = "Keystore password"
    )]
    pub password: Option<String>,
}

/// Parameters shared by every transaction command
#[derive(Debug, Clone, Args)]
pub struct TxArgs {
    #[arg(long = "nonce", help = "Sender account nonce")]
    pub nonce: u64,
    #[arg(long = "gas-price", help = "Gas price, defaults to the configured minimum")]
    pub gas_price: Option<u64>,
    #[arg(long = "gas-limit", help = "Gas limit, estimated when omitted")]
    pub gas_limit: Option<u64>,
    #[arg(long = "chain-id", help = "Chain ID, defaults to the configured one")]
    pub chain_id: Option<String>,
    #[arg(long = "output", help = "Write the signed transaction to this file")]
    pub output: Option<PathBuf>,
}

/// Feature flags for a new token
#[derive(Debug, Clone, Args)]
pub struct PropertyArgs {
    #[arg(long = "can-freeze")]
    pub can_freeze: bool,
    #[arg(long = "can-wipe")]
    pub can_wipe: bool,
    #[arg(long = "can-pause")]
    pub can_pause: bool,
    #[arg(long = "can-mint")]
    pub can_mint: bool,
    #[arg(long = "can-burn")]
    pub can_burn: bool,
    #[arg(long = "can-change-owner")]
    pub can_change_owner: bool,
    #[arg(long = "no-upgrade", help = "Issue a token that cannot be upgraded")]
    pub no_upgrade: bool,
    #[arg(long = "no-special-roles", help = "Issue a token without special roles")]
    pub no_special_roles: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "address", about = "Print the address of a key file")]
    Address {
        #[command(flatten)]
        key: KeyArgs,
    },
    #[command(name = "sign", about = "Sign a message and print the hex signature")]
    Sign {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long = "message", help = "Message to sign")]
        message: String,
    },
    #[command(name = "verify", about = "Verify a message signature against an address")]
    Verify {
        #[arg(long = "address", help = "Signer address (erd1...)")]
        address: String,
        #[arg(long = "message", help = "Signed message")]
        message: String,
        #[arg(long = "signature", help = "Hex signature")]
        signature: String,
    },
    #[command(name = "transfer", about = "Build and sign an EGLD transfer")]
    Transfer {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long = "receiver", help = "Receiver address")]
        receiver: String,
        #[arg(long = "value", help = "Amount in EGLD, e.g. 1.5")]
        value: String,
        #[arg(long = "data", help = "Optional data field")]
        data: Option<String>,
        #[command(flatten)]
        tx: TxArgs,
    },
    #[command(name = "esdt-transfer", about = "Build and sign an ESDT, SFT or NFT transfer")]
    EsdtTransfer {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long = "receiver", help = "Receiver address")]
        receiver: String,
        #[arg(long = "token", help = "Token identifier, e.g. TST-a1b2c3")]
        token: String,
        #[arg(long = "amount", help = "Amount in the token's smallest unit")]
        amount: String,
        #[arg(
            long = "token-nonce",
            default_value_t = 0,
            help = "Token nonce, 0 for fungible tokens"
        )]
        token_nonce: u64,
        #[command(flatten)]
        tx: TxArgs,
    },
    #[command(name = "esdt-issue", about = "Build and sign a token issuance")]
    EsdtIssue {
        #[command(flatten)]
        key: KeyArgs,
        #[arg(long = "name", help = "Token name, 3-20 alphanumeric characters")]
        name: String,
        #[arg(long = "ticker", help = "Ticker, 3-10 upper-case alphanumeric characters")]
        ticker: String,
        #[arg(long = "supply", help = "Initial supply in the token's smallest unit")]
        supply: String,
        #[arg(long = "decimals", help = "Number of decimals, at most 18")]
        decimals: u32,
        #[command(flatten)]
        properties: PropertyArgs,
        #[command(flatten)]
        tx: TxArgs,
    },
    #[command(name = "generate", about = "Create a new key file (.pem or .json)")]
    Generate {
        #[arg(long = "output", help = "Destination; .json writes a password-protected keystore")]
        output: PathBuf,
        #[arg(
            long = "password",
            env = "ERD_KEYSTORE_PASSWORD",
            hide_env_values = true,
            help = "Keystore password"
        )]
        password: Option<String>,
    },
    #[command(name = "verify-tx", about = "Check the signature of a signed transaction file")]
    VerifyTx {
        #[arg(help = "Path to the transaction JSON")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_config_flag_is_not_bound_to_env() {
        let command = Opt::command();
        let config = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert!(config.get_env().is_none());

        let opt = Opt::try_parse_from(["erd-wallet", "verify-tx", "tx.json"]).unwrap();
        assert!(opt.config.is_none());
    }

    #[test]
    fn test_parse_esdt_transfer() {
        let opt = Opt::try_parse_from([
            "erd-wallet",
            "esdt-transfer",
            "--key",
            "keys.pem",
            "--receiver",
            "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx",
            "--token",
            "TST-a1b2c3",
            "--amount",
            "1000",
            "--nonce",
            "7",
        ])
        .unwrap();

        match opt.command {
            Command::EsdtTransfer {
                token,
                token_nonce,
                tx,
                ..
            } => {
                assert_eq!(token, "TST-a1b2c3");
                assert_eq!(token_nonce, 0);
                assert_eq!(tx.nonce, 7);
                assert!(tx.gas_limit.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_transfer_requires_nonce() {
        assert!(Opt::try_parse_from([
            "erd-wallet",
            "transfer",
            "--key",
            "keys.pem",
            "--receiver",
            "erd1",
            "--value",
            "1",
        ])
        .is_err());
    }
}
