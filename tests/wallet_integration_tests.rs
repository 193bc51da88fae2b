//! Wallet integration tests
//!
//! Loads the key files under tests/data, then builds, signs and verifies
//! transactions end to end through the public API.

use erd_wallet::error::{
    ERROR_MSG_FILE_DOES_NOT_EXIST, ERROR_MSG_FILE_EMPTY, ERROR_MSG_FILE_EXTENSION_INVALID,
};
use erd_wallet::{
    decrypt, open_key_source, write_keystore, write_pem, EncryptedKeyRecord, IssueEsdtParams,
    EsdtProperties, KeyFileReader, KeySource, PemFileReader, TokenPayment, Transaction,
    TransactionBuilderInput, TransactionFactory, TransactionKind, Wallet, WalletError,
};
use num_bigint::BigUint;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const KEYSTORE_PASSWORD: &str = "12345678Qq!";
const ADDRESS_1: &str = "erd1qyu5wthldzr8wx5c9ucg8kjagg0jfs53s8nr3zpz3hypefsdd8ssycr6th";
const ADDRESS_2: &str = "erd1spyavw0956vq68xj8y4tenjpq2wd5a9p2c6j8gsz7ztyrnpxrruqzu66jx";
const ADDRESS_3: &str = "erd1k2s324ww2g0yj38qn2ch2jwctdy8mnfxep94q9arncc6xecg3xaq6mjse8";

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn wallet_from_pem(name: &str) -> Wallet {
    Wallet::from_key_source(&PemFileReader::new(data_file(name)).unwrap())
}

fn transfer_input(sender: &Wallet) -> TransactionBuilderInput {
    TransactionBuilderInput {
        sender: sender.address().clone(),
        receiver: ADDRESS_2.parse().unwrap(),
        value: BigUint::from(100u32),
        nonce: 1,
        gas_price: 1_000_000_000,
        gas_limit: 50_000,
        chain_id: "T".to_string(),
        version: 1,
        data: None,
    }
}

#[test]
fn test_pem_files_derive_expected_addresses() {
    for (file, address) in [
        ("keysValid1.pem", ADDRESS_1),
        ("keysValid2.pem", ADDRESS_2),
        ("keysValid3.pem", ADDRESS_3),
    ] {
        let reader = PemFileReader::new(data_file(file)).unwrap();
        assert_eq!(reader.address().bech32(), address);
    }

    let reader = PemFileReader::new(data_file("keysValid1.pem")).unwrap();
    assert_eq!(
        reader.address().to_hex(),
        "0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1"
    );
    assert_eq!(
        hex(reader.seed().as_bytes()),
        "413f42575f7f26fad3317a778771212fdb80245850981e48b58a4f25e344e8f9"
    );
}

fn hex(bytes: &[u8]) -> String {
    erd_wallet::utils::hex_encode(bytes)
}

#[test]
fn test_pem_error_cases() {
    match PemFileReader::new(data_file("keysNotEnoughBytes.pem")) {
        Err(WalletError::Length { expected, actual }) => {
            assert_eq!(expected, 64);
            assert_eq!(actual, 32);
        }
        other => panic!("expected a length error, got {:?}", other.err()),
    }

    match PemFileReader::new(data_file("keysEmptyFile.pem")) {
        Err(WalletError::Format(msg)) => assert!(msg.contains(ERROR_MSG_FILE_EMPTY)),
        other => panic!("expected a format error, got {:?}", other.err()),
    }

    match PemFileReader::new(data_file("keysInvalidExtension.pme")) {
        Err(WalletError::Format(msg)) => assert!(msg.contains(ERROR_MSG_FILE_EXTENSION_INVALID)),
        other => panic!("expected a format error, got {:?}", other.err()),
    }

    match PemFileReader::new(data_file("keysThatDoNotExist.pem")) {
        Err(WalletError::FileAccess(msg)) => assert!(msg.contains(ERROR_MSG_FILE_DOES_NOT_EXIST)),
        other => panic!("expected a file access error, got {:?}", other.err()),
    }
}

#[test]
fn test_keystore_with_correct_password() {
    let reader = KeyFileReader::new(data_file("keystore.json"), KEYSTORE_PASSWORD).unwrap();
    assert_eq!(reader.address().bech32(), ADDRESS_1);

    let pem = PemFileReader::new(data_file("keysValid1.pem")).unwrap();
    assert_eq!(reader.seed(), pem.seed());
    assert_eq!(reader.secret_key(), pem.secret_key());
}

#[test]
fn test_keystore_with_wrong_password() {
    assert!(matches!(
        KeyFileReader::new(data_file("keystore.json"), "12345678Qq?"),
        Err(WalletError::Integrity(_))
    ));
}

#[test]
fn test_keystore_declared_address_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keystore.json");
    let text = fs::read_to_string(data_file("keystore.json")).unwrap().replace(
        "\"address\":\"0139472eff6886771a982f3083da5d421f24c29181e63888228dc81ca60d69e1\"",
        "\"address\":\"8049d639e5a6980d1cd2392abcce41029cda74a1563523a202f09641cc2618f8\"",
    );
    fs::write(&path, text).unwrap();

    assert!(matches!(
        KeyFileReader::new(&path, KEYSTORE_PASSWORD),
        Err(WalletError::AddressMismatch { .. })
    ));
}

#[test]
fn test_open_key_source_picks_reader() {
    let pem = open_key_source(data_file("keysValid2.pem"), None).unwrap();
    assert_eq!(pem.address().bech32(), ADDRESS_2);

    let keystore = open_key_source(data_file("keystore.json"), Some(KEYSTORE_PASSWORD)).unwrap();
    assert_eq!(keystore.address().bech32(), ADDRESS_1);
}

#[test]
fn test_written_key_files_load_back() {
    let dir = tempdir().unwrap();
    let wallet = Wallet::generate().unwrap();

    let pem_path = dir.path().join("generated.pem");
    write_pem(&pem_path, &wallet).unwrap();
    let pem = PemFileReader::new(&pem_path).unwrap();
    assert_eq!(pem.address(), wallet.address());

    let keystore_path = dir.path().join("generated.json");
    write_keystore(&keystore_path, &wallet, "correct horse").unwrap();
    let record =
        EncryptedKeyRecord::from_json(&fs::read_to_string(&keystore_path).unwrap()).unwrap();
    assert_eq!(record.kdf_params.n, 4096);
    assert_eq!(&decrypt("correct horse", &record).unwrap(), wallet.secret_key());
    assert!(matches!(
        decrypt("wrong horse", &record),
        Err(WalletError::Integrity(_))
    ));
}

#[test]
fn test_signed_transfer_matches_reference_signature() {
    let wallet = wallet_from_pem("keysValid1.pem");
    let mut tx = TransactionFactory::create(transfer_input(&wallet), TransactionKind::EgldTransfer)
        .unwrap()
        .build();
    wallet.sign_transaction(&mut tx).unwrap();

    assert_eq!(
        tx.signature().unwrap().to_hex(),
        "a91a0b97e91f44a5d4e3bdb0fe18186528d0d215c10742f88754eb28c5eceecc\
         8e907490f99a3c755ce2b87cce9af6875f21aef0291175435642513b73bc650a"
    );

    let parsed = Transaction::from_json(&tx.to_json_pretty().unwrap()).unwrap();
    assert!(parsed.verify_signature());
}

#[test]
fn test_signed_esdt_transfer_matches_reference_signature() {
    let wallet = wallet_from_pem("keysValid1.pem");
    let input = TransactionBuilderInput {
        nonce: 7,
        gas_limit: 500_000,
        ..transfer_input(&wallet)
    };
    let payment = TokenPayment::fungible("TST-a1b2c3", BigUint::from(1000u32));
    let mut tx = TransactionFactory::create(input, TransactionKind::EsdtTransfer(payment))
        .unwrap()
        .build();
    wallet.sign_transaction(&mut tx).unwrap();

    assert_eq!(tx.value(), &BigUint::from(0u8));
    let json = tx.to_json().unwrap();
    assert!(json.contains("\"data\":\"RVNEVFRyYW5zZmVyQDU0NTM1NDJkNjEzMTYyMzI2MzMzQDAzZTg=\""));
    assert_eq!(
        tx.signature().unwrap().to_hex(),
        "266ff86efda34c478a3160d22e6acfb510d65b1d4acce826ce2e45e464124c1d\
         18cf3aa9eab5d3c7e7b4300457644829f7c1bb39fb59d3001f2ca0bc80e48c0b"
    );
}

#[test]
fn test_transfer_and_token_transfer_from_same_input() {
    let wallet = wallet_from_pem("keysValid1.pem");

    let transfer = TransactionFactory::create(transfer_input(&wallet), TransactionKind::EgldTransfer)
        .unwrap()
        .build();
    assert_eq!(transfer.value(), &BigUint::from(100u32));
    assert!(transfer.data().is_empty());

    let payment = TokenPayment::fungible("TST-a1b2c3", BigUint::from(1000u32));
    let token = TransactionFactory::create(
        transfer_input(&wallet),
        TransactionKind::EsdtTransfer(payment),
    )
    .unwrap()
    .build();
    assert_eq!(token.value(), &BigUint::from(0u8));
    let data = String::from_utf8(token.data().to_vec()).unwrap();
    assert!(data.contains("5453542d613162326333"));
    assert!(data.ends_with("@03e8"));
}

#[test]
fn test_issue_is_signed_by_issuer() {
    let wallet = wallet_from_pem("keysValid3.pem");
    let params = IssueEsdtParams {
        token_name: "AliceToken".to_string(),
        ticker: "ALC".to_string(),
        initial_supply: BigUint::from(1_000_000u32),
        num_decimals: 6,
        properties: EsdtProperties::default(),
    };
    let mut tx = TransactionFactory::create(transfer_input(&wallet), TransactionKind::EsdtIssue(params))
        .unwrap()
        .build();
    wallet.sign_transaction(&mut tx).unwrap();

    assert_eq!(tx.sender().bech32(), ADDRESS_3);
    assert!(tx.verify_signature());
    assert!(wallet.sign_transaction(&mut tx).is_err());
}

#[test]
fn test_foreign_wallet_cannot_sign() {
    let sender = wallet_from_pem("keysValid1.pem");
    let other = wallet_from_pem("keysValid2.pem");
    let mut tx = TransactionFactory::create(transfer_input(&sender), TransactionKind::EgldTransfer)
        .unwrap()
        .build();
    assert!(matches!(
        other.sign_transaction(&mut tx),
        Err(WalletError::Transaction(_))
    ));
}
