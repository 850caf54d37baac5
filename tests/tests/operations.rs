//! End-to-end behaviour of every gateway operation

use edgate_api::Error;
use edgate_common::SecretBuffer;
use edgate_gateway::{Gateway, KeyPair};
use edgate_tests::{init_tracing, TestLoader};

// RFC 8032, section 7.1
const TEST1_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
const TEST1_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
const TEST1_SIGNATURE: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

const TEST2_SEED: &str = "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb";
const TEST2_PUBLIC: &str = "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c";
const TEST2_MESSAGE: &str = "72";
const TEST2_SIGNATURE: &str = "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00";

fn gateway() -> Gateway {
    init_tracing();
    Gateway::new(TestLoader::new())
}

async fn key_pair(gateway: &Gateway, seed: u8) -> KeyPair {
    gateway
        .generate_key_pair(&SecretBuffer::new([seed; 32]))
        .await
        .unwrap()
}

async fn check_vector(seed: &str, public: &str, message: &str, signature: &str) {
    let gateway = gateway();
    let seed = hex::decode(seed).unwrap();
    let message = hex::decode(message).unwrap();

    let mut public_key = [0u8; 32];
    let mut private_key = [0u8; 64];
    gateway
        .create_key_pair(&mut public_key, &mut private_key, &seed)
        .await
        .unwrap();
    assert_eq!(hex::encode(public_key), public);

    let mut out = [0u8; 64];
    gateway
        .sign(&mut out, &message, &public_key, &private_key)
        .await
        .unwrap();
    assert_eq!(hex::encode(out), signature);
    assert!(gateway.verify(&out, &message, &public_key).await.unwrap());
}

#[tokio::test]
async fn test_rfc8032_vector_empty_message() {
    check_vector(TEST1_SEED, TEST1_PUBLIC, "", TEST1_SIGNATURE).await;
}

#[tokio::test]
async fn test_rfc8032_vector_one_byte_message() {
    check_vector(TEST2_SEED, TEST2_PUBLIC, TEST2_MESSAGE, TEST2_SIGNATURE).await;
}

#[tokio::test]
async fn test_sign_verify_and_tamper_detection() {
    let gateway = gateway();
    let pair = key_pair(&gateway, 0x42).await;
    let message = b"Test message for Ed25519 signature";

    let mut signature = [0u8; 64];
    gateway
        .sign(&mut signature, message, &pair.public_key, pair.private_key.as_slice())
        .await
        .unwrap();
    assert!(gateway.verify(&signature, message, &pair.public_key).await.unwrap());

    let mut tampered = signature;
    tampered[44] ^= 0x10;
    assert!(!gateway.verify(&tampered, message, &pair.public_key).await.unwrap());

    assert!(!gateway
        .verify(&signature, b"Modified message that should not verify", &pair.public_key)
        .await
        .unwrap());

    let other = key_pair(&gateway, 0x43).await;
    assert!(!gateway.verify(&signature, message, &other.public_key).await.unwrap());
}

#[tokio::test]
async fn test_signing_is_deterministic() {
    let gateway = gateway();
    let pair = key_pair(&gateway, 9).await;

    let mut first = [0u8; 64];
    let mut second = [0u8; 64];
    for out in [&mut first, &mut second] {
        gateway
            .sign(out, b"same input", &pair.public_key, pair.private_key.as_slice())
            .await
            .unwrap();
    }
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_derive_public_key_matches_key_pair() {
    let gateway = gateway();
    let pair = key_pair(&gateway, 0x17).await;

    let mut derived = [0u8; 32];
    gateway
        .derive_public_key(&mut derived, pair.private_key.as_slice())
        .await
        .unwrap();
    assert_eq!(derived, pair.public_key);
}

#[tokio::test]
async fn test_add_scalar_homomorphism() {
    let gateway = gateway();
    let pair = key_pair(&gateway, 0x21).await;
    let mut scalar = [0x5Cu8; 32];
    scalar[31] &= 0x7F;

    // Blind each half on its own
    let mut public_only = pair.public_key;
    gateway
        .add_scalar(Some(&mut public_only[..]), None, &scalar)
        .await
        .unwrap();
    let mut private_only = pair.private_key.clone();
    gateway
        .add_scalar(None, Some(private_only.as_mut_slice()), &scalar)
        .await
        .unwrap();

    // Blind both at once
    let mut public_both = pair.public_key;
    let mut private_both = pair.private_key.clone();
    gateway
        .add_scalar(Some(&mut public_both[..]), Some(private_both.as_mut_slice()), &scalar)
        .await
        .unwrap();

    assert_eq!(public_only, public_both);
    assert_eq!(private_only, private_both);
    assert_ne!(public_both, pair.public_key);

    let mut derived = [0u8; 32];
    gateway
        .derive_public_key(&mut derived, private_both.as_slice())
        .await
        .unwrap();
    assert_eq!(derived, public_both);

    let mut signature = [0u8; 64];
    gateway
        .sign(&mut signature, b"blinded", &public_both, private_both.as_slice())
        .await
        .unwrap();
    assert!(gateway.verify(&signature, b"blinded", &public_both).await.unwrap());
    assert!(!gateway.verify(&signature, b"blinded", &pair.public_key).await.unwrap());
}

#[tokio::test]
async fn test_add_scalar_ignores_top_bit() {
    let gateway = gateway();
    let pair = key_pair(&gateway, 0x31).await;
    let low = [0x0Au8; 32];
    let mut high = low;
    high[31] |= 0x80;

    let mut with_low = pair.public_key;
    let mut with_high = pair.public_key;
    gateway.add_scalar(Some(&mut with_low[..]), None, &low).await.unwrap();
    gateway.add_scalar(Some(&mut with_high[..]), None, &high).await.unwrap();
    assert_eq!(with_low, with_high);
}

#[tokio::test]
async fn test_add_scalar_rejects_invalid_public_key() {
    let gateway = gateway();
    let pair = key_pair(&gateway, 0x33).await;

    // y = 2 has no matching x on the curve
    let mut bogus = [0u8; 32];
    bogus[0] = 2;
    let mut private_key = pair.private_key.clone();

    let err = gateway
        .add_scalar(Some(&mut bogus[..]), Some(private_key.as_mut_slice()), &[1u8; 32])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::IllegalArgument { context: "add_scalar", .. }));
    assert_eq!(private_key, pair.private_key);
    assert_eq!(bogus[0], 2);
}

#[tokio::test]
async fn test_key_exchange_symmetry() {
    let gateway = gateway();
    let alice = key_pair(&gateway, 0xA1).await;
    let bob = key_pair(&gateway, 0xB0).await;

    let mut alice_view = [0u8; 32];
    let mut bob_view = [0u8; 32];
    gateway
        .key_exchange(&mut alice_view, &bob.public_key, alice.private_key.as_slice())
        .await
        .unwrap();
    gateway
        .key_exchange(&mut bob_view, &alice.public_key, bob.private_key.as_slice())
        .await
        .unwrap();
    assert_eq!(alice_view, bob_view);
    assert_ne!(alice_view, [0u8; 32]);
}

#[tokio::test]
async fn test_key_exchange_rejects_invalid_public_key() {
    let gateway = gateway();
    let alice = key_pair(&gateway, 0xA1).await;
    let mut bogus = [0u8; 32];
    bogus[0] = 2;

    let mut shared = [0xEEu8; 32];
    let err = gateway
        .key_exchange(&mut shared, &bogus, alice.private_key.as_slice())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::IllegalArgument { context: "key_exchange", .. }));
    assert_eq!(shared, [0xEE; 32], "output must not be partially written");
}

#[tokio::test]
async fn test_sha512_of_shared_secret() {
    let gateway = gateway();
    let mut digest = [0u8; 64];
    gateway.sha512(&mut digest, b"").await.unwrap();
    assert_eq!(
        hex::encode(digest),
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    );
}

#[tokio::test]
async fn test_instances_are_isolated() {
    init_tracing();
    let first = Gateway::new(TestLoader::new());
    let second = Gateway::new(TestLoader::new());
    first.disable_private_key_trace_removal().unwrap();

    let a = key_pair(&first, 1).await;
    let b = key_pair(&second, 1).await;
    assert_eq!(a, b);
    assert!(!first.scratch_is_zeroed().await.unwrap());
    assert!(second.scratch_is_zeroed().await.unwrap());
}
