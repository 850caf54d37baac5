//! Property-based tests over random seeds and messages

use edgate_gateway::Gateway;
use edgate_tests::TestLoader;
use futures::executor::block_on;
use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn key_pair(gateway: &Gateway, seed: &[u8; 32]) -> ([u8; 32], [u8; 64]) {
    let mut public_key = [0u8; 32];
    let mut private_key = [0u8; 64];
    block_on(gateway.create_key_pair(&mut public_key, &mut private_key, seed)).unwrap();
    (public_key, private_key)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn key_pair_derivation_is_deterministic(seed in any::<[u8; 32]>()) {
        let first = Gateway::new(TestLoader::new());
        let second = Gateway::new(TestLoader::new());

        let (pk1, sk1) = key_pair(&first, &seed);
        let (pk2, sk2) = key_pair(&second, &seed);
        prop_assert_eq!(pk1, pk2);
        prop_assert_eq!(sk1, sk2);

        let mut derived = [0u8; 32];
        block_on(first.derive_public_key(&mut derived, &sk1)).unwrap();
        prop_assert_eq!(derived, pk1);
    }

    #[test]
    fn signatures_verify(
        seed in any::<[u8; 32]>(),
        message in prop::collection::vec(any::<u8>(), 0..512)
    ) {
        let gateway = Gateway::new(TestLoader::new());
        let (public_key, private_key) = key_pair(&gateway, &seed);

        let mut signature = [0u8; 64];
        block_on(gateway.sign(&mut signature, &message, &public_key, &private_key)).unwrap();
        prop_assert!(block_on(gateway.verify(&signature, &message, &public_key)).unwrap());
    }

    #[test]
    fn key_exchange_is_symmetric(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let gateway = Gateway::new(TestLoader::new());
        let (pk_a, sk_a) = key_pair(&gateway, &a);
        let (pk_b, sk_b) = key_pair(&gateway, &b);

        let mut ab = [0u8; 32];
        let mut ba = [0u8; 32];
        block_on(gateway.key_exchange(&mut ab, &pk_b, &sk_a)).unwrap();
        block_on(gateway.key_exchange(&mut ba, &pk_a, &sk_b)).unwrap();
        prop_assert_eq!(ab, ba);
    }
}

#[test]
fn blinding_commutes_over_reproducible_seeds() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x6564_6761_7465);
    let gateway = Gateway::new(TestLoader::new());

    for _ in 0..8 {
        let mut seed = [0u8; 32];
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];
        rng.fill_bytes(&mut seed);
        rng.fill_bytes(&mut first);
        rng.fill_bytes(&mut second);

        let (public_key, private_key) = key_pair(&gateway, &seed);

        // (A + x) + y == (A + y) + x
        let mut xy = (public_key, private_key);
        let mut yx = (public_key, private_key);
        for (pair, scalars) in [(&mut xy, [&first, &second]), (&mut yx, [&second, &first])] {
            for scalar in scalars {
                block_on(gateway.add_scalar(Some(&mut pair.0[..]), Some(&mut pair.1[..]), scalar))
                    .unwrap();
            }
        }
        assert_eq!(xy.0, yx.0);

        let mut signature = [0u8; 64];
        block_on(gateway.sign(&mut signature, b"commutes", &xy.0, &yx.1)).unwrap();
        assert!(block_on(gateway.verify(&signature, b"commutes", &xy.0)).unwrap());
    }
}
