//! Fabricated explorer and swap data.
//!
//! Nothing here reflects on-chain activity. The generators take the RNG as a
//! parameter so callers can seed them.

use rand::Rng;

pub mod blocks;
pub mod explorer;
pub mod swaps;
pub mod transactions;

pub use blocks::{BlockStream, SimulatedBlock};
pub use explorer::{run_explorer, ExplorerState};
pub use swaps::{swap_series, SwapPoint};
pub use transactions::{SimulatedTransaction, TransactionFeed, TxKind};

const BASE58_ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn random_chars<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Shortened wallet, `abcd...wxyz`
pub fn random_wallet<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}...{}",
        random_chars(rng, BASE58_ALPHABET, 4),
        random_chars(rng, BASE58_ALPHABET, 4)
    )
}

/// 8-character base36 signature stub
pub fn random_signature<R: Rng + ?Sized>(rng: &mut R) -> String {
    random_chars(rng, BASE36_ALPHABET, 8)
}

/// Full-length base58 string of 32 random bytes
pub fn random_base58_key<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    bs58::encode(bytes).into_string()
}
