//! Default values shared by the store, the substrates and the CLI.

/// Prefix of every credential box key. The 8-byte big-endian asset id follows it.
pub const KEY_PREFIX: &[u8] = b"credentials-";

/// Largest box value the bundled substrates accept, in bytes.
///
/// Matches the Algorand box value limit, so a record that fits locally also
/// fits on chain.
pub const MAX_BOX_SIZE: usize = 32_768;

/// Directory name used for file-backed boxes under the platform data directory.
pub const BOX_STORE_DIR_NAME: &str = "boxes";
