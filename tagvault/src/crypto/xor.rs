use super::Keystream;

/// XORs `data` with `key`, repeating the key as often as needed to cover the input.
///
/// Applying the same key twice returns the original bytes.
pub fn transform(data: &[u8], key: &Keystream) -> Vec<u8> {
    data.iter()
        .zip(key.as_bytes().iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}
