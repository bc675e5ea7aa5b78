pub mod password;

use std::ops::RangeInclusive;

/// Allowed lengths for short codes and user ids
pub const IDENTIFIER_LENGTHS: RangeInclusive<usize> = 6..=8;

/// 冲突重抽的上限，超过后放弃而不是一直持有写锁
pub const MAX_DRAW_ATTEMPTS: usize = 64;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Identifier generator shared by short codes and user ids.
///
/// Draws `length` characters uniformly from `[A-Za-z0-9]`. Uniqueness is not
/// checked here; callers that key a map with the result redraw on collision.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// 生成用于签名密钥的随机字符串（未配置 session.secret 时使用）
pub fn generate_secure_token(length: usize) -> String {
    // thread_rng is a CSPRNG, so the same alphabet is good enough here
    generate_random_code(length)
}

/// Short codes that can appear in a `/urls/{code}` or `/u/{code}` path.
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= 64 && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
