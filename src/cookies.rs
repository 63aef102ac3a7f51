//! Encrypted cookie helpers.
//!
//! Values are sealed with the `cookie` crate's private jar (authenticated
//! encryption), so a tampered value or the wrong key decrypts to nothing
//! rather than garbage.

pub use cookie::{Cookie, CookieJar};

/// Key material for cookie encryption.
pub type CookieKey = cookie::Key;

/// Derives a [`CookieKey`] from a secret string.
///
/// Returns `None` when the secret is shorter than 32 bytes, which is too
/// little material to derive from.
pub fn key_from_secret(secret: &str) -> Option<CookieKey> {
    if secret.len() < 32 {
        return None;
    }
    Some(CookieKey::derive_from(secret.as_bytes()))
}

/// Encrypts `plaintext` as the value of a cookie called `name`.
pub fn encrypt(key: &CookieKey, name: &str, plaintext: &str) -> String {
    let mut jar = CookieJar::new();
    jar.private_mut(key)
        .add(Cookie::new(name.to_string(), plaintext.to_string()));
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default()
}

/// A `Set-Cookie` value that removes the named cookie (`Max-Age=0`, expiry
/// in the past), built through the jar so the attributes stay well-formed.
pub(crate) fn removal(name: &str) -> String {
    let mut jar = CookieJar::new();
    jar.add_original(Cookie::new(name.to_string(), String::new()));
    let mut spent = Cookie::named(name.to_string());
    spent.set_path("/");
    jar.remove(spent);
    jar.delta()
        .next()
        .map(|cookie| cookie.to_string())
        .unwrap_or_default()
}

/// Decrypts a value produced by [`encrypt`].
///
/// Returns `None` on tamper or wrong key.
pub fn decrypt(key: &CookieKey, name: &str, value: &str) -> Option<String> {
    let mut jar = CookieJar::new();
    jar.add_original(Cookie::new(name.to_string(), value.to_string()));
    jar.private(key)
        .get(name)
        .map(|cookie| cookie.value().to_string())
}
