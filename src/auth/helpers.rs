use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Login credentials carried by a Basic auth header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Parses `Basic base64(login:password)`. Splits on the first colon, so
/// passwords may contain colons. Empty login or password is rejected.
pub fn parse_basic_credentials(header: &str) -> Option<Credentials> {
    let encoded = header.strip_prefix("Basic ")?.trim();
    let decoded = STANDARD.decode(encoded).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;

    let (login, password) = credentials.split_once(':')?;

    if login.is_empty() || password.is_empty() {
        return None;
    }

    Some(Credentials {
        login: login.to_string(),
        password: password.to_string(),
    })
}
