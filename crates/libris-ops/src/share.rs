//! Share-link construction.

use libris_types::Username;

/// Build a read-only share link for a user's library.
///
/// The link is the public base URL with `shared=true` and the bare
/// username as query parameters. There is no token, expiry, or
/// revocation: anyone holding (or guessing) a username can open that
/// user's shared view. The username's restricted alphabet needs no
/// percent-encoding.
pub fn share_url(base_url: &str, username: &Username) -> String {
    format!(
        "{}?shared=true&user={}",
        base_url.trim_end_matches('/'),
        username
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_the_bare_username() {
        let url = share_url(
            "https://libris.example.com",
            &Username::new("alice").unwrap(),
        );
        assert_eq!(url, "https://libris.example.com?shared=true&user=alice");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let url = share_url("http://localhost:7007/", &Username::new("bob").unwrap());
        assert_eq!(url, "http://localhost:7007?shared=true&user=bob");
    }
}
