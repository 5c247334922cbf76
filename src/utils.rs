use rand::{Rng, distr::Alphanumeric};

/// Length of the CSRF state value set on `/login`.
pub const STATE_LENGTH: usize = 16;

/// Generates a random alphanumeric CSRF state string.
///
/// Drawn uniformly from the 62-character alphanumeric alphabet using the
/// thread-local generator. This is not a cryptographic source; for a local
/// single-user backend it only needs to be unguessable enough to bind a
/// callback to the login attempt that started it.
pub fn generate_state(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
