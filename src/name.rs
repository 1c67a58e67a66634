//! Heuristic split of a full name into first and last name.
//!
//! The last word is the last name, unless the word before it is a
//! nobiliary particle (`van`, `von`, `de`, `zu`, `da`), in which case the
//! particle belongs to the last name as well:
//!
//! ```
//! use csv2hatchbuck::name::split_name;
//!
//! let (first, last) = split_name("Jean Marc de Fleurier").unwrap();
//! assert_eq!(first, "Jean Marc");
//! assert_eq!(last, "de Fleurier");
//! ```

use crate::error::NameError;

/// Lowercase particles that attach to the following word of a last name.
pub const PARTICLES: [&str; 5] = ["van", "von", "de", "zu", "da"];

pub fn is_particle(token: &str) -> bool {
    let lowered = token.to_lowercase();
    PARTICLES.contains(&lowered.as_str())
}

pub fn split_name(full_name: &str) -> Result<(String, String), NameError> {
    let tokens = full_name
        .trim()
        .split(' ')
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>();
    let count = tokens.len();
    if count < 2 {
        return Err(NameError::TooFewTokens(full_name.trim().to_string()));
    }
    if count == 2 {
        return Ok((tokens[0].to_string(), tokens[1].to_string()));
    }
    let last_len = if is_particle(tokens[count - 2]) { 2 } else { 1 };
    let (first, last) = tokens.split_at(count - last_len);
    Ok((first.join(" "), last.join(" ")))
}
