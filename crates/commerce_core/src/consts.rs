//! Constants shared across the payment provider crates.

/// Length of generated identifiers, without the prefix.
pub const ID_LENGTH: usize = 20;

/// Characters to use for generating opaque identifiers.
pub(crate) const ALPHABETS: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Fallback error code when a connector error response carries none.
pub const NO_ERROR_CODE: &str = "No error code";

/// Fallback error message when a connector error response carries none.
pub const NO_ERROR_MESSAGE: &str = "No error message";
