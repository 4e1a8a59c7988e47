#![forbid(unsafe_code)]

//! Foundation utilities shared by the commerce payment provider crates:
//! error types, monetary unit conversions, wire enums and the outbound
//! HTTP request model.

pub mod consts;
pub mod enums;
pub mod errors;
pub mod ext_traits;
pub mod request;
pub mod types;

/// Generate a nanoid with the given prefix and length
#[inline]
pub fn generate_id(length: usize, prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid::nanoid!(length, &consts::ALPHABETS))
}

/// Generate a nanoid with the given prefix and a default length
#[inline]
pub fn generate_id_with_default_len(prefix: &str) -> String {
    generate_id(consts::ID_LENGTH, prefix)
}
