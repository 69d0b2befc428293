//! Macro for implementing Display and FromStr for wire vocabulary enums
//!
//! The Detect API spells its enumerations in upper case (`DEIDENTIFY`,
//! `SUCCESS`) but callers and the service itself are not consistent about
//! casing, so parsing is case-insensitive while display always emits the
//! canonical spelling.
//!
//! # Example
//!
//! ```rust
//! use vaultdetect_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mode {
//!     Fast,
//!     Slow,
//! }
//!
//! impl_wire_enum_conversions!(Mode {
//!     Fast => "FAST",
//!     Slow => "SLOW",
//! });
//!
//! assert_eq!("fast".parse::<Mode>().unwrap(), Mode::Fast);
//! assert_eq!(Mode::Slow.to_string(), "SLOW");
//! ```

/// Implements Display and FromStr for enums with a fixed wire spelling
///
/// This macro generates:
/// - Display trait: writes the canonical spelling given in the mapping
/// - FromStr trait: matches the input against each spelling ignoring ASCII
///   case
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
