//! Macro for implementing Display and FromStr for code enums
//!
//! Several domain enums travel over the wire as short lowercase codes
//! (`"day"`, `"hour"`, `"mon"`, `"retain"`). This macro generates both
//! directions of that mapping from a single table.
//!
//! # Example
//!
//! ```rust
//! use meetgrid_domain::impl_domain_code_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shade {
//!     Light,
//!     Dark,
//! }
//!
//! impl_domain_code_conversions!(Shade {
//!     Light => "light",
//!     Dark => "dark",
//! });
//!
//! assert_eq!(Shade::Dark.to_string(), "dark");
//! assert_eq!("LIGHT".parse::<Shade>().unwrap(), Shade::Light);
//! ```

/// Implements Display and FromStr traits for code enums
///
/// This macro generates:
/// - Display trait: writes the variant's code
/// - FromStr trait: parses case-insensitive, whitespace-trimmed codes
///
/// Codes must be lowercase literals.
#[macro_export]
macro_rules! impl_domain_code_conversions {
    ($enum_name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Wire code for this variant.
            pub const fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::MeetgridError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err($crate::MeetgridError::InvalidInput(format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
