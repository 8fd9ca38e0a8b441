//! Closed literal sets (string enums).
//!
//! Every enum-valued field in the contracts is declared with
//! [`literal_set!`], which derives the serde wire names and the
//! [`Literal`] table the validator uses to report the accepted values.

use std::fmt::Display;
use std::hash::Hash;

/// A closed set of string literals backed by a Rust enum.
pub trait Literal: Copy + Eq + Hash + Display + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Returns the wire string of this member.
    fn as_str(self) -> &'static str;

    /// Looks up a member by its wire string.
    #[must_use]
    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|member| member.as_str() == s)
    }

    /// Returns every wire string, in declaration order.
    #[must_use]
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.as_str()).collect()
    }
}

/// Declares a closed literal set.
///
/// ```ignore
/// literal_set! {
///     /// Export file format.
///     pub enum ExportFormat {
///         /// PowerPoint.
///         Pptx => "pptx",
///         /// Portable document format.
///         Pdf => "pdf",
///     }
/// }
/// ```
macro_rules! literal_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:tt
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $crate::schema::Literal for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::schema::Literal::as_str(*self))
            }
        }
    };
}

pub(crate) use literal_set;
