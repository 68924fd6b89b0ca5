//! Lazy, memoized values held per layout (eg responsive breakpoints), with
//! `map`, `apply`, `chain`, `or` and layout-remapping combinators that build
//! new [`LayoutMonad`]s without forcing anything until a value is requested.
//!
//! ```rust
//! use layout_monad::LayoutMonad;
//!
//! let sizes = LayoutMonad::from_dict([("mobile", 1), ("desktop", 2)]);
//! let scaled = sizes.map(|x| x * 10);
//!
//! assert_eq!(scaled.get_value(&"desktop"), Ok(20));
//! assert_eq!(
//!     scaled.get_dict().unwrap().into_iter().collect::<Vec<_>>(),
//!     vec![("mobile", 10), ("desktop", 20)],
//! );
//! ```
mod dict;
mod error;
mod monad;
mod remap;
mod slot;

pub use dict::LayoutDict;
pub use error::LayoutError;
pub use monad::{Layout, LayoutMonad};
