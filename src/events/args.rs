//! # Emission arguments.
//!
//! [`Args`] is the argument list handed to every listener of one emission. Values
//! are type-erased (`Arc<dyn Any + Send + Sync>`) so a single emitter can carry
//! events with different argument shapes; listeners read them back with
//! [`Args::get`].
//!
//! Cloning `Args` is cheap: the list is reference-counted and shared by all
//! listeners of an emission.
//!
//! ## Example
//! ```rust
//! use tinyemit::args;
//!
//! let a = args![1u32, "two", String::from("three")];
//! assert_eq!(a.len(), 3);
//! assert_eq!(a.get::<u32>(0), Some(&1));
//! assert_eq!(a.get::<&str>(1), Some(&"two"));
//! assert_eq!(a.get::<u32>(1), None);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A single type-erased argument.
pub type Arg = Arc<dyn Any + Send + Sync>;

/// Ordered argument list of an emission.
#[derive(Clone, Default)]
pub struct Args {
    items: Arc<Vec<Arg>>,
}

impl Args {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    ///
    /// Intended for building; if the list is already shared the items are copied
    /// (the `Arc`s, not the values).
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        Arc::make_mut(&mut self.items).push(Arc::new(value));
        self
    }

    /// Appends an already type-erased value.
    #[must_use]
    pub fn with_arg(mut self, arg: Arg) -> Self {
        Arc::make_mut(&mut self.items).push(arg);
        self
    }

    /// Returns the argument at `index` if it exists and has type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.items.get(index)?.downcast_ref::<T>()
    }

    /// Returns the raw argument at `index`.
    pub fn get_arg(&self, index: usize) -> Option<&Arg> {
        self.items.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.items.iter()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args").field("len", &self.len()).finish()
    }
}

impl FromIterator<Arg> for Args {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self {
            items: Arc::new(iter.into_iter().collect()),
        }
    }
}

/// Builds an [`Args`] list from values of any `Send + Sync + 'static` type.
///
/// ```rust
/// use tinyemit::args;
///
/// assert!(args![].is_empty());
/// assert_eq!(args![1i32, 2.5f64].get::<f64>(1), Some(&2.5));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::new()$(.with($value))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let a = Args::new().with(7u64).with(String::from("x"));
        assert_eq!(a.get::<u64>(0), Some(&7));
        assert_eq!(a.get::<String>(1).map(String::as_str), Some("x"));
        assert_eq!(a.get::<String>(0), None);
        assert_eq!(a.get::<u64>(5), None);
    }

    #[test]
    fn test_clone_shares_items() {
        let a = Args::new().with(1u8);
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.items, &b.items));
    }

    #[test]
    fn test_with_after_clone_does_not_touch_original() {
        let a = Args::new().with(1u8);
        let b = a.clone().with(2u8);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_from_iterator() {
        let a: Args = vec![Arc::new(1u8) as Arg, Arc::new("b") as Arg]
            .into_iter()
            .collect();
        assert_eq!(a.len(), 2);
        assert_eq!(a.get::<&str>(1), Some(&"b"));
        assert_eq!(a.iter().count(), 2);
    }
}
