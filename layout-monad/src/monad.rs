use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::rc::Rc;

use log::trace;

use crate::slot::{constant, Slot, Thunk};
use crate::{LayoutDict, LayoutError};

/// A label in the closed set of layouts a [`LayoutMonad`] is defined over.
///
/// Implemented for every type with the required bounds, so a plain enum of
/// breakpoints or `&'static str` works as-is.
pub trait Layout: Clone + Eq + Hash + Debug + 'static {}

impl<L: Clone + Eq + Hash + Debug + 'static> Layout for L {}

struct Table<L, T> {
    // iteration order and domain of valid lookups, fixed at construction
    layouts: Vec<L>,
    index: HashMap<L, usize>,
    // one slot per entry in `layouts`
    slots: Vec<RefCell<Slot<T>>>,
}

/// Lazily computed values, one per layout, each evaluated at most once.
///
/// # Motivation
///
/// Values that vary per layout (font sizes per breakpoint, say) are often
/// derived from one another, and only some layouts are ever looked at. A
/// `LayoutMonad` holds a thunk per layout and only runs it when that layout's
/// value is requested, caching the result. Combinators such as
/// [`LayoutMonad::map`] and [`LayoutMonad::chain`] build new monads that defer
/// into their sources at lookup time instead of walking every layout eagerly.
///
/// # Use
///
/// ```rust
/// use layout_monad::LayoutMonad;
///
/// let columns = LayoutMonad::from_dict([("mobile", 20), ("desktop", 10)]);
/// let label = columns.chain(|n| {
///     if n > 10 {
///         LayoutMonad::of(["mobile", "desktop"], "greater")
///     } else {
///         LayoutMonad::of(["mobile", "desktop"], "less")
///     }
/// });
///
/// assert_eq!(label.get_value(&"mobile"), Ok("greater"));
/// assert_eq!(label.get_value(&"desktop"), Ok("less"));
/// ```
///
/// Cloning a `LayoutMonad` is cheap and yields a handle to the same slots.
pub struct LayoutMonad<L, T> {
    table: Rc<Table<L, T>>,
}

impl<L, T> Clone for LayoutMonad<L, T> {
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl<L: Debug, T: Debug> Debug for LayoutMonad<L, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (layout, slot) in self.table.layouts.iter().zip(&self.table.slots) {
            map.entry(layout, &*slot.borrow());
        }
        map.finish()
    }
}

impl<L: Layout, T: 'static> LayoutMonad<L, T> {
    /// Builds the slot table. The first occurrence of a layout wins; later
    /// duplicates are ignored.
    pub(crate) fn from_thunks(thunks: impl IntoIterator<Item = (L, Thunk<T>)>) -> Self {
        let mut layouts = Vec::new();
        let mut index = HashMap::new();
        let mut slots = Vec::new();

        for (layout, thunk) in thunks {
            if index.contains_key(&layout) {
                continue;
            }
            index.insert(layout.clone(), slots.len());
            layouts.push(layout);
            slots.push(RefCell::new(Slot::Pending(thunk)));
        }

        Self {
            table: Rc::new(Table {
                layouts,
                index,
                slots,
            }),
        }
    }

    /// Create a monad from `(layout, thunk)` pairs, taking the layout order
    /// from the iteration order. No thunk runs until its layout is requested.
    ///
    /// Thunks of different closure types can be mixed by boxing them as
    /// `Box<dyn Fn() -> T>`.
    pub fn new<F>(thunks: impl IntoIterator<Item = (L, F)>) -> Self
    where
        F: Fn() -> T + 'static,
    {
        Self::from_thunks(
            thunks
                .into_iter()
                .map(|(layout, f)| (layout, Rc::new(move || Ok(f())) as Thunk<T>)),
        )
    }

    /// Create a monad over an explicit layout list, backed by thunks looked up
    /// in `thunks`. Thunks for layouts not in `layouts` are dropped.
    ///
    /// Fails with [`LayoutError::MissingThunk`] if a listed layout has no thunk.
    pub fn with_layouts<F>(
        layouts: impl IntoIterator<Item = L>,
        mut thunks: HashMap<L, F>,
    ) -> Result<Self, LayoutError>
    where
        F: Fn() -> T + 'static,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for layout in layouts {
            if !seen.insert(layout.clone()) {
                continue;
            }
            let f = thunks
                .remove(&layout)
                .ok_or_else(|| LayoutError::missing_thunk(&layout))?;
            ordered.push((layout, f));
        }
        Ok(Self::new(ordered))
    }

    /// Create a monad where each layout's value is produced by `f`, given that
    /// layout.
    pub fn from_layouts(
        layouts: impl IntoIterator<Item = L>,
        f: impl Fn(&L) -> T + 'static,
    ) -> Self {
        let f = Rc::new(f);
        Self::from_thunks(layouts.into_iter().map(|layout| {
            let f = Rc::clone(&f);
            let key = layout.clone();
            (layout, Rc::new(move || Ok(f(&key))) as Thunk<T>)
        }))
    }

    /// The layouts this monad is defined over, in iteration order.
    pub fn layouts(&self) -> &[L] {
        &self.table.layouts
    }

    pub fn len(&self) -> usize {
        self.table.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.layouts.is_empty()
    }

    pub fn contains(&self, layout: &L) -> bool {
        self.table.index.contains_key(layout)
    }

    /// Whether `layout`'s thunk has already run to completion.
    pub fn is_resolved(&self, layout: &L) -> Result<bool, LayoutError> {
        Ok(self.slot(layout)?.borrow().is_resolved())
    }

    fn slot(&self, layout: &L) -> Result<&RefCell<Slot<T>>, LayoutError> {
        self.table
            .index
            .get(layout)
            .map(|&idx| &self.table.slots[idx])
            .ok_or_else(|| LayoutError::key_not_found(layout))
    }

    /// Build a monad over the same layouts, with one new thunk per layout.
    pub(crate) fn derive<U: 'static>(
        &self,
        mut thunk_for: impl FnMut(&L) -> Thunk<U>,
    ) -> LayoutMonad<L, U> {
        LayoutMonad::from_thunks(
            self.table
                .layouts
                .iter()
                .map(|layout| (layout.clone(), thunk_for(layout))),
        )
    }
}

impl<L: Layout, T: Clone + 'static> LayoutMonad<L, T> {
    /// Every layout holds `value`.
    pub fn of(layouts: impl IntoIterator<Item = L>, value: T) -> Self {
        let value = Rc::new(value);
        Self::from_thunks(layouts.into_iter().map(|layout| {
            let value = Rc::clone(&value);
            (layout, Rc::new(move || Ok((*value).clone())) as Thunk<T>)
        }))
    }

    /// Create a monad from already-known values. Slots still start Pending so
    /// that every monad resolves the same way.
    pub fn from_dict(dict: impl IntoIterator<Item = (L, T)>) -> Self {
        Self::from_thunks(
            dict.into_iter()
                .map(|(layout, value)| (layout, constant(value))),
        )
    }

    /// Return `layout`'s value, running its thunk on first request only.
    ///
    /// If the thunk fails (or panics), the slot stays Pending and the next
    /// lookup runs the thunk again.
    pub fn get_value(&self, layout: &L) -> Result<T, LayoutError> {
        let slot = self.slot(layout)?;
        let thunk = match &*slot.borrow() {
            Slot::Resolved(value) => return Ok(value.clone()),
            Slot::Pending(thunk) => Rc::clone(thunk),
        };

        trace!(target: "layout_monad", "forcing layout {layout:?}");
        let value = thunk()?;
        *slot.borrow_mut() = Slot::Resolved(value.clone());
        trace!(target: "layout_monad", "resolved layout {layout:?}");
        Ok(value)
    }

    /// Force every layout, in layout order.
    pub fn get_dict(&self) -> Result<LayoutDict<L, T>, LayoutError> {
        self.table
            .layouts
            .iter()
            .map(|layout| Ok((layout.clone(), self.get_value(layout)?)))
            .collect()
    }

    /// Apply `f` to each layout's value when that layout is requested.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> LayoutMonad<L, U> {
        let f = Rc::new(f);
        self.derive(|layout| {
            let source = self.clone();
            let f = Rc::clone(&f);
            let layout = layout.clone();
            Rc::new(move || source.get_value(&layout).map(|v| f(v))) as Thunk<U>
        })
    }

    /// Pointwise application: each layout's value is `funcs`'s function for
    /// that layout applied to this monad's value for it.
    ///
    /// Layouts missing from `funcs` fail with [`LayoutError::KeyNotFound`]
    /// when requested.
    pub fn apply<U, F>(&self, funcs: &LayoutMonad<L, F>) -> LayoutMonad<L, U>
    where
        U: 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        self.derive(|layout| {
            let source = self.clone();
            let funcs = funcs.clone();
            let layout = layout.clone();
            Rc::new(move || {
                let v = source.get_value(&layout)?;
                let f = funcs.get_value(&layout)?;
                Ok(f(v))
            }) as Thunk<U>
        })
    }

    /// Monadic bind: for each layout, `f` picks a continuation from this
    /// layout's value, and only that same layout of the continuation is read.
    pub fn chain<U: Clone + 'static>(
        &self,
        f: impl Fn(T) -> LayoutMonad<L, U> + 'static,
    ) -> LayoutMonad<L, U> {
        let f = Rc::new(f);
        self.derive(|layout| {
            let source = self.clone();
            let f = Rc::clone(&f);
            let layout = layout.clone();
            Rc::new(move || {
                let next = f(source.get_value(&layout)?);
                next.get_value(&layout)
            }) as Thunk<U>
        })
    }
}

impl<L: Layout, T: Clone + 'static> LayoutMonad<L, Option<T>> {
    /// Per layout, this value if it is `Some`, otherwise `fallback`'s.
    ///
    /// `fallback`'s thunk for a layout never runs when this monad has a value
    /// there.
    pub fn or(&self, fallback: &LayoutMonad<L, Option<T>>) -> LayoutMonad<L, Option<T>> {
        self.derive(|layout| {
            let primary = self.clone();
            let fallback = fallback.clone();
            let layout = layout.clone();
            Rc::new(move || match primary.get_value(&layout)? {
                Some(v) => Ok(Some(v)),
                None => fallback.get_value(&layout),
            }) as Thunk<Option<T>>
        })
    }

    /// Like [`LayoutMonad::or`], with a fallback that always has a value.
    pub fn unwrap_or(&self, fallback: &LayoutMonad<L, T>) -> LayoutMonad<L, T> {
        self.derive(|layout| {
            let primary = self.clone();
            let fallback = fallback.clone();
            let layout = layout.clone();
            Rc::new(move || match primary.get_value(&layout)? {
                Some(v) => Ok(v),
                None => fallback.get_value(&layout),
            }) as Thunk<T>
        })
    }
}

impl<L: Layout, T: Clone + 'static> From<LayoutDict<L, T>> for LayoutMonad<L, T> {
    fn from(dict: LayoutDict<L, T>) -> Self {
        Self::from_dict(dict)
    }
}
