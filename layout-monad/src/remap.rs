use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::debug;

use crate::slot::Thunk;
use crate::{Layout, LayoutMonad};

impl<L: Layout, T: Clone + 'static> LayoutMonad<L, T> {
    /// Rename and/or fan out layouts.
    ///
    /// `f` gives each old layout the new layouts it should back, visited in
    /// layout order. A new layout is owned by the first old layout that names
    /// it; later claims on it (including repeats within one list) are dropped.
    /// Looking up a new layout reads its old layout from this monad, so new
    /// layouts that share an old one share a single evaluation.
    ///
    /// ```rust
    /// use layout_monad::LayoutMonad;
    ///
    /// let designs = LayoutMonad::from_dict([("mobileDesign", 123), ("desktopDesign", 512)]);
    /// let devices = designs.map_layouts(|design| match *design {
    ///     "mobileDesign" => vec!["mobile", "tablet"],
    ///     _ => vec!["mobile"],
    /// });
    ///
    /// assert_eq!(devices.layouts(), &["mobile", "tablet"]);
    /// assert_eq!(devices.get_value(&"mobile"), Ok(123));
    /// ```
    pub fn map_layouts<N, I>(&self, mut f: impl FnMut(&L) -> I) -> LayoutMonad<N, T>
    where
        N: Layout,
        I: IntoIterator<Item = N>,
    {
        let mut claimed = HashSet::new();
        let mut old_from_new = Vec::new();

        for old in self.layouts() {
            for new in f(old) {
                if !claimed.insert(new.clone()) {
                    debug!(
                        target: "layout_monad",
                        "layout {new:?} already claimed, dropping it for {old:?}"
                    );
                    continue;
                }
                old_from_new.push((new, old.clone()));
            }
        }

        LayoutMonad::from_thunks(old_from_new.into_iter().map(|(new, old)| {
            let source = self.clone();
            (new, Rc::new(move || source.get_value(&old)) as Thunk<T>)
        }))
    }

    /// [`LayoutMonad::map_layouts`] driven by a lookup table. Old layouts
    /// missing from `table` back no new layouts.
    ///
    /// Values are slices of new layouts; an old layout backing a single new
    /// layout is written as a one-element array, eg `("mobileDesign", ["mobile"])`.
    pub fn map_layouts_with<N, V>(&self, table: &HashMap<L, V>) -> LayoutMonad<N, T>
    where
        N: Layout,
        V: AsRef<[N]>,
    {
        self.map_layouts(|old| {
            table
                .get(old)
                .map(|news| news.as_ref().to_vec())
                .unwrap_or_default()
        })
    }
}
