/// Fully resolved values of a [`crate::LayoutMonad`], in layout order.
///
/// Equality is order-sensitive: two dicts are equal when they hold the same
/// layouts, in the same order, with equal values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutDict<L, T> {
    entries: Vec<(L, T)>,
}

impl<L: PartialEq, T> LayoutDict<L, T> {
    pub fn get(&self, layout: &L) -> Option<&T> {
        self.entries
            .iter()
            .find(|(l, _)| l == layout)
            .map(|(_, value)| value)
    }
}

impl<L, T> LayoutDict<L, T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L, T> FromIterator<(L, T)> for LayoutDict<L, T> {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<L, T> IntoIterator for LayoutDict<L, T> {
    type Item = (L, T);
    type IntoIter = std::vec::IntoIter<(L, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(feature = "serde")]
impl<L: serde::Serialize, T: serde::Serialize> serde::Serialize for LayoutDict<L, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (layout, value) in &self.entries {
            map.serialize_entry(layout, value)?;
        }
        map.end()
    }
}
