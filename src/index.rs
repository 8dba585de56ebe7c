//! Typed dense indices and the vectors addressed by them.
//!
//! A graph hands out [`VertexIndex`] values in `[0, vertex_count)`. Per-vertex
//! scratch state of the algorithms (colours, in-degrees, BFS parents) lives in
//! a [`VertexVec`], which can only be indexed by a [`VertexIndex`].

#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::convert::From<usize> for $Idx {
            fn from(value: usize) -> Self {
                $Idx(value)
            }
        }

        impl ::std::convert::From<$Idx> for usize {
            fn from(value: $Idx) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $Idx {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        impl<T> $Vec<T> {
            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }
            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
            #[inline] pub fn push(&mut self, value: T) { self.0.push(value) }
            #[inline] pub fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }

            #[inline] pub fn iter<'a>(&'a self) -> ::std::iter::Map<::std::iter::Enumerate<::std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)> {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }

        impl<T: Clone> $Vec<T> {
            /// A vector of `len` copies of `value`.
            #[inline] pub fn filled(len: usize, value: T) -> Self { Self(::std::vec![value; len]) }
        }

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<T> ::std::convert::From<::std::vec::Vec<T>> for $Vec<T> {
            #[inline] fn from(v: ::std::vec::Vec<T>) -> Self { Self(v) }
        }

        impl<T> ::std::iter::IntoIterator for $Vec<T> {
            type Item = ($Idx, T);
            type IntoIter = ::std::iter::Map<::std::iter::Enumerate<::std::vec::IntoIter<T>>, fn((usize, T)) -> ($Idx, T)>;
            #[inline] fn into_iter(self) -> Self::IntoIter { self.0.into_iter().enumerate().map(|(u, t)| ($Idx(u), t)) }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<::std::iter::Enumerate<::std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)>;
            fn into_iter(self) -> Self::IntoIter {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }
    };
}

define_indexed_vec!(
    /// Dense position of a vertex in its graph. Positions are reassigned when
    /// a lower-indexed vertex is removed, so an index is only meaningful
    /// between two mutations of the same graph.
    pub struct VertexIndex;

    /// A vector with one slot per vertex, indexed by [`VertexIndex`].
    pub struct VertexVec;
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filled_and_indexed() {
        let mut marks = VertexVec::filled(3, 0usize);
        marks[VertexIndex(1)] += 5;
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[VertexIndex(1)], 5);
        assert_eq!(marks.get(VertexIndex(3)), None);

        let collected: Vec<_> = marks.into_iter().filter(|(_, m)| *m > 0).collect();
        assert_eq!(collected, vec![(VertexIndex(1), 5)]);
    }
}
