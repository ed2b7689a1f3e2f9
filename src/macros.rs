/// Implements [`Container`](crate::tree_traits::Container) for a tree type by
/// delegating to its inherent methods.
macro_rules! impl_container {
    ($tree:ident) => {
        impl<K, V, C> $crate::tree_traits::Container for $tree<K, V, C>
        where
            V: Clone,
            C: $crate::tree_traits::KeyComparator<K>,
        {
            type Value = V;

            #[inline]
            fn is_empty(&self) -> bool {
                $tree::is_empty(self)
            }

            #[inline]
            fn len(&self) -> usize {
                $tree::len(self)
            }

            fn clear(&mut self) {
                $tree::clear(self)
            }

            fn values(&self) -> Vec<V> {
                self.iter().map(|(_, v)| v.clone()).collect()
            }
        }
    };
}

pub(crate) use impl_container;
