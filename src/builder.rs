use log::debug;

use crate::allocator::PoolHandle;
use crate::comparable::Comparable;
use crate::error::{Error, Result};
use crate::ordered::AvlTree;
use crate::pool::PoolConfig;
use crate::unrestricted::UnrestrictedAvlTree;

/// Configures a tree whose nodes are recycled through a pool.
///
/// Either hand over an existing pool with [`with_memory_pool`] (to share it
/// between trees) or describe a private one with [`with_pool_config`]. With
/// neither, the tree gets a private pool with default settings. All checks
/// run in [`build`]; an error means no tree was created.
///
/// [`with_memory_pool`]: TreeBuilder::with_memory_pool
/// [`with_pool_config`]: TreeBuilder::with_pool_config
/// [`build`]: TreeBuilder::build
#[derive(Debug)]
pub struct TreeBuilder<K, V> {
    pool: Option<PoolHandle<K, V>>,
    pool_config: Option<PoolConfig>,
}

impl<K: Default, V: Default> TreeBuilder<K, V> {
    pub fn new() -> Self {
        Self {
            pool: None,
            pool_config: None,
        }
    }

    pub fn with_memory_pool(mut self, pool: PoolHandle<K, V>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn with_pool_config(mut self, config: PoolConfig) -> Self {
        self.pool_config = Some(config);
        self
    }

    pub fn build(self) -> Result<AvlTree<K, V, PoolHandle<K, V>>>
    where
        K: Ord,
    {
        Ok(AvlTree::new_in(self.into_pool()?))
    }

    pub fn build_unrestricted(self) -> Result<UnrestrictedAvlTree<K, V, PoolHandle<K, V>>>
    where
        K: Comparable,
    {
        Ok(UnrestrictedAvlTree::new_in(self.into_pool()?))
    }

    fn into_pool(self) -> Result<PoolHandle<K, V>> {
        match (self.pool, self.pool_config) {
            (Some(_), Some(_)) => Err(Error::InvalidConfig(
                "a shared memory pool and a pool config are mutually exclusive",
            )),
            (Some(pool), None) => {
                debug!("building tree on shared pool ({} idle)", pool.idle());
                Ok(pool)
            }
            (None, Some(config)) => {
                debug!("building tree on private pool: {config:?}");
                PoolHandle::with_config(config)
            }
            (None, None) => Ok(PoolHandle::new()),
        }
    }
}

impl<K: Default, V: Default> Default for TreeBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometric;

    #[test]
    fn test_build_with_shared_pool() {
        let pool: PoolHandle<u32, u32> = PoolHandle::new();
        let mut t = AvlTree::builder()
            .with_memory_pool(pool.clone())
            .build()
            .unwrap();
        t.add(1, 1);
        assert!(t.allocator().ptr_eq(&pool));
        assert_eq!(pool.stats().allocated, 1);
    }

    #[test]
    fn test_build_with_config_preallocates() {
        let t: AvlTree<u32, u32, _> = AvlTree::builder()
            .with_pool_config(PoolConfig::new().initial_len(16))
            .build()
            .unwrap();
        assert_eq!(t.allocator().idle(), 16);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result: Result<AvlTree<u32, u32, _>> = AvlTree::builder()
            .with_pool_config(PoolConfig::new().max_idle(0))
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_rejects_pool_and_config() {
        let result: Result<AvlTree<u32, u32, _>> = AvlTree::builder()
            .with_memory_pool(PoolHandle::new())
            .with_pool_config(PoolConfig::new())
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_build_unrestricted() {
        let mut t: UnrestrictedAvlTree<Geometric, u8, _> = TreeBuilder::new()
            .with_pool_config(PoolConfig::new().initial_len(2).max_idle(4))
            .build_unrestricted()
            .unwrap();
        t.add(Geometric::range(0.0, 1.0).unwrap(), 1).unwrap();
        assert_eq!(t.allocator().stats().reused, 1);
    }
}
