//! Shared primitives used across the widgetsmith crates.
//!
//! ```rust
//! use wcommon::{CallId, MetadataMap, Registry, SessionId, TraceId};
//!
//! let session = SessionId::from("session-1");
//! let trace = TraceId::new("trace-1");
//! let call = CallId::next();
//! let mut metadata = MetadataMap::new();
//! metadata.insert("widget".to_string(), "clock".to_string());
//!
//! let mut registry = Registry::new();
//! registry.insert("clock".to_string(), 1_u8);
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(trace.to_string(), "trace-1");
//! assert_eq!(call.as_str().len(), 8);
//! assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["clock"]);
//! ```

pub mod future {
    //! Boxed future alias shared by every async seam in the workspace.
    //!
    //! ```rust
    //! use wcommon::BoxFuture;
    //!
    //! fn byte_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = byte_len("index.jsx");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Identifier newtypes and metadata carried alongside a tool invocation.

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    pub type MetadataMap = HashMap<String, String>;

    macro_rules! string_id {
        ($(#[$meta:meta])* $name:ident) => {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name(String);

            impl $name {
                pub fn new(value: impl Into<String>) -> Self {
                    Self(value.into())
                }

                pub fn as_str(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<String> for $name {
                fn from(value: String) -> Self {
                    Self(value)
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }
        };
    }

    string_id!(
        /// Conversation the external session is running.
        SessionId
    );
    string_id!(
        /// Correlation id propagated from the caller, if any.
        TraceId
    );
    string_id!(
        /// Short id stamped on a single tool invocation.
        CallId
    );

    static CALL_SEQUENCE: AtomicU64 = AtomicU64::new(0);

    impl CallId {
        /// Eight hex digits: a clock-derived prefix and a process-wide sequence.
        pub fn next() -> Self {
            let sequence = CALL_SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.subsec_nanos())
                .unwrap_or_default();
            Self(format!("{:04x}{:04x}", (nanos >> 10) & 0xFFFF, sequence))
        }
    }
}

pub mod registry {
    //! Name-ordered registry used for tools and data sources.
    //!
    //! Iteration follows key order so anything listed to a model is stable
    //! between runs.
    //!
    //! ```rust
    //! use wcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("beta".to_string(), 2_u32);
    //! registry.insert("alpha".to_string(), 1_u32);
    //!
    //! assert_eq!(registry.values().copied().collect::<Vec<_>>(), vec![1, 2]);
    //! ```

    use std::borrow::Borrow;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: BTreeMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Ord,
    {
        fn default() -> Self {
            Self {
                items: BTreeMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Ord,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            self.items.insert(key, value)
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Ord + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Ord + ?Sized,
        {
            self.items.remove(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Ord + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.items.keys()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.items.values()
        }

        pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
            self.items.iter()
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }

    impl<K, V> FromIterator<(K, V)> for Registry<K, V>
    where
        K: Ord,
    {
        fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
            Self {
                items: iter.into_iter().collect(),
            }
        }
    }
}

pub use context::{CallId, MetadataMap, SessionId, TraceId};
pub use future::BoxFuture;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{CallId, Registry, SessionId, TraceId};

    #[test]
    fn id_newtypes_expose_their_text() {
        let session = SessionId::new("session-1");
        let trace = TraceId::from("trace-1".to_string());

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(trace.to_string(), "trace-1");
    }

    #[test]
    fn call_ids_are_short_hex_and_distinct() {
        let ids: HashSet<CallId> = (0..64).map(|_| CallId::next()).collect();

        assert_eq!(ids.len(), 64);
        for id in &ids {
            assert_eq!(id.as_str().len(), 8);
            assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn registry_iterates_in_key_order() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());

        registry.insert("write".to_string(), 2_u32);
        registry.insert("list".to_string(), 1_u32);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["list", "write"]
        );

        assert_eq!(registry.remove("list"), Some(1));
        assert!(!registry.contains_key("list"));
        assert_eq!(registry.get("write"), Some(&2));
    }
}
