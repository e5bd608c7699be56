//! Path parameters captured while matching a request path.

use smallvec::SmallVec;

/// Parameters kept inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Captured `(name, value)` pairs in template order.
///
/// # Example
///
/// ```rust
/// use waymark_router::Params;
///
/// let mut params = Params::new();
/// params.push("orgId", "acme");
/// params.push("userId", "42");
///
/// assert_eq!(params.get("userId"), Some("42"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Value captured for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates `(name, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Drops captures past `len`; used to undo a failed branch.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.inner.truncate(len);
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
