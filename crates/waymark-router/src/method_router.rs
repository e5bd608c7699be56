//! Per-verb slots for a single path.

use http::Method;
use waymark_options::HttpMethod;

/// Maps each HTTP verb of one path to a value.
///
/// Slots are filled once; a second insert for the same verb is rejected
/// and hands back the value already stored.
///
/// # Example
///
/// ```rust
/// use waymark_options::HttpMethod;
/// use waymark_router::MethodRouter;
///
/// let mut router = MethodRouter::new();
/// router.insert(HttpMethod::Get, "listUsers").unwrap();
/// router.insert(HttpMethod::Post, "createUser").unwrap();
///
/// assert_eq!(router.get(HttpMethod::Get), Some(&"listUsers"));
/// assert_eq!(router.insert(HttpMethod::Get, "again"), Err(&"listUsers"));
/// assert_eq!(router.allowed_methods(), [HttpMethod::Get, HttpMethod::Post]);
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<T> {
    get: Option<T>,
    post: Option<T>,
    put: Option<T>,
    patch: Option<T>,
    delete: Option<T>,
    head: Option<T>,
    options: Option<T>,
}

impl<T> Default for MethodRouter<T> {
    fn default() -> Self {
        Self {
            get: None,
            post: None,
            put: None,
            patch: None,
            delete: None,
            head: None,
            options: None,
        }
    }
}

const ALL_METHODS: [HttpMethod; 7] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
    HttpMethod::Head,
    HttpMethod::Options,
];

impl<T> MethodRouter<T> {
    /// Creates a router with every slot empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, method: HttpMethod) -> &Option<T> {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Post => &self.post,
            HttpMethod::Put => &self.put,
            HttpMethod::Patch => &self.patch,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Head => &self.head,
            HttpMethod::Options => &self.options,
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<T> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Options => &mut self.options,
        }
    }

    /// Stores `value` for `method`, or returns the value already there.
    pub fn insert(&mut self, method: HttpMethod, value: T) -> Result<(), &T> {
        let slot = self.slot_mut(method);
        if slot.is_none() {
            *slot = Some(value);
            return Ok(());
        }
        slot.as_ref().map_or(Ok(()), Err)
    }

    /// Value stored for `method`.
    #[must_use]
    pub fn get(&self, method: HttpMethod) -> Option<&T> {
        self.slot(method).as_ref()
    }

    /// Value stored for an `http` method; `None` for verbs without a slot.
    #[must_use]
    pub fn get_http(&self, method: &Method) -> Option<&T> {
        HttpMethod::try_from(method)
            .ok()
            .and_then(|method| self.get(method))
    }

    /// Whether any slot is filled.
    #[must_use]
    pub fn has_any_method(&self) -> bool {
        ALL_METHODS.iter().any(|m| self.slot(*m).is_some())
    }

    /// Filled verbs in canonical order.
    #[must_use]
    pub fn allowed_methods(&self) -> Vec<HttpMethod> {
        self.iter().map(|(method, _)| method).collect()
    }

    /// Iterates filled slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (HttpMethod, &T)> {
        ALL_METHODS
            .into_iter()
            .filter_map(move |method| self.get(method).map(|value| (method, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_router_new_is_empty() {
        let router: MethodRouter<u8> = MethodRouter::new();
        assert!(!router.has_any_method());
        assert!(router.allowed_methods().is_empty());
    }

    #[test]
    fn test_method_router_insert_and_get() {
        let mut router = MethodRouter::new();
        router.insert(HttpMethod::Delete, 3).unwrap();

        assert_eq!(router.get(HttpMethod::Delete), Some(&3));
        assert_eq!(router.get(HttpMethod::Get), None);
        assert!(router.has_any_method());
    }

    #[test]
    fn test_method_router_rejects_second_insert() {
        let mut router = MethodRouter::new();
        router.insert(HttpMethod::Put, "first").unwrap();

        assert_eq!(router.insert(HttpMethod::Put, "second"), Err(&"first"));
        assert_eq!(router.get(HttpMethod::Put), Some(&"first"));
    }

    #[test]
    fn test_method_router_http_lookup() {
        let mut router = MethodRouter::new();
        router.insert(HttpMethod::Patch, 1).unwrap();

        assert_eq!(router.get_http(&Method::PATCH), Some(&1));
        assert_eq!(router.get_http(&Method::TRACE), None);
    }

    #[test]
    fn test_method_router_allowed_methods_order() {
        let mut router = MethodRouter::new();
        router.insert(HttpMethod::Options, ()).unwrap();
        router.insert(HttpMethod::Get, ()).unwrap();
        router.insert(HttpMethod::Delete, ()).unwrap();

        assert_eq!(
            router.allowed_methods(),
            vec![HttpMethod::Get, HttpMethod::Delete, HttpMethod::Options]
        );
    }
}
