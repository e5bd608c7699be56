//! Segment tree used for path matching.

use waymark_options::HttpMethod;

use crate::method_router::MethodRouter;
use crate::params::Params;
use crate::template::{PathTemplate, Segment};

/// Why a template could not be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InsertError<T> {
    /// The verb is already bound at this template.
    Occupied(T),
    /// Another template names the parameter at this position differently.
    ParamName { existing: String, requested: String },
}

/// A node in the segment tree.
///
/// Children are tried static first, then the parameter child, then the
/// catch-all, backtracking when a branch fails deeper down.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    methods: MethodRouter<T>,
    /// Sorted by segment text for binary search.
    static_children: Vec<(String, Node<T>)>,
    param_child: Option<(String, Box<Node<T>>)>,
    wildcard_child: Option<(String, MethodRouter<T>)>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            methods: MethodRouter::new(),
            static_children: Vec::new(),
            param_child: None,
            wildcard_child: None,
        }
    }
}

impl<T: Clone> Node<T> {
    pub(crate) fn insert(
        &mut self,
        template: &PathTemplate,
        method: HttpMethod,
        value: T,
    ) -> Result<(), InsertError<T>> {
        let mut node = self;
        for segment in template.segments() {
            match segment {
                Segment::Static(text) => {
                    let index = match node
                        .static_children
                        .binary_search_by(|(s, _)| s.as_str().cmp(text))
                    {
                        Ok(index) => index,
                        Err(index) => {
                            node.static_children
                                .insert(index, (text.clone(), Node::default()));
                            index
                        }
                    };
                    node = &mut node.static_children[index].1;
                }
                Segment::Param(name) => {
                    if let Some((existing, _)) = &node.param_child {
                        if existing != name {
                            return Err(InsertError::ParamName {
                                existing: existing.clone(),
                                requested: name.clone(),
                            });
                        }
                    }
                    let (_, child) = node
                        .param_child
                        .get_or_insert_with(|| (name.clone(), Box::default()));
                    node = &mut **child;
                }
                Segment::Wildcard(name) => {
                    if let Some((existing, _)) = &node.wildcard_child {
                        if existing != name {
                            return Err(InsertError::ParamName {
                                existing: existing.clone(),
                                requested: name.clone(),
                            });
                        }
                    }
                    let (_, methods) = node
                        .wildcard_child
                        .get_or_insert_with(|| (name.clone(), MethodRouter::new()));
                    return methods
                        .insert(method, value)
                        .map_err(|existing| InsertError::Occupied(existing.clone()));
                }
            }
        }
        node.methods
            .insert(method, value)
            .map_err(|existing| InsertError::Occupied(existing.clone()))
    }
}

impl<T> Node<T> {
    /// Finds the value bound to `method` at a concrete request path.
    ///
    /// A branch only matches when it serves `method`; otherwise matching
    /// falls back to the next lower-priority branch.
    pub(crate) fn find(&self, method: HttpMethod, path: &str) -> Option<(&T, Params)> {
        let segments = split_path(path);
        let mut params = Params::new();
        let value = self.match_segments(&segments, method, &mut params)?;
        Some((value, params))
    }

    /// Verbs served at a concrete request path, across every matching branch.
    pub(crate) fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        let mut seen = MethodRouter::new();
        self.collect_methods(&split_path(path), &mut seen);
        seen.allowed_methods()
    }

    fn match_segments<'a>(
        &'a self,
        segments: &[&str],
        method: HttpMethod,
        params: &mut Params,
    ) -> Option<&'a T> {
        let Some((segment, remaining)) = segments.split_first() else {
            if let Some(value) = self.methods.get(method) {
                return Some(value);
            }
            // An empty tail still reaches a catch-all.
            let (name, methods) = self.wildcard_child.as_ref()?;
            let value = methods.get(method)?;
            params.push(name.clone(), "");
            return Some(value);
        };

        if let Ok(index) = self
            .static_children
            .binary_search_by(|(s, _)| s.as_str().cmp(*segment))
        {
            let child = &self.static_children[index].1;
            if let Some(found) = child.match_segments(remaining, method, params) {
                return Some(found);
            }
        }

        if let Some((name, child)) = &self.param_child {
            let mark = params.len();
            params.push(name.clone(), *segment);
            if let Some(found) = child.match_segments(remaining, method, params) {
                return Some(found);
            }
            params.truncate(mark);
        }

        let (name, methods) = self.wildcard_child.as_ref()?;
        let value = methods.get(method)?;
        params.push(name.clone(), segments.join("/"));
        Some(value)
    }

    fn collect_methods(&self, segments: &[&str], seen: &mut MethodRouter<()>) {
        let mut add = |methods: &MethodRouter<T>| {
            for (method, _) in methods.iter() {
                let _ = seen.insert(method, ());
            }
        };

        if let Some((_, methods)) = &self.wildcard_child {
            add(methods);
        }

        let Some((segment, remaining)) = segments.split_first() else {
            add(&self.methods);
            return;
        };

        if let Ok(index) = self
            .static_children
            .binary_search_by(|(s, _)| s.as_str().cmp(*segment))
        {
            self.static_children[index].1.collect_methods(remaining, seen);
        }

        if let Some((_, child)) = &self.param_child {
            child.collect_methods(remaining, seen);
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
