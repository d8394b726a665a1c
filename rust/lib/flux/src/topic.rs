use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Topic index for `/`-separated paths with MQTT-style wildcards.
///
/// - `+` stands for exactly one level.
/// - `#` stands for the remaining levels, including none. Only valid last.
///
/// Used twice: the store keys change subscriptions by pattern, the router
/// keys request handlers by pattern.
pub struct TopicTrie<T> {
    root: RwLock<Node<T>>,
}

struct Node<T> {
    exact: HashMap<String, Node<T>>,
    one: Option<Box<Node<T>>>,
    /// Entries registered with `#` at this level.
    tail: Vec<T>,
    /// Entries whose pattern ends exactly at this node.
    here: Vec<T>,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Self {
            exact: HashMap::new(),
            one: None,
            tail: Vec::new(),
            here: Vec::new(),
        }
    }

    fn walk(&self, levels: &[&str], out: &mut Vec<T>)
    where
        T: Clone,
    {
        out.extend(self.tail.iter().cloned());

        let Some((head, rest)) = levels.split_first() else {
            out.extend(self.here.iter().cloned());
            return;
        };

        if let Some(child) = self.exact.get(*head) {
            child.walk(rest, out);
        }
        if let Some(child) = &self.one {
            child.walk(rest, out);
        }
    }

    /// Follows `levels` literally (wildcards as plain keys) and returns the
    /// slot the pattern terminates in.
    fn slot_mut(&mut self, levels: &[&str]) -> Option<&mut Vec<T>> {
        let Some((head, rest)) = levels.split_first() else {
            return Some(&mut self.here);
        };
        match *head {
            "#" => Some(&mut self.tail),
            "+" => self.one.as_mut()?.slot_mut(rest),
            seg => self.exact.get_mut(seg)?.slot_mut(rest),
        }
    }

    fn slot(&self, levels: &[&str]) -> Option<&Vec<T>> {
        let Some((head, rest)) = levels.split_first() else {
            return Some(&self.here);
        };
        match *head {
            "#" => Some(&self.tail),
            "+" => self.one.as_ref()?.slot(rest),
            seg => self.exact.get(seg)?.slot(rest),
        }
    }

    fn slot_or_create(&mut self, levels: &[&str]) -> &mut Vec<T> {
        let Some((head, rest)) = levels.split_first() else {
            return &mut self.here;
        };
        match *head {
            "#" => &mut self.tail,
            "+" => self
                .one
                .get_or_insert_with(|| Box::new(Node::empty()))
                .slot_or_create(rest),
            seg => self
                .exact
                .entry(seg.to_string())
                .or_insert_with(Node::empty)
                .slot_or_create(rest),
        }
    }
}

fn levels(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

impl<T: Clone> TopicTrie<T> {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::empty()),
        }
    }

    /// Register `value` under `pattern`, e.g. `"feed/posts"`, `"profile/+"`, `"#"`.
    pub fn insert(&self, pattern: &str, value: T) {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        root.slot_or_create(&levels(pattern)).push(value);
    }

    /// Every value whose pattern covers the concrete `topic`.
    ///
    /// An empty topic matches nothing but a bare `#`.
    pub fn lookup(&self, topic: &str) -> Vec<T> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        let mut out = Vec::new();
        if topic.is_empty() {
            out.extend(root.tail.iter().cloned());
            return out;
        }
        root.walk(&levels(topic), &mut out);
        out
    }

    /// Drop the values registered under exactly `pattern` that satisfy `pred`.
    /// Returns whether anything was dropped.
    pub fn remove_where<F>(&self, pattern: &str, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        match root.slot_mut(&levels(pattern)) {
            Some(slot) => {
                let before = slot.len();
                slot.retain(|v| !pred(v));
                slot.len() != before
            }
            None => false,
        }
    }

    /// Whether anything is registered under exactly `pattern`.
    pub fn has_pattern(&self, pattern: &str) -> bool {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        root.slot(&levels(pattern)).is_some_and(|slot| !slot.is_empty())
    }
}

impl<T: Clone> Default for TopicTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}
