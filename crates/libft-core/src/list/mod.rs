//! Owned singly-linked list with callback-driven cleanup and mapping.
//!
//! A [`List`] owns its chain of boxed [`Node`]s. Insertion accepts a whole
//! chain (a node that already has successors), which is spliced in as a
//! unit. Payload release is explicit: [`List::clear`] and [`delone`] hand
//! every payload to a caller-supplied destructor exactly once.

use std::fmt;

/// One element of the chain.
pub struct Node<T> {
    pub content: T,
    pub next: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// Creates a node owning `content` with no successor.
    #[must_use]
    pub fn new(content: T) -> Box<Self> {
        Box::new(Self {
            content,
            next: None,
        })
    }
}

/// Releases a single node: `del` receives the payload, then the node itself
/// is freed.
///
/// The successor link is left alone and returned to the caller. Dropping the
/// returned chain releases it without running `del`.
#[must_use = "the successor chain is returned, not released through `del`"]
pub fn delone<T, D>(node: Box<Node<T>>, del: D) -> Option<Box<Node<T>>>
where
    D: FnOnce(T),
{
    let Node { content, next } = *node;
    del(content);
    next
}

/// Walks to the empty link after the last node of a chain.
fn tail_link<T>(mut link: &mut Option<Box<Node<T>>>) -> &mut Option<Box<Node<T>>> {
    while let Some(node) = link {
        link = &mut node.next;
    }
    link
}

/// A list handle: the head of an owned chain, or nothing.
pub struct List<T> {
    head: Option<Box<Node<T>>>,
}

impl<T> List<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// First node, if any.
    #[must_use]
    pub fn head(&self) -> Option<&Node<T>> {
        self.head.as_deref()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Makes `chain` the new head; the previous head follows the last node
    /// of `chain`. O(1) for a single node.
    pub fn push_front(&mut self, mut chain: Box<Node<T>>) {
        let previous = self.head.take();
        *tail_link(&mut chain.next) = previous;
        self.head = Some(chain);
    }

    /// Links `chain` after the current last node (or makes it the head of an
    /// empty list). O(n) in the list length.
    pub fn push_back(&mut self, chain: Box<Node<T>>) {
        *tail_link(&mut self.head) = Some(chain);
    }

    /// Detaches and returns the head node, re-linking the list to its successor.
    pub fn pop_front(&mut self) -> Option<Box<Node<T>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    /// Number of nodes, counted by traversal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Tail node, found by traversal.
    #[must_use]
    pub fn last(&self) -> Option<&Node<T>> {
        let mut node = self.head.as_deref()?;
        while let Some(next) = node.next.as_deref() {
            node = next;
        }
        Some(node)
    }

    /// Payloads in head-to-tail order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Calls `f` on every payload in head-to-tail order. The structure is
    /// untouched; payloads may be mutated.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            f(&mut node.content);
            cur = node.next.as_deref_mut();
        }
    }

    /// Releases every node through [`delone`] with `del`, leaving the list empty.
    pub fn clear<D>(&mut self, mut del: D)
    where
        D: FnMut(T),
    {
        let mut cur = self.head.take();
        while let Some(node) = cur {
            cur = delone(node, &mut del);
        }
    }

    /// Builds a new list from `f` applied to every payload, head to tail.
    ///
    /// `f` returning `None` is a failure: every payload produced so far is
    /// released through `del` and `None` is returned. The source list is
    /// never modified.
    pub fn map<U, F, D>(&self, mut f: F, del: D) -> Option<List<U>>
    where
        F: FnMut(&T) -> Option<U>,
        D: FnMut(U),
    {
        let mut out = List::new();
        let mut tail = &mut out.head;
        for content in self.iter() {
            let Some(mapped) = f(content) else {
                out.clear(del);
                return None;
            };
            let node = tail.insert(Node::new(mapped));
            tail = &mut node.next;
        }
        Some(out)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        // Unlink iteratively so long chains do not recurse through Box drops.
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        let mut tail = &mut list.head;
        for content in iter {
            let node = tail.insert(Node::new(content));
            tail = &mut node.next;
        }
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over list payloads.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.content)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
