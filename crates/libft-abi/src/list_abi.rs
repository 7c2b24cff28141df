//! ABI layer for the singly linked list (`t_list`).
//!
//! Nodes are allocated with `malloc` so callers may release them with `free`
//! or through `ft_lstdelone`/`ft_lstclear`. The list never owns a content
//! value beyond handing it to the caller's `del` callback.

use std::ffi::{c_int, c_void};
use std::ptr;

use crate::runtime_policy;

/// C layout of `t_list`: `{ void *content; struct s_list *next; }`.
#[repr(C)]
#[derive(Debug)]
pub struct TList {
    pub content: *mut c_void,
    pub next: *mut TList,
}

/// `void (*)(void *)`, used for both `del` and `ft_lstiter`'s `f`.
pub type ContentFn = unsafe extern "C" fn(*mut c_void);
/// `void *(*)(void *)`, the transform of `ft_lstmap`.
pub type MapFn = unsafe extern "C" fn(*mut c_void) -> *mut c_void;

/// Walk to the last node of a non-null chain.
///
/// # Safety
///
/// `node` must be non-null and the chain acyclic.
unsafe fn chain_tail(mut node: *mut TList) -> *mut TList {
    // SAFETY: every `next` in a valid chain is null or a live node.
    unsafe {
        while !(*node).next.is_null() {
            node = (*node).next;
        }
    }
    node
}

/// Release every node from `node` on, handing each content to `del`.
///
/// # Safety
///
/// `node` must be null or a `malloc`ed acyclic chain.
unsafe fn release_chain(mut node: *mut TList, del: ContentFn) {
    while !node.is_null() {
        // SAFETY: `node` is live until freed below.
        unsafe {
            let next = (*node).next;
            del((*node).content);
            libc::free(node.cast());
            node = next;
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn ft_lstnew(content: *mut c_void) -> *mut TList {
    // SAFETY: plain allocation; null is handled below.
    let node = unsafe { libc::malloc(std::mem::size_of::<TList>()) }.cast::<TList>();
    if node.is_null() {
        return node;
    }
    // SAFETY: `node` is a fresh, suitably aligned allocation.
    unsafe {
        node.write(TList {
            content,
            next: ptr::null_mut(),
        });
    }
    node
}

/// Splices the chain starting at `new` in front of `*lst`.
///
/// When `new` already has successors the old head follows `new`'s last node,
/// so no node is lost.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstadd_front(lst: *mut *mut TList, new: *mut TList) {
    if new.is_null() {
        return;
    }
    return_if_null!("ft_lstadd_front", (); lst);
    // SAFETY: both pointers are non-null and owned by the caller.
    unsafe {
        (*chain_tail(new)).next = *lst;
        *lst = new;
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstadd_back(lst: *mut *mut TList, new: *mut TList) {
    if new.is_null() {
        return;
    }
    return_if_null!("ft_lstadd_back", (); lst);
    // SAFETY: both pointers are non-null and owned by the caller.
    unsafe {
        if (*lst).is_null() {
            *lst = new;
        } else {
            (*chain_tail(*lst)).next = new;
        }
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstsize(lst: *mut TList) -> c_int {
    let mut count: c_int = 0;
    let mut node = lst;
    while !node.is_null() {
        count = count.wrapping_add(1);
        // SAFETY: `node` is a live node of the caller's chain.
        node = unsafe { (*node).next };
    }
    count
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstlast(lst: *mut TList) -> *mut TList {
    if lst.is_null() {
        return lst;
    }
    unsafe { chain_tail(lst) }
}

/// Frees one node after handing its content to `del`; `next` is left alone.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstdelone(lst: *mut TList, del: Option<ContentFn>) {
    if lst.is_null() {
        return;
    }
    let Some(del) = del else {
        runtime_policy::null_argument("ft_lstdelone");
        return;
    };
    // SAFETY: `lst` is a live `malloc`ed node.
    unsafe {
        del((*lst).content);
        libc::free(lst.cast());
    }
}

/// Deletes and frees every node from `*lst` on, then sets `*lst` to null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstclear(lst: *mut *mut TList, del: Option<ContentFn>) {
    let Some(del) = del else {
        runtime_policy::null_argument("ft_lstclear");
        return;
    };
    return_if_null!("ft_lstclear", (); lst);
    // SAFETY: `lst` is non-null; its target is null or a chain head.
    unsafe {
        release_chain(*lst, del);
        *lst = ptr::null_mut();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstiter(lst: *mut TList, f: Option<ContentFn>) {
    let Some(f) = f else {
        runtime_policy::null_argument("ft_lstiter");
        return;
    };
    let mut node = lst;
    while !node.is_null() {
        // SAFETY: `node` is a live node of the caller's chain.
        unsafe {
            f((*node).content);
            node = (*node).next;
        }
    }
}

/// Builds a new list whose contents are `f(content)` of each node of `lst`.
///
/// A null result from `f` or a failed node allocation aborts the build: the
/// contents produced so far are handed to `del`, their nodes freed, and null
/// is returned. The source list is never modified.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ft_lstmap(
    lst: *mut TList,
    f: Option<MapFn>,
    del: Option<ContentFn>,
) -> *mut TList {
    let (Some(f), Some(del)) = (f, del) else {
        runtime_policy::null_argument("ft_lstmap");
        return ptr::null_mut();
    };

    let mut head: *mut TList = ptr::null_mut();
    let mut tail: *mut TList = ptr::null_mut();
    let mut node = lst;
    while !node.is_null() {
        // SAFETY: `node` is a live node of the caller's chain; `f` and `del`
        // are caller-supplied C callbacks.
        unsafe {
            let content = f((*node).content);
            if content.is_null() {
                release_chain(head, del);
                return ptr::null_mut();
            }
            let fresh = ft_lstnew(content);
            if fresh.is_null() {
                del(content);
                release_chain(head, del);
                return ptr::null_mut();
            }
            if tail.is_null() {
                head = fresh;
            } else {
                (*tail).next = fresh;
            }
            tail = fresh;
            node = (*node).next;
        }
    }
    head
}
