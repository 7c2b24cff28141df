//! Integration tests for the `t_list` exports, driven the way a C caller
//! would: `strdup`ed contents, `free` as `del`.

use std::ffi::{CStr, c_char, c_void};
use std::ptr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use ft::TList;
use ft::list_abi::*;

static TEST_LOCK: Mutex<()> = Mutex::new(());
static DEL_CALLS: AtomicUsize = AtomicUsize::new(0);
static ITER_SEEN: Mutex<Vec<Vec<u8>>> = Mutex::new(Vec::new());
static MAP_FAIL_AT: AtomicUsize = AtomicUsize::new(usize::MAX);
static MAP_CALLS: AtomicUsize = AtomicUsize::new(0);

unsafe extern "C" fn del_free(content: *mut c_void) {
    DEL_CALLS.fetch_add(1, Ordering::SeqCst);
    unsafe { libc::free(content) };
}

unsafe extern "C" fn iter_collect(content: *mut c_void) {
    let bytes = unsafe { content_bytes(content) };
    ITER_SEEN.lock().expect("iter log lock").push(bytes);
}

unsafe extern "C" fn map_upper(content: *mut c_void) -> *mut c_void {
    let call = MAP_CALLS.fetch_add(1, Ordering::SeqCst);
    if call == MAP_FAIL_AT.load(Ordering::SeqCst) {
        return ptr::null_mut();
    }
    let dup = unsafe { libc::strdup(content.cast::<c_char>()) };
    let mut p = dup;
    // SAFETY: `dup` is a fresh NUL-terminated copy.
    unsafe {
        while *p != 0 {
            *p = (*p as u8).to_ascii_uppercase() as c_char;
            p = p.add(1);
        }
    }
    dup.cast()
}

unsafe fn content_bytes(content: *mut c_void) -> Vec<u8> {
    // SAFETY: every content in these tests is a C string.
    unsafe { CStr::from_ptr(content.cast::<c_char>()) }
        .to_bytes()
        .to_vec()
}

fn new_node(value: &CStr) -> *mut TList {
    let content = unsafe { libc::strdup(value.as_ptr()) };
    let node = ft_lstnew(content.cast());
    assert!(!node.is_null());
    node
}

fn values(mut node: *mut TList) -> Vec<Vec<u8>> {
    let mut out = Vec::new();
    while !node.is_null() {
        unsafe {
            out.push(content_bytes((*node).content));
            node = (*node).next;
        }
    }
    out
}

fn reset_counters() {
    DEL_CALLS.store(0, Ordering::SeqCst);
    MAP_CALLS.store(0, Ordering::SeqCst);
    MAP_FAIL_AT.store(usize::MAX, Ordering::SeqCst);
    ITER_SEEN.lock().expect("iter log lock").clear();
}

#[test]
fn full_list_scenario() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    reset_counters();

    let mut head: *mut TList = ptr::null_mut();
    unsafe {
        assert_eq!(ft_lstsize(head), 0);
        assert!(ft_lstlast(head).is_null());

        ft_lstadd_front(&mut head, new_node(c"one"));
        assert_eq!(ft_lstsize(head), 1);
        assert_eq!(content_bytes((*head).content), b"one");

        ft_lstadd_back(&mut head, new_node(c"two"));
        assert_eq!(ft_lstsize(head), 2);
        ft_lstadd_back(&mut head, new_node(c"three"));
        assert_eq!(values(head), [b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]);

        ft_lstadd_front(&mut head, new_node(c"zero"));
        let expected: Vec<Vec<u8>> = ["zero", "one", "two", "three"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        assert_eq!(values(head), expected);
        assert_eq!(content_bytes((*ft_lstlast(head)).content), b"three");

        ft_lstiter(head, Some(iter_collect));
        assert_eq!(*ITER_SEEN.lock().expect("iter log lock"), expected);

        let mut mapped = ft_lstmap(head, Some(map_upper), Some(del_free));
        let upper: Vec<Vec<u8>> = ["ZERO", "ONE", "TWO", "THREE"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        assert_eq!(values(mapped), upper);
        assert_eq!(values(head), expected, "source list untouched");

        let single = new_node(c"tmp");
        ft_lstdelone(single, Some(del_free));
        assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 1);

        ft_lstclear(&mut head, Some(del_free));
        assert!(head.is_null());
        assert_eq!(ft_lstsize(head), 0);
        assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 5);

        ft_lstclear(&mut mapped, Some(del_free));
        assert!(mapped.is_null());
        assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 9);
    }
}

#[test]
fn add_front_splices_whole_chain() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    reset_counters();

    let mut head: *mut TList = ptr::null_mut();
    let mut chain: *mut TList = ptr::null_mut();
    unsafe {
        ft_lstadd_back(&mut head, new_node(c"c"));
        ft_lstadd_back(&mut chain, new_node(c"a"));
        ft_lstadd_back(&mut chain, new_node(c"b"));

        ft_lstadd_front(&mut head, chain);
        assert_eq!(values(head), [b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
        ft_lstclear(&mut head, Some(del_free));
    }
    assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 3);
}

#[test]
fn lstmap_failure_releases_partial_result() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    reset_counters();

    let mut head: *mut TList = ptr::null_mut();
    unsafe {
        for value in [c"a", c"b", c"c"] {
            ft_lstadd_back(&mut head, new_node(value));
        }
        MAP_FAIL_AT.store(2, Ordering::SeqCst);
        let mapped = ft_lstmap(head, Some(map_upper), Some(del_free));
        assert!(mapped.is_null());
        // The two contents mapped before the failure were released.
        assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 2);
        assert_eq!(ft_lstsize(head), 3);

        assert!(ft_lstmap(ptr::null_mut(), Some(map_upper), Some(del_free)).is_null());
        assert!(ft_lstmap(head, None, Some(del_free)).is_null());
        ft_lstclear(&mut head, Some(del_free));
    }
    assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 5);
}

#[test]
fn null_arguments_are_no_ops() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    reset_counters();

    let mut head: *mut TList = ptr::null_mut();
    unsafe {
        ft_lstadd_front(&mut head, ptr::null_mut());
        ft_lstadd_back(&mut head, ptr::null_mut());
        assert!(head.is_null());

        let node = new_node(c"x");
        ft_lstadd_back(ptr::null_mut(), node);
        ft_lstdelone(ptr::null_mut(), Some(del_free));
        ft_lstdelone(node, None);
        ft_lstiter(node, None);
        ft_lstclear(ptr::null_mut(), Some(del_free));
        assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 0);

        ft_lstdelone(node, Some(del_free));
    }
    assert_eq!(DEL_CALLS.load(Ordering::SeqCst), 1);
}
