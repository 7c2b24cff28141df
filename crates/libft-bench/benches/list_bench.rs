//! Linked list benchmarks: owned `List<T>` vs the `t_list` exports.

use std::ffi::c_void;
use std::ptr;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ft::TList;
use ft::list_abi::{ft_lstadd_back, ft_lstadd_front, ft_lstclear, ft_lstmap, ft_lstnew, ft_lstsize};
use libft_core::list::{List, Node};

unsafe extern "C" fn del_nothing(_content: *mut c_void) {}

unsafe extern "C" fn map_identity(content: *mut c_void) -> *mut c_void {
    content
}

/// Non-null placeholder content; never dereferenced.
fn token(i: usize) -> *mut c_void {
    ptr::without_provenance_mut(i + 1)
}

fn build_abi(len: usize) -> *mut TList {
    let mut head: *mut TList = ptr::null_mut();
    for i in 0..len {
        unsafe { ft_lstadd_front(&mut head, ft_lstnew(token(i))) };
    }
    head
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_build");

    for &len in &[16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::new("core_push_front", len), &len, |b, &len| {
            b.iter(|| {
                let mut list = List::new();
                for i in 0..len {
                    list.push_front(Node::new(i));
                }
                black_box(list.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("core_collect", len), &len, |b, &len| {
            b.iter(|| black_box((0..len).collect::<List<usize>>()));
        });
        group.bench_with_input(BenchmarkId::new("abi_add_front", len), &len, |b, &len| {
            b.iter(|| unsafe {
                let mut head = build_abi(len);
                black_box(ft_lstsize(head));
                ft_lstclear(&mut head, Some(del_nothing));
            });
        });
    }
    group.finish();
}

/// `ft_lstadd_back` walks the whole chain each call.
fn bench_add_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_add_back");
    for &len in &[16usize, 256] {
        group.bench_with_input(BenchmarkId::new("abi", len), &len, |b, &len| {
            b.iter(|| unsafe {
                let mut head: *mut TList = ptr::null_mut();
                for i in 0..len {
                    ft_lstadd_back(&mut head, ft_lstnew(token(i)));
                }
                ft_lstclear(&mut head, Some(del_nothing));
            });
        });
    }
    group.finish();
}

fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_map");

    for &len in &[16usize, 256, 4096] {
        let list: List<usize> = (0..len).collect();
        group.bench_with_input(BenchmarkId::new("core", len), &list, |b, list| {
            b.iter(|| black_box(list.map(|&x| Some(x * 2), drop)));
        });

        let mut head = build_abi(len);
        group.bench_function(BenchmarkId::new("abi", len), |b| {
            b.iter(|| unsafe {
                let mut mapped = ft_lstmap(head, Some(map_identity), Some(del_nothing));
                ft_lstclear(&mut mapped, Some(del_nothing));
            });
        });
        unsafe { ft_lstclear(&mut head, Some(del_nothing)) };
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_add_back, bench_map);
criterion_main!(benches);
