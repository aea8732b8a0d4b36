use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = BTreeSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.next_u32());
            }
        })
    });
}

fn bench_btreeset_contains(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = BTreeSet::new();
    let mut values = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let val = rng.next_u32();
        set.insert(val);
        values.push(val);
    }

    c.bench_function("bench btreeset contains", move |b| {
        b.iter(|| {
            for val in &values {
                black_box(set.contains(val));
            }
        })
    });
}

macro_rules! ordered_container_benches {
    ($($module_name:ident: $constructor:expr),* $(,)*) => {
        $(
            mod $module_name {
                use ordered_trees::*;
                use rand::Rng;
                use super::NUM_OF_OPERATIONS;
                use criterion::{Criterion, black_box};

                pub fn bench_insert(c: &mut Criterion) {
                    c.bench_function(&format!("bench {} insert", stringify!($module_name)), |b| b.iter(|| {
                        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                        let mut container = $constructor;
                        for _ in 0..NUM_OF_OPERATIONS {
                            container.insert(rng.next_u32());
                        }
                    }));
                }

                pub fn bench_contains(c: &mut Criterion) {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut container = $constructor;
                    let mut values = Vec::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let val = rng.next_u32();
                        container.insert(val);
                        values.push(val);
                    }

                    c.bench_function(&format!("bench {} contains", stringify!($module_name)), move |b| b.iter(|| {
                        for val in &values {
                            black_box(container.contains(val));
                        }
                    }));
                }

                pub fn bench_delete(c: &mut Criterion) {
                    c.bench_function(&format!("bench {} delete", stringify!($module_name)), |b| b.iter(|| {
                        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                        let mut container = $constructor;
                        let mut values = Vec::new();
                        for _ in 0..NUM_OF_OPERATIONS {
                            let val = rng.next_u32();
                            container.insert(val);
                            values.push(val);
                        }
                        for val in &values {
                            black_box(container.delete(val));
                        }
                    }));
                }
            }
        )*

        criterion_group!(
            benches,
            bench_btreeset_contains,
            bench_btreeset_insert,
            $(
                $module_name::bench_contains,
                $module_name::bench_delete,
                $module_name::bench_insert,
            )*
        );
    }
}

ordered_container_benches!(
    avl_tree: AvlSet::<u32>::new(),
    red_black_tree: RedBlackSet::<u32>::new(),
    two_four_tree: TwoFourSet::<u32>::new(),
    max_heap: Heap::<u32>::max(),
);

criterion_main!(benches);
