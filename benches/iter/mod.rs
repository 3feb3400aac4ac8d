use std::hint::black_box;

use avlset::AvlTree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::Lfsr;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = AvlTree::default();

    for _i in 0..n_values {
        t.insert(rand.next());
    }

    bench_iter(n_values, g, &t);
    bench_deepest_branches(n_values, g, &t);
    bench_between(n_values, g, &t);
}

macro_rules! iter_bench {
    (
        $name:ident,
        |$t:ident| $iter:expr
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<M>, $t: &AvlTree<u16>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let iter = $iter;
                        for v in iter {
                            black_box(v);
                        }
                    })
                });
            }
        }
    };
}

iter_bench!(iter, |t| t.iter());
iter_bench!(deepest_branches, |t| t.iter_deepest_branches());
iter_bench!(between, |t| t.iter_between(&4_200_u16, &42_000_u16).unwrap());
