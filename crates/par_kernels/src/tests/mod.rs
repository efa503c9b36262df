// unit tests

use super::*;

use clap::ValueEnum;
use ndarray::Array2;

const TEST_THREADS: usize = 3;

// test helper functions

fn executors() -> Vec<Executor> {
    Backend::ALL
        .iter()
        .map(|&backend| Executor::new(backend, TEST_THREADS).unwrap())
        .collect()
}

/// Deterministic values in [-1, 1) that are not all exactly representable
/// sums, so that a changed evaluation order would show up.
fn sample(len: usize, salt: usize) -> Vec<DataType> {
    (0..len)
        .map(|i| ((i * 37 + salt * 11) % 101) as DataType / 50.5 - 1.0)
        .collect()
}

fn border(grid: &[DataType], n: usize) -> Vec<DataType> {
    (0..n * n)
        .filter(|idx| {
            let (i, j) = (idx / n, idx % n);
            i == 0 || j == 0 || i == n - 1 || j == n - 1
        })
        .map(|idx| grid[idx])
        .collect()
}

// backend and executor

#[test]
fn backend_names_round_trip_through_cli_values() {
    for backend in Backend::ALL {
        let parsed = Backend::from_str(&backend.to_string(), false).unwrap();
        assert_eq!(parsed, backend);
    }
}

#[test]
fn executor_thread_counts() {
    assert_eq!(Executor::sequential().num_threads(), 1);
    assert_eq!(Executor::new(Backend::Simd, 8).unwrap().num_threads(), 1);
    assert_eq!(Executor::new(Backend::Threads, 2).unwrap().num_threads(), 2);
    assert_eq!(Executor::new(Backend::Offload, 4).unwrap().num_threads(), 4);
}

#[test]
fn rows_visits_every_row_once_with_its_index() {
    const ROW_LEN: usize = 4;
    const FIRST_ROW: usize = 10;

    // 11 rows, the last one ragged, more rows than workers
    let len = ROW_LEN * 10 + 3;

    for exec in executors() {
        let mut out = vec![-1.0; len];
        exec.rows(&mut out, ROW_LEN, FIRST_ROW, |r, row| {
            exec.columns(row, 0, |j| (r * 100 + j) as DataType);
        });

        for (idx, &v) in out.iter().enumerate() {
            let expected = (FIRST_ROW + idx / ROW_LEN) * 100 + idx % ROW_LEN;
            assert_eq!(v, expected as DataType, "backend {}", exec.backend());
        }
    }
}

#[test]
fn rows_on_empty_buffer_does_nothing() {
    for exec in executors() {
        let mut out: Vec<DataType> = Vec::new();
        exec.rows(&mut out, 5, 0, |_, _| panic!("no rows expected"));
    }
}

#[test]
fn columns_passes_offset_indices() {
    for exec in executors() {
        // not a multiple of LANES
        let mut row = vec![0.0; LANES * 2 + 5];
        exec.columns(&mut row, 7, |j| j as DataType);
        let expected: Vec<DataType> = (7..7 + row.len()).map(|j| j as DataType).collect();
        assert_eq!(row, expected, "backend {}", exec.backend());
    }
}

// vector_add

#[test]
fn vector_add_small() {
    let a = [1.0, 2.0, -3.5];
    let b = [0.5, -2.0, 1.25];

    for exec in executors() {
        let mut c = [0.0; 3];
        vector_add(&exec, &a, &b, &mut c).unwrap();
        assert_eq!(c, [1.5, 0.0, -2.25]);
    }
}

#[test]
fn vector_add_across_tiles_is_exact_for_every_backend() {
    let len = VECTOR_TILE * 2 + 3;
    let a = sample(len, 1);
    let b = sample(len, 2);

    for exec in executors() {
        let mut c = vec![0.0; len];
        vector_add(&exec, &a, &b, &mut c).unwrap();
        assert!(
            (0..len).all(|i| c[i] == a[i] + b[i]),
            "backend {}",
            exec.backend()
        );
    }
}

#[test]
fn vector_add_rejects_mismatched_lengths() {
    let exec = Executor::sequential();
    let mut c = [0.0; 2];

    let err = vector_add(&exec, &[1.0, 2.0], &[1.0], &mut c).unwrap_err();
    assert!(matches!(
        err,
        KernelError::Length {
            name: "b",
            expected: 2,
            actual: 1
        }
    ));
}

// matrix_mult

#[test]
fn matrix_mult_transposed_product_fills_rows_with_one_value() {
    #[rustfmt::skip]
    let a = [
        1.0, 2.0, 3.0, //
        4.0, 5.0, 6.0, //
        7.0, 8.0, 9.0, //
    ];
    #[rustfmt::skip]
    let b = [
        1.0, 0.0, 2.0, //
        0.0, 1.0, 0.0, //
        3.0, 0.0, 1.0, //
    ];
    #[rustfmt::skip]
    let expected = [
        10.0, 10.0, 10.0, //
         5.0,  5.0,  5.0, //
        23.0, 23.0, 23.0, //
    ];

    for exec in executors() {
        let mut c = [0.0; 9];
        matrix_mult(&exec, 3, &a, &b, &mut c, Product::Transposed).unwrap();
        assert_eq!(c, expected, "backend {}", exec.backend());
    }
}

#[test]
fn matrix_mult_standard_product_matches_ndarray() {
    const N: usize = 11;

    // small integers keep every partial sum exact
    let ints = |salt: usize| -> Vec<DataType> {
        (0..N * N)
            .map(|i| ((i * 7 + salt) % 11) as DataType - 5.0)
            .collect()
    };
    let a = ints(3);
    let b = ints(5);

    let expected = Array2::from_shape_vec((N, N), a.clone())
        .unwrap()
        .dot(&Array2::from_shape_vec((N, N), b.clone()).unwrap());

    for exec in executors() {
        let mut c = vec![0.0; N * N];
        matrix_mult(&exec, N, &a, &b, &mut c, Product::Standard).unwrap();
        assert_eq!(
            c.as_slice(),
            expected.as_slice().unwrap(),
            "backend {}",
            exec.backend()
        );
    }
}

#[test]
fn matrix_mult_is_identical_across_backends() {
    const N: usize = 37;
    let a = sample(N * N, 3);
    let b = sample(N * N, 4);

    for product in [Product::Transposed, Product::Standard] {
        let mut reference = vec![0.0; N * N];
        matrix_mult(&Executor::sequential(), N, &a, &b, &mut reference, product).unwrap();

        for exec in executors() {
            let mut c = vec![0.0; N * N];
            matrix_mult(&exec, N, &a, &b, &mut c, product).unwrap();
            assert_eq!(c, reference, "backend {} {:?}", exec.backend(), product);
        }
    }
}

#[test]
fn matrix_mult_of_empty_matrices() {
    for exec in executors() {
        let mut c: Vec<DataType> = Vec::new();
        matrix_mult(&exec, 0, &[], &[], &mut c, Product::default()).unwrap();
        assert!(c.is_empty());
    }
}

#[test]
fn matrix_mult_rejects_wrong_grid_size() {
    let exec = Executor::sequential();
    let mut c = [0.0; 4];

    let err = matrix_mult(&exec, 2, &[1.0; 4], &[1.0; 3], &mut c, Product::Standard).unwrap_err();
    assert!(matches!(err, KernelError::Length { name: "b", .. }));

    let err = grid_len("a", usize::MAX).unwrap_err();
    assert!(matches!(err, KernelError::Overflow { name: "a", .. }));
}

// stencil

#[test]
fn stencil_divisors_are_powers_of_two() {
    assert_eq!(stencil_divisor(0, 0), 4.0);
    assert_eq!(stencil_divisor(1, 0), 8.0);
    assert_eq!(stencil_divisor(0, 1), 8.0);
    assert_eq!(stencil_divisor(1, 1), 16.0);
}

#[test]
fn stencil_single_interior_cell() {
    // pass 1 turns the all-ones neighbourhood into 1.0 at the centre of b;
    // pass 2 then sees that centre surrounded by b's zero border
    for exec in executors() {
        let mut a = [1.0; 9];
        let mut b = [0.0; 9];
        stencil(&exec, 3, &mut a, &mut b).unwrap();

        assert_eq!(b[4], 1.0);
        assert_eq!(a[4], 0.25);
        assert!(border(&a, 3).iter().all(|&v| v == 1.0));
    }
}

#[test]
fn stencil_preserves_border_and_agrees_across_backends() {
    const N: usize = 21;
    let initial = sample(N * N, 9);

    let mut reference = initial.clone();
    let mut scratch = vec![0.0; N * N];
    stencil(&Executor::sequential(), N, &mut reference, &mut scratch).unwrap();

    assert_eq!(border(&reference, N), border(&initial, N));
    assert_ne!(reference, initial);

    for exec in executors() {
        let mut a = initial.clone();
        let mut b = vec![0.0; N * N];
        stencil(&exec, N, &mut a, &mut b).unwrap();
        assert_eq!(a, reference, "backend {}", exec.backend());
        assert_eq!(b, scratch, "backend {}", exec.backend());
    }
}

#[test]
fn stencil_without_interior_leaves_grid_unchanged() {
    for n in 0..3 {
        let initial = sample(n * n, n);

        for exec in executors() {
            let mut a = initial.clone();
            let mut b = vec![0.0; n * n];
            stencil(&exec, n, &mut a, &mut b).unwrap();
            assert_eq!(a, initial);
        }
    }
}

#[test]
fn stencil_rejects_short_scratch_grid() {
    let mut a = vec![0.0; 16];
    let mut b = vec![0.0; 15];

    let err = stencil(&Executor::sequential(), 4, &mut a, &mut b).unwrap_err();
    assert!(matches!(
        err,
        KernelError::Length {
            name: "b",
            expected: 16,
            actual: 15
        }
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn stencil_never_writes_the_border(
            n in 0_usize..40,
            salt in 0_usize..1000,
            backend in prop::sample::select(Backend::ALL.to_vec()),
        ) {
            let exec = Executor::new(backend, TEST_THREADS).unwrap();
            let initial = sample(n * n, salt);

            let mut a = initial.clone();
            let mut b = vec![0.0; n * n];
            stencil(&exec, n, &mut a, &mut b).unwrap();

            prop_assert_eq!(border(&a, n), border(&initial, n));
        }
    }
}

mod logging {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};

    struct Capture(Mutex<Vec<(Level, String)>>);

    impl Log for Capture {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.0
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));
    static INSTALL: Once = Once::new();

    #[test]
    fn stencil_pass_boundary_is_logged_at_debug() {
        INSTALL.call_once(|| {
            log::set_logger(&CAPTURE).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });

        let mut a = [1.0; 9];
        let mut b = [0.0; 9];
        stencil(&Executor::sequential(), 3, &mut a, &mut b).unwrap();

        let records = CAPTURE.0.lock().unwrap();
        assert!(records.iter().any(
            |(level, msg)| *level == Level::Debug && msg.contains("first pass complete")
        ));
    }
}
