#![cfg(feature = "dev")]
//! Tests for the kernel, normalized and group formulas.
//!
//! These tests verify the middle of the evaluation chain:
//! - Kernel region selection, division guards, and the unguarded branch
//! - Normalization, argument mirroring, and weights
//! - Group weighting and its local recovery from degenerate divisions
//!
//! ## Test Organization
//!
//! 1. **Kernel** - Each region, guards, lookup error pass-through
//! 2. **Normalized** - Weights, origin
//! 3. **Group** - Weighted sums, recovery, diagnostics, pass-through

use std::sync::Arc;

use approx::assert_relative_eq;

use tabfun::internals::algorithms::group::group;
use tabfun::internals::algorithms::kernel::{kernel, FormulaParams, ZeroDivisor};
use tabfun::internals::algorithms::normalized::normalize;
use tabfun::internals::evaluation::diagnostics::{RecordingSink, Stage};
use tabfun::internals::math::interpolation::{LookupMiss, TableInterpolator};
use tabfun::internals::primitives::errors::EvalError;
use tabfun::internals::primitives::source::MemorySource;

const TABLE: [(f64, f64); 5] = [(-1.0, 0.5), (-0.5, 1.0), (0.0, 2.0), (0.5, 2.5), (1.0, 4.0)];

struct Fixture {
    table: TableInterpolator<f64>,
    source: Arc<MemorySource<f64>>,
    sink: RecordingSink,
    zero_divisor: ZeroDivisor,
}

impl Fixture {
    fn new(limit: f64, zero_divisor: ZeroDivisor) -> Self {
        let source = Arc::new(MemorySource::from_pairs("mem", &TABLE));
        Self {
            table: TableInterpolator::new(Box::new(source.clone()), limit, LookupMiss::ReturnZero),
            source,
            sink: RecordingSink::new(),
            zero_divisor,
        }
    }

    fn standard() -> Self {
        Self::new(10.0, ZeroDivisor::Propagate)
    }

    fn params(&self) -> FormulaParams<'_, f64> {
        FormulaParams {
            table: &self.table,
            zero_divisor: self.zero_divisor,
            sink: &self.sink,
        }
    }
}

// ============================================================================
// Kernel Tests
// ============================================================================

/// Test the first region: `x > 0`, `y <= 1`.
///
/// Verifies the division guard on `z` and the formula `t(x) + t(y)/z`.
#[test]
fn test_kernel_first_region() {
    let fx = Fixture::standard();
    let p = fx.params();

    assert_relative_eq!(kernel(&p, 0.5, 0.5, 2.0).unwrap(), 3.75, epsilon = 1e-12);
    // t(5) misses the table and contributes 0.
    assert_relative_eq!(kernel(&p, 5.0, 0.5, 2.0).unwrap(), 1.25, epsilon = 1e-12);
    assert_eq!(
        kernel(&p, 5.0, 0.5, 0.0),
        Err(EvalError::DegenerateDivision { value: 5.0 })
    );
}

/// Test that guard failures happen before any lookup.
#[test]
fn test_kernel_guard_precedes_lookup() {
    let fx = Fixture::standard();
    let p = fx.params();

    assert!(kernel(&p, 0.5, 0.5, 0.0).is_err());
    assert!(kernel(&p, 0.0, 2.0, 1.0).is_err());
    assert!(kernel(&p, -1.0, 0.0, 1.0).is_err());
    assert_eq!(fx.source.opens(), 0);
}

/// Test the second region: `y > 1`.
#[test]
fn test_kernel_second_region() {
    let fx = Fixture::standard();
    let p = fx.params();

    // t(2) misses (0), t(1) = 4, divided by x = 0.5.
    assert_relative_eq!(kernel(&p, 0.5, 2.0, 1.0).unwrap(), 8.0, epsilon = 1e-12);
    assert_relative_eq!(kernel(&p, -0.5, 1.5, 0.0).unwrap(), -4.0, epsilon = 1e-12);
    assert_eq!(
        kernel(&p, 0.0, 2.0, 1.0),
        Err(EvalError::DegenerateDivision { value: 0.0 })
    );
}

/// Test the third region: `y == 0` always fails with the first argument.
#[test]
fn test_kernel_zero_y_fails() {
    let fx = Fixture::standard();
    let p = fx.params();

    assert_eq!(
        kernel(&p, -0.5, 0.0, 1.0),
        Err(EvalError::DegenerateDivision { value: -0.5 })
    );
    assert_eq!(
        kernel(&p, 0.0, 0.0, 3.0),
        Err(EvalError::DegenerateDivision { value: 0.0 })
    );
}

/// Test the last region: `x <= 0` and `y` nonzero, not above 1.
#[test]
fn test_kernel_last_region() {
    let fx = Fixture::standard();
    let p = fx.params();

    // t(0.5) + t(-0.5) / 0.5 = 2.5 + 1.0 / 0.5
    assert_relative_eq!(kernel(&p, -0.5, 0.5, 0.5).unwrap(), 4.5, epsilon = 1e-12);
    // Negative y also lands here.
    assert_relative_eq!(kernel(&p, -0.5, -0.5, 0.5).unwrap(), 4.5, epsilon = 1e-12);
}

/// Test that the last region divides by zero without a guard by default.
#[test]
fn test_kernel_last_region_unguarded() {
    let fx = Fixture::standard();
    let p = fx.params();

    let value = kernel(&p, -0.5, 0.5, 0.0).unwrap();
    assert!(value.is_infinite() && value > 0.0);

    // t(0) = 2, so 2 + 2 / 0.
    let value = kernel(&p, 0.0, 0.5, 0.0).unwrap();
    assert!(value.is_infinite());
}

/// Test the strict zero-divisor policy on the last region.
#[test]
fn test_kernel_last_region_fault() {
    let fx = Fixture::new(10.0, ZeroDivisor::Fault);
    let p = fx.params();

    assert_eq!(
        kernel(&p, -0.5, 0.5, 0.0),
        Err(EvalError::DivisionFault { value: -0.5 })
    );
    // Guarded regions still raise DegenerateDivision.
    assert_eq!(
        kernel(&p, 5.0, 0.5, 0.0),
        Err(EvalError::DegenerateDivision { value: 5.0 })
    );
}

/// Test that lookup errors pass through the kernel unchanged.
#[test]
fn test_kernel_passes_lookup_errors() {
    let fx = Fixture::standard();
    let p = fx.params();

    assert_eq!(
        kernel(&p, 20.0, 0.5, 1.0),
        Err(EvalError::OutOfRange {
            value: 20.0,
            limit: 10.0
        })
    );
    assert_eq!(
        kernel(&p, 0.5, 20.0, 1.0),
        Err(EvalError::OutOfRange {
            value: 20.0,
            limit: 10.0
        })
    );
}

// ============================================================================
// Normalized Tests
// ============================================================================

/// Test both weighting branches.
///
/// Verifies:
/// - `x <= y` runs the kernel on `(y/r, x/r, y/r)` weighted by 0.57
/// - `x > y` runs the kernel on `(x/r, y/r, x/r)` weighted by 0.42
#[test]
fn test_normalize_weights() {
    let fx = Fixture::standard();
    let p = fx.params();

    // 0.57 * K(0.8, 0.6, 0.8) = 0.57 * (t(0.8) + t(0.6) / 0.8) = 0.57 * (3.4 + 3.5)
    assert_relative_eq!(normalize(&p, 3.0, 4.0).unwrap(), 3.933, epsilon = 1e-12);
    // 0.42 * K(0.8, 0.6, 0.8)
    assert_relative_eq!(normalize(&p, 4.0, 3.0).unwrap(), 2.898, epsilon = 1e-12);
}

/// Test that scaling the inputs does not change the result.
#[test]
fn test_normalize_scale_invariant() {
    let fx = Fixture::standard();
    let p = fx.params();

    let a = normalize(&p, 3.0, 4.0).unwrap();
    let b = normalize(&p, 30.0, 40.0).unwrap();
    assert_relative_eq!(a, b, epsilon = 1e-12);
}

/// Test that the origin is a degenerate division with value 0.
#[test]
fn test_normalize_origin() {
    let fx = Fixture::standard();
    let p = fx.params();

    assert_eq!(
        normalize(&p, 0.0, 0.0),
        Err(EvalError::DegenerateDivision { value: 0.0 })
    );
    assert_eq!(fx.source.opens(), 0);
}

/// Test that the normalized inputs reach the kernel's unguarded branch.
#[test]
fn test_normalize_reaches_unguarded_branch() {
    let fx = Fixture::standard();
    let p = fx.params();

    // -3 <= 0, so K(0, -1, 0): last region with zero divisor.
    assert!(normalize(&p, -3.0, 0.0).unwrap().is_infinite());
}

// ============================================================================
// Group Tests
// ============================================================================

/// Test both weighting branches of the group formula.
#[test]
fn test_group_weighted_sum() {
    let fx = Fixture::standard();
    let p = fx.params();

    // x + y >= z branch.
    let expected = 1.0 + 2.0 + (0.3 * normalize(&p, 1.0, 3.0).unwrap()
        + 0.7 * normalize(&p, 2.0, 3.0).unwrap());
    assert_relative_eq!(group(&p, 1.0, 2.0, 3.0).unwrap(), expected, epsilon = 1e-12);
    assert_relative_eq!(
        group(&p, 1.0, 2.0, 3.0).unwrap(),
        6.7476767071182175,
        epsilon = 1e-12
    );

    // x + y < z branch.
    let expected = 3.0 - 1.0 + (1.3 * normalize(&p, 3.0, 5.0).unwrap()
        - 0.3 * normalize(&p, -1.0, 5.0).unwrap());
    assert_relative_eq!(group(&p, 3.0, -1.0, 5.0).unwrap(), expected, epsilon = 1e-12);
    assert_relative_eq!(
        group(&p, 3.0, -1.0, 5.0).unwrap(),
        5.890743023315871,
        epsilon = 1e-12
    );
    assert!(fx.sink.is_empty());
}

/// Test that recovery discards the partial sum.
///
/// Verifies that `G(0, 5, 0)` is `0 + 1`, not `x + y + 1`.
#[test]
fn test_group_recovery_discards_partial_sum() {
    let fx = Fixture::standard();
    let p = fx.params();

    assert_eq!(group(&p, 0.0, 5.0, 0.0), Ok(1.0));
}

/// Test that recovery from the second normalized call also discards everything.
#[test]
fn test_group_recovery_on_second_term() {
    let fx = Fixture::standard();
    let p = fx.params();

    // N(4, 0) succeeds, N(0, 0) is degenerate.
    assert_eq!(group(&p, 4.0, 0.0, 0.0), Ok(1.0));
}

/// Test that each recovery emits exactly one group diagnostic.
#[test]
fn test_group_recovery_emits_diagnostic() {
    let fx = Fixture::standard();
    let p = fx.params();

    group(&p, 0.0, 5.0, 0.0).unwrap();
    group(&p, 1.0, 2.0, 3.0).unwrap();
    group(&p, 0.0, 0.0, 0.0).unwrap();

    let diagnostics = fx.sink.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    for d in &diagnostics {
        assert_eq!(d.stage, Stage::Group);
        assert_eq!(d.error, EvalError::DegenerateDivision { value: 0.0 });
        assert_eq!(d.value(), Some(0.0));
    }
    assert!(fx.sink.lines()[0].contains("Division by zero: 0"));
}

/// Test that range errors are not recovered by the group formula.
#[test]
fn test_group_passes_range_errors() {
    let fx = Fixture::new(0.75, ZeroDivisor::Propagate);
    let p = fx.params();

    // N(1, 3) looks up 3/sqrt(10) ≈ 0.9487 > 0.75.
    match group(&p, 1.0, 2.0, 3.0) {
        Err(EvalError::OutOfRange { value, limit }) => {
            assert_relative_eq!(value, 0.9486832980505138, epsilon = 1e-12);
            assert_eq!(limit, 0.75);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
    assert!(fx.sink.is_empty());
}

/// Test that strict division faults are not recovered by the group formula.
#[test]
fn test_group_passes_division_faults() {
    let fx = Fixture::new(10.0, ZeroDivisor::Fault);
    let p = fx.params();

    assert_eq!(
        group(&p, -3.0, 1.0, 0.0),
        Err(EvalError::DivisionFault { value: 0.0 })
    );
    assert!(fx.sink.is_empty());
}
