use std::sync::atomic::{compiler_fence, Ordering};

/// A compiler-level fence with no runtime cost.
///
/// Neither the timestamp reads nor the timed payload may be moved across it, which keeps the
/// measured region exactly where the harness puts it.
#[inline(always)]
pub fn barrier() {
    compiler_fence(Ordering::SeqCst);
}

/// Consume a value so that the optimizer cannot drop the work that produced it.
#[inline(always)]
pub fn sink<T>(value: T) {
    std::hint::black_box(value);
}

/// The cheapest possible real call. Never inlined so that the call itself is what gets timed.
#[inline(never)]
pub fn empty_function() {
    barrier();
}
