use core::marker::PhantomData;
use critical_section::RestoreState;

/// Interrupts masked for as long as the guard lives.
///
/// Wraps the platform's `critical-section` implementation. Guards nest, each
/// one restoring the state it found when dropped, so they must be dropped in
/// reverse order of creation on the same thread. Only ever bound to a local
/// for the length of one pulse, never moved or dropped early.
pub(crate) struct InterruptGuard {
    state: RestoreState,
    _not_send: PhantomData<*mut ()>,
}

impl InterruptGuard {
    #[inline(always)]
    pub(crate) fn enter() -> Self {
        // released in `drop`, on this thread, in nesting order
        let state = unsafe { critical_section::acquire() };
        InterruptGuard {
            state,
            _not_send: PhantomData,
        }
    }
}

impl Drop for InterruptGuard {
    #[inline(always)]
    fn drop(&mut self) {
        unsafe { critical_section::release(self.state) }
    }
}
