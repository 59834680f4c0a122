use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation signal, checked once per generation.
pub trait Terminated {
    fn is_terminated(&self) -> bool;
}

impl Terminated for AtomicBool {
    fn is_terminated(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Terminated + ?Sized> Terminated for Arc<T> {
    fn is_terminated(&self) -> bool {
        (**self).is_terminated()
    }
}

/// Never requests termination.
#[derive(Debug, Default, Clone, Copy)]
pub struct Never;

impl Terminated for Never {
    fn is_terminated(&self) -> bool {
        false
    }
}
