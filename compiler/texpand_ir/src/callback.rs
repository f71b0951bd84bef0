//! Opaque renderer callbacks spliced into the statement stream.

use std::fmt;
use std::rc::Rc;

/// A zero-argument operation chosen by a renderer.
///
/// Callbacks are embedded in replacement blocks so that they run at their
/// exact position in emission order. The engine never inspects them; it only
/// invokes them when reached.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    /// Wrap a closure.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Callback(Rc::new(f))
    }

    /// Run the callback synchronously.
    #[inline]
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

/// Two callbacks are equal only if they are the same allocation.
impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Callback {}
