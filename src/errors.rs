use std::fmt;
#[cfg(feature="std")]
use std::error::Error;

/// Error value indicating that a `Holder` had no value to access.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct BadAccess {
    _priv: (),
}

impl BadAccess {
    pub(crate) const fn new() -> Self {
        BadAccess { _priv: () }
    }

    fn description(&self) -> &'static str {
        BADACCESS
    }
}

const BADACCESS: &'static str = "bad holder access";

#[cfg(feature="std")]
/// Requires `features="std"`.
impl Error for BadAccess {
    #[allow(deprecated)]
    fn description(&self) -> &str {
        BADACCESS
    }
}

impl fmt::Display for BadAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl fmt::Debug for BadAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BadAccess: {}", self.description())
    }
}

/// Panic with the `BadAccess` message; shared by the panicking accessors.
#[inline(never)]
#[cold]
#[track_caller]
pub(crate) fn bad_access_panic() -> ! {
    panic!("Holder: {}", BADACCESS)
}
