use std::{
    any::Any,
    fmt::{Debug, Display},
    panic::{catch_unwind, AssertUnwindSafe},
};

use pretty_assertions::Comparison;
use thiserror::Error;

/// Debug representations longer than this get a line diff instead of the
/// one-line `expected: <..> but was: <..>` form.
const INLINE_LIMIT: usize = 60;

/// Every failed condition of one grouped check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{heading} ({} failure{})\n\t{}", .failures.len(), plural(.failures.len()), .failures.join("\n\t"))]
pub struct AssertionFailure {
    pub heading:  String,
    pub failures: Vec<String>,
}

/// Collects failures instead of stopping at the first one.
///
/// ```
/// use shelfprobe::assertions::Checks;
///
/// let mut checks = Checks::new("Get book by ID");
/// checks
///     .equal(&200, &200, "Status code should be 200")
///     .check(true, "Content type should be application/json");
/// checks.finish();
/// ```
#[derive(Debug)]
#[must_use = "call finish() or into_result() to report failures"]
pub struct Checks {
    heading:  String,
    failures: Vec<String>,
}

impl Checks {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading:  heading.into(),
            failures: vec![],
        }
    }

    pub fn check(&mut self, condition: bool, message: impl Display) -> &mut Self {
        if !condition {
            self.failures.push(message.to_string());
        }
        self
    }

    pub fn equal<T>(&mut self, expected: &T, actual: &T, message: impl Display) -> &mut Self
    where
        T: PartialEq + Debug + ?Sized,
    {
        if expected != actual {
            let (e, a) = (format!("{expected:?}"), format!("{actual:?}"));
            if e.len() + a.len() > INLINE_LIMIT {
                self.failures
                    .push(format!("{message}\n{}", Comparison::new(expected, actual)));
            } else {
                self.failures
                    .push(format!("{message} ==> expected: <{e}> but was: <{a}>"));
            }
        }
        self
    }

    pub fn some<T>(&mut self, value: &Option<T>, message: impl Display) -> &mut Self {
        self.check(value.is_some(), message)
    }

    /// Records a failure for an `Err`, passing `Ok` values through.
    pub fn ok<T, E: Display>(&mut self, result: Result<T, E>, message: impl Display) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.failures.push(format!("{message}: {e}"));
                None
            }
        }
    }

    /// Runs `f` and records its panic, if any, as one failure.
    pub fn run(&mut self, f: impl FnOnce()) -> &mut Self {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
            self.failures.push(panic_message(payload.as_ref()));
        }
        self
    }

    /// Takes over the failures of `other`, each prefixed with its heading.
    pub fn merge(&mut self, other: Checks) -> &mut Self {
        let heading = other.heading;
        self.failures
            .extend(other.failures.into_iter().map(|f| format!("{heading}: {f}")));
        self
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_result(self) -> Result<(), AssertionFailure> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(AssertionFailure {
                heading:  self.heading,
                failures: self.failures,
            })
        }
    }

    /// Panics with every collected failure.
    #[track_caller]
    pub fn finish(self) {
        if let Err(failure) = self.into_result() {
            panic!("{failure}");
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked with a non-string payload".to_string()
    }
}
