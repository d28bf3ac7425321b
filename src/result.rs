//! Result combinators
//!
//! Operations whose failure is an expected outcome (parsing, validation,
//! lookups) return [`AppResult`] instead of panicking. The free functions
//! here compose such results without hiding where the control flow goes.
//!
//! Closures passed to [`map`] and [`and_then`] are not guarded: a panic
//! inside one propagates as a panic and is never turned into an `Err`.
//! [`unwrap`] is the single opt-in point where a failure re-enters panic
//! style, with the concrete error as the payload.

use std::any::Any;
use std::panic;

pub use crate::errors::AppResult;

/// Wrap a success value
pub fn ok<T, E>(value: T) -> AppResult<T, E> {
    Ok(value)
}

/// Wrap a failure, unchanged
pub fn err<T, E>(error: E) -> AppResult<T, E> {
    Err(error)
}

/// Transform the success value; failures pass through untouched and `f` is not called
pub fn map<T, U, E, F>(result: AppResult<T, E>, f: F) -> AppResult<U, E>
where
    F: FnOnce(T) -> U,
{
    match result {
        Ok(value) => Ok(f(value)),
        Err(error) => Err(error),
    }
}

/// Chain a fallible step; stops at the first failure
pub fn and_then<T, U, E, F>(result: AppResult<T, E>, f: F) -> AppResult<U, E>
where
    F: FnOnce(T) -> AppResult<U, E>,
{
    match result {
        Ok(value) => f(value),
        Err(error) => Err(error),
    }
}

/// Return the success value, or raise the error itself as the panic payload.
///
/// The payload keeps the error's concrete type; [`recover_error`] gets it
/// back after `catch_unwind`.
pub fn unwrap<T, E>(result: AppResult<T, E>) -> T
where
    E: Send + 'static,
{
    match result {
        Ok(value) => value,
        Err(error) => panic::panic_any(error),
    }
}

/// Return the success value, or `default` on failure
pub fn unwrap_or<T, E>(result: AppResult<T, E>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(_) => default,
    }
}

/// Recover an error raised by [`unwrap`] from a caught panic payload.
///
/// Hands the payload back when it holds something else.
pub fn recover_error<E>(payload: Box<dyn Any + Send>) -> Result<E, Box<dyn Any + Send>>
where
    E: Send + 'static,
{
    payload.downcast::<E>().map(|boxed| *boxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, ErrorKind, StructuredError};
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Arc;

    fn parse_number(input: &str) -> AppResult<i64> {
        input
            .trim()
            .parse()
            .map_err(|_| AppError::validation(format!("Not a number: {}", input)))
    }

    // ok / err

    #[test]
    fn test_ok_wraps_value() {
        let result: AppResult<i32> = ok(42);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_ok_keeps_reference_identity() {
        let shared = Arc::new(String::from("post"));
        let result: AppResult<Arc<String>> = ok(Arc::clone(&shared));
        assert!(Arc::ptr_eq(&result.unwrap(), &shared));
    }

    #[test]
    fn test_err_wraps_error_unchanged() {
        let error = AppError::validation("Test error").with_field("field", "email");
        let timestamp = error.timestamp();
        let result: AppResult<()> = err(error);

        let error = result.unwrap_err();
        assert_eq!(error.message(), "Test error");
        assert_eq!(error.timestamp(), timestamp);
        assert_eq!(error.field("field").unwrap(), "email");
    }

    // map

    #[test]
    fn test_map_transforms_value() {
        assert_eq!(map(ok::<_, AppError>(5), |x| x * 2).unwrap(), 10);
    }

    #[test]
    fn test_map_passes_error_without_calling() {
        let called = Cell::new(false);
        let error = AppError::validation("Test error");
        let timestamp = error.timestamp();

        let mapped = map(err::<i32, _>(error), |x| {
            called.set(true);
            x * 2
        });

        assert!(!called.get());
        let error = mapped.unwrap_err();
        assert_eq!(error.message(), "Test error");
        assert_eq!(error.timestamp(), timestamp);
    }

    #[test]
    fn test_map_chains() {
        let result = map(map(ok::<_, AppError>(5), |x| x * 2), |x| x + 1);
        assert_eq!(result.unwrap(), 11);
    }

    #[test]
    fn test_map_does_not_catch_panics() {
        let outcome = catch_unwind(|| map(ok::<i32, AppError>(1), |_| -> i32 { panic!("bug") }));
        assert!(outcome.is_err());
    }

    // and_then

    #[test]
    fn test_and_then_returns_function_result() {
        let result = and_then(ok::<_, AppError>("7"), parse_number);
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_and_then_short_circuits() {
        let called = Cell::new(false);
        let result = and_then(err::<i32, _>(AppError::validation("First error")), |x| {
            called.set(true);
            ok(x * 2)
        });

        assert!(!called.get());
        assert_eq!(result.unwrap_err().message(), "First error");
    }

    #[test]
    fn test_and_then_propagates_chained_error() {
        let result = and_then(ok::<_, AppError>(5), |_| {
            err::<i32, _>(AppError::not_found("Chained error"))
        });
        let error = result.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), "Chained error");
    }

    #[test]
    fn test_chain_of_steps() {
        let result = and_then(and_then(ok::<_, AppError>(5), |x| ok(x * 2)), |x| ok(x + 1));
        assert_eq!(result.unwrap(), 11);
    }

    #[test]
    fn test_chain_stops_at_first_failure() {
        let later_steps = Cell::new(0);
        let first = and_then(ok::<i32, AppError>(5), |_| {
            err(AppError::validation("step two failed"))
        });
        let second = and_then(first, |x: i32| {
            later_steps.set(later_steps.get() + 1);
            ok(x + 1)
        });
        let third = and_then(second, |x| {
            later_steps.set(later_steps.get() + 1);
            ok(x * 3)
        });

        assert_eq!(later_steps.get(), 0);
        assert_eq!(third.unwrap_err().message(), "step two failed");
    }

    #[test]
    fn test_and_then_does_not_catch_panics() {
        let outcome = catch_unwind(|| {
            and_then(ok::<i32, AppError>(1), |_| -> AppResult<i32> { panic!("bug") })
        });
        assert!(outcome.is_err());
    }

    // unwrap / unwrap_or

    #[test]
    fn test_unwrap_returns_value() {
        assert_eq!(unwrap(ok::<_, AppError>(42)), 42);
    }

    #[test]
    fn test_unwrap_raises_concrete_error() {
        let error = AppError::validation("x").with_field("field", "slug");
        let timestamp = error.timestamp();

        let payload = catch_unwind(AssertUnwindSafe(|| unwrap(err::<(), _>(error))))
            .expect_err("unwrap of a failure must panic");
        let raised: AppError = recover_error(payload).expect("payload is the AppError");

        assert_eq!(raised.kind(), ErrorKind::Validation);
        assert_eq!(raised.message(), "x");
        assert_eq!(raised.timestamp(), timestamp);
        assert_eq!(raised.field("field").unwrap(), "slug");
    }

    #[test]
    fn test_recover_error_rejects_foreign_payload() {
        let payload = catch_unwind(|| panic!("plain panic")).unwrap_err();
        assert!(recover_error::<AppError>(payload).is_err());
    }

    #[test]
    fn test_unwrap_or() {
        assert_eq!(unwrap_or(ok::<_, AppError>(42), 0), 42);
        assert_eq!(unwrap_or(err(AppError::validation("Test error")), 0), 0);
        assert_eq!(
            unwrap_or(err(AppError::validation("Error")), "default"),
            "default"
        );
    }
}
