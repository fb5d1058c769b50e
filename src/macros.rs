#[macro_export]
macro_rules! try_some {
    ($expr:expr) => {
        match $expr {
            Ok(Some(v)) => Some(v),
            Ok(None) => None,
            Err(e) => return Some(Err(From::from(e))),
        }
    };
}

/// Turns the `Result` of a single field into an `Option`, leaving a trace
/// of the discarded error. The rest of the sentence is unaffected.
#[macro_export]
macro_rules! ok_or_trace {
    ($expr:expr, $what:expr) => {
        match $expr {
            Ok(v) => Some(v),
            Err(e) => {
                trace!("Discarding {}: {}", $what, e);
                None
            }
        }
    };
}
