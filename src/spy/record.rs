//! Call records and the spy's internal log.

/// Everything recorded about a single call through a spy.
///
/// Exactly one of `return_value` / `error` is `Some` for a call whose
/// behavior produced a value or a failure; a no-op behavior leaves both
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord<A, R, C, E> {
    /// The receiver the call was made with.
    pub receiver: C,
    /// The arguments passed to the call.
    pub args: A,
    /// The value the behavior returned, if any.
    pub return_value: Option<R>,
    /// The failure the behavior produced, if any.
    pub error: Option<E>,
    /// When the call began, in clock milliseconds.
    pub timestamp_ms: u64,
}

/// The five parallel logs behind a spy, one entry per call at a shared
/// index.
///
/// `args`, `receivers`, and `call_times` are appended together before the
/// behavior runs; `return_values` and `errors` after it completes. Between
/// calls all five have equal length — the call count. During a call (or a
/// re-entrant one) the entry logs run ahead of the outcome logs.
#[derive(Debug)]
pub(crate) struct CallLog<A, R, C, E> {
    pub(crate) args: Vec<A>,
    pub(crate) receivers: Vec<C>,
    pub(crate) call_times: Vec<u64>,
    pub(crate) return_values: Vec<Option<R>>,
    pub(crate) errors: Vec<Option<E>>,
}

impl<A, R, C, E> CallLog<A, R, C, E> {
    pub(crate) fn new() -> Self {
        Self {
            args: Vec::new(),
            receivers: Vec::new(),
            call_times: Vec::new(),
            return_values: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record the start of a call: arguments, receiver, timestamp.
    pub(crate) fn push_entry(&mut self, args: A, receiver: C, timestamp_ms: u64) {
        self.args.push(args);
        self.receivers.push(receiver);
        self.call_times.push(timestamp_ms);
    }

    /// Record the outcome of a call: return value or failure.
    pub(crate) fn push_outcome(&mut self, return_value: Option<R>, error: Option<E>) {
        self.return_values.push(return_value);
        self.errors.push(error);
    }

    /// Number of calls that have begun.
    pub(crate) fn call_count(&self) -> usize {
        self.call_times.len()
    }

    /// Truncate all five logs to empty.
    pub(crate) fn clear(&mut self) {
        self.args.clear();
        self.receivers.clear();
        self.call_times.clear();
        self.return_values.clear();
        self.errors.clear();
    }
}

impl<A, R, C, E> CallLog<A, R, C, E>
where
    A: Clone,
    R: Clone,
    C: Clone,
    E: Clone,
{
    /// Assemble the record of the `n`-th call (0-indexed), or `None` past
    /// the end of the log.
    ///
    /// Outcome fields read as `None` if the call has begun but not yet
    /// completed.
    pub(crate) fn nth(&self, n: usize) -> Option<CallRecord<A, R, C, E>> {
        let args = self.args.get(n)?.clone();
        Some(CallRecord {
            receiver: self.receivers[n].clone(),
            args,
            return_value: self.return_values.get(n).cloned().flatten(),
            error: self.errors.get(n).cloned().flatten(),
            timestamp_ms: self.call_times[n],
        })
    }

    /// Assemble records for every call that has begun.
    pub(crate) fn records(&self) -> Vec<CallRecord<A, R, C, E>> {
        (0..self.call_count()).filter_map(|n| self.nth(n)).collect()
    }
}
