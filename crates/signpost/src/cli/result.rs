use signpost_dispatch::HandlerFailure;

/// Outcome of a single [`App::run`](super::App::run).
#[derive(Debug)]
pub enum RunResult {
    /// At least one route fired and every handler succeeded.
    Dispatched,
    /// No route fired; the not-found handler ran and succeeded.
    NotFound,
    /// A handler returned an error. Dispatch stopped at that route.
    HandlerFailed(HandlerFailure),
}

impl RunResult {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, RunResult::Dispatched)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RunResult::NotFound)
    }

    pub fn failure(&self) -> Option<&HandlerFailure> {
        match self {
            RunResult::HandlerFailed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The `ERROR: <message>\n` line for a failed run.
    pub fn report(&self) -> Option<String> {
        self.failure().map(HandlerFailure::report)
    }

    /// Converts a failed run into an error.
    pub fn into_result(self) -> Result<(), HandlerFailure> {
        match self {
            RunResult::HandlerFailed(failure) => Err(failure),
            RunResult::Dispatched | RunResult::NotFound => Ok(()),
        }
    }
}
