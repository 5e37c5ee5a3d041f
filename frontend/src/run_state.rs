/// Bookkeeping for the in-flight analysis request.
///
/// `loading` is owned by the request lifecycle: only `begin` raises it and
/// only the finish of the current run lowers it. Errors are cleared only when
/// a new run begins.
#[derive(Debug, Default)]
pub struct RunState {
    run_id: u64,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum RunResult<T> {
    Stale,
    Completed(T),
    Failed,
}

impl RunState {
    pub fn begin(&mut self) -> u64 {
        self.run_id += 1;
        self.loading = true;
        self.error = None;
        self.run_id
    }

    /// Records an error raised outside the request, e.g. a rejected file.
    pub fn reject(&mut self, error: String) {
        self.error = Some(error);
    }

    pub fn finish<T>(&mut self, run_id: u64, result: Result<T, String>) -> RunResult<T> {
        if run_id != self.run_id {
            log::debug!("Dropping stale result for run {}", run_id);
            return RunResult::Stale;
        }

        self.loading = false;
        match result {
            Ok(value) => RunResult::Completed(value),
            Err(error) => {
                self.error = Some(error);
                RunResult::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
