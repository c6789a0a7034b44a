//! Execution strategy shared by every operation that has a parallel form.

/// How an operation distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    /// Run entirely on the calling thread.
    #[default]
    Sequential,
    /// Fan out over the rayon thread pool and join before returning.
    Parallel,
}

impl ExecutionPolicy {
    pub fn is_parallel(&self) -> bool {
        matches!(self, ExecutionPolicy::Parallel)
    }
}
