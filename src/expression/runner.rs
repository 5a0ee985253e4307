use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::{error::ExpressionError, expression::evaluator::EvalResult};

/// A unit of work handed to a [`TaskRunner`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A facility that runs tasks, usually on other threads.
///
/// Implementations decide where and when a task runs. They are not required
/// to run tasks in submission order.
pub trait TaskRunner {
    fn execute(&self, task: Task);
}

impl TaskRunner for rayon::ThreadPool {
    fn execute(&self, task: Task) {
        self.spawn(task);
    }
}

/// Runs every task on a freshly spawned OS thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl TaskRunner for ThreadSpawner {
    fn execute(&self, task: Task) {
        std::thread::spawn(task);
    }
}

/// Handle to an evaluation scheduled on a [`TaskRunner`].
#[derive(Debug)]
pub struct PendingEvaluation {
    receiver: Receiver<EvalResult<f64>>,
}

impl PendingEvaluation {
    /// Blocks until the evaluation finishes and returns its result.
    ///
    /// # Errors
    /// Propagates the evaluation failure, or returns
    /// [`ExpressionError::EvaluationAbandoned`] if the runner dropped the
    /// task without running it.
    pub fn wait(self) -> EvalResult<f64> {
        self.receiver
            .recv()
            .unwrap_or(Err(ExpressionError::EvaluationAbandoned))
    }

    /// Returns the result if the evaluation already finished.
    #[must_use]
    pub fn try_wait(&self) -> Option<EvalResult<f64>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ExpressionError::EvaluationAbandoned)),
        }
    }
}

/// Hands `job` to `runner` and returns a handle to its eventual result.
pub(crate) fn schedule<R, F>(runner: &R, job: F) -> PendingEvaluation
    where R: TaskRunner + ?Sized,
          F: FnOnce() -> EvalResult<f64> + Send + 'static
{
    let (sender, receiver) = mpsc::channel();
    runner.execute(Box::new(move || {
                       // The caller may have dropped the handle already.
                       let _ = sender.send(job());
                   }));
    PendingEvaluation { receiver }
}
