use std::panic::{self, AssertUnwindSafe};
use std::thread;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use crate::utils::{SResult, SamplerError};

/// A unit of work for the retry context
pub type RetryTask = Box<dyn FnOnce() -> SResult<()> + Send + 'static>;

/// Commands that can be sent to the retry controller
pub enum RetryCommand {
    /// Run a task; its outcome is only logged
    Run(RetryTask),
    /// Answer once every command queued before this one has been handled
    Flush { respond_to: oneshot::Sender<()> },
    /// Stop the event loop
    Shutdown,
}

impl std::fmt::Debug for RetryCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryCommand::Run(_) => f.write_str("Run(<task>)"),
            RetryCommand::Flush { .. } => f.write_str("Flush"),
            RetryCommand::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Serial execution context for retried reads.
///
/// Tasks run one at a time, in the order they were posted, on whichever
/// thread drives [`RetryController::run`].
pub struct RetryController {
    receiver: mpsc::UnboundedReceiver<RetryCommand>,
}

impl RetryController {
    pub fn new() -> (RetryHandle, RetryController) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (RetryHandle { sender }, RetryController { receiver })
    }

    /// Start a controller on its own named thread with a current-thread runtime.
    pub fn spawn(thread_name: &str) -> SResult<RetryHandle> {
        let (handle, controller) = Self::new();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || runtime.block_on(controller.run()))?;

        debug!("Retry context started on thread '{}'", thread_name);
        Ok(handle)
    }

    /// Run the controller event loop
    pub async fn run(mut self) {
        debug!("RetryController event loop started");

        while let Some(command) = self.receiver.recv().await {
            match command {
                RetryCommand::Run(task) => Self::execute(task),
                RetryCommand::Flush { respond_to } => {
                    let _ = respond_to.send(());
                }
                RetryCommand::Shutdown => {
                    debug!("RetryController shutting down");
                    break;
                }
            }
        }

        debug!("RetryController event loop terminated");
    }

    fn execute(task: RetryTask) {
        match panic::catch_unwind(AssertUnwindSafe(task)) {
            Ok(Ok(())) => trace!("Retry task completed"),
            Ok(Err(e)) => debug!("Retry task failed: {}", e),
            Err(_) => warn!("Retry task panicked"),
        }
    }
}

/// Handle to post work to the retry controller
#[derive(Clone)]
pub struct RetryHandle {
    sender: mpsc::UnboundedSender<RetryCommand>,
}

impl std::fmt::Debug for RetryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryHandle")
            .field("sender", &"<UnboundedSender>")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl RetryHandle {
    /// Queue a task without waiting for it
    pub fn post<F>(&self, task: F) -> SResult<()>
    where
        F: FnOnce() -> SResult<()> + Send + 'static,
    {
        self.sender
            .send(RetryCommand::Run(Box::new(task)))
            .map_err(|_| SamplerError::ContextClosed)
    }

    /// Wait until every task posted so far has run
    pub async fn flush(&self) -> SResult<()> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RetryCommand::Flush { respond_to })
            .map_err(|_| SamplerError::ContextClosed)?;
        response.await.map_err(|_| SamplerError::ContextClosed)
    }

    /// Blocking variant of [`flush`](Self::flush). Must not be called from
    /// inside an async runtime.
    pub fn flush_blocking(&self) -> SResult<()> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RetryCommand::Flush { respond_to })
            .map_err(|_| SamplerError::ContextClosed)?;
        response
            .blocking_recv()
            .map_err(|_| SamplerError::ContextClosed)
    }

    /// Stop the controller once the commands already queued are handled
    pub fn shutdown(&self) -> SResult<()> {
        self.sender
            .send(RetryCommand::Shutdown)
            .map_err(|_| SamplerError::ContextClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
