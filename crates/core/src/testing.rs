//! Test doubles shared by the workspace's test suites.
//!
//! [`RecordingHandle`] never touches the network: it records every command
//! it receives and answers from a queue of scripted replies, falling back to
//! `OK` when the queue is empty.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use redis::{Arg, Cmd, ErrorKind, RedisError, Value};

use crate::descriptor::ConnectionDescriptor;
use crate::error::OperationError;
use crate::handle::ConnectionHandle;

/// A connection handle that records commands instead of sending them.
#[derive(Debug)]
pub struct RecordingHandle {
    descriptor: ConnectionDescriptor,
    queries: AtomicUsize,
    commands: Mutex<Vec<Vec<String>>>,
    replies: Mutex<VecDeque<Result<Value, RedisError>>>,
}

impl RecordingHandle {
    pub fn new(descriptor: ConnectionDescriptor) -> Self {
        Self {
            descriptor,
            queries: AtomicUsize::new(0),
            commands: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a reply for a future command.
    pub fn push_reply(&self, reply: Value) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(reply));
    }

    /// Queue an I/O failure for a future command.
    pub fn push_io_error(&self, message: &'static str) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(RedisError::from((ErrorKind::IoError, message))));
    }

    /// Number of commands received so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Every command received so far, as its textual arguments.
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent command, if any.
    pub fn last_command(&self) -> Option<Vec<String>> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl ConnectionHandle for RecordingHandle {
    async fn query(&self, cmd: &Cmd) -> Result<Value, OperationError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let args = cmd
            .args_iter()
            .map(|arg| match arg {
                Arg::Simple(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                Arg::Cursor => "<cursor>".to_owned(),
            })
            .collect();
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match reply {
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => Err(OperationError::Redis(err)),
            None => Ok(Value::Okay),
        }
    }

    fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }
}
