//! Save-job worker: one persist request per submission-counter increment.
//!
//! Runs on a dedicated thread. Jobs arrive strictly in trigger order and are
//! processed one at a time, so requests can never reorder or coalesce.

use std::sync::Arc;

use crossbeam::channel::{Receiver, Sender};

use super::Reply;
use crate::api::{ApiError, CancelToken, PostApi};
use crate::core::{AuthToken, PostBody, PostId, RequestId};

/// Which persist call a job maps to.
#[derive(Clone, Debug)]
pub(crate) enum SaveOp {
    Create,
    Update(PostId),
}

/// One unit of work enqueued per accepted submit.
#[derive(Debug)]
pub(crate) struct SaveJob {
    /// The `send_count` value that triggered this job.
    pub seq: u64,
    pub op: SaveOp,
    pub body: PostBody,
    pub token: AuthToken,
    pub request_id: RequestId,
    pub cancel: CancelToken,
}

/// Spawn the worker. It exits when the job channel closes.
pub(crate) fn spawn_worker(
    api: Arc<dyn PostApi>,
    jobs: Receiver<SaveJob>,
    replies: Sender<Reply>,
) {
    std::thread::spawn(move || run_loop(api, jobs, replies));
}

fn run_loop(api: Arc<dyn PostApi>, jobs: Receiver<SaveJob>, replies: Sender<Reply>) {
    for job in jobs.iter() {
        if job.cancel.is_canceled() {
            tracing::debug!(seq = job.seq, "save canceled before dispatch");
            continue;
        }

        let result = match &job.op {
            SaveOp::Create => api
                .create_post(&job.body, &job.token, job.request_id, &job.cancel)
                .map(Some),
            SaveOp::Update(id) => api
                .update_post(&id, &job.body, &job.token, job.request_id, &job.cancel)
                .map(|()| None),
        };

        if job.cancel.is_canceled() {
            tracing::debug!(seq = job.seq, "save result discarded after cancel");
            continue;
        }

        // Ignore send errors - the editor may have been torn down.
        match result {
            Ok(new_id) => {
                let _ = replies.send(Reply::Saved {
                    body: job.body,
                    new_id,
                });
            }
            Err(ApiError::Canceled) => {
                tracing::debug!(seq = job.seq, "save canceled in flight");
            }
            Err(err) => {
                tracing::debug!(seq = job.seq, error = %err, "save failed");
                let _ = replies.send(Reply::SaveError);
            }
        }
    }
}
