//! Hydration worker: the one-shot cancelable fetch that loads an existing
//! record into a fresh edit draft.

use std::sync::Arc;

use crossbeam::channel::Sender;

use super::Reply;
use crate::api::{ApiError, CancelToken, PostApi};
use crate::core::{PostId, RequestId};

/// Spawn the fetch. A canceled fetch dispatches nothing; a transport failure
/// is logged and likewise dispatches nothing.
pub(crate) fn spawn_fetch(
    api: Arc<dyn PostApi>,
    id: PostId,
    cancel: CancelToken,
    replies: Sender<Reply>,
) {
    std::thread::spawn(move || {
        let request_id = RequestId::new();
        match api.fetch_post(&id, request_id, &cancel) {
            Ok(Some(record)) => {
                if cancel.is_canceled() {
                    tracing::debug!(%id, "hydration result discarded after cancel");
                    return;
                }
                // Ignore send errors - the editor may have been torn down.
                let _ = replies.send(Reply::Hydrated(Box::new(record)));
            }
            Ok(None) => {
                if !cancel.is_canceled() {
                    let _ = replies.send(Reply::Missing);
                }
            }
            Err(ApiError::Canceled) => {
                tracing::debug!(%id, "hydration canceled");
            }
            Err(err) => {
                tracing::debug!(%id, error = %err, "hydration fetch failed");
            }
        }
    });
}
