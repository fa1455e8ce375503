#![allow(dead_code)]

//! Scripted post-api double: queued responses, a call log, and an optional
//! hold gate so tests can cancel work while a request is "in flight".

use std::collections::VecDeque;
use std::sync::Mutex;

use crossbeam::channel::{Receiver, Sender, unbounded};
use inkpost::{
    ApiError, AuthToken, CancelToken, PostApi, PostAuthor, PostBody, PostId, PostRecord,
    RequestId, Username,
};

/// One observed api call, field-by-field for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Fetch {
        id: String,
    },
    Create {
        title: String,
        body: String,
        token: String,
    },
    Update {
        id: String,
        title: String,
        body: String,
        token: String,
    },
}

type FetchResult = Result<Option<PostRecord>, ApiError>;
type SaveResult = Result<String, ApiError>;

pub struct ScriptedApi {
    fetch_script: Mutex<VecDeque<FetchResult>>,
    save_script: Mutex<VecDeque<SaveResult>>,
    calls: Mutex<Vec<ApiCall>>,
    hold: Option<Mutex<Receiver<()>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            fetch_script: Mutex::new(VecDeque::new()),
            save_script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            hold: None,
        }
    }

    /// Queue a fetch result.
    pub fn push_fetch(self, result: FetchResult) -> Self {
        self.fetch_script
            .lock()
            .expect("fetch script lock")
            .push_back(result);
        self
    }

    /// Queue a save result (`Ok(id)`; updates ignore the id).
    pub fn push_save(self, result: SaveResult) -> Self {
        self.save_script
            .lock()
            .expect("save script lock")
            .push_back(result);
        self
    }

    /// Block every call until the returned sender releases it (one `()` per
    /// call). Lets a test tear the editor down mid-request.
    pub fn held(mut self) -> (Self, Sender<()>) {
        let (tx, rx) = unbounded();
        self.hold = Some(Mutex::new(rx));
        (self, tx)
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("call log lock").clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().expect("call log lock").push(call);
    }

    fn wait_release(&self) {
        if let Some(hold) = &self.hold {
            // A dropped sender just unblocks the worker.
            let _ = hold.lock().expect("hold lock").recv();
        }
    }
}

impl PostApi for ScriptedApi {
    fn fetch_post(
        &self,
        id: &PostId,
        _request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<Option<PostRecord>, ApiError> {
        self.record(ApiCall::Fetch {
            id: id.as_str().to_string(),
        });
        self.wait_release();
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        self.fetch_script
            .lock()
            .expect("fetch script lock")
            .pop_front()
            .unwrap_or(Ok(None))
    }

    fn create_post(
        &self,
        draft: &PostBody,
        token: &AuthToken,
        _request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<PostId, ApiError> {
        self.record(ApiCall::Create {
            title: draft.title.clone(),
            body: draft.body.clone(),
            token: token.as_str().to_string(),
        });
        self.wait_release();
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        let scripted = self
            .save_script
            .lock()
            .expect("save script lock")
            .pop_front()
            .unwrap_or_else(|| Ok("generated".to_string()));
        scripted.map(|id| PostId::new(id).expect("scripted id is valid"))
    }

    fn update_post(
        &self,
        id: &PostId,
        draft: &PostBody,
        token: &AuthToken,
        _request_id: RequestId,
        cancel: &CancelToken,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Update {
            id: id.as_str().to_string(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            token: token.as_str().to_string(),
        });
        self.wait_release();
        if cancel.is_canceled() {
            return Err(ApiError::Canceled);
        }
        self.save_script
            .lock()
            .expect("save script lock")
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
            .map(|_| ())
    }
}

/// A persisted record owned by `author`.
pub fn record(id: &str, title: &str, body: &str, author: &str) -> PostRecord {
    PostRecord {
        id: PostId::new(id).expect("valid fixture id"),
        title: title.to_string(),
        body: body.to_string(),
        author: PostAuthor {
            username: Username::new(author).expect("valid fixture username"),
            avatar: String::new(),
        },
        created_date: "2026-02-03T04:05:06Z".to_string(),
    }
}

pub fn transport_error() -> ApiError {
    ApiError::Transport {
        reason: "connection refused".to_string(),
    }
}
