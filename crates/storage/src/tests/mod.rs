use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use fitlog_domain::StorageError;

use crate::rest::{Request, Response, SendRequest};

pub mod data;

/// Replays prepared responses in order and records every request it receives.
///
/// Clones share their state, so a test can keep a handle after moving the sender into an adapter.
#[derive(Clone)]
pub struct FakeSendRequest {
    responses: Rc<RefCell<VecDeque<Result<Response, StorageError>>>>,
    requests: Rc<RefCell<Vec<Request>>>,
}

impl FakeSendRequest {
    pub fn new(responses: Vec<Result<Response, StorageError>>) -> Self {
        Self {
            responses: Rc::new(RefCell::new(responses.into())),
            requests: Rc::new(RefCell::new(vec![])),
        }
    }

    pub fn ok(body: serde_json::Value) -> Result<Response, StorageError> {
        Ok(Response {
            status: 200,
            body: body.to_string(),
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

impl SendRequest for FakeSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, StorageError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(StorageError::NoConnection))
    }
}
