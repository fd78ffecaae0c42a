use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use stockroom_core::Item;
use stockroom_service::{ItemService, ServiceError};
use tokio::runtime::Runtime;
use tracing::debug;

/// Identifies one mounted view. Responses carry the token of the view that
/// asked for them so results for an unmounted view can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToken(pub(crate) u64);

/// One API call a view wants made.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ListItems,
    GetItem(String),
    CreateItem(Item),
    UpdateItem { name: String, item: Item },
    DeleteItem(String),
}

#[derive(Debug)]
pub enum Response {
    Listed(Result<Vec<Item>, ServiceError>),
    Fetched(Result<Item, ServiceError>),
    Created(Result<Item, ServiceError>),
    Updated(Result<Item, ServiceError>),
    Deleted {
        name: String,
        result: Result<Item, ServiceError>,
    },
}

#[derive(Debug)]
pub struct Completion {
    pub token: ViewToken,
    pub response: Response,
}

/// Runs requests on a background runtime and hands results back over a
/// channel, so the UI thread never waits on the network.
pub struct Dispatcher {
    service: Arc<dyn ItemService>,
    rt: Runtime,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn ItemService>) -> io::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("stockroom-io")
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            service,
            rt,
            tx,
            rx,
            in_flight: 0,
        })
    }

    pub fn send(&mut self, token: ViewToken, request: Request) {
        debug!(?token, ?request, "dispatching");
        self.in_flight += 1;
        let service = self.service.clone();
        let tx = self.tx.clone();
        self.rt.spawn(async move {
            let response = execute(service.as_ref(), request).await;
            // The receiver only goes away when the app shuts down.
            let _ = tx.send(Completion { token, response });
        });
    }

    pub fn try_recv(&mut self) -> Option<Completion> {
        let completion = self.rx.try_recv().ok()?;
        self.in_flight -= 1;
        Some(completion)
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<Completion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => {
                self.in_flight -= 1;
                Some(completion)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

async fn execute(service: &dyn ItemService, request: Request) -> Response {
    match request {
        Request::ListItems => Response::Listed(service.list_items().await),
        Request::GetItem(name) => Response::Fetched(service.get_item(&name).await),
        Request::CreateItem(item) => Response::Created(service.create_item(&item).await),
        Request::UpdateItem { name, item } => {
            Response::Updated(service.update_item(&name, &item).await)
        }
        Request::DeleteItem(name) => {
            let result = service.delete_item(&name).await;
            Response::Deleted { name, result }
        }
    }
}
