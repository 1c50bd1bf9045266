use log::debug;
use roster_api::MockApi;
use std::sync::mpsc::{channel, Receiver, Sender};

use super::{Event, LoadRequest};
use crate::event::{Event as CrateEvent, EventBus};

/// Performs requests it receives from the main thread, and sends the results
/// back. The simulated latency is slept through here, never on the UI thread.
pub struct Worker {
    api: MockApi,
    msg_recv: Receiver<LoadRequest>,
    event_send: Sender<CrateEvent>,
}

impl Worker {
    /// Spawn the store worker on the given event bus, returning a channel to
    /// send requests down.
    pub(crate) fn spawn_on(bus: &EventBus, api: MockApi) -> Sender<LoadRequest> {
        let (req_send, req_recv) = channel();

        bus.spawn("store_worker", move |_, event_send| {
            // we don't need the running flag because the receiver will raise
            // an error once the store is dropped and we'll exit
            Worker {
                api,
                msg_recv: req_recv,
                event_send,
            }
            .main()
        });

        req_send
    }

    fn main(mut self) {
        while let Ok(msg) = self.msg_recv.recv() {
            debug!("received request: {:?}", msg);
            let event = self.process_msg(msg);
            if let Err(e) = self.event_send.send(CrateEvent::Store(event)) {
                debug!("error sending event: {:?}", e);
                break;
            }
        }

        debug!("shutting down");
    }

    fn process_msg(&mut self, msg: LoadRequest) -> Event {
        match msg {
            LoadRequest::Courses { generation } => Event::Courses {
                generation,
                result: self.api.courses(),
            },
            LoadRequest::CourseDetail { id } => Event::CourseDetail {
                id,
                course: self.api.course_by_id(id),
            },
        }
    }
}
