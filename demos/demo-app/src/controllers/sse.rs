use std::convert::Infallible;

use futures_core::Stream;
use futures_util::stream;
use r2e::http::response::SseEvent;
use r2e::prelude::*;

use crate::state::AppState;

#[derive(Controller)]
#[controller(path = "/sse", state = AppState)]
pub struct SseController;

#[routes]
impl SseController {
    /// Emits a fixed `start` / `update` x3 / `close` sequence, then ends the stream.
    #[sse("/")]
    async fn events(&self) -> impl Stream<Item = Result<SseEvent, Infallible>> {
        let events = vec![
            Ok(SseEvent::default().event("start").data("begin")),
            Ok(SseEvent::default().event("update").data("1")),
            Ok(SseEvent::default().event("update").data("2")),
            Ok(SseEvent::default().event("update").data("3")),
            Ok(SseEvent::default().event("close").data("done")),
        ];
        stream::iter(events)
    }
}
