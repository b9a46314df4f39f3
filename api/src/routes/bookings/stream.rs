//! Server-sent event feed of booking activity for one owner.
//!
//! Each connection registers a scoped bus subscription that forwards the
//! events addressed to the user into an unbounded channel. The response
//! body drains that channel and interleaves keep-alive comments. Dropping
//! the body (client gone) drops the subscription, which unsubscribes.

use std::time::Duration;

use actix_web::{
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    web::{self, Bytes},
    HttpResponse,
};
use futures_util::{stream, Stream, StreamExt};
use rh_core::services::{ListenerError, Subscription};
use rh_core::{BookingEvent, BookingEventKind, BookingRepository, ItemRepository, UserRepository};
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};
use uuid::Uuid;

use crate::handlers::ApiError;
use crate::routes::{parse_id, AppState};

const KEEP_ALIVE_FRAME: &[u8] = b": keep-alive\n\n";

/// Handler for GET /api/bookings/stream/{userId}
///
/// Emits `event: bookingCreated` and `event: bookingUpdated` frames whose
/// `data` is the booking JSON, for bookings the user owns.
pub async fn stream_bookings<B, I, U>(
    state: web::Data<AppState<B, I, U>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let user_id = parse_id(&path, "user")?;
    let (tx, rx) = mpsc::unbounded_channel::<Bytes>();

    let subscription = state.events.subscribe_scoped(
        &BookingEventKind::ALL,
        move |event: &BookingEvent| -> Result<(), ListenerError> {
            if !event.is_addressed_to(user_id) {
                return Ok(());
            }
            let frame = encode_event(event).map_err(|e| ListenerError::Failed(e.to_string()))?;
            tx.send(frame).map_err(|_| ListenerError::Disconnected)
        },
    );

    log::info!("Booking feed opened for user {}", user_id);

    let body = event_stream(
        FeedState::new(rx, subscription, state.events_config.keep_alive(), user_id),
        state.events_config.retry_ms,
    );

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(body))
}

/// Formats one SSE frame: the event name line, then the booking as `data`
pub fn encode_event(event: &BookingEvent) -> Result<Bytes, serde_json::Error> {
    let data = serde_json::to_string(&event.booking)?;
    Ok(Bytes::from(format!("event: {}\ndata: {}\n\n", event.kind.name(), data)))
}

struct FeedState {
    rx: mpsc::UnboundedReceiver<Bytes>,
    keep_alive: Option<Interval>,
    user_id: Uuid,
    // Held for the lifetime of the body; dropping it unsubscribes
    _subscription: Subscription,
}

impl FeedState {
    fn new(
        rx: mpsc::UnboundedReceiver<Bytes>,
        subscription: Subscription,
        keep_alive: Option<Duration>,
        user_id: Uuid,
    ) -> Self {
        let keep_alive = keep_alive.map(|period| {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });

        Self {
            rx,
            keep_alive,
            user_id,
            _subscription: subscription,
        }
    }

    /// Next frame to write, or `None` once the bus dropped the listener
    async fn next_frame(&mut self) -> Option<Bytes> {
        match self.keep_alive.as_mut() {
            Some(ticker) => tokio::select! {
                frame = self.rx.recv() => frame,
                _ = ticker.tick() => Some(Bytes::from_static(KEEP_ALIVE_FRAME)),
            },
            None => self.rx.recv().await,
        }
    }
}

impl Drop for FeedState {
    fn drop(&mut self) {
        log::info!("Booking feed closed for user {}", self.user_id);
    }
}

fn event_stream(state: FeedState, retry_ms: u64) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    let opening = Bytes::from(format!("retry: {}\n\n", retry_ms));

    let frames = stream::unfold(state, |mut state| async move {
        let frame = state.next_frame().await?;
        Some((Ok(frame), state))
    });

    stream::once(async move { Ok::<_, actix_web::Error>(opening) }).chain(frames)
}
