use crate::models::WidgetSnapshot;
use crate::state::AppState;
use futures::{Stream, StreamExt};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_stream::wrappers::IntervalStream;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A fresh snapshot every `period`, starting immediately. The timer stops when
/// the stream is dropped or the server begins shutting down.
pub fn snapshot_stream(state: AppState, period: Duration) -> impl Stream<Item = WidgetSnapshot> {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = state.shutdown.clone().cancelled_owned();

    IntervalStream::new(ticks).take_until(shutdown).then(move |_| {
        let state = state.clone();
        async move { state.snapshot().await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::KeyValueStore;
    use crate::widget::Widget;
    use chrono::{Local, TimeZone, Utc};
    use std::sync::Arc;

    #[tokio::test]
    async fn each_tick_samples_the_clock() {
        let start = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let widget = Widget::load(KeyValueStore::in_memory(), start, &Local).await;
        let state = AppState::new(widget, clock.clone());

        let mut stream = Box::pin(snapshot_stream(state, Duration::from_millis(5)));

        let first = stream.next().await.unwrap();
        assert_eq!(first.countdown.clock, "00:00:00");
        assert_eq!(first.countdown.days, 90);

        clock.advance(chrono::Duration::seconds(1));
        let second = stream.next().await.unwrap();
        assert_eq!(second.countdown.days, 89);
        assert_eq!(second.countdown.clock, "23:59:59");
    }

    #[tokio::test]
    async fn shutdown_ends_the_stream() {
        let start = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let widget = Widget::load(KeyValueStore::in_memory(), start, &Local).await;
        let state = AppState::new(widget, Arc::new(FixedClock::new(start)));
        let shutdown = state.shutdown.clone();

        let mut stream = Box::pin(snapshot_stream(state, Duration::from_millis(5)));
        assert!(stream.next().await.is_some());

        shutdown.cancel();
        assert!(stream.next().await.is_none());
    }
}
