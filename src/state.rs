use crate::calendar::YearMonth;
use crate::clock::Clock;
use crate::models::{CalendarResponse, WidgetSnapshot};
use crate::widget::Widget;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub widget: Arc<Mutex<Widget>>,
    pub clock: Arc<dyn Clock>,
    /// Cancelled on server shutdown; ends every ticker stream.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(widget: Widget, clock: Arc<dyn Clock>) -> Self {
        Self {
            widget: Arc::new(Mutex::new(widget)),
            clock,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The month the viewer is currently in.
    pub fn current_month(&self) -> YearMonth {
        YearMonth::containing(self.now().with_timezone(&Local).date_naive())
    }

    pub async fn snapshot(&self) -> WidgetSnapshot {
        let now = self.now();
        self.widget.lock().await.snapshot(now, &Local)
    }

    pub async fn calendar(&self, month: YearMonth) -> CalendarResponse {
        let now = self.now();
        self.widget.lock().await.calendar(month, now, &Local)
    }
}
