use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::{self, MissedTickBehavior};

/// Roughly one host frame at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Emits `Tick` until the receiving side goes away. Late ticks are skipped
/// rather than bunched so a busy consumer is not flooded.
pub async fn run_frame_ticker(tx: Sender<AppEvent>, period: Duration) {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).await.is_err() {
            log::debug!("Frame ticker stopped");
            break;
        }
    }
}

pub fn start_background_services(tx: Sender<AppEvent>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    run_frame_ticker(tx, FRAME_INTERVAL).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticker_stops_when_receiver_drops() {
        let (tx, rx) = async_channel::bounded(4);
        let ticker = tokio::spawn(run_frame_ticker(tx, Duration::from_millis(1)));

        assert_eq!(rx.recv().await, Ok(AppEvent::Tick));
        assert_eq!(rx.recv().await, Ok(AppEvent::Tick));
        drop(rx);

        // the next send fails and the task ends on its own
        ticker.await.unwrap();
    }
}
