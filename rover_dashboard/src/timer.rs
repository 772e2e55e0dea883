/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */


//! timers that send messages back to the single owner of some state. Timers only hold a sender
//! for the owner's queue and are cancelled through the returned `AbortHandle`

use std::time::Duration;
use tokio::{sync::mpsc::Sender, task::AbortHandle, time::{Instant, interval_at, sleep}};
use tracing::debug;

/// send `msg` once after `delay`. The message is sent with back pressure since dropping it would
/// break whatever chain of steps the owner drives with it
pub fn oneshot_timer<M> (tx: Sender<M>, delay: Duration, msg: M)->AbortHandle where M: Send + 'static {
    let jh = tokio::spawn( async move {
        sleep(delay).await;
        if tx.send(msg).await.is_err() {
            debug!("oneshot timer receiver closed");
        }
    });
    jh.abort_handle()
}

/// send a message created by `f` every `period`, starting one period from now. Ticks are dropped if the
/// owner queue is full (a late tick is not useful). The timer terminates when the receiver is closed
pub fn repeat_timer<M,F> (tx: Sender<M>, period: Duration, f: F)->AbortHandle
    where M: Send + 'static, F: Fn()->M + Send + 'static
{
    let jh = tokio::spawn( async move {
        let mut interval = interval_at( Instant::now() + period, period);
        while !tx.is_closed() {
            interval.tick().await;
            if let Err(e) = tx.try_send( f()) {
                debug!("repeat timer tick dropped: {e}");
            }
        }
    });
    jh.abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_oneshot_abort() {
        let (tx, mut rx) = mpsc::channel::<u32>(4);
        let ah = oneshot_timer( tx.clone(), Duration::from_secs(2), 1);
        ah.abort();
        let _ = oneshot_timer( tx, Duration::from_secs(3), 2);

        assert_eq!( rx.recv().await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeat() {
        let (tx, mut rx) = mpsc::channel::<u32>(4);
        let start = Instant::now();
        let ah = repeat_timer( tx, Duration::from_secs(60), || 42);

        assert_eq!( rx.recv().await, Some(42));
        assert!( start.elapsed() >= Duration::from_secs(60));
        assert_eq!( rx.recv().await, Some(42));
        assert!( start.elapsed() >= Duration::from_secs(120));
        ah.abort();
    }
}
