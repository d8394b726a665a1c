//! Optimistic on/off switches with a counter: like, save, follow.

use std::future::Future;

use picfeed_client::ApiError;
use serde::Serialize;

/// The flag + count pair a toggle flips, e.g. `(liked, like_count)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub active: bool,
    pub count: u64,
}

impl Toggle {
    pub fn new(active: bool, count: u64) -> Self {
        Self { active, count }
    }

    /// Turning on adds one; turning off subtracts one, never below zero.
    pub fn flipped(self) -> Self {
        if self.active {
            Self::new(false, self.count.saturating_sub(1))
        } else {
            Self::new(true, self.count.saturating_add(1))
        }
    }
}

#[derive(Debug)]
pub enum ToggleOutcome {
    /// The backend accepted; the optimistic value stands.
    Applied(Toggle),
    /// The backend refused; the pre-toggle snapshot was written back.
    RolledBack { restored: Toggle, error: ApiError },
    /// Nothing to toggle (entity not in state).
    Missing,
}

impl ToggleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ToggleOutcome::Applied(_))
    }
}

/// Flip the pair `read` returns, show it through `write` right away, then
/// confirm with the backend via `turn_on` or `turn_off`. On failure the
/// exact snapshot taken before the flip is written back. No retry.
pub async fn toggle_with_rollback<R, W, On, Off, FOn, FOff>(
    read: R,
    write: W,
    turn_on: On,
    turn_off: Off,
) -> ToggleOutcome
where
    R: FnOnce() -> Option<Toggle>,
    W: Fn(Toggle),
    On: FnOnce() -> FOn,
    Off: FnOnce() -> FOff,
    FOn: Future<Output = Result<(), ApiError>>,
    FOff: Future<Output = Result<(), ApiError>>,
{
    let Some(snapshot) = read() else {
        return ToggleOutcome::Missing;
    };
    let target = snapshot.flipped();
    write(target);

    let result = if target.active { turn_on().await } else { turn_off().await };

    match result {
        Ok(()) => ToggleOutcome::Applied(target),
        Err(error) => {
            write(snapshot);
            ToggleOutcome::RolledBack {
                restored: snapshot,
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn flip_on_and_off() {
        assert_eq!(Toggle::new(false, 4).flipped(), Toggle::new(true, 5));
        assert_eq!(Toggle::new(true, 5).flipped(), Toggle::new(false, 4));
    }

    #[test]
    fn flip_off_floors_at_zero() {
        assert_eq!(Toggle::new(true, 0).flipped(), Toggle::new(false, 0));
    }

    #[test]
    fn flip_on_saturates_at_max() {
        assert_eq!(Toggle::new(false, u64::MAX).flipped(), Toggle::new(true, u64::MAX));
    }

    fn refused() -> ApiError {
        ApiError::Server {
            status: 500,
            message: "boom".into(),
        }
    }

    #[tokio::test]
    async fn success_keeps_optimistic_value() {
        let cell = Mutex::new(Toggle::new(false, 2));
        let writes = Mutex::new(Vec::new());

        let out = toggle_with_rollback(
            || Some(*cell.lock().unwrap()),
            |t| {
                *cell.lock().unwrap() = t;
                writes.lock().unwrap().push(t);
            },
            || async { Ok(()) },
            || async { Err(refused()) },
        )
        .await;

        assert!(out.is_applied());
        assert_eq!(*cell.lock().unwrap(), Toggle::new(true, 3));
        assert_eq!(writes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failure_restores_snapshot() {
        let cell = Mutex::new(Toggle::new(true, 7));

        let out = toggle_with_rollback(
            || Some(*cell.lock().unwrap()),
            |t| *cell.lock().unwrap() = t,
            || async { Ok(()) },
            || async { Err(refused()) },
        )
        .await;

        match out {
            ToggleOutcome::RolledBack { restored, .. } => assert_eq!(restored, Toggle::new(true, 7)),
            other => panic!("expected rollback, got {other:?}"),
        }
        assert_eq!(*cell.lock().unwrap(), Toggle::new(true, 7));
    }

    #[tokio::test]
    async fn missing_entity_sends_nothing() {
        let writes = Mutex::new(0);
        let out = toggle_with_rollback(
            || None,
            |_| *writes.lock().unwrap() += 1,
            || async { Ok(()) },
            || async { Ok(()) },
        )
        .await;
        assert!(matches!(out, ToggleOutcome::Missing));
        assert_eq!(*writes.lock().unwrap(), 0);
    }
}
