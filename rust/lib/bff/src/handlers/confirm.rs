//! Confirmation gate for destructive actions.

use picfeed_flux::StateStore;

use super::PicfeedBff;
use crate::request::*;
use crate::state::*;

impl PicfeedBff {
    pub(super) async fn handle_confirm_open(&self, req: &ConfirmOpenReq, store: &StateStore) {
        if store.read::<ConfirmState>(ConfirmState::PATH).is_some_and(|c| c.busy) {
            tracing::debug!(action = ?req.action, "confirmation already running");
            return;
        }
        store.set(
            ConfirmState::PATH,
            ConfirmState {
                pending: Some(req.action.clone()),
                busy: false,
            },
        );
    }

    pub(super) async fn handle_confirm_cancel(&self, _req: &ConfirmCancelReq, store: &StateStore) {
        store.set(ConfirmState::PATH, ConfirmState::default());
    }

    pub(super) async fn handle_confirm_accept(&self, _req: &ConfirmAcceptReq, store: &StateStore) {
        let pending = store
            .update(ConfirmState::PATH, |c: &mut ConfirmState| {
                if c.busy {
                    return None;
                }
                let action = c.pending.clone();
                c.busy = action.is_some();
                action
            })
            .flatten();
        let Some(action) = pending else {
            tracing::debug!("nothing to confirm");
            return;
        };

        tracing::debug!(?action, "confirmed");
        match &action {
            PendingAction::DeletePost { scope, post_id } => self.delete_post(scope, *post_id, store).await,
            PendingAction::DeleteComment {
                scope,
                post_id,
                comment_id,
            } => self.delete_comment(scope, *post_id, *comment_id, store).await,
            PendingAction::DeleteAccount => self.delete_account(store).await,
        }

        store.set(ConfirmState::PATH, ConfirmState::default());
    }
}
