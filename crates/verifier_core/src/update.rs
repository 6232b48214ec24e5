use crate::{aggregate, normalize_input, AppState, Effect, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::VerifyClicked => {
            // One submission at a time: the button is disabled while pending,
            // and a click that slips through is dropped here.
            if state.is_pending() {
                return (state, Vec::new());
            }
            match normalize_input(state.input()) {
                Ok(emails) => {
                    let request_id = state.begin_request();
                    vec![Effect::SubmitBatch { request_id, emails }]
                }
                Err(_) => {
                    let notice = Notice::empty_input();
                    state.set_notice(Some(notice.clone()));
                    vec![Effect::ShowNotice(notice)]
                }
            }
        }
        Msg::AttemptFailed {
            request_id,
            attempt,
            max_attempts,
            reason,
        } => {
            if state.pending_request() == Some(request_id) {
                state.record_attempt_failure(attempt, max_attempts, reason);
            }
            Vec::new()
        }
        Msg::VerificationSucceeded {
            request_id,
            records,
        } => {
            if state.pending_request() != Some(request_id) {
                return (state, Vec::new());
            }
            state.complete(aggregate(records));
            Vec::new()
        }
        Msg::VerificationFailed {
            request_id,
            failure,
        } => {
            if state.pending_request() != Some(request_id) {
                return (state, Vec::new());
            }
            state.fail(failure);
            let notice = Notice::verification_failed();
            state.set_notice(Some(notice.clone()));
            vec![Effect::ShowNotice(notice)]
        }
        Msg::ViewportResized { width } => {
            state.resize_viewport(width);
            Vec::new()
        }
        Msg::ListScrolled { offset } => {
            state.scroll_list(offset);
            Vec::new()
        }
        Msg::PageSelected(page) => {
            state.select_page(page);
            Vec::new()
        }
        Msg::PageSizeSelected(page_size) => {
            state.select_page_size(page_size);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.set_notice(None);
            Vec::new()
        }
    };

    (state, effects)
}
