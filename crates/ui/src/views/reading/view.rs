use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator};

use reading_core::model::{ReadingSession, SubmissionRequest};
use reading_core::quiz::{Dialog, QuizEffect, QuizEvent, SessionStage, SubmitConfirmation};
use services::QuizSession;

use super::scripts::{READING_ROOT_ID, focus_script};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::read_along::{PassageReadAlong, ReadAloudButton};
use crate::views::review::{ResultReview, ScoreRing};
use crate::views::suggestions::SuggestionsPanel;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuestionVm, build_review, format_reading_date, question_vm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn ReadingView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let reading_service = ctx.reading_service();
    let api = ctx.api();
    let clock = ctx.clock();

    let session = use_signal(|| None::<QuizSession>);
    let error = use_signal(|| None::<ViewError>);

    let resource = use_resource(move || {
        let reading_service = reading_service.clone();
        async move {
            reading_service
                .start_session()
                .await
                .map_err(ViewError::from)
        }
    });
    let state = view_state_from_resource(&resource);

    // A fresh fetch (first load or retry) starts a fresh session.
    use_effect(move || {
        let mut session = session;
        if let Some(Ok(reading)) = resource.read().as_ref() {
            let stale = session
                .peek()
                .as_ref()
                .is_none_or(|current| current.reading() != reading);
            if stale {
                session.set(Some(QuizSession::new(reading.clone(), clock)));
            }
        }
    });

    use_effect(move || {
        let _ = eval(&focus_script(READING_ROOT_ID));
    });

    let send = use_callback(move |request: SubmissionRequest| {
        let api = api.clone();
        spawn(async move {
            let mut session = session;
            let mut error = error;
            let outcome = api.submit_result(&request).await;
            let result = match session.write().as_mut() {
                Some(current) => current.complete_submit(request, outcome),
                None => return,
            };
            match result {
                Ok(()) => error.set(None),
                Err(err) => error.set(Some(ViewError::from(&err))),
            }
        });
    });

    let dispatch = use_callback(move |event: QuizEvent| {
        let mut session = session;
        let effect = match session.write().as_mut() {
            Some(current) => current.dispatch(event),
            None => return,
        };
        match effect {
            Some(QuizEffect::Leave) => {
                let _ = navigator.push(Route::Home {});
            }
            Some(QuizEffect::Submit(request)) => send.call(request),
            // Confirmation dialogs are rendered from the session state.
            Some(QuizEffect::RequestLeaveConfirmation | QuizEffect::RequestSubmitConfirmation(_))
            | None => {}
        }
    });

    let submit = use_callback(move |()| {
        let mut session = session;
        let request = match session.write().as_mut() {
            Some(current) => current.begin_submit(),
            None => return,
        };
        match request {
            Ok(request) => send.call(request),
            Err(err) => log::debug!("submit ignored: {err}"),
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ReadingTestHandles>() {
                handles.register(dispatch, submit, session);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if evt.data.key() != Key::Escape {
            return;
        }
        evt.prevent_default();
        let (has_dialog, handles_back) = match session.read().as_ref() {
            Some(current) => (current.dialog().is_some(), current.handles_back()),
            None => (false, false),
        };
        if has_dialog {
            dispatch.call(QuizEvent::DismissDialog);
        } else if handles_back {
            dispatch.call(QuizEvent::Back);
        } else {
            let _ = navigator.push(Route::Home {});
        }
    });

    let guard = session.read();
    let progress_label = guard
        .as_ref()
        .map_or_else(String::new, QuizSession::progress_label);

    rsx! {
        div { class: "page reading-page", id: READING_ROOT_ID, tabindex: "0", onkeydown: on_key,
            header { class: "reading-header",
                button {
                    class: "btn btn-secondary",
                    id: "reading-back",
                    r#type: "button",
                    onclick: move |_| on_key_back(session, dispatch, navigator),
                    "Back"
                }
                span { class: "reading-header__progress", "{progress_label}" }
            }

            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading today's reading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(_) => match guard.as_ref() {
                    None => rsx! {
                        p { "Loading today's reading..." }
                    },
                    Some(current) => rsx! {
                        SessionBody {
                            session: current.clone(),
                            on_event: move |event: QuizEvent| dispatch.call(event),
                            on_submit: move |()| submit.call(()),
                            on_home: move |()| {
                                let _ = navigator.push(Route::Home {});
                            },
                        }
                    },
                },
            }
        }
    }
}

/// The on-screen back button behaves like the Escape key without a dialog.
fn on_key_back(
    session: Signal<Option<QuizSession>>,
    dispatch: Callback<QuizEvent>,
    navigator: Navigator,
) {
    let handles_back = session
        .read()
        .as_ref()
        .is_some_and(QuizSession::handles_back);
    if handles_back {
        dispatch.call(QuizEvent::Back);
    } else {
        let _ = navigator.push(Route::Home {});
    }
}

#[component]
fn SessionBody(
    session: QuizSession,
    on_event: EventHandler<QuizEvent>,
    on_submit: EventHandler<()>,
    on_home: EventHandler<()>,
) -> Element {
    let dialog = session.dialog().cloned();
    let submitting = session.is_submitting();

    let body = match session.stage() {
        SessionStage::Passage => rsx! {
            PassageStage { reading: session.reading().clone(), on_event }
        },
        SessionStage::Question => match question_vm(&session) {
            Some(question) => rsx! {
                QuestionStage { question, on_event }
            },
            None => rsx! {},
        },
        SessionStage::Submitted => {
            let review = build_review(session.reading().quiz(), session.state().ledger());
            let suggestions = session
                .result()
                .map(|result| result.suggestions.clone())
                .unwrap_or_default();
            rsx! {
                div { class: "reading-complete",
                    h3 { "Quiz complete" }
                    ScoreRing {
                        percent: review.percent,
                        correct: review.correct_count,
                        total: review.total,
                    }
                    SuggestionsPanel { suggestions }
                    ResultReview { review }
                    div { class: "reading-actions",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_event.call(QuizEvent::Reset),
                            "Read Again"
                        }
                        button {
                            class: "btn btn-primary",
                            id: "reading-home",
                            r#type: "button",
                            onclick: move |_| on_home.call(()),
                            "Back to Home"
                        }
                    }
                }
            }
        }
    };

    rsx! {
        {body}
        match dialog {
            Some(Dialog::Leave) => rsx! {
                LeaveDialog { on_event }
            },
            Some(Dialog::Submit(confirmation)) => rsx! {
                SubmitDialog { confirmation, submitting, on_event, on_submit }
            },
            None => rsx! {},
        }
    }
}

#[component]
fn PassageStage(reading: ReadingSession, on_event: EventHandler<QuizEvent>) -> Element {
    let passage = reading.passage().clone();
    let date = format_reading_date(reading.date());

    rsx! {
        article { class: "reading-passage",
            p { class: "reading-passage__date", "{date}" }
            h2 { "{passage.title}" }
            PassageReadAlong { text: passage.body.clone() }
            if !passage.vocabulary.is_empty() {
                section { class: "reading-vocabulary",
                    h3 { "Vocabulary" }
                    ul {
                        for word in passage.vocabulary.iter().cloned() {
                            li { key: "{word}",
                                span { "{word}" }
                                ReadAloudButton { text: word.clone() }
                            }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                id: "reading-start",
                r#type: "button",
                onclick: move |_| on_event.call(QuizEvent::Next),
                "Start Quiz"
            }
        }
    }
}

#[component]
fn QuestionStage(question: QuestionVm, on_event: EventHandler<QuizEvent>) -> Element {
    let submitting = question.submitting;

    rsx! {
        section { class: "reading-question",
            p { class: "reading-question__answered", "{question.answered_label}" }
            h3 { class: "reading-question__text", "{question.question}" }
            ul { class: "reading-options",
                for option in question.options.iter().cloned() {
                    li { key: "{option.text}",
                        button {
                            class: if option.selected { "option option--selected" } else { "option" },
                            r#type: "button",
                            disabled: submitting,
                            onclick: {
                                let text = option.text.clone();
                                move |_| on_event.call(QuizEvent::Select(text.clone()))
                            },
                            "{option.text}"
                        }
                    }
                }
            }
            div { class: "reading-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_event.call(QuizEvent::Back),
                    "Previous"
                }
                button {
                    class: "btn btn-primary",
                    id: "reading-next",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_event.call(QuizEvent::Next),
                    "{question.primary_label}"
                }
            }
        }
    }
}

#[component]
fn LeaveDialog(on_event: EventHandler<QuizEvent>) -> Element {
    rsx! {
        div { class: "modal-overlay",
            div { class: "modal", role: "dialog", aria_modal: "true",
                h3 { "Leave the quiz?" }
                p { "Your answers won't be saved." }
                div { class: "modal__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_event.call(QuizEvent::DismissDialog),
                        "Stay"
                    }
                    button {
                        class: "btn btn-danger",
                        id: "reading-leave",
                        r#type: "button",
                        onclick: move |_| on_event.call(QuizEvent::ConfirmLeave),
                        "Leave"
                    }
                }
            }
        }
    }
}

#[component]
fn SubmitDialog(
    confirmation: SubmitConfirmation,
    submitting: bool,
    on_event: EventHandler<QuizEvent>,
    on_submit: EventHandler<()>,
) -> Element {
    let message = confirmation.message();
    let submit_label = if submitting { "Submitting..." } else { "Submit" };

    rsx! {
        div { class: "modal-overlay",
            div { class: "modal", role: "dialog", aria_modal: "true",
                h3 { "Submit your answers?" }
                p { class: "modal__message", "{message}" }
                div { class: "modal__actions",
                    if !confirmation.all_answered() {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: submitting,
                            onclick: move |_| on_event.call(QuizEvent::ReviewUnanswered),
                            "Review"
                        }
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_event.call(QuizEvent::DismissDialog),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "reading-submit",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_submit.call(()),
                        "{submit_label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ReadingTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizEvent>>>>,
    submit: Rc<RefCell<Option<Callback<()>>>>,
    session: Rc<RefCell<Option<Signal<Option<QuizSession>>>>>,
}

#[cfg(test)]
impl ReadingTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizEvent>,
        submit: Callback<()>,
        session: Signal<Option<QuizSession>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.submit.borrow_mut() = Some(submit);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizEvent> {
        (*self.dispatch.borrow()).expect("reading dispatch registered")
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("reading submit registered")
    }

    pub(crate) fn session(&self) -> Signal<Option<QuizSession>> {
        (*self.session.borrow()).expect("reading session registered")
    }
}
