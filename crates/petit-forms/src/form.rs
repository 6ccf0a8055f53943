//! Contact form
//!
//! Blur validates a single field; submit validates them all. A valid
//! submit disables the button, runs the action, and settles after a
//! fixed latency with a transient outcome banner. Re-entrant submits
//! while disabled are dropped.

use crate::data::FormData;
use crate::field::Field;
use petit_a11y::{announce, Politeness};
use petit_dom::{NodeId, Page};
use petit_events::{Event, EventBus, EventKind, EventTarget, ListenerId, Scheduler};
use petit_widgets::Widget;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// Delay between a valid submit and its outcome banner
pub const SUBMIT_LATENCY: Duration = Duration::from_secs(2);

/// How long the outcome banner stays in the tree
pub const BANNER_TTL: Duration = Duration::from_secs(5);

const SENDING_LABEL: &str = "Envoi en cours…";
const INVALID_MESSAGE: &str = "Veuillez corriger les champs en erreur";
const SUCCESS_MESSAGE: &str = "Message envoyé. Merci !";
const FAILURE_MESSAGE: &str = "Échec de l'envoi. Réessayez plus tard.";

/// Submit failure reported by the action
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network failure: {0}")]
    Network(String),
    #[error("rejected by the endpoint: {0}")]
    Rejected(String),
}

/// Where a validated submission goes
pub trait SubmitAction {
    fn submit(&mut self, data: &FormData) -> Result<(), SubmitError>;
}

/// The contact form widget
pub struct ContactForm {
    form: NodeId,
    fields: Vec<Field>,
    submit_button: NodeId,
    action: Box<dyn SubmitAction>,
    listeners: Vec<ListenerId>,
}

impl ContactForm {
    pub fn new(
        bus: &mut EventBus,
        form: NodeId,
        fields: Vec<Field>,
        submit_button: NodeId,
        action: Box<dyn SubmitAction>,
    ) -> Self {
        Self {
            form,
            fields,
            submit_button,
            action,
            listeners: vec![
                bus.add(EventTarget::Node(form), EventKind::Submit),
                bus.add(EventTarget::Node(form), EventKind::Blur),
            ],
        }
    }

    /// Submission is in flight while the button is disabled
    pub fn is_submitting(&self, page: &Page) -> bool {
        page.tree.attr(self.submit_button, "disabled").is_some()
    }

    fn on_blur(&mut self, page: &mut Page, target: NodeId) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.input() == target) {
            field.validate(page);
        }
    }

    fn on_submit(&mut self, page: &mut Page, sched: &mut Scheduler, now: Instant) {
        if self.is_submitting(page) {
            debug!("submit ignored, already in flight");
            return;
        }

        let mut first_invalid = None;
        for field in &mut self.fields {
            if !field.validate(page) && first_invalid.is_none() {
                first_invalid = Some(field.input());
            }
        }
        if let Some(input) = first_invalid {
            page.focus(input);
            announce(page, sched, now, INVALID_MESSAGE, Politeness::Assertive);
            return;
        }

        let mut data = FormData::new();
        for field in &self.fields {
            if let Some(name) = field.name(page) {
                data.append(&name, &field.value(page));
            }
        }

        let label = page.tree.text(self.submit_button);
        page.tree.set_attr(self.submit_button, "disabled", "");
        page.tree.set_text(self.submit_button, SENDING_LABEL);

        let outcome = self.action.submit(&data);
        if let Err(err) = &outcome {
            warn!(%err, "submit action failed");
        } else {
            debug!(entries = data.len(), "submit action accepted");
        }

        let form = self.form;
        let button = self.submit_button;
        let settle_at = now + SUBMIT_LATENCY;
        let succeeded = outcome.is_ok();
        sched.schedule(
            settle_at,
            Box::new(move |page, sched| {
                page.tree.remove_attr(button, "disabled");
                page.tree.set_text(button, &label);

                let banner = page.tree.create_element("div");
                page.tree.add_class(banner, "form-banner");
                page.tree.add_class(banner, if succeeded { "success" } else { "error" });
                page.tree.set_attr(banner, "role", "status");
                page.tree.set_text(
                    banner,
                    if succeeded { SUCCESS_MESSAGE } else { FAILURE_MESSAGE },
                );
                page.tree.append_child(form, banner);

                sched.schedule(
                    settle_at + BANNER_TTL,
                    Box::new(move |page, _| {
                        page.tree.detach(banner);
                    }),
                );
            }),
        );
    }
}

impl Widget for ContactForm {
    fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    fn handle(&mut self, page: &mut Page, sched: &mut Scheduler, event: &Event, now: Instant) {
        match event.kind {
            EventKind::Submit => self.on_submit(page, sched, now),
            EventKind::Blur => {
                if let Some(target) = event.target {
                    self.on_blur(page, target);
                }
            }
            _ => {}
        }
    }

    fn destroy(&mut self, bus: &mut EventBus) {
        for id in self.listeners.drain(..) {
            bus.remove(id);
        }
    }
}
