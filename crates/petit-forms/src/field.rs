//! Field validation
//!
//! One input plus its rule list. Validation clears any previous inline
//! error before re-evaluating, so the message always reflects the
//! current value.

use crate::rules::{first_violation, Rule};
use petit_dom::{NodeId, Page};
use tracing::debug;

/// Class on the inline error paragraph
pub const ERROR_CLASS: &str = "field-error";

/// A validated input with its inline error slot
#[derive(Debug)]
pub struct Field {
    input: NodeId,
    rules: Vec<Rule>,
    error: Option<NodeId>,
}

impl Field {
    pub fn new(input: NodeId, rules: Vec<Rule>) -> Self {
        Self {
            input,
            rules,
            error: None,
        }
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Name attribute used when collecting form data
    pub fn name(&self, page: &Page) -> Option<String> {
        page.tree.attr(self.input, "name").map(str::to_string)
    }

    pub fn value(&self, page: &Page) -> String {
        page.tree
            .attr(self.input, "value")
            .unwrap_or_default()
            .to_string()
    }

    /// Re-evaluate the rules against the current value; renders or clears
    /// the inline error and returns whether the field is valid.
    pub fn validate(&mut self, page: &mut Page) -> bool {
        self.clear_error(page);
        let value = self.value(page);
        match first_violation(&self.rules, &value) {
            Some(message) => {
                debug!(input = self.input.index(), %message, "field invalid");
                self.render_error(page, &message);
                false
            }
            None => true,
        }
    }

    fn render_error(&mut self, page: &mut Page, message: &str) {
        let error = page.tree.create_element("p");
        page.tree.add_class(error, ERROR_CLASS);

        let error_id = match page.tree.attr(self.input, "id") {
            Some(id) => format!("{id}-erreur"),
            None => "champ-erreur".to_string(),
        };
        page.tree.set_attr(error, "id", &error_id);
        page.tree.set_text(error, message);

        page.tree.set_attr(self.input, "aria-invalid", "true");
        page.tree.set_attr(self.input, "aria-describedby", &error_id);

        if let Some(parent) = page.tree.parent(self.input) {
            page.tree.append_child(parent, error);
        }
        self.error = Some(error);
    }

    fn clear_error(&mut self, page: &mut Page) {
        if let Some(error) = self.error.take() {
            page.tree.detach(error);
        }
        page.tree.remove_attr(self.input, "aria-invalid");
        page.tree.remove_attr(self.input, "aria-describedby");
    }
}
