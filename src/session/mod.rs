//! Interactive node type selection.
//!
//! The session walks `Presenting → AwaitingChoice → AwaitingConfirmation` and
//! then either finishes (`Confirmed`), loops back through `Revising` with a new
//! replica count, or stops on invalid input (`Aborted`).

pub mod replicas;

pub use replicas::ReplicaCount;

use crate::catalog::{Catalog, RankedEntry, monthly_cost, rank};
use crate::context::Context;
use crate::currency::{LocaleConfig, format_currency};
use crate::error::{ProvisionError, ProvisionResult};
use anyhow::Result;

pub const CHOICE_PROMPT: &str = "Enter choice number:";
pub const CONFIRM_PROMPT: &str = "Confirm this selection? (y/n):";
pub const REPLICA_PROMPT: &str = "Enter the number of replicas (0-5, default 1):";

/// Mutable state owned by a single selection session
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub replica_count: ReplicaCount,
    pub chosen_type: Option<String>,
    pub confirmed: bool,
}

/// Outcome of a confirmed session
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub node_type: String,
    pub replica_count: ReplicaCount,
}

/// Cost projection for one node type at a given replica count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub hourly_price: f64,
    pub monthly_per_instance: f64,
    pub total_monthly: f64,
}

impl CostSummary {
    /// `None` for unpriced entries; a malformed price label is an error
    pub fn compute(entry: &RankedEntry, replicas: ReplicaCount) -> ProvisionResult<Option<Self>> {
        let summary = entry.hourly_price()?.map(|hourly_price| Self {
            hourly_price,
            monthly_per_instance: monthly_cost(hourly_price, 1),
            total_monthly: monthly_cost(hourly_price, replicas.instance_count()),
        });
        Ok(summary)
    }
}

#[derive(Debug)]
enum SessionState {
    Presenting,
    AwaitingChoice(Vec<RankedEntry>),
    AwaitingConfirmation(RankedEntry),
    Revising,
    Confirmed(String),
    Aborted(ProvisionError),
}

impl SessionState {
    fn label(&self) -> &'static str {
        match self {
            SessionState::Presenting => "presenting",
            SessionState::AwaitingChoice(_) => "awaiting_choice",
            SessionState::AwaitingConfirmation(_) => "awaiting_confirmation",
            SessionState::Revising => "revising",
            SessionState::Confirmed(_) => "confirmed",
            SessionState::Aborted(_) => "aborted",
        }
    }
}

/// Parse a 1-based choice against the number of listed entries
pub fn parse_choice(input: &str, count: usize) -> ProvisionResult<usize> {
    let trimmed = input.trim();
    let index = trimmed
        .parse::<i64>()
        .map_err(|_| ProvisionError::InvalidNumber {
            field: "choice".to_string(),
            value: trimmed.to_string(),
        })?;

    match usize::try_from(index) {
        Ok(position) if (1..=count).contains(&position) => Ok(position),
        _ => Err(ProvisionError::SelectionOutOfRange { index, count }),
    }
}

/// One line of the ranked listing: index, name, storage, price and projected monthly total
pub fn listing_line(
    position: usize,
    entry: &RankedEntry,
    replicas: ReplicaCount,
    locale: &LocaleConfig,
) -> String {
    let mut line = format!(
        "{}. {} ({}) - {}",
        position,
        entry.name(),
        entry.storage(),
        entry.price_label()
    );
    if let Ok(Some(summary)) = CostSummary::compute(entry, replicas) {
        line.push_str(&format!(
            " · ~{}/month",
            format_currency(summary.total_monthly, locale)
        ));
    }
    line
}

/// Walks the operator through picking and confirming a node type
pub struct SelectionSession<'a> {
    ctx: &'a Context,
    catalog: &'a Catalog,
    locale: &'a LocaleConfig,
    state: SelectionState,
}

impl<'a> SelectionSession<'a> {
    pub fn new(
        ctx: &'a Context,
        catalog: &'a Catalog,
        locale: &'a LocaleConfig,
        replica_count: ReplicaCount,
    ) -> Self {
        Self {
            ctx,
            catalog,
            locale,
            state: SelectionState {
                replica_count,
                chosen_type: None,
                confirmed: false,
            },
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Drive the session until the operator confirms or the input is invalid
    pub fn run(mut self) -> Result<Selection> {
        let mut state = SessionState::Presenting;

        loop {
            tracing::debug!(
                state = state.label(),
                replicas = %self.state.replica_count,
                "Selection session step"
            );

            state = match state {
                SessionState::Presenting => SessionState::AwaitingChoice(self.present()),
                SessionState::AwaitingChoice(ranked) => self.await_choice(ranked)?,
                SessionState::AwaitingConfirmation(entry) => self.await_confirmation(entry)?,
                SessionState::Revising => self.revise()?,
                SessionState::Confirmed(node_type) => {
                    self.state.chosen_type = Some(node_type.clone());
                    self.state.confirmed = true;
                    tracing::debug!(
                        chosen = ?self.state.chosen_type,
                        confirmed = self.state.confirmed,
                        "Selection session finished"
                    );
                    return Ok(Selection {
                        node_type,
                        replica_count: self.state.replica_count,
                    });
                }
                SessionState::Aborted(err) => {
                    tracing::debug!(error = %err, kind = ?err.kind(), "Selection session aborted");
                    return Err(err.into());
                }
            };
        }
    }

    /// Rank the catalog and list it with costs at the current replica count
    fn present(&self) -> Vec<RankedEntry> {
        let replicas = self.state.replica_count;
        let ranked = rank(self.catalog);

        self.ctx.output.subsection(&format!(
            "Cache node types ({} node{})",
            replicas.instance_count(),
            if replicas.instance_count() == 1 { "" } else { "s" }
        ));

        for (index, entry) in ranked.iter().enumerate() {
            self.ctx
                .output
                .list_item(&listing_line(index + 1, entry, replicas, self.locale));
        }

        ranked
    }

    fn await_choice(&mut self, ranked: Vec<RankedEntry>) -> Result<SessionState> {
        let answer = self.ctx.input.text(CHOICE_PROMPT, None)?;
        let position = match parse_choice(&answer, ranked.len()) {
            Ok(position) => position,
            Err(err) => return Ok(SessionState::Aborted(err)),
        };

        let entry = ranked[position - 1].clone();
        let summary = match CostSummary::compute(&entry, self.state.replica_count) {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                self.ctx.output.warning(&format!(
                    "{} has no hourly price ({}) and cannot be selected. Pick another node type.",
                    entry.name(),
                    entry.price_label()
                ));
                return Ok(SessionState::AwaitingChoice(ranked));
            }
            Err(err) => return Ok(SessionState::Aborted(err)),
        };

        self.display_summary(&entry, &summary);
        Ok(SessionState::AwaitingConfirmation(entry))
    }

    fn display_summary(&self, entry: &RankedEntry, summary: &CostSummary) {
        let hourly = format_currency(summary.hourly_price, self.locale);
        let per_instance = format_currency(summary.monthly_per_instance, self.locale);
        let total = format_currency(summary.total_monthly, self.locale);

        self.ctx.output.blank();
        self.ctx.output.info(&format!(
            "You selected {} with {}. This will cost {} hourly and approximately {} per month.",
            entry.name(),
            entry.storage(),
            hourly,
            total
        ));
        self.ctx.output.key_value("Monthly per node", &per_instance);
        self.ctx.output.key_value(
            "Nodes",
            &self.state.replica_count.instance_count().to_string(),
        );
        self.ctx.output.key_value_highlight("Monthly total", &total);
    }

    fn await_confirmation(&mut self, entry: RankedEntry) -> Result<SessionState> {
        let answer = self.ctx.input.text(CONFIRM_PROMPT, None)?;

        let next = match answer.trim().to_lowercase().as_str() {
            "y" => SessionState::Confirmed(entry.name().to_string()),
            "n" => SessionState::Revising,
            _ => {
                self.ctx.output.warning("Please answer 'y' or 'n'.");
                SessionState::AwaitingConfirmation(entry)
            }
        };
        Ok(next)
    }

    fn revise(&mut self) -> Result<SessionState> {
        let default = ReplicaCount::default().to_string();
        let answer = self.ctx.input.text(REPLICA_PROMPT, Some(&default))?;

        let next = match ReplicaCount::parse(&answer) {
            Ok(replicas) => {
                self.state.replica_count = replicas;
                SessionState::Presenting
            }
            Err(err) => SessionState::Aborted(err),
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_helpers::{scenario_catalog, test_context};
    use crate::traits::{MockOutput, MockUserInput, OutputMessage};
    use std::sync::Arc;

    fn run_session(
        responses: &[&str],
        replicas: u8,
    ) -> (Result<Selection>, Arc<MockUserInput>, Arc<MockOutput>) {
        let catalog = scenario_catalog();
        let input = Arc::new(MockUserInput::with_responses(responses));
        let output = Arc::new(MockOutput::new());
        let ctx = test_context(Arc::clone(&input), Arc::clone(&output));
        let locale = LocaleConfig::fallback();

        let session = SelectionSession::new(
            &ctx,
            &catalog,
            &locale,
            ReplicaCount::new(i64::from(replicas)).unwrap(),
        );
        (session.run(), input, output)
    }

    fn range_error(result: &Result<Selection>) -> bool {
        result
            .as_ref()
            .err()
            .and_then(|e| e.downcast_ref::<ProvisionError>())
            .map(|e| e.kind() == ErrorKind::Range)
            .unwrap_or(false)
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 2).unwrap(), 1);
        assert_eq!(parse_choice(" 2 ", 2).unwrap(), 2);
        assert_eq!(
            parse_choice("0", 2).unwrap_err(),
            ProvisionError::SelectionOutOfRange { index: 0, count: 2 }
        );
        assert_eq!(parse_choice("3", 2).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_choice("-4", 2).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(parse_choice("large", 2).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_confirmed_selection() {
        let (result, input, output) = run_session(&["2", "y"], 1);

        let selection = result.unwrap();
        assert_eq!(selection.node_type, "cache.large");
        assert_eq!(selection.replica_count.get(), 1);
        assert_eq!(input.remaining(), 0);

        assert_eq!(
            output.get_list_items(),
            vec![
                "1. cache.small (14.13 GB RAM) - $0.10 hourly · ~$144.00/month",
                "2. cache.large (28.26 GB RAM) - $0.20 hourly · ~$288.00/month",
            ]
        );
        assert!(output.contains_message(&OutputMessage::Info(
            "You selected cache.large with 28.26 GB RAM. This will cost $0.20 hourly and approximately $288.00 per month."
                .to_string()
        )));
        assert!(output.contains_message(&OutputMessage::KeyValue(
            "Monthly per node".to_string(),
            "$144.00".to_string()
        )));
    }

    #[test]
    fn test_confirmation_is_case_insensitive() {
        let (result, _, _) = run_session(&["1", " Y "], 0);
        assert_eq!(result.unwrap().node_type, "cache.small");
    }

    #[test]
    fn test_rejection_revises_replicas_and_represents() {
        let (result, input, output) = run_session(&["2", "n", "3", "1", "y"], 1);

        let selection = result.unwrap();
        assert_eq!(selection.node_type, "cache.small");
        assert_eq!(selection.replica_count.get(), 3);
        assert_eq!(
            input.prompts(),
            vec![CHOICE_PROMPT, CONFIRM_PROMPT, REPLICA_PROMPT, CHOICE_PROMPT, CONFIRM_PROMPT]
        );

        let items = output.get_list_items();
        assert_eq!(items.len(), 4);
        assert_eq!(items[2], "1. cache.small (14.13 GB RAM) - $0.10 hourly · ~$288.00/month");
    }

    #[test]
    fn test_blank_revision_uses_default() {
        let (result, _, _) = run_session(&["1", "n", "", "1", "y"], 4);
        assert_eq!(result.unwrap().replica_count.get(), 1);
    }

    #[test]
    fn test_invalid_revision_aborts() {
        let (result, input, _) = run_session(&["1", "n", "6", "1", "y"], 1);
        assert!(range_error(&result));
        assert_eq!(input.remaining(), 2);
    }

    #[test]
    fn test_out_of_range_choice_aborts() {
        for choice in ["0", "3"] {
            let (result, _, _) = run_session(&[choice, "y"], 1);
            assert!(range_error(&result), "choice: {}", choice);
        }
    }

    #[test]
    fn test_non_numeric_choice_aborts() {
        let (result, _, _) = run_session(&["cache.large"], 1);
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProvisionError>().unwrap().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn test_ambiguous_confirmation_reprompts() {
        let (result, input, output) = run_session(&["1", "maybe", "", "y"], 1);

        assert_eq!(result.unwrap().node_type, "cache.small");
        assert_eq!(
            input.prompts(),
            vec![CHOICE_PROMPT, CONFIRM_PROMPT, CONFIRM_PROMPT, CONFIRM_PROMPT]
        );
        assert_eq!(output.get_warnings().len(), 2);
    }

    #[test]
    fn test_unpriced_entry_cannot_be_selected() {
        let catalog = Catalog::from_json(
            r#"{
                "cache.free": {"Memory": "1 GiB", "Price": "N/A"},
                "cache.paid": {"Memory": "2 GiB", "Price": "$0.05 hourly"}
            }"#,
        )
        .unwrap();
        let input = Arc::new(MockUserInput::with_responses(&["1", "2", "y"]));
        let output = Arc::new(MockOutput::new());
        let ctx = test_context(Arc::clone(&input), Arc::clone(&output));
        let locale = LocaleConfig::fallback();

        let selection = SelectionSession::new(&ctx, &catalog, &locale, ReplicaCount::default())
            .run()
            .unwrap();

        assert_eq!(selection.node_type, "cache.paid");
        assert_eq!(output.get_warnings().len(), 1);
        assert!(output.get_warnings()[0].contains("cache.free"));
        assert_eq!(
            output.get_list_items()[0],
            "1. cache.free (1.07 GB RAM) - N/A"
        );
    }

    #[test]
    fn test_malformed_price_aborts_selection() {
        let catalog = Catalog::from_json(
            r#"{
                "cache.bad": {"Memory": "1 GiB", "Price": "$0.20/hr"},
                "cache.ok": {"Memory": "2 GiB", "Price": "$0.05 hourly"}
            }"#,
        )
        .unwrap();
        let input = Arc::new(MockUserInput::with_responses(&["1", "2", "y"]));
        let output = Arc::new(MockOutput::new());
        let ctx = test_context(Arc::clone(&input), Arc::clone(&output));
        let locale = LocaleConfig::fallback();

        let err = SelectionSession::new(&ctx, &catalog, &locale, ReplicaCount::default())
            .run()
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ProvisionError>(),
            Some(&ProvisionError::InvalidPrice {
                node_type: "cache.bad".to_string(),
                value: "$0.20/hr".to_string(),
            })
        );
        assert_eq!(input.remaining(), 2);
        assert!(output.get_warnings().is_empty());
        assert_eq!(
            output.get_list_items()[0],
            "1. cache.bad (1.07 GB RAM) - $0.20/hr"
        );
    }

    #[test]
    fn test_missing_price_is_treated_as_unpriced() {
        let catalog = Catalog::from_json(
            r#"{"cache.bare": {"Memory": "1 GiB"}, "cache.paid": {"Memory": "2 GiB", "Price": "$0.05 hourly"}}"#,
        )
        .unwrap();
        let input = Arc::new(MockUserInput::with_responses(&["1", "2", "y"]));
        let output = Arc::new(MockOutput::new());
        let ctx = test_context(Arc::clone(&input), Arc::clone(&output));
        let locale = LocaleConfig::fallback();

        let selection = SelectionSession::new(&ctx, &catalog, &locale, ReplicaCount::default())
            .run()
            .unwrap();

        assert_eq!(selection.node_type, "cache.paid");
        assert_eq!(output.get_warnings().len(), 1);
    }

    #[test]
    fn test_unpriced_entry_has_no_cost_summary() {
        let catalog = Catalog::from_json(r#"{"cache.free": {"Price": "N/A"}}"#).unwrap();
        let ranked = rank(&catalog);
        assert_eq!(CostSummary::compute(&ranked[0], ReplicaCount::default()), Ok(None));
    }

    #[test]
    fn test_cost_summary_scenario() {
        let catalog = scenario_catalog();
        let ranked = rank(&catalog);
        let summary = CostSummary::compute(&ranked[1], ReplicaCount::new(1).unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(summary.hourly_price, 0.20);
        assert_eq!(summary.monthly_per_instance, 144.0);
        assert_eq!(summary.total_monthly, 288.0);
    }

    #[test]
    fn test_new_session_state() {
        let ctx = Context::test();
        let catalog = scenario_catalog();
        let locale = LocaleConfig::fallback();
        let session = SelectionSession::new(&ctx, &catalog, &locale, ReplicaCount::default());

        assert_eq!(
            session.state(),
            &SelectionState {
                replica_count: ReplicaCount::default(),
                chosen_type: None,
                confirmed: false,
            }
        );
    }
}
