// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guided demo as a stepped state machine.
//!
//! The sequencer never sleeps on its own. A driver asks for
//! [`DemoSequencer::next_delay`], waits, then calls [`DemoSequencer::step`];
//! [`run_to_completion`] is the timer-based driver used by the terminal, and
//! tests step it by hand.
//!
//! States: `Idle -> Running -> Finished`. Starting again from any state
//! resets the index and clears the transcript.

use std::sync::Arc;
use std::time::Duration;

use setu_core::api::{CheckoutRequest, FulfillmentRequest};
use setu_core::{ChatMessage, Navigator, PaymentMethod, RetailApi, Route, SetuError};
use tracing::{debug, info, warn};

/// Bot message appended when an action step fails.
pub const ACTION_FAILED_MESSAGE: &str = "An error occurred. Continuing demo...";

const DEMO_USER: &str = "user_001";

/// Backend operation run by an action step, with its fixed parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoAction {
    Recommend { category: String },
    Inventory { product_id: u64 },
    Checkout { product_id: u64, size: String },
    Loyalty { user_id: String, order_amount: f64 },
    Fulfillment { order_id: String, address: String },
}

impl std::fmt::Display for DemoAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoAction::Recommend { .. } => write!(f, "recommend"),
            DemoAction::Inventory { .. } => write!(f, "inventory"),
            DemoAction::Checkout { .. } => write!(f, "checkout"),
            DemoAction::Loyalty { .. } => write!(f, "loyalty"),
            DemoAction::Fulfillment { .. } => write!(f, "fulfillment"),
        }
    }
}

/// One entry of the demo script. `delay` is waited before the step runs.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoStep {
    Message { text: String, delay: Duration },
    Action { action: DemoAction, delay: Duration },
    Navigate { route: Route, delay: Duration },
}

impl DemoStep {
    pub fn delay(&self) -> Duration {
        match self {
            DemoStep::Message { delay, .. }
            | DemoStep::Action { delay, .. }
            | DemoStep::Navigate { delay, .. } => *delay,
        }
    }
}

fn message(text: &str, ms: u64) -> DemoStep {
    DemoStep::Message {
        text: text.to_string(),
        delay: Duration::from_millis(ms),
    }
}

fn action(action: DemoAction, ms: u64) -> DemoStep {
    DemoStep::Action {
        action,
        delay: Duration::from_millis(ms),
    }
}

/// The fixed guided demo script.
pub fn demo_script() -> Vec<DemoStep> {
    vec![
        message("👋 Welcome to Setu AI! I'm your smart retail assistant.", 1000),
        message(
            "Let me help you find the perfect outfit. What are you looking for today?",
            1500,
        ),
        action(
            DemoAction::Recommend {
                category: "Shirts".into(),
            },
            2000,
        ),
        message("Great! I found some excellent options for you.", 2000),
        action(DemoAction::Inventory { product_id: 1 }, 2000),
        message(
            "Perfect! The item is in stock. Would you like to try it on virtually?",
            2000,
        ),
        DemoStep::Navigate {
            route: Route::TryOn,
            delay: Duration::from_millis(2000),
        },
        message("The virtual try-on looks great! Ready to checkout?", 3000),
        action(
            DemoAction::Checkout {
                product_id: 1,
                size: "M".into(),
            },
            2000,
        ),
        action(
            DemoAction::Loyalty {
                user_id: DEMO_USER.into(),
                order_amount: 2499.0,
            },
            2000,
        ),
        action(
            DemoAction::Fulfillment {
                order_id: "ORD123456".into(),
                address: "123 Main St".into(),
            },
            2000,
        ),
        message(
            "🎉 Order confirmed! Your order will be delivered soon. Thank you for shopping with Setu AI!",
            2000,
        ),
    ]
}

/// States of the demo FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoState {
    /// Not started yet.
    Idle,
    /// Steps remain to be played.
    Running,
    /// Every step was played.
    Finished,
}

impl std::fmt::Display for DemoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoState::Idle => write!(f, "idle"),
            DemoState::Running => write!(f, "running"),
            DemoState::Finished => write!(f, "finished"),
        }
    }
}

/// What one call to [`DemoSequencer::step`] did.
#[derive(Debug)]
pub enum StepOutcome {
    /// A message step appended its text.
    Said(ChatMessage),
    /// An action succeeded and its summary was appended.
    Acted {
        action: DemoAction,
        message: ChatMessage,
    },
    /// An action failed; the continuation message was appended.
    ActionFailed {
        action: DemoAction,
        error: SetuError,
        message: ChatMessage,
    },
    /// The navigator was sent to `route`.
    Navigated(Route),
    /// The sequencer was not running; nothing happened.
    Skipped,
}

impl StepOutcome {
    /// The message appended to the transcript, if any.
    pub fn message(&self) -> Option<&ChatMessage> {
        match self {
            StepOutcome::Said(message)
            | StepOutcome::Acted { message, .. }
            | StepOutcome::ActionFailed { message, .. } => Some(message),
            StepOutcome::Navigated(_) | StepOutcome::Skipped => None,
        }
    }
}

/// Plays a [`DemoStep`] script against the backend.
pub struct DemoSequencer {
    api: Arc<dyn RetailApi>,
    navigator: Arc<dyn Navigator>,
    script: Vec<DemoStep>,
    index: usize,
    state: DemoState,
    transcript: Vec<ChatMessage>,
}

impl DemoSequencer {
    /// Creates a sequencer for the standard [`demo_script`].
    pub fn new(api: Arc<dyn RetailApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_script(api, navigator, demo_script())
    }

    pub fn with_script(
        api: Arc<dyn RetailApi>,
        navigator: Arc<dyn Navigator>,
        script: Vec<DemoStep>,
    ) -> Self {
        Self {
            api,
            navigator,
            script,
            index: 0,
            state: DemoState::Idle,
            transcript: Vec::new(),
        }
    }

    /// (Re)starts from the first step with an empty transcript.
    pub fn start(&mut self) {
        self.index = 0;
        self.transcript.clear();
        self.state = if self.script.is_empty() {
            DemoState::Finished
        } else {
            DemoState::Running
        };
        info!(steps = self.script.len(), "demo started");
    }

    pub fn state(&self) -> DemoState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DemoState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == DemoState::Finished
    }

    /// Index of the next step to play.
    pub fn current_step(&self) -> usize {
        self.index
    }

    pub fn script(&self) -> &[DemoStep] {
        &self.script
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// How long to wait before the next [`step`](Self::step), `None` when not running.
    pub fn next_delay(&self) -> Option<Duration> {
        if !self.is_running() {
            return None;
        }
        self.script.get(self.index).map(DemoStep::delay)
    }

    /// Plays the current step and advances, whatever its outcome.
    pub async fn step(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Skipped;
        }
        let Some(step) = self.script.get(self.index).cloned() else {
            self.state = DemoState::Finished;
            return StepOutcome::Skipped;
        };

        let outcome = match step {
            DemoStep::Message { text, .. } => {
                let message = ChatMessage::bot(text);
                self.transcript.push(message.clone());
                StepOutcome::Said(message)
            }
            DemoStep::Action { action, .. } => match self.run_action(&action).await {
                Ok(message) => {
                    self.transcript.push(message.clone());
                    StepOutcome::Acted { action, message }
                }
                Err(error) => {
                    warn!(%action, error = %error, "demo action failed, continuing");
                    let message = ChatMessage::bot(ACTION_FAILED_MESSAGE);
                    self.transcript.push(message.clone());
                    StepOutcome::ActionFailed {
                        action,
                        error,
                        message,
                    }
                }
            },
            DemoStep::Navigate { route, .. } => {
                self.navigator.navigate(route);
                StepOutcome::Navigated(route)
            }
        };

        self.index += 1;
        debug!(step = self.index, total = self.script.len(), "demo step played");
        if self.index >= self.script.len() {
            self.state = DemoState::Finished;
            info!("demo finished");
        }
        outcome
    }

    async fn run_action(&self, action: &DemoAction) -> Result<ChatMessage, SetuError> {
        let message = match action {
            DemoAction::Recommend { category } => {
                let resp = self
                    .api
                    .recommend(Some(category.as_str()), None, DEMO_USER)
                    .await?;
                let text = format!("Found {} recommendations!", resp.recommendations.len());
                ChatMessage::bot(text).with_products(resp.recommendations)
            }
            DemoAction::Inventory { product_id } => {
                let resp = self.api.check_inventory(*product_id).await?;
                ChatMessage::bot(resp.message)
            }
            DemoAction::Checkout { product_id, size } => {
                let request = CheckoutRequest {
                    product_id: *product_id,
                    size: size.clone(),
                    payment_method: PaymentMethod::Upi,
                    upi_id: None,
                    card_number: None,
                    user_id: DEMO_USER.to_string(),
                };
                let resp = self.api.checkout(&request).await?;
                ChatMessage::bot(format!("✅ Payment successful! Order ID: {}", resp.order_id))
            }
            DemoAction::Loyalty {
                user_id,
                order_amount,
            } => {
                let resp = self.api.apply_loyalty(user_id, *order_amount).await?;
                ChatMessage::bot(resp.message)
            }
            DemoAction::Fulfillment { order_id, address } => {
                let request = FulfillmentRequest::home_delivery(order_id.clone(), address.clone());
                let resp = self.api.fulfillment(&request).await?;
                ChatMessage::bot(resp.message)
            }
        };
        Ok(message)
    }
}

/// Starts `sequencer` and plays it to the end on the tokio timer.
///
/// Delays are divided by `speed`; exactly one sleep is pending at a time.
/// `on_step` sees every outcome as it happens.
pub async fn run_to_completion<F>(sequencer: &mut DemoSequencer, speed: f64, mut on_step: F)
where
    F: FnMut(&StepOutcome),
{
    sequencer.start();
    while let Some(delay) = sequencer.next_delay() {
        tokio::time::sleep(scale(delay, speed)).await;
        let outcome = sequencer.step().await;
        on_step(&outcome);
    }
}

/// Divides `delay` by `speed`. Speeds that are not positive, or that would
/// push the delay past what `Duration` holds, leave it unscaled.
fn scale(delay: Duration, speed: f64) -> Duration {
    if !(speed.is_finite() && speed > 0.0) {
        return delay;
    }
    Duration::try_from_secs_f64(delay.as_secs_f64() / speed).unwrap_or(delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_core::Role;
    use setu_test_utils::{
        BackendCall, Endpoint, Failure, MockBackend, RecordingNavigator, sample_products,
    };

    fn sequencer(backend: &MockBackend, nav: &RecordingNavigator) -> DemoSequencer {
        DemoSequencer::new(Arc::new(backend.clone()), Arc::new(nav.clone()))
    }

    async fn step_all(seq: &mut DemoSequencer) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        while seq.is_running() {
            outcomes.push(seq.step().await);
        }
        outcomes
    }

    #[test]
    fn script_has_twelve_steps_with_one_navigation() {
        let script = demo_script();
        assert_eq!(script.len(), 12);
        let navigations: Vec<_> = script
            .iter()
            .filter_map(|s| match s {
                DemoStep::Navigate { route, .. } => Some(*route),
                _ => None,
            })
            .collect();
        assert_eq!(navigations, vec![Route::TryOn]);
        let total: Duration = script.iter().map(DemoStep::delay).sum();
        assert_eq!(total, Duration::from_millis(23_500));
    }

    #[tokio::test]
    async fn idle_until_started() {
        let backend = MockBackend::with_products(sample_products());
        let nav = RecordingNavigator::new();
        let mut seq = sequencer(&backend, &nav);

        assert_eq!(seq.state(), DemoState::Idle);
        assert_eq!(seq.next_delay(), None);
        assert!(matches!(seq.step().await, StepOutcome::Skipped));
        assert!(seq.transcript().is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn full_run_follows_script_in_order() {
        let backend = MockBackend::with_products(sample_products());
        let nav = RecordingNavigator::new();
        let mut seq = sequencer(&backend, &nav);

        seq.start();
        assert_eq!(seq.next_delay(), Some(Duration::from_millis(1000)));
        let outcomes = step_all(&mut seq).await;

        assert_eq!(outcomes.len(), 12);
        assert!(seq.is_finished());
        assert!(!seq.is_running());
        assert_eq!(seq.current_step(), 12);
        assert_eq!(nav.routes(), vec![Route::TryOn]);

        let texts: Vec<&str> = seq.transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "👋 Welcome to Setu AI! I'm your smart retail assistant.",
                "Let me help you find the perfect outfit. What are you looking for today?",
                "Found 2 recommendations!",
                "Great! I found some excellent options for you.",
                "Classic Oxford Shirt - Online: 10 units available",
                "Perfect! The item is in stock. Would you like to try it on virtually?",
                "The virtual try-on looks great! Ready to checkout?",
                "✅ Payment successful! Order ID: ORD100001",
                "Applied 1200 loyalty points for ₹600.00 discount",
                "Order will be delivered to your address in 3 days",
                "🎉 Order confirmed! Your order will be delivered soon. Thank you for shopping with Setu AI!",
            ]
        );
        assert!(seq.transcript().iter().all(|m| m.role == Role::Bot));
        assert_eq!(seq.transcript()[2].products.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn actions_use_fixed_parameters() {
        let backend = MockBackend::with_products(sample_products());
        let nav = RecordingNavigator::new();
        let mut seq = sequencer(&backend, &nav);
        seq.start();
        step_all(&mut seq).await;

        let calls = backend.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(
            calls[0],
            BackendCall::Recommend {
                category: Some("Shirts".into()),
                user_input: None,
                user_id: "user_001".into()
            }
        );
        assert_eq!(calls[1], BackendCall::CheckInventory(1));
        let BackendCall::Checkout(checkout) = &calls[2] else {
            panic!("expected checkout, got {:?}", calls[2]);
        };
        assert_eq!(checkout.size, "M");
        assert_eq!(checkout.payment_method, PaymentMethod::Upi);
        assert!(checkout.upi_id.is_none() && checkout.card_number.is_none());
        assert_eq!(
            calls[3],
            BackendCall::ApplyLoyalty {
                user_id: "user_001".into(),
                order_amount: 2499.0
            }
        );
        assert_eq!(
            calls[4],
            BackendCall::Fulfillment(FulfillmentRequest::home_delivery("ORD123456", "123 Main St"))
        );
    }

    #[tokio::test]
    async fn failing_actions_do_not_stop_the_script() {
        let backend = MockBackend::with_products(sample_products());
        backend.fail(Endpoint::Recommend, Failure::Transport);
        backend.fail(Endpoint::Checkout, Failure::PaymentDeclined);
        let nav = RecordingNavigator::new();
        let mut seq = sequencer(&backend, &nav);

        seq.start();
        let outcomes = step_all(&mut seq).await;

        assert_eq!(outcomes.len(), 12);
        assert!(seq.is_finished());
        let failed: Vec<String> = outcomes
            .iter()
            .filter_map(|o| match o {
                StepOutcome::ActionFailed { action, .. } => Some(action.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["recommend", "checkout"]);
        assert_eq!(seq.transcript()[2].text, ACTION_FAILED_MESSAGE);
        assert_eq!(seq.transcript()[7].text, ACTION_FAILED_MESSAGE);
        // Later actions still ran.
        assert_eq!(backend.call_count(Endpoint::Fulfillment), 1);
    }

    #[tokio::test]
    async fn restart_resets_index_and_transcript() {
        let backend = MockBackend::with_products(sample_products());
        let nav = RecordingNavigator::new();
        let mut seq = sequencer(&backend, &nav);

        seq.start();
        seq.step().await;
        seq.step().await;
        assert_eq!(seq.current_step(), 2);

        seq.start();
        assert_eq!(seq.current_step(), 0);
        assert!(seq.transcript().is_empty());
        assert!(seq.is_running());
    }

    #[tokio::test]
    async fn empty_script_finishes_immediately() {
        let backend = MockBackend::new();
        let nav = RecordingNavigator::new();
        let mut seq = DemoSequencer::with_script(Arc::new(backend), Arc::new(nav), Vec::new());
        seq.start();
        assert!(seq.is_finished());
        assert_eq!(seq.next_delay(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn run_to_completion_honors_scaled_delays() {
        let backend = MockBackend::with_products(sample_products());
        let nav = RecordingNavigator::new();
        let mut seq = sequencer(&backend, &nav);

        let start = tokio::time::Instant::now();
        let mut seen = 0;
        run_to_completion(&mut seq, 2.0, |_| seen += 1).await;

        assert_eq!(seen, 12);
        assert!(seq.is_finished());
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(11_750), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(23_500), "elapsed {elapsed:?}");
    }

    #[test]
    fn non_positive_speed_leaves_delay_unscaled() {
        let d = Duration::from_millis(2000);
        assert_eq!(scale(d, 4.0), Duration::from_millis(500));
        assert_eq!(scale(d, 0.0), d);
        assert_eq!(scale(d, f64::NAN), d);
    }

    #[test]
    fn tiny_speed_does_not_overflow() {
        let d = Duration::from_millis(1000);
        assert_eq!(scale(d, 1e-300), d);
        assert_eq!(scale(d, f64::MIN_POSITIVE), d);
        assert_eq!(scale(d, 0.5), Duration::from_secs(2));
    }
}
