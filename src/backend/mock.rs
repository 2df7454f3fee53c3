//! # Mock Agent
//!
//! Timer-backed stand-in for the real agent: sleeps for a configured delay,
//! then returns canned data. Replies are keyword-matched so the demo feels
//! conversational; the meal simulation ignores the form entirely and hands
//! back the fixed sample curve.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::backend::agent::{AgentBackend, BackendError};
use crate::core::meal::{MealForm, PredictionSeries, sample_prediction};

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_SIMULATE_DELAY: Duration = Duration::from_millis(2000);

pub struct MockAgent {
    reply_delay: Duration,
    simulate_delay: Duration,
}

impl Default for MockAgent {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY, DEFAULT_SIMULATE_DELAY)
    }
}

impl MockAgent {
    pub fn new(reply_delay: Duration, simulate_delay: Duration) -> Self {
        Self { reply_delay, simulate_delay }
    }
}

#[async_trait]
impl AgentBackend for MockAgent {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_user_message(&self, text: &str) -> Result<String, BackendError> {
        debug!("Mock reply scheduled in {:?}", self.reply_delay);
        tokio::time::sleep(self.reply_delay).await;
        Ok(canned_reply(text).to_string())
    }

    async fn simulate_meal(&self, form: &MealForm) -> Result<PredictionSeries, BackendError> {
        debug!(
            "Mock simulation for '{}' scheduled in {:?}",
            form.description, self.simulate_delay
        );
        tokio::time::sleep(self.simulate_delay).await;
        Ok(sample_prediction())
    }
}

/// Pick a canned reply by keyword. Deterministic so tests can rely on it.
fn canned_reply(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    if lower.contains("spike") {
        "Your glucose rose quickly because that meal's carbohydrates were \
         absorbed faster than your insulin could act. A short walk after \
         eating, or dosing 15 minutes earlier, usually flattens that peak."
    } else if lower.contains("insulin") || lower.contains("dose") {
        "For a high-carb dinner, most people see the best overlap when the \
         bolus lands 15-20 minutes before the first bite. Always confirm \
         timing and amounts with your care team."
    } else if lower.contains("trend") || lower.contains("week") {
        "Over the past week your average sits near 126 mg/dL with roughly \
         82% time in range. Mornings look steady; the largest excursions \
         follow dinner, so that is the meal worth experimenting with."
    } else if lower.contains("eat") || lower.contains("meal") || lower.contains("food") {
        "Pairing carbohydrates with protein or fat slows absorption. This \
         afternoon, something like Greek yogurt with nuts should keep you \
         inside your target band."
    } else {
        "I can explain a reading, compare your recent trends, or walk \
         through a meal's likely impact. What would you like to look at?"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_replies_are_keyed_by_topic() {
        assert!(canned_reply("Why did my glucose SPIKE?").contains("rose quickly"));
        assert!(canned_reply("when to dose insulin").contains("bolus"));
        assert!(canned_reply("how was my week").contains("time in range"));
        assert!(canned_reply("what should I eat").contains("protein or fat"));
        assert!(canned_reply("hello").contains("What would you like"));
    }

    #[test]
    fn test_mock_simulation_returns_sample_curve() {
        // Zero delays keep this test instant.
        let agent = MockAgent::new(Duration::ZERO, Duration::ZERO);
        let series = tokio_test::block_on(agent.simulate_meal(&MealForm::default())).unwrap();
        assert_eq!(series, sample_prediction());
    }

    #[test]
    fn test_mock_reply_never_fails() {
        let agent = MockAgent::new(Duration::ZERO, Duration::ZERO);
        let reply = tokio_test::block_on(agent.send_user_message("anything")).unwrap();
        assert!(!reply.is_empty());
    }
}
