use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use std::sync::Arc;

use crate::dashboard::{DashboardData, DashboardServiceTrait};
use crate::errors::Result;

use super::assistant_constants::{ASSISTANT_CATEGORIES, DEFAULT_CATEGORY};
use super::assistant_traits::{AssistantServiceTrait, TextGeneratorTrait};

/// Service bridging the finance data to the text-generation collaborator
pub struct AssistantService {
    dashboard: Arc<dyn DashboardServiceTrait>,
    generator: Arc<dyn TextGeneratorTrait>,
}

impl AssistantService {
    /// Creates a new AssistantService instance with injected dependencies
    pub fn new(
        dashboard: Arc<dyn DashboardServiceTrait>,
        generator: Arc<dyn TextGeneratorTrait>,
    ) -> Self {
        Self {
            dashboard,
            generator,
        }
    }

    /// Renders a snapshot into the compact text block handed to the
    /// generator as context.
    pub fn build_context(data: &DashboardData) -> String {
        let mut lines = vec![
            format!("As of {}", data.as_of),
            format!("Total balance: {}", data.total_balance),
            format!(
                "This month: income {}, expenses {}, net {}",
                data.current_month.income, data.current_month.expense, data.current_month.net
            ),
            format!(
                "Last month: income {}, expenses {}, net {}",
                data.previous_month.income, data.previous_month.expense, data.previous_month.net
            ),
        ];
        if !data.spending_by_category.is_empty() {
            lines.push("Spending by category:".to_string());
            for entry in &data.spending_by_category {
                lines.push(format!("- {}: {}", entry.category, entry.amount));
            }
        }
        lines.join("\n")
    }

    fn match_category(answer: &str) -> Option<&'static str> {
        let cleaned = answer.trim().trim_matches(|c: char| !c.is_alphanumeric());
        ASSISTANT_CATEGORIES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(cleaned))
            .copied()
    }
}

#[async_trait]
impl AssistantServiceTrait for AssistantService {
    async fn categorize(&self, description: &str) -> String {
        let prompt = format!(
            "Pick the single best category for this transaction description.\n\
             Answer with exactly one of: {}.\n\
             Description: {}",
            ASSISTANT_CATEGORIES.join(", "),
            description
        );

        match self.generator.generate(&prompt).await {
            Ok(answer) => match Self::match_category(&answer) {
                Some(category) => category.to_string(),
                None => {
                    warn!("Generator returned unknown category '{}'", answer.trim());
                    DEFAULT_CATEGORY.to_string()
                }
            },
            Err(e) => {
                // Categorization is best-effort; the caller always gets a
                // usable category.
                warn!("Categorization degraded to default: {}", e);
                DEFAULT_CATEGORY.to_string()
            }
        }
    }

    async fn generate_insights(&self, user_id: &str, as_of: NaiveDate) -> Result<String> {
        let snapshot = self.dashboard.get_dashboard_snapshot(user_id, as_of)?;
        let prompt = format!(
            "You are a personal finance assistant. Based on the figures below,\n\
             give three short, practical observations about this user's finances.\n\n{}",
            Self::build_context(&snapshot)
        );
        self.generator.generate(&prompt).await
    }
}
