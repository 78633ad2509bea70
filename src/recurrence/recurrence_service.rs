use chrono::{Duration, NaiveDate};
use log::{debug, error, info, warn};
use std::sync::Arc;

use crate::bills::{Bill, BillRepositoryTrait};
use crate::errors::Result;
use crate::notifications::{
    NewNotification, NotificationServiceTrait, NOTIFICATION_TYPE_BILL_OVERDUE,
    NOTIFICATION_TYPE_BILL_REMINDER, NOTIFICATION_TYPE_RECURRING_TRANSACTION, PRIORITY_HIGH,
    PRIORITY_MEDIUM,
};
use crate::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use crate::Error;

use super::recurrence_model::{advance_next_date, RecurrenceTickSummary};

/// Bills further out than this are picked up by a later tick once they enter
/// the scan window.
const REMINDER_SCAN_WINDOW_DAYS: i64 = 30;

/// Drives the daily scheduler tick: posts due recurring transactions and
/// produces bill reminders and overdue transitions. The tick is safe to
/// re-run within the same day.
pub struct RecurrenceService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    bill_repository: Arc<dyn BillRepositoryTrait>,
    notifications: Arc<dyn NotificationServiceTrait>,
}

impl RecurrenceService {
    /// Creates a new RecurrenceService instance with injected dependencies
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        bill_repository: Arc<dyn BillRepositoryTrait>,
        notifications: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            bill_repository,
            notifications,
        }
    }

    /// Runs one daily tick as of the given date. Individual failures are
    /// logged and counted; the tick always runs to the end.
    pub async fn run_daily_tick(&self, as_of: NaiveDate) -> Result<RecurrenceTickSummary> {
        let mut summary = RecurrenceTickSummary::default();

        self.post_due_transactions(as_of, &mut summary).await?;
        self.remind_upcoming_bills(as_of, &mut summary).await?;
        self.flag_overdue_bills(as_of, &mut summary).await?;

        info!(
            "Recurrence tick for {}: {} transactions posted ({} failed), {} bill events ({} failed)",
            as_of,
            summary.processed_transactions,
            summary.failed_transactions,
            summary.processed_bills,
            summary.failed_bills
        );
        Ok(summary)
    }

    async fn post_due_transactions(
        &self,
        as_of: NaiveDate,
        summary: &mut RecurrenceTickSummary,
    ) -> Result<()> {
        let due = self.transaction_repository.find_due_recurring(as_of)?;
        debug!("{} recurring transactions due on {}", due.len(), as_of);

        for template in due {
            match self.post_one_occurrence(&template, as_of).await {
                Ok(posted) => {
                    summary.processed_transactions += 1;
                    self.notify_transaction_posted(&template, &posted).await;
                }
                // A same-day re-run finds the template already advanced.
                Err(Error::Conflict(reason)) => {
                    debug!("Recurring template {} skipped: {}", template.id, reason);
                }
                Err(e) => {
                    summary.failed_transactions += 1;
                    error!("Recurring template {} failed: {}", template.id, e);
                }
            }
        }
        Ok(())
    }

    async fn post_one_occurrence(
        &self,
        template: &Transaction,
        as_of: NaiveDate,
    ) -> Result<Transaction> {
        let rule = template.recurring_rule.as_ref().ok_or_else(|| {
            Error::Validation(crate::errors::ValidationError::MissingField(
                "recurringRule".to_string(),
            ))
        })?;

        let description = match &template.description {
            Some(text) => format!("{} (Recurring)", text),
            None => "(Recurring)".to_string(),
        };
        let occurrence = NewTransaction {
            id: None,
            account_id: template.account_id.clone(),
            transaction_type: template.transaction_type.clone(),
            amount: template.amount,
            category: template.category.clone(),
            description: Some(description),
            date: as_of,
            is_recurring: false,
            recurring_rule: None,
        };
        let next_date = advance_next_date(&rule.frequency, rule.next_date);

        self.transaction_repository
            .post_recurring_occurrence(&template.id, occurrence, next_date, as_of)
            .await
    }

    async fn notify_transaction_posted(&self, template: &Transaction, posted: &Transaction) {
        let notification = NewNotification {
            notification_type: NOTIFICATION_TYPE_RECURRING_TRANSACTION.to_string(),
            title: "Recurring transaction posted".to_string(),
            message: format!(
                "{} of {} in {} was posted automatically",
                posted.transaction_type.to_lowercase(),
                posted.amount,
                posted.category
            ),
            priority: None,
            data: Some(serde_json::json!({
                "transactionId": posted.id,
                "templateId": template.id,
            })),
            source_id: Some(template.id.clone()),
        };
        if let Err(e) = self
            .notifications
            .emit(&template.user_id, notification)
            .await
        {
            warn!("Failed to notify for template {}: {}", template.id, e);
        }
    }

    async fn remind_upcoming_bills(
        &self,
        as_of: NaiveDate,
        summary: &mut RecurrenceTickSummary,
    ) -> Result<()> {
        let window_end = as_of + Duration::days(REMINDER_SCAN_WINDOW_DAYS);
        let upcoming = self
            .bill_repository
            .list_pending_due_between(as_of, window_end)?;
        // Dedup compares notification creation timestamps (wall clock)
        // against as_of's day. The scheduler passes the current date, so the
        // two clocks agree; replaying past dates is not supported.
        let start_of_day = as_of.and_hms_opt(0, 0, 0).unwrap_or_default();

        for bill in upcoming {
            let days_until_due = (bill.due_date - as_of).num_days();
            if days_until_due > i64::from(bill.reminder_days) {
                continue;
            }

            match self.remind_one_bill(&bill, days_until_due, start_of_day).await {
                Ok(true) => summary.processed_bills += 1,
                Ok(false) => {}
                Err(e) => {
                    summary.failed_bills += 1;
                    error!("Reminder for bill {} failed: {}", bill.id, e);
                }
            }
        }
        Ok(())
    }

    /// Emits one reminder per bill per day. Returns false when today's
    /// reminder already exists.
    async fn remind_one_bill(
        &self,
        bill: &Bill,
        days_until_due: i64,
        start_of_day: chrono::NaiveDateTime,
    ) -> Result<bool> {
        let already_sent = self.notifications.has_recent(
            &bill.user_id,
            NOTIFICATION_TYPE_BILL_REMINDER,
            &bill.id,
            start_of_day,
        )?;
        if already_sent {
            return Ok(false);
        }

        let priority = if days_until_due <= 1 {
            PRIORITY_HIGH
        } else {
            PRIORITY_MEDIUM
        };
        let message = match days_until_due {
            0 => format!("'{}' ({}) is due today", bill.name, bill.amount),
            1 => format!("'{}' ({}) is due tomorrow", bill.name, bill.amount),
            n => format!("'{}' ({}) is due in {} days", bill.name, bill.amount, n),
        };
        let notification = NewNotification {
            notification_type: NOTIFICATION_TYPE_BILL_REMINDER.to_string(),
            title: "Upcoming bill".to_string(),
            message,
            priority: Some(priority.to_string()),
            data: Some(serde_json::json!({
                "billId": bill.id,
                "dueDate": bill.due_date,
            })),
            source_id: Some(bill.id.clone()),
        };
        self.notifications.emit(&bill.user_id, notification).await?;
        Ok(true)
    }

    async fn flag_overdue_bills(
        &self,
        as_of: NaiveDate,
        summary: &mut RecurrenceTickSummary,
    ) -> Result<()> {
        let overdue = self.bill_repository.list_pending_overdue(as_of)?;

        for bill in overdue {
            match self.bill_repository.mark_overdue(&bill.id).await {
                // Only the transition produces a notification; a bill paid
                // between the scan and the update stays silent.
                Ok(true) => {
                    summary.processed_bills += 1;
                    let notification = NewNotification {
                        notification_type: NOTIFICATION_TYPE_BILL_OVERDUE.to_string(),
                        title: "Bill overdue".to_string(),
                        message: format!(
                            "'{}' ({}) was due on {}",
                            bill.name, bill.amount, bill.due_date
                        ),
                        priority: Some(PRIORITY_HIGH.to_string()),
                        data: Some(serde_json::json!({
                            "billId": bill.id,
                            "dueDate": bill.due_date,
                        })),
                        source_id: Some(bill.id.clone()),
                    };
                    if let Err(e) = self.notifications.emit(&bill.user_id, notification).await {
                        warn!("Failed to notify for overdue bill {}: {}", bill.id, e);
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    summary.failed_bills += 1;
                    error!("Overdue transition for bill {} failed: {}", bill.id, e);
                }
            }
        }
        Ok(())
    }
}
