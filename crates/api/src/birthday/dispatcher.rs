use birthday_greetings_domain::{NaiveDate, NotificationEvent, UserId};
use birthday_greetings_infra::{INotificationLedgerRepo, INotificationRepo};
use thiserror::Error;
use tracing::{error, warn};

/// Failure to notify a single member. It never aborts the dispatch of the
/// remaining members.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Unable to check the notification ledger for member: {user_id}")]
    Ledger {
        user_id: UserId,
        #[source]
        source: anyhow::Error,
    },
    #[error("The notification store rejected the notification for member: {user_id}")]
    Rejected {
        user_id: UserId,
        #[source]
        source: anyhow::Error,
    },
}

impl DispatchError {
    pub fn user_id(&self) -> UserId {
        match self {
            Self::Ledger { user_id, .. } => *user_id,
            Self::Rejected { user_id, .. } => *user_id,
        }
    }
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Notifications accepted by the store during this dispatch, in the
    /// order of the matched members
    pub sent: Vec<NotificationEvent>,
    /// Members skipped because they were notified earlier the same day
    pub already_notified: Vec<UserId>,
    pub failures: Vec<DispatchError>,
}

impl DispatchReport {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

/// Notifies every matched member that has not been notified on `today` yet.
///
/// A member is marked in the ledger before the notification is handed to the
/// store, and the mark is removed again if the store rejects it. Of any number
/// of concurrent dispatches for the same day only the one that claims a member
/// sends to that member.
pub async fn dispatch(
    matches: &[UserId],
    today: NaiveDate,
    timestamp: i64,
    ledger: &dyn INotificationLedgerRepo,
    store: &dyn INotificationRepo,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for user_id in matches {
        let user_id = *user_id;
        match ledger.claim(user_id, today).await {
            Ok(true) => (),
            Ok(false) => {
                report.already_notified.push(user_id);
                continue;
            }
            Err(source) => {
                error!(
                    "Unable to claim member: {} in the notification ledger. Error: {:?}",
                    user_id, source
                );
                report
                    .failures
                    .push(DispatchError::Ledger { user_id, source });
                continue;
            }
        }

        let event = NotificationEvent::birthday(user_id, timestamp);
        match store.accept(&event).await {
            Ok(()) => report.sent.push(event),
            Err(source) => {
                error!(
                    "Notification for member: {} was rejected. Error: {:?}",
                    user_id, source
                );
                if let Err(e) = ledger.release(user_id, today).await {
                    warn!(
                        "Unable to release member: {} in the notification ledger, they are not retried until tomorrow. Error: {:?}",
                        user_id, e
                    );
                }
                report
                    .failures
                    .push(DispatchError::Rejected { user_id, source });
            }
        }
    }

    report
}
