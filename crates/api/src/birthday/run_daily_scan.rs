use super::dispatcher::{dispatch, DispatchReport};
use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use birthday_greetings_api_structs::{dtos::NotificationDTO, run_daily_scan::*};
use birthday_greetings_domain::{
    date::{site_today, utc_offset_seconds},
    match_birthdays, NaiveDate, NotificationContent, ReferenceDate,
};
use birthday_greetings_infra::BirthdayContext;
use chrono::Duration;
use tracing::{info, warn};

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::FetchError(e) => ApiError::ServiceUnavailable(e.to_string()),
    }
}

pub async fn run_daily_scan_controller(
    ctx: web::Data<BirthdayContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = RunDailyScanUseCase {};
    let site_name = ctx.config.site_name.clone();

    execute(usecase, &ctx)
        .await
        .map(|scan| {
            let notifications = scan
                .report
                .sent
                .iter()
                .cloned()
                .map(|event| {
                    NotificationDTO::new(
                        event,
                        NotificationContent::birthday_greeting(&site_name, None),
                    )
                })
                .collect();

            HttpResponse::Ok().json(APIResponse {
                date: scan.date.to_string(),
                matched: scan.matched,
                notifications,
                already_notified: scan.report.already_notified.len(),
                failed_count: scan.report.failed_count(),
                skipped_records: scan.skipped_records,
            })
        })
        .map_err(handle_error)
}

/// Notifies every member that has a birthday today in the site timezone.
/// Safe to run any number of times a day.
#[derive(Debug)]
pub struct RunDailyScanUseCase {}

#[derive(Debug)]
pub struct ScanSummary {
    pub date: NaiveDate,
    pub matched: usize,
    pub skipped_records: usize,
    pub report: DispatchReport,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// The member directory could not be read, nothing was dispatched
    FetchError(anyhow::Error),
}

/// Deletes ledger entries older than the configured retention. A retention
/// reaching before the earliest representable date prunes nothing.
async fn prune_ledger(ctx: &BirthdayContext, today: NaiveDate) {
    let retain_from = Duration::try_days(ctx.config.ledger_retention_days)
        .and_then(|retention| today.checked_sub_signed(retention));
    let retain_from = match retain_from {
        Some(date) => date,
        None => {
            warn!(
                "Ledger retention of {} days is out of range, skipping pruning",
                ctx.config.ledger_retention_days
            );
            return;
        }
    };

    match ctx
        .repos
        .notification_ledger
        .delete_all_before(retain_from)
        .await
    {
        Ok(pruned) if pruned > 0 => info!("Pruned {} notification ledger entries", pruned),
        Ok(_) => {}
        Err(e) => warn!("Unable to prune the notification ledger. Error: {:?}", e),
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunDailyScanUseCase {
    type Response = ScanSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "RunDailyScan";

    async fn execute(&mut self, ctx: &BirthdayContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let tz = ctx.config.site_timezone;
        let today = site_today(now, &tz);

        let records = ctx
            .repos
            .profiles
            .fetch_birth_records(ctx.config.birthday_field_id, utc_offset_seconds(now, &tz))
            .await
            .map_err(UseCaseError::FetchError)?;

        let matches = match_birthdays(&records, ReferenceDate::from(today));
        for skipped in &matches.skipped {
            warn!(
                "Skipping date of birth of member: {}. Error: {}",
                skipped.user_id, skipped.error
            );
        }

        let report = dispatch(
            &matches.user_ids,
            today,
            now,
            ctx.repos.notification_ledger.as_ref(),
            ctx.repos.notifications.as_ref(),
        )
        .await;

        prune_ledger(ctx, today).await;

        info!(
            "Birthday scan for {}: {} records, {} matched, {} notified, {} already notified, {} failed, {} skipped",
            today,
            records.len(),
            matches.user_ids.len(),
            report.sent.len(),
            report.already_notified.len(),
            report.failed_count(),
            matches.skipped.len()
        );

        Ok(ScanSummary {
            date: today,
            matched: matches.user_ids.len(),
            skipped_records: matches.skipped.len(),
            report,
        })
    }
}
