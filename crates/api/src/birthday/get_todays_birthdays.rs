use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use birthday_greetings_api_structs::{dtos::BirthdayMemberDTO, get_todays_birthdays::*};
use birthday_greetings_domain::{
    date::{site_today, utc_offset_seconds},
    match_birthdays, NaiveDate, ReferenceDate, UserId,
};
use birthday_greetings_infra::BirthdayContext;
use tracing::warn;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::FetchError(e) => ApiError::ServiceUnavailable(e.to_string()),
        UseCaseError::StorageError(_) => ApiError::InternalError,
    }
}

pub async fn get_todays_birthdays_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<BirthdayContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetTodaysBirthdaysUseCase {
        viewer_id: query.viewer_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|list| {
            let members = list
                .members
                .into_iter()
                .map(|m| BirthdayMemberDTO {
                    user_id: m.user_id,
                    display_name: m.display_name,
                    greeting_url: m.greeting_url,
                })
                .collect();
            HttpResponse::Ok().json(APIResponse::new(list.date.to_string(), members))
        })
        .map_err(handle_error)
}

/// Lists the members that have their birthday today. Never touches the
/// notification ledger.
#[derive(Debug)]
pub struct GetTodaysBirthdaysUseCase {
    pub viewer_id: Option<UserId>,
}

#[derive(Debug, PartialEq)]
pub struct BirthdayMember {
    pub user_id: UserId,
    pub display_name: String,
    pub greeting_url: Option<String>,
}

#[derive(Debug)]
pub struct TodaysBirthdays {
    pub date: NaiveDate,
    pub members: Vec<BirthdayMember>,
}

#[derive(Debug)]
pub enum UseCaseError {
    FetchError(anyhow::Error),
    StorageError(anyhow::Error),
}

fn greeting_url(compose_url: &str, user_id: UserId) -> String {
    format!("{}?r={}", compose_url, user_id)
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTodaysBirthdaysUseCase {
    type Response = TodaysBirthdays;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTodaysBirthdays";

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

        let mut display_names = ctx
            .repos
            .profiles
            .find_display_names(&matches.user_ids)
            .await
            .map_err(UseCaseError::StorageError)?;

        let compose_url = ctx.config.messages_compose_url.as_deref();
        let members = matches
            .user_ids
            .into_iter()
            .map(|user_id| BirthdayMember {
                user_id,
                display_name: display_names
                    .remove(&user_id)
                    .unwrap_or_else(|| user_id.to_string()),
                // Only signed in members can greet, and never themselves
                greeting_url: match (compose_url, self.viewer_id) {
                    (Some(url), Some(viewer_id)) if viewer_id != user_id => {
                        Some(greeting_url(url, user_id))
                    }
                    _ => None,
                },
            })
            .collect();

        Ok(TodaysBirthdays {
            date: today,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use birthday_greetings_domain::{Member, ProfileFieldValue};
    use birthday_greetings_infra::FixedSys;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    async fn setup(compose_url: Option<&str>) -> BirthdayContext {
        let mut ctx = BirthdayContext::create_inmemory();
        let now = Utc.with_ymd_and_hms(2021, 3, 15, 12, 0, 0).unwrap();
        ctx.sys = Arc::new(FixedSys::new(now.timestamp_millis()));
        ctx.config.birthday_field_id = 1;
        ctx.config.site_timezone = chrono_tz::UTC;
        ctx.config.messages_compose_url = compose_url.map(String::from);

        for (id, name, value) in &[
            (1, "Alice", "1990-03-15"),
            (2, "Bob", "1985-03-15"),
            (3, "Carol", "2000-04-01"),
        ] {
            let user_id = UserId::new(*id);
            ctx.repos
                .profiles
                .insert_member(&Member::new(user_id, *name))
                .await
                .unwrap();
            ctx.repos
                .profiles
                .insert_field_value(&ProfileFieldValue {
                    field_id: 1,
                    user_id,
                    value: value.to_string(),
                })
                .await
                .unwrap();
        }

        ctx
    }

    #[actix_web::test]
    async fn lists_todays_birthdays_with_greeting_links() {
        let ctx = setup(Some("https://rust.club/messages/compose/")).await;

        let mut usecase = GetTodaysBirthdaysUseCase {
            viewer_id: Some(UserId::new(2)),
        };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.date, NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
        assert_eq!(
            res.members,
            vec![
                BirthdayMember {
                    user_id: UserId::new(1),
                    display_name: "Alice".into(),
                    greeting_url: Some("https://rust.club/messages/compose/?r=1".into()),
                },
                BirthdayMember {
                    user_id: UserId::new(2),
                    display_name: "Bob".into(),
                    greeting_url: None,
                },
            ]
        );
    }

    #[actix_web::test]
    async fn lists_without_links_when_messages_are_unavailable() {
        let ctx = setup(None).await;

        let mut usecase = GetTodaysBirthdaysUseCase { viewer_id: None };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.members.len(), 2);
        assert!(res.members.iter().all(|m| m.greeting_url.is_none()));
    }

    #[actix_web::test]
    async fn lists_without_links_for_anonymous_viewers() {
        let ctx = setup(Some("https://rust.club/messages/compose/")).await;

        let mut usecase = GetTodaysBirthdaysUseCase { viewer_id: None };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(
            res.members.iter().map(|m| m.user_id).collect::<Vec<_>>(),
            vec![UserId::new(1), UserId::new(2)]
        );
        assert!(res.members.iter().all(|m| m.greeting_url.is_none()));
    }

    #[actix_web::test]
    async fn does_not_touch_the_ledger() {
        let ctx = setup(None).await;

        let mut usecase = GetTodaysBirthdaysUseCase { viewer_id: None };
        usecase.execute(&ctx).await.unwrap();

        let today = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert!(!ctx
            .repos
            .notification_ledger
            .is_notified(UserId::new(1), today)
            .await
            .unwrap());
        assert!(ctx
            .repos
            .notifications
            .find_by_user(UserId::new(1))
            .await
            .unwrap()
            .is_empty());
    }
}
