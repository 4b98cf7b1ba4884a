use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use birthday_greetings_api_structs::{
    dtos::{NotificationDTO, RenderedNotificationDTO},
    get_user_notifications::*,
};
use birthday_greetings_domain::{NotificationContent, NotificationEvent, UserId};
use birthday_greetings_infra::BirthdayContext;

fn handle_error(e: UseCaseError) -> ApiError {
    match e {
        UseCaseError::StorageError(_) => ApiError::InternalError,
    }
}

pub async fn get_user_notifications_controller(
    path_params: web::Path<PathParams>,
    query: web::Query<QueryParams>,
    ctx: web::Data<BirthdayContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetUserNotificationsUseCase {
        user_id: path_params.user_id,
    };
    let format = query.format.unwrap_or_default();

    execute(usecase, &ctx)
        .await
        .map(|notifications| {
            let notifications = notifications
                .into_iter()
                .map(|(event, content)| match format {
                    NotificationFormat::String => RenderedNotificationDTO::Html(content.to_html()),
                    NotificationFormat::Object => {
                        RenderedNotificationDTO::Object(NotificationDTO::new(event, content))
                    }
                })
                .collect();
            HttpResponse::Ok().json(APIResponse { notifications })
        })
        .map_err(handle_error)
}

/// Birthday greetings a member has received, with the content they are shown
#[derive(Debug)]
pub struct GetUserNotificationsUseCase {
    pub user_id: UserId,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(anyhow::Error),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserNotificationsUseCase {
    type Response = Vec<(NotificationEvent, NotificationContent)>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserNotifications";

    async fn execute(&mut self, ctx: &BirthdayContext) -> Result<Self::Response, Self::Error> {
        let notifications = ctx
            .repos
            .notifications
            .find_by_user(self.user_id)
            .await
            .map_err(UseCaseError::StorageError)?;

        Ok(notifications
            .into_iter()
            .filter(|event| event.is_birthday_greeting())
            .map(|event| {
                let content = NotificationContent::birthday_greeting(&ctx.config.site_name, None);
                (event, content)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn returns_birthday_greetings_only() {
        let mut ctx = BirthdayContext::create_inmemory();
        ctx.config.site_name = "Rust Club".into();
        let user_id = UserId::new(1);

        let greeting = NotificationEvent::birthday(user_id, 1000);
        let mut other = NotificationEvent::birthday(user_id, 2000);
        other.component = "messages".into();
        other.action = "new_message".into();
        for event in &[&greeting, &other] {
            ctx.repos.notifications.accept(event).await.unwrap();
        }

        let mut usecase = GetUserNotificationsUseCase { user_id };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(
            res,
            vec![(
                greeting,
                NotificationContent::Text(
                    "Wish you a very happy birthday. Rust Club wishes you more success and peace in life."
                        .into()
                )
            )]
        );
    }

    #[actix_web::test]
    async fn returns_nothing_for_member_without_notifications() {
        let ctx = BirthdayContext::create_inmemory();

        let mut usecase = GetUserNotificationsUseCase {
            user_id: UserId::new(9),
        };
        assert!(usecase.execute(&ctx).await.unwrap().is_empty());
    }
}
