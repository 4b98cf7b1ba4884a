use crate::{APIResponse, BaseClient, UserId};
use birthday_greetings_api_structs::{
    get_todays_birthdays, get_user_notifications, get_user_notifications::NotificationFormat,
    run_daily_scan,
};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct BirthdayClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Default)]
pub struct GetTodaysBirthdaysInput {
    /// Member looking at the list
    pub viewer_id: Option<UserId>,
}

#[derive(Debug)]
pub struct GetUserNotificationsInput {
    pub user_id: UserId,
    pub format: NotificationFormat,
}

impl BirthdayClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_todays_birthdays(
        &self,
        input: GetTodaysBirthdaysInput,
    ) -> APIResponse<get_todays_birthdays::APIResponse> {
        let path = match input.viewer_id {
            Some(viewer_id) => format!("birthdays/today?viewerId={}", viewer_id),
            None => "birthdays/today".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    /// Runs the daily scan now. Members that were already notified today are
    /// not notified again.
    pub async fn run_scan(&self) -> APIResponse<run_daily_scan::APIResponse> {
        self.base
            .post("birthdays/scan".into(), StatusCode::OK)
            .await
    }

    pub async fn get_user_notifications(
        &self,
        input: GetUserNotificationsInput,
    ) -> APIResponse<get_user_notifications::APIResponse> {
        let format = match input.format {
            NotificationFormat::String => "string",
            NotificationFormat::Object => "object",
        };
        self.base
            .get(
                format!("users/{}/notifications?format={}", input.user_id, format),
                StatusCode::OK,
            )
            .await
    }
}
