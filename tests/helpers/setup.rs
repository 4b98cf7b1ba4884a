use birthday_greetings_api::Application;
use birthday_greetings_domain::{Member, ProfileFieldValue, UserId};
use birthday_greetings_infra::{BirthdayContext, FixedSys};
use birthday_greetings_sdk::BirthdayGreetingsSDK;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub const BIRTHDAY_FIELD_ID: i64 = 1;
pub const COMPOSE_URL: &str = "https://rust.club/messages/compose/";

pub struct TestApp {
    pub ctx: BirthdayContext,
    pub sys: Arc<FixedSys>,
}

pub fn millis(y: i32, m: u32, d: u32, h: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
        .timestamp_millis()
}

/// Members of the test directory, their date of birth is stored in
/// different ways
pub fn seeded_members() -> Vec<(i64, &'static str, String)> {
    vec![
        (1, "Alice", "1990-03-15".into()),
        (2, "Bob", (millis(2001, 3, 15, 0) / 1000).to_string()),
        (3, "Carol", "2000-04-01".into()),
        (4, "Dave", "sometime in spring".into()),
    ]
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, BirthdayGreetingsSDK) {
    let mut ctx = BirthdayContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.daily_scan_job_enabled = false;
    ctx.config.birthday_field_id = BIRTHDAY_FIELD_ID;
    ctx.config.site_timezone = chrono_tz::UTC;
    ctx.config.site_name = "Rust Club".into();
    ctx.config.messages_compose_url = Some(COMPOSE_URL.into());

    let sys = Arc::new(FixedSys::new(millis(2021, 3, 15, 12)));
    ctx.sys = sys.clone();

    for (id, name, value) in seeded_members() {
        let user_id = UserId::new(id);
        ctx.repos
            .profiles
            .insert_member(&Member::new(user_id, name))
            .await
            .expect("To insert member");
        ctx.repos
            .profiles
            .insert_field_value(&ProfileFieldValue {
                field_id: BIRTHDAY_FIELD_ID,
                user_id,
                value,
            })
            .await
            .expect("To insert date of birth");
    }

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { ctx, sys };
    let sdk = BirthdayGreetingsSDK::new(address);
    (app, sdk)
}
