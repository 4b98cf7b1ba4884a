mod dispatcher;
mod get_todays_birthdays;
mod get_user_notifications;
pub mod run_daily_scan;

use actix_web::web;
use get_todays_birthdays::get_todays_birthdays_controller;
use get_user_notifications::get_user_notifications_controller;
use run_daily_scan::run_daily_scan_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/birthdays/today",
        web::get().to(get_todays_birthdays_controller),
    );
    cfg.route("/birthdays/scan", web::post().to(run_daily_scan_controller));
    cfg.route(
        "/users/{user_id}/notifications",
        web::get().to(get_user_notifications_controller),
    );
}
