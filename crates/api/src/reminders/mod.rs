mod dispatch;
pub mod send_reminders;
#[cfg(test)]
mod test_utils;

use actix_web::web;
use send_reminders::send_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/cron/send-reminders",
        web::get().to(send_reminders_controller),
    );
}
