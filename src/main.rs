mod telemetry;

use cuthub_api::Application;
use cuthub_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("cuthub_reminders", "info");
    init_subscriber(subscriber);

    let context = setup_context().await.map_err(|e| {
        error!("Unable to setup the context: {:?}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("{:#}", e))
    })?;

    let app = Application::new(context).await?;
    app.start().await
}
