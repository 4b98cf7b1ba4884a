mod telemetry;

use birthday_greetings_api::Application;
use birthday_greetings_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("birthday_greetings_server".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let app = Application::new(context).await?;
    app.start().await
}
