use std::sync::Arc;

use tracing::{error, info, warn, Instrument};

use profile_flow::app_system::{setup_tracing, ProfileSystem, SystemError};
use profile_flow::clients::ScriptedCapture;
use profile_flow::config::ProfileConfig;
use profile_flow::domain::{AccountCreate, CaptureResult, CaptureSource, Field};
use profile_flow::profile::{AvatarOutcome, Outcome, ProfileScreen};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting profile flow demo");

    let config = ProfileConfig::default();
    let system = ProfileSystem::start(&config, AccountCreate::new("Alice", "alice@example.com", "hunter2")).await?;

    let camera = Arc::new(ScriptedCapture::new(CaptureSource::Camera, [CaptureResult::Cancelled]));
    let library = Arc::new(ScriptedCapture::new(
        CaptureSource::Library,
        [CaptureResult::success("file:///DCIM/alice.jpg", "alice.jpg")],
    ));
    let mut screen = ProfileScreen::open(system.collaborators(camera, library), &config).await?;

    // A password change with a typo in the confirmation never reaches the backend.
    let span = tracing::info_span!("password_typo");
    async {
        screen.set_value(Field::OldPassword, "hunter2");
        screen.set_value(Field::Password, "correct-horse");
        screen.set_value(Field::PasswordConfirmation, "correct-hrose");
        if let Outcome::ValidationFailed(errors) = screen.submit().await {
            for (field, message) in errors.iter() {
                warn!(%field, reason = message, "Field error");
            }
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("profile_update");
    async {
        screen.set_value(Field::Name, "Alice Liddell");
        screen.set_value(Field::PasswordConfirmation, "correct-horse");
        match screen.submit_editing(Field::PasswordConfirmation).await {
            Some(Outcome::Updated(user)) => info!(user_name = %user.name, "Profile saved"),
            Some(other) => error!(outcome = ?other, "Profile not saved"),
            None => {}
        }
    }
    .instrument(span)
    .await;

    let span = tracing::info_span!("avatar_update");
    async {
        // Camera first (user backs out), then the library.
        for source in [CaptureSource::Camera, CaptureSource::Library] {
            screen.toggle_avatar_modal();
            match screen.select_avatar_source(source).await {
                AvatarOutcome::Updated(user) => info!(avatar_url = ?user.avatar_url, "Avatar saved"),
                outcome => info!(%source, outcome = ?outcome, "Avatar unchanged"),
            }
        }
    }
    .instrument(span)
    .await;

    info!(user = ?screen.user(), "Final session user");
    drop(screen);

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
