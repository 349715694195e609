mod common;

use axum::ServiceExt;
use axum::extract::Request;
use gridiron_favorites::client::{
    ButtonRegistry, ButtonState, HttpToggleTransport, ToggleForm, ToggleHandler, ToggleResult,
};
use gridiron_favorites::domain::entities::{FavoriteKind, ToggleOutcome};
use gridiron_favorites::routes::app_router;
use gridiron_favorites::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn_site(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = app_router(state, false);

    tokio::spawn(async move {
        axum::serve(
            listener,
            ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
        )
        .await
        .unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_toggle_round_trip_against_running_site() {
    let (state, store) = common::create_test_state();
    let team = store.insert_team("Kansas City Chiefs");
    let (user, _) = common::signed_in_user(&state, "mike").await;
    let base_url = spawn_site(state).await;

    let transport = HttpToggleTransport::new(&base_url, None).unwrap();
    let session = transport
        .login("mike", "secret123")
        .await
        .unwrap()
        .expect("login should return a session");
    let transport = transport.with_session(session);

    let html = transport.fetch_page("/").await.unwrap();
    let buttons = ButtonRegistry::from_html(&html);
    assert_eq!(
        buttons.state(FavoriteKind::Team, team.id),
        Some(ButtonState::Inactive)
    );

    let handler = ToggleHandler::new(Arc::new(transport.clone()), buttons);

    let result = handler
        .handle_submit(ToggleForm::team(team.id))
        .await
        .unwrap();

    let ToggleResult::Toggled { state, server } = result else {
        panic!("expected a toggle, got {result:?}");
    };
    assert_eq!(state, ButtonState::Active);
    assert_eq!(server.map(|s| s.status), Some(ToggleOutcome::Added));
    assert!(store.is_favorite(user.id, FavoriteKind::Team, team.id));

    let refreshed = ButtonRegistry::from_html(&transport.fetch_page("/").await.unwrap());
    assert_eq!(
        refreshed.state(FavoriteKind::Team, team.id),
        Some(ButtonState::Active)
    );
}

#[tokio::test]
async fn test_toggle_without_session_leaves_button() {
    let (state, store) = common::create_test_state();
    let team = store.insert_team("Kansas City Chiefs");
    let base_url = spawn_site(state).await;

    let buttons = ButtonRegistry::new();
    buttons.register(FavoriteKind::Team, team.id, ButtonState::Inactive);
    let transport = HttpToggleTransport::new(&base_url, None).unwrap();
    let handler = ToggleHandler::new(Arc::new(transport), buttons);

    let result = handler
        .handle_submit(ToggleForm::team(team.id))
        .await
        .unwrap();

    assert_eq!(result, ToggleResult::Unauthorized);
    assert_eq!(
        handler.buttons().state(FavoriteKind::Team, team.id),
        Some(ButtonState::Inactive)
    );
}

#[tokio::test]
async fn test_rejected_login_returns_none() {
    let (state, _store) = common::create_test_state();
    common::signed_in_user(&state, "mike").await;
    let base_url = spawn_site(state).await;

    let transport = HttpToggleTransport::new(&base_url, None).unwrap();

    assert_eq!(transport.login("mike", "nope").await.unwrap(), None);
}
