//! Session handling and the public endpoints.

mod common;

use assert_matches::assert_matches;
use common::{signed_in, spawn_stub, EMAIL, PASSWORD, TOKEN};
use salon_client::model::FeedbackSubmission;
use salon_client::ClientError;
use salon_core::category::CategoryType;

#[tokio::test]
async fn login_stores_token_and_user() {
    let (_stub, client) = spawn_stub().await;

    let user = client.login(EMAIL, PASSWORD).await.unwrap();

    assert_eq!(user.email, EMAIL);
    let session = client.session();
    assert_eq!(session.token().as_deref(), Some(TOKEN));
    assert!(session.is_admin());
    assert_eq!(session.user().map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn bad_credentials_surface_server_message() {
    let (_stub, client) = spawn_stub().await;

    let err = client.login(EMAIL, "wrong-password").await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 401, ref message, .. } => {
        assert_eq!(message, "Неверный логин или пароль");
    });
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn current_user_refreshes_session() {
    let (_stub, client) = signed_in().await;

    let user = client.current_user().await.unwrap();
    assert_eq!(user, common::user_model());
}

#[tokio::test]
async fn rejected_token_ends_session() {
    let (_stub, client) = spawn_stub().await;
    client
        .session()
        .sign_in("stale-token".into(), common::user_model())
        .await
        .unwrap();

    let err = client.current_user().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn admin_calls_without_token_fail_locally() {
    let (stub, client) = spawn_stub().await;

    let err = client.list::<salon_client::Categories>().await.unwrap_err();

    assert_matches!(err, ClientError::NotAuthenticated);
    assert!(stub.state().requests.is_empty());
}

#[tokio::test]
async fn logout_clears_session() {
    let (stub, client) = signed_in().await;

    client.logout().await.unwrap();

    assert!(!client.session().is_authenticated());
    assert_eq!(stub.state().requests, vec!["POST /logout".to_string()]);
}

#[tokio::test]
async fn logout_clears_session_even_when_server_fails() {
    let (stub, client) = signed_in().await;
    stub.state().fail_logout = true;

    client.logout().await.unwrap();

    assert!(!client.session().is_authenticated());
    assert!(client.session().user().is_none());
}

#[tokio::test]
async fn public_categories_filter_by_type() {
    let (stub, client) = spawn_stub().await;
    {
        let mut state = stub.state();
        state.add_category("Маникюр", CategoryType::Service);
        state.add_category("Лицо", CategoryType::Portfolio);
        state.add_category("Брови", CategoryType::Both);
    }

    let service = client
        .public_categories(Some(CategoryType::Service))
        .await
        .unwrap();
    let names: Vec<_> = service.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Маникюр", "Брови"]);

    let all = client.public_categories(None).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn feedback_submission() {
    let (_stub, client) = spawn_stub().await;

    let message = client
        .submit_feedback(&FeedbackSubmission {
            name: "Анна".into(),
            phone: "+79991234567".into(),
            message: Some("Хочу записаться на маникюр".into()),
            captcha_token: None,
        })
        .await
        .unwrap();
    assert_eq!(message, "Спасибо! Мы с вами свяжемся.");

    let err = client
        .submit_feedback(&FeedbackSubmission {
            phone: "+79991234567".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    let errors = err.field_errors().expect("field errors");
    assert!(errors.contains_key("name"));
}
