#[cfg(test)]
mod test {

    use std::time::Duration;

    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    use crate::auth::AuthMode;
    use crate::config::settings::ProviderSettings;
    use crate::error::TokenError;
    use crate::tests::common::{fast_settings, mock_credentials};
    use crate::TokenProvider;

    #[tokio::test]
    async fn acquires_and_reuses_token() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "access_token": "abc",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }));
        });

        let provider = TokenProvider::new(
            "crm-visit-report",
            AuthMode::ClientCredentials(mock_credentials(&server)),
            fast_settings(),
        )
        .unwrap();

        assert_eq!(provider.get_token().await.unwrap(), "abc");
        // second call within the same second: cache hit, no extra request
        assert_eq!(provider.get_token().await.unwrap(), "abc");
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn malformed_credentials_fail_before_any_network_call() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(200);
        });

        let mut credentials = mock_credentials(&server);
        credentials.client_secret = String::new();

        let result = TokenProvider::new(
            "broken-app",
            AuthMode::ClientCredentials(credentials),
            fast_settings(),
        );
        match result {
            Err(TokenError::Configuration { app, reason }) => {
                assert_eq!(app, "broken-app");
                assert!(reason.contains("client_secret"));
            }
            other => panic!("expected Configuration error, got {other:?}"),
        }
        mock.assert_hits(0);
    }

    #[tokio::test]
    async fn malformed_token_response_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .header("Content-Type", "application/json")
                // missing access_token
                .json_body(json!({"expires_in": 3600}));
        });

        let provider = TokenProvider::new(
            "app",
            AuthMode::ClientCredentials(mock_credentials(&server)),
            fast_settings(),
        )
        .unwrap();

        let err = provider.get_token().await.unwrap_err();
        assert!(matches!(err, TokenError::Authentication { .. }));
        assert!(!err.is_transient());
        assert!(err.to_string().contains("malformed token response"));
        mock.assert_hits(1);
    }

    #[tokio::test]
    async fn overall_deadline_surfaces_as_timeout() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/token");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"access_token": "late", "expires_in": 3600}));
        });

        let settings = ProviderSettings {
            overall_timeout: Some(Duration::from_millis(50)),
            ..fast_settings()
        };
        let provider = TokenProvider::new(
            "app",
            AuthMode::ClientCredentials(mock_credentials(&server)),
            settings,
        )
        .unwrap();

        match provider.get_token().await {
            Err(TokenError::Timeout(deadline)) => {
                assert_eq!(deadline, Duration::from_millis(50));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }
}
