use httpmock::prelude::*;
use httpmock::Mock;
use httpmock::Method::PATCH;
use rank_bridge::core::interpreter::CommandSettings;
use rank_bridge::core::{CallerRef, CommandEnvelope};
use rank_bridge::{CommandInterpreter, PlatformClient, PlatformSettings, RankChangeOrchestrator};
use serde_json::json;
use std::sync::Arc;

const GROUP_ID: u64 = 5151;

/// Mock platform with a three-role catalog and one known user.
struct MockPlatform<'a> {
    identity: Mock<'a>,
    logout: Mock<'a>,
    roles: Mock<'a>,
    usernames: Mock<'a>,
    profile: Mock<'a>,
    memberships: Mock<'a>,
    mutation: Mock<'a>,
}

fn mock_platform(
    server: &MockServer,
    current_rank: Option<u8>,
    mutation_status: u16,
) -> MockPlatform<'_> {
    let identity = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/users/authenticated")
            .header("cookie", ".ROBLOSECURITY=integration-cookie");
        then.status(200).json_body(json!({"id": 1, "name": "RankBot"}));
    });
    let logout = server.mock(|when, then| {
        when.method(POST).path("/v2/logout");
        then.status(403)
            .header("x-csrf-token", "csrf-from-challenge")
            .json_body(json!({"errors": [{"code": 0, "message": "Token Validation Failed"}]}));
    });
    let roles = server.mock(|when, then| {
        when.method(GET).path(format!("/v1/groups/{}/roles", GROUP_ID));
        then.status(200).json_body(json!({
            "groupId": GROUP_ID,
            "roles": [
                {"id": 9001, "name": "Recruit", "rank": 1, "memberCount": 40},
                {"id": 9050, "name": "Sergeant", "rank": 50, "memberCount": 6},
                {"id": 9255, "name": "Admin", "rank": 255, "memberCount": 1}
            ]
        }));
    });
    let usernames = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/usernames/users")
            .json_body(json!({"usernames": ["TestPlayer"], "excludeBannedUsers": true}));
        then.status(200).json_body(json!({
            "data": [{"requestedUsername": "TestPlayer", "id": 123456, "name": "TestPlayer", "displayName": "Test"}]
        }));
    });
    let profile = server.mock(|when, then| {
        when.method(GET).path("/v1/users/123456");
        then.status(200)
            .json_body(json!({"id": 123456, "name": "TestPlayer", "displayName": "Test"}));
    });
    let data = match current_rank {
        Some(rank) => json!([
            {"group": {"id": 1, "name": "Elsewhere"}, "role": {"id": 1, "name": "Owner", "rank": 255}},
            {"group": {"id": GROUP_ID, "name": "Ours"}, "role": {"id": 77, "name": "Current", "rank": rank}}
        ]),
        None => json!([]),
    };
    let memberships = server.mock(move |when, then| {
        when.method(GET).path("/v2/users/123456/groups/roles");
        then.status(200).json_body(json!({ "data": data }));
    });
    let mutation = server.mock(|when, then| {
        when.method(PATCH)
            .path(format!("/v1/groups/{}/users/123456", GROUP_ID))
            .header("x-csrf-token", "csrf-from-challenge")
            .header("cookie", ".ROBLOSECURITY=integration-cookie");
        then.status(mutation_status).json_body(json!({}));
    });

    MockPlatform {
        identity,
        logout,
        roles,
        usernames,
        profile,
        memberships,
        mutation,
    }
}

fn interpreter(server: &MockServer) -> CommandInterpreter {
    let platform = Arc::new(PlatformClient::new(PlatformSettings {
        group_id: GROUP_ID,
        session_cookie: "integration-cookie".to_string(),
        users_api: server.base_url(),
        auth_api: server.base_url(),
        groups_api: server.base_url(),
    }));
    CommandInterpreter::new(
        RankChangeOrchestrator::from_platform(platform.clone()),
        platform,
        CommandSettings {
            prefix: "tca!".to_string(),
            allowed_roles: vec!["Rank Verme".to_string()],
        },
    )
}

fn staff_message(content: &str) -> CommandEnvelope {
    CommandEnvelope {
        content: content.to_string(),
        author_is_bot: false,
        caller: CallerRef("staff#0001".to_string()),
        caller_roles: vec!["Member".to_string(), "Rank Verme".to_string()],
    }
}

#[tokio::test]
async fn test_rank_by_username_and_level() {
    let server = MockServer::start();
    let platform = mock_platform(&server, None, 200);

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank TestPlayer 255"))
        .await
        .unwrap();

    platform.usernames.assert();
    platform.identity.assert();
    platform.logout.assert();
    platform.roles.assert();
    platform.profile.assert();
    platform.memberships.assert();
    platform.mutation.assert();
    assert_eq!(reply, "User **TestPlayer** was assigned **Admin**.");
}

#[tokio::test]
async fn test_rank_by_numeric_id_and_name() {
    let server = MockServer::start();
    let platform = mock_platform(&server, Some(50), 200);

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank 123456 admin"))
        .await
        .unwrap();

    platform.usernames.assert_hits(0);
    platform.mutation.assert();
    assert_eq!(reply, "User **TestPlayer** was promoted to **Admin**.");
}

#[tokio::test]
async fn test_demotion_and_unchanged() {
    let server = MockServer::start();
    let platform = mock_platform(&server, Some(50), 200);
    let interpreter = interpreter(&server);

    let demoted = interpreter
        .handle(&staff_message("tca!rank 123456 Recruit"))
        .await
        .unwrap();
    let unchanged = interpreter
        .handle(&staff_message("tca!rank 123456 50"))
        .await
        .unwrap();

    assert_eq!(demoted, "User **TestPlayer** was demoted to **Recruit**.");
    assert_eq!(unchanged, "User **TestPlayer** already holds **Sergeant**; rank unchanged.");
    // Fresh token per attempt.
    platform.logout.assert_hits(2);
    platform.mutation.assert_hits(2);
}

#[tokio::test]
async fn test_unauthorized_caller_makes_no_calls() {
    let server = MockServer::start();
    let platform = mock_platform(&server, None, 200);

    let mut message = staff_message("tca!rank TestPlayer 255");
    message.caller_roles = vec!["Member".to_string()];
    let reply = interpreter(&server).handle(&message).await.unwrap();

    assert!(reply.starts_with("You are not allowed"));
    for mock in [
        &platform.identity,
        &platform.logout,
        &platform.roles,
        &platform.usernames,
        &platform.profile,
        &platform.memberships,
        &platform.mutation,
    ] {
        mock.assert_hits(0);
    }
}

#[tokio::test]
async fn test_stale_cookie_stops_before_roles() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/users/authenticated");
        then.status(401).json_body(json!({"errors": [{"code": 0, "message": "Authorization has been denied for this request."}]}));
    });
    let roles = server.mock(|when, then| {
        when.method(GET).path(format!("/v1/groups/{}/roles", GROUP_ID));
        then.status(200).json_body(json!({"roles": []}));
    });
    let mutation = server.mock(|when, then| {
        when.method(PATCH).path(format!("/v1/groups/{}/users/123456", GROUP_ID));
        then.status(200);
    });

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank 123456 Admin"))
        .await
        .unwrap();

    roles.assert_hits(0);
    mutation.assert_hits(0);
    assert_eq!(reply, "Could not obtain an anti-forgery token; rank change aborted.");
}

#[tokio::test]
async fn test_unknown_rank_never_patches() {
    let server = MockServer::start();
    let platform = mock_platform(&server, Some(1), 200);

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank 123456 Grand Marshal"))
        .await
        .unwrap();

    platform.mutation.assert_hits(0);
    assert_eq!(reply, "No valid rank found for **Grand Marshal**.");
}

#[tokio::test]
async fn test_rejected_mutation_reports_status() {
    let server = MockServer::start();
    let platform = mock_platform(&server, Some(1), 403);

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank 123456 Admin"))
        .await
        .unwrap();

    platform.mutation.assert();
    assert_eq!(reply, "The group service rejected the rank change (status 403).");
}

#[tokio::test]
async fn test_missing_membership_data_still_assigns() {
    let server = MockServer::start();
    let mut platform = mock_platform(&server, Some(1), 200);
    platform.memberships.delete();
    server.mock(|when, then| {
        when.method(GET).path("/v2/users/123456/groups/roles");
        then.status(500);
    });

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank 123456 Sergeant"))
        .await
        .unwrap();

    assert_eq!(reply, "User **TestPlayer** was assigned **Sergeant**.");
}

#[tokio::test]
async fn test_unknown_username() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST).path("/v1/usernames/users");
        then.status(200).json_body(json!({"data": []}));
    });
    let identity = server.mock(|when, then| {
        when.method(GET).path("/v1/users/authenticated");
        then.status(200).json_body(json!({"id": 1}));
    });

    let reply = interpreter(&server)
        .handle(&staff_message("tca!rank NoSuchPlayer 255"))
        .await
        .unwrap();

    lookup.assert();
    identity.assert_hits(0);
    assert_eq!(reply, "User \"NoSuchPlayer\" was not found.");
}
