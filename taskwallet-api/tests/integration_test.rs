//! Integration tests for the TaskWallet API
//!
//! These drive the full router (auth layers, handlers, store, snapshot)
//! through `tower::ServiceExt::oneshot` on the seeded demo data.

mod common;

use axum::http::StatusCode;
use common::{TestContext, FREE_PHONE, PRO_PHONE, SEED_PASSWORD};
use serde_json::json;

async fn first_task_id(ctx: &TestContext, token: &str) -> String {
    let (status, tasks) = ctx.get("/v1/tasks", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    tasks[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_and_public_settings() {
    let ctx = TestContext::new().await;

    let (status, health) = ctx.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["users"], 2);

    let (status, settings) = ctx.get("/v1/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["company_name"], "udyanit.com");
    assert_eq!(settings["min_withdraw"], 100);
}

#[tokio::test]
async fn test_register_with_referral_credits_upline() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post(
            "/v1/auth/register",
            None,
            json!({
                "name": "Rahim",
                "phone": "01911111111",
                "email": "rahim@example.com",
                "password": "secret1",
                "ref_code": "USER01"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["user"]["status"], "FREE");
    assert_eq!(body["user"]["upline_code"], "USER01");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["access_token"].is_string());

    let upline = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let (_, me) = ctx.get("/v1/me", Some(&upline)).await;
    assert_eq!(me["balance_free"], 170);
    assert_eq!(me["ref_bonus_received"], 50);

    let (_, team) = ctx.get("/v1/me/team", Some(&upline)).await;
    assert_eq!(team["total_members"], 2);

    let (_, ledger) = ctx.get("/v1/me/ledger", Some(&upline)).await;
    assert_eq!(ledger["entries"][0]["reason"], "REFERRAL_BONUS");
    assert_eq!(ledger["entries"][0]["delta"], 50);
}

#[tokio::test]
async fn test_register_errors() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post(
            "/v1/auth/register",
            None,
            json!({
                "name": "Dup",
                "phone": FREE_PHONE,
                "email": "dup@example.com",
                "password": "secret1",
                "ref_code": "1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Phone already registered");

    let (status, body) = ctx
        .post(
            "/v1/auth/register",
            None,
            json!({
                "name": "Nobody",
                "phone": "01922222222",
                "email": "nobody@example.com",
                "password": "secret1",
                "ref_code": "NOPE"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid referral code");
    assert_eq!(body["details"][0]["field"], "ref_code");

    let (status, body) = ctx
        .post(
            "/v1/auth/register",
            None,
            json!({
                "name": "Bad Mail",
                "phone": "01933333333",
                "email": "not-an-email",
                "password": "secret1",
                "ref_code": "1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "email");
}

#[tokio::test]
async fn test_login_and_token_checks() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post(
            "/v1/auth/login",
            None,
            json!({ "phone": FREE_PHONE, "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = ctx.get("/v1/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.get("/v1/me", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let (status, _) = ctx.get("/v1/admin/stats", Some(&member)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = ctx.admin_token().await;
    let (status, _) = ctx.get("/v1/me", Some(&admin)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let ctx = TestContext::new().await;

    let (_, session) = ctx
        .post(
            "/v1/auth/login",
            None,
            json!({ "phone": FREE_PHONE, "password": SEED_PASSWORD }),
        )
        .await;
    let refresh = session["refresh_token"].as_str().unwrap();

    let (status, body) = ctx
        .post("/v1/auth/refresh", None, json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access_token"].as_str().unwrap();

    let (status, me) = ctx.get("/v1/me", Some(access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["phone"], FREE_PHONE);

    let access_as_refresh = session["access_token"].as_str().unwrap();
    let (status, _) = ctx
        .post(
            "/v1/auth/refresh",
            None,
            json!({ "refresh_token": access_as_refresh }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submission_approval_credits_once() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let admin = ctx.admin_token().await;

    let (_, tasks) = ctx.get("/v1/tasks", Some(&member)).await;
    assert_eq!(tasks.as_array().unwrap().len(), 2);
    let task_id = first_task_id(&ctx, &member).await;

    let (status, submission) = ctx
        .post(
            &format!("/v1/tasks/{}/submit", task_id),
            Some(&member),
            json!({ "proof_link": "https://imgur.com/yt" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(submission["status"], "PENDING");
    assert_eq!(submission["details"], "User Submitted");
    let submission_id = submission["id"].as_str().unwrap().to_string();

    let (status, pending) = ctx
        .get("/v1/admin/submissions?status=PENDING", Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let approve = format!("/v1/admin/submissions/{}/approve", submission_id);
    let (status, approved) = ctx.post(&approve, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");

    let (status, _) = ctx.post(&approve, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, me) = ctx.get("/v1/me", Some(&member)).await;
    assert_eq!(me["balance_free"], 125);

    let (_, mine) = ctx.get("/v1/submissions", Some(&member)).await;
    assert_eq!(mine[0]["status"], "APPROVED");
}

#[tokio::test]
async fn test_free_member_blocked_from_premium_task() {
    let ctx = TestContext::new().await;
    let pro = ctx.login(PRO_PHONE, SEED_PASSWORD).await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;

    let (_, tasks) = ctx.get("/v1/tasks", Some(&pro)).await;
    let premium = tasks
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["type"] == "PREMIUM")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = ctx
        .post(
            &format!("/v1/tasks/{}/submit", premium),
            Some(&member),
            json!({ "proof_link": "https://imgur.com/g" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_withdrawal_hold_and_refund() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let admin = ctx.admin_token().await;

    let (status, body) = ctx
        .post(
            "/v1/withdrawals",
            Some(&member),
            json!({ "amount": 50, "method": "BKASH", "number": "01700000000", "wallet": "FREE" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Minimum withdraw is 100");

    let (status, body) = ctx
        .post(
            "/v1/withdrawals",
            Some(&member),
            json!({ "amount": 500, "method": "BKASH", "number": "01700000000", "wallet": "FREE" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Insufficient balance");

    let (status, withdrawal) = ctx
        .post(
            "/v1/withdrawals",
            Some(&member),
            json!({ "amount": 100, "method": "NAGAD", "number": "01700000000", "wallet": "FREE" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, me) = ctx.get("/v1/me", Some(&member)).await;
    assert_eq!(me["balance_free"], 20);

    let reject = format!(
        "/v1/admin/withdrawals/{}/reject",
        withdrawal["id"].as_str().unwrap()
    );
    let (status, rejected) = ctx.post(&reject, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "REJECTED");

    let (status, _) = ctx.post(&reject, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, me) = ctx.get("/v1/me", Some(&member)).await;
    assert_eq!(me["balance_free"], 120);

    let (_, verification) = ctx.get("/v1/admin/ledger/verify", Some(&admin)).await;
    assert_eq!(verification["entries"], 2);
    assert_eq!(verification["intact"], true);
}

#[tokio::test]
async fn test_premium_claim_approval() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let admin = ctx.admin_token().await;

    let (status, request) = ctx
        .post(
            "/v1/premium",
            Some(&member),
            json!({ "method": "BKASH", "sender_number": "01700000000", "trx_id": "9XK2L" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["amount"], 500);

    let (status, _) = ctx
        .post(
            "/v1/premium",
            Some(&member),
            json!({ "method": "BKASH", "sender_number": "01700000000", "trx_id": "9XK2M" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = ctx
        .post(
            &format!("/v1/admin/premium/{}/approve", request["id"].as_str().unwrap()),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, me) = ctx.get("/v1/me", Some(&member)).await;
    assert_eq!(me["status"], "PREMIUM");

    let (_, tasks) = ctx.get("/v1/tasks", Some(&member)).await;
    assert_eq!(tasks.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_blocked_member_is_locked_out() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let admin = ctx.admin_token().await;

    let (_, me) = ctx.get("/v1/me", Some(&member)).await;
    let block = format!("/v1/admin/users/{}/block", me["id"].as_str().unwrap());
    let (status, profile) = ctx.post(&block, Some(&admin), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["is_blocked"], true);

    let (status, _) = ctx.get("/v1/me", Some(&member)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = ctx
        .post(
            "/v1/auth/login",
            None,
            json!({ "phone": FREE_PHONE, "password": SEED_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Account is blocked. Contact admin.");
}

#[tokio::test]
async fn test_quiz_flow() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;

    let (status, quiz) = ctx.get("/v1/quiz", Some(&member)).await;
    assert_eq!(status, StatusCode::OK);
    let answer = quiz["a"].as_u64().unwrap() + quiz["b"].as_u64().unwrap();

    let (status, body) = ctx
        .post("/v1/quiz/answer", Some(&member), json!({ "answer": answer + 1 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Wrong answer");

    let (status, outcome) = ctx
        .post("/v1/quiz/answer", Some(&member), json!({ "answer": answer }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["reward"], 1);
    assert_eq!(outcome["balance_free"], 121);
    assert_eq!(outcome["next"]["remaining"], 9);
}

#[tokio::test]
async fn test_admin_task_and_ticket_management() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;
    let admin = ctx.admin_token().await;

    let (status, task) = ctx
        .post(
            "/v1/admin/tasks",
            Some(&admin),
            json!({ "title": "Tiktok Follow", "amount": 4, "type": "FREE", "category": "TIKTOK" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, tasks) = ctx.get("/v1/tasks", Some(&member)).await;
    assert_eq!(tasks.as_array().unwrap().len(), 3);

    let (status, _) = ctx
        .send(
            "DELETE",
            &format!("/v1/admin/tasks/{}", task["id"].as_str().unwrap()),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, ticket) = ctx
        .post(
            "/v1/tickets",
            Some(&member),
            json!({ "subject": "Late payment", "message": "Still waiting" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, stats) = ctx.get("/v1/admin/stats", Some(&admin)).await;
    assert_eq!(stats["open_tickets"], 1);

    let (status, closed) = ctx
        .post(
            &format!("/v1/admin/tickets/{}/close", ticket["id"].as_str().unwrap()),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "CLOSED");
}

#[tokio::test]
async fn test_settings_update_and_snapshot_writes() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;

    let (_, mut settings) = ctx.get("/v1/settings", None).await;
    settings["min_withdraw"] = json!(250);

    let (status, updated) = ctx
        .send("PUT", "/v1/admin/settings", Some(&admin), Some(settings))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["min_withdraw"], 250);
    assert_eq!(ctx.snapshots.save_count(), 1);

    let (status, _) = ctx
        .send(
            "PUT",
            "/v1/admin/settings",
            Some(&admin),
            Some(json!({ "job_point_rate": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.snapshots.save_count(), 1);
}

#[tokio::test]
async fn test_unknown_status_filter_is_bad_request() {
    let ctx = TestContext::new().await;
    let admin = ctx.admin_token().await;

    let (status, body) = ctx
        .get("/v1/admin/submissions?status=MAYBE", Some(&admin))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_register_trims_phone_before_uniqueness_check() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post(
            "/v1/auth/register",
            None,
            json!({
                "name": "Padded",
                "phone": format!(" {} ", FREE_PHONE),
                "email": "padded@example.com",
                "password": "secret1",
                "ref_code": "1"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Phone already registered");

    let (_, health) = ctx.get("/health", None).await;
    assert_eq!(health["users"], 2);
}

#[tokio::test]
async fn test_change_password_and_quiz_answer_are_validated() {
    let ctx = TestContext::new().await;
    let member = ctx.login(FREE_PHONE, SEED_PASSWORD).await;

    let (status, body) = ctx
        .send(
            "PUT",
            "/v1/me/password",
            Some(&member),
            Some(json!({ "new_password": "123" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "new_password");

    let (status, _) = ctx
        .send(
            "PUT",
            "/v1/me/password",
            Some(&member),
            Some(json!({ "new_password": "654321" })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    ctx.login(FREE_PHONE, "654321").await;

    let (status, body) = ctx
        .post("/v1/quiz/answer", Some(&member), json!({ "answer": 1000 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Wrong answer");
}
