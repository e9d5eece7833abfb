//! BDD step definitions for the polling cycle

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_bot::poller::{CycleOutcome, Poller};
use homework_bot::practicum::PracticumClient;
use homework_bot::Config;

use crate::world::{HomeworkBotWorld, RecordingNotifier, ScriptedClient};

const START_CURSOR: u64 = 1_000;

fn build_poller(world: &mut HomeworkBotWorld) -> &mut Poller {
    if world.poller.is_none() {
        let config = world.config.clone().expect("credentials not configured");
        let client = world
            .api_client
            .clone()
            .unwrap_or_else(|| Arc::new(ScriptedClient::ok(200, r#"{"homeworks": []}"#)));
        let recorder = world
            .recorder
            .get_or_insert_with(|| Arc::new(RecordingNotifier::default()))
            .clone();
        let api = PracticumClient::new(config.endpoint.clone(), client);
        world.poller = Some(Poller::new(config, api, recorder).with_cursor(START_CURSOR));
    }
    world.poller.as_mut().expect("poller just built")
}

#[given("all credentials are configured")]
fn all_credentials(world: &mut HomeworkBotWorld) {
    world.config = Some(Config {
        endpoint: "http://practicum.test/statuses/".to_string(),
        practicum_token: Some("practicum-token".to_string()),
        telegram_token: Some("telegram-token".to_string()),
        telegram_chat_id: Some("42".to_string()),
        ..Config::default()
    });
}

#[given(expr = "the {string} credential is missing")]
fn credential_missing(world: &mut HomeworkBotWorld, name: String) {
    let config = world.config.as_mut().expect("credentials not configured");
    match name.as_str() {
        "PRACTICUM_TOKEN" => config.practicum_token = None,
        "TELEGRAM_TOKEN" => config.telegram_token = None,
        "TELEGRAM_CHAT_ID" => config.telegram_chat_id = None,
        other => panic!("unknown credential {other}"),
    }
}

#[given(expr = "the homework API answers with body {string}")]
fn api_answers_body(world: &mut HomeworkBotWorld, body: String) {
    world.api_client = Some(Arc::new(ScriptedClient::ok(200, &body)));
}

#[given(expr = "the homework API answers with status {int}")]
fn api_answers_status(world: &mut HomeworkBotWorld, status: u16) {
    world.api_client = Some(Arc::new(ScriptedClient::ok(status, "Service Unavailable")));
}

#[given("the homework API is unreachable")]
fn api_unreachable(world: &mut HomeworkBotWorld) {
    world.api_client = Some(Arc::new(ScriptedClient::unreachable()));
}

#[given("the messaging transport fails")]
fn messaging_fails(world: &mut HomeworkBotWorld) {
    world.recorder = Some(Arc::new(RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    }));
}

#[when("a poll cycle runs")]
async fn poll_cycle_runs(world: &mut HomeworkBotWorld) {
    run_cycles(world, 1).await;
}

#[when(expr = "{int} poll cycles run")]
async fn poll_cycles_run(world: &mut HomeworkBotWorld, count: usize) {
    run_cycles(world, count).await;
}

async fn run_cycles(world: &mut HomeworkBotWorld, count: usize) {
    let poller = build_poller(world);
    let cursor_before = poller.cursor();
    let mut outcomes = Vec::with_capacity(count);
    for _ in 0..count {
        outcomes.push(poller.run_cycle().await);
    }
    world.cursor_before = Some(cursor_before);
    world.outcomes.extend(outcomes);
}

async fn sent_messages(world: &HomeworkBotWorld) -> Vec<String> {
    world
        .recorder
        .as_ref()
        .expect("no notifier")
        .messages()
        .await
}

#[then("no message is sent")]
async fn no_message(world: &mut HomeworkBotWorld) {
    assert!(sent_messages(world).await.is_empty());
}

#[then(expr = "exactly {int} message(s) is/are sent")]
async fn exact_messages(world: &mut HomeworkBotWorld, count: usize) {
    assert_eq!(sent_messages(world).await.len(), count);
}

#[then(expr = "the last message is {string}")]
async fn last_message_is(world: &mut HomeworkBotWorld, expected: String) {
    let messages = sent_messages(world).await;
    assert_eq!(messages.last().expect("no messages"), &expected);
}

#[then(expr = "the last message starts with {string}")]
async fn last_message_starts_with(world: &mut HomeworkBotWorld, prefix: String) {
    let messages = sent_messages(world).await;
    let last = messages.last().expect("no messages");
    assert!(last.starts_with(&prefix), "{last}");
}

#[then(expr = "the last message contains {string}")]
async fn last_message_contains(world: &mut HomeworkBotWorld, fragment: String) {
    let messages = sent_messages(world).await;
    let last = messages.last().expect("no messages");
    assert!(last.contains(&fragment), "{last}");
}

#[then("every cycle failed")]
fn every_cycle_failed(world: &mut HomeworkBotWorld) {
    assert!(!world.outcomes.is_empty());
    assert!(world
        .outcomes
        .iter()
        .all(|o| matches!(o, CycleOutcome::Failed(_))));
}

#[then("the cursor has advanced")]
fn cursor_advanced(world: &mut HomeworkBotWorld) {
    let before = world.cursor_before.expect("no cycle ran");
    let poller = world.poller.as_ref().expect("no poller");
    assert!(poller.cursor() > before);
}

#[then("the cursor has not advanced")]
fn cursor_not_advanced(world: &mut HomeworkBotWorld) {
    let before = world.cursor_before.expect("no cycle ran");
    let poller = world.poller.as_ref().expect("no poller");
    assert_eq!(poller.cursor(), before);
}
