use hal9000_watchers::bootstrap::{run, WatcherSpec};

#[tokio::main]
async fn main() {
    run(WatcherSpec {
        source_name: "slack",
        category: "interaction",
        required_credentials: &["bot_token", "channel_id"],
        default_poll_secs: 5 * 60,
        delete_on_missing: true,
    })
    .await;
}
